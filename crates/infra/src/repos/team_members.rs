use crate::{
    db::Db,
    models::{TeamMemberRow, TeamMemberWithEmailRow},
};
use sqlx::Result as SqlxResult;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewTeamMember {
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub position: Option<String>,
    pub status: String,
}

#[derive(Clone)]
pub struct TeamMemberRepo {
    pool: Db,
}

impl TeamMemberRepo {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: NewTeamMember) -> SqlxResult<TeamMemberRow> {
        sqlx::query_as::<_, TeamMemberRow>(
            r#"
            INSERT INTO team_member (team_id, user_id, role, position, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, team_id, user_id, role, position, status, created_at
            "#,
        )
        .bind(data.team_id)
        .bind(data.user_id)
        .bind(data.role)
        .bind(data.position)
        .bind(data.status)
        .fetch_one(&self.pool)
        .await
    }

    /// Batch roster insert; returns the inserted rows.
    pub async fn create_many(&self, members: &[NewTeamMember]) -> SqlxResult<Vec<TeamMemberRow>> {
        if members.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = sqlx::QueryBuilder::new(
            "INSERT INTO team_member (team_id, user_id, role, position, status) ",
        );
        query.push_values(members, |mut b, member| {
            b.push_bind(member.team_id)
                .push_bind(member.user_id)
                .push_bind(&member.role)
                .push_bind(&member.position)
                .push_bind(&member.status);
        });
        query.push(" RETURNING id, team_id, user_id, role, position, status, created_at");

        query
            .build_query_as::<TeamMemberRow>()
            .fetch_all(&self.pool)
            .await
    }

    pub async fn list_by_team(&self, team_id: Uuid) -> SqlxResult<Vec<TeamMemberRow>> {
        sqlx::query_as::<_, TeamMemberRow>(
            r#"
            SELECT id, team_id, user_id, role, position, status, created_at
            FROM team_member
            WHERE team_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Roster enriched with each member's profile email.
    pub async fn list_by_team_with_email(
        &self,
        team_id: Uuid,
    ) -> SqlxResult<Vec<TeamMemberWithEmailRow>> {
        sqlx::query_as::<_, TeamMemberWithEmailRow>(
            r#"
            SELECT tm.id, tm.team_id, tm.user_id, tm.role, tm.position, tm.status,
                   p.email, tm.created_at
            FROM team_member tm
            JOIN profile p ON p.id = tm.user_id
            WHERE tm.team_id = $1
            ORDER BY tm.created_at ASC
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
    }
}
