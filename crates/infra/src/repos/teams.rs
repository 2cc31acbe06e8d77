use crate::{db::Db, models::TeamRow};
use sqlx::Result as SqlxResult;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CreateTeamData {
    pub name: String,
    pub description: String,
    pub tournament_id: Uuid,
    pub captain_id: Option<Uuid>,
    pub contact_email: String,
    pub contact_phone: String,
    pub skill_level: String,
    pub notes: String,
}

#[derive(Clone)]
pub struct TeamRepo {
    pool: Db,
}

impl TeamRepo {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: Uuid) -> SqlxResult<Option<TeamRow>> {
        sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT id, name, description, tournament_id, captain_id, contact_email,
                   contact_phone, skill_level, notes, created_at, updated_at
            FROM team
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// All teams, optionally restricted to one tournament.
    pub async fn list(&self, tournament_id: Option<Uuid>) -> SqlxResult<Vec<TeamRow>> {
        sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT id, name, description, tournament_id, captain_id, contact_email,
                   contact_phone, skill_level, notes, created_at, updated_at
            FROM team
            WHERE ($1::uuid IS NULL OR tournament_id = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Teams of one tournament, ordered by name for stable display.
    pub async fn list_by_tournament(&self, tournament_id: Uuid) -> SqlxResult<Vec<TeamRow>> {
        sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT id, name, description, tournament_id, captain_id, contact_email,
                   contact_phone, skill_level, notes, created_at, updated_at
            FROM team
            WHERE tournament_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn count_by_tournament(&self, tournament_id: Uuid) -> SqlxResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM team WHERE tournament_id = $1")
            .bind(tournament_id)
            .fetch_one(&self.pool)
            .await
    }

    /// Grouped team counts for a set of tournaments in a single query.
    pub async fn count_by_tournaments(&self, ids: &[Uuid]) -> SqlxResult<Vec<(Uuid, i64)>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, (Uuid, i64)>(
            r#"
            SELECT tournament_id, COUNT(*)
            FROM team
            WHERE tournament_id = ANY($1::uuid[])
            GROUP BY tournament_id
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn create(&self, data: CreateTeamData) -> SqlxResult<TeamRow> {
        sqlx::query_as::<_, TeamRow>(
            r#"
            INSERT INTO team (name, description, tournament_id, captain_id,
                              contact_email, contact_phone, skill_level, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, description, tournament_id, captain_id, contact_email,
                      contact_phone, skill_level, notes, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.tournament_id)
        .bind(data.captain_id)
        .bind(data.contact_email)
        .bind(data.contact_phone)
        .bind(data.skill_level)
        .bind(data.notes)
        .fetch_one(&self.pool)
        .await
    }

    /// Hard delete; members are removed by the store's cascade.
    pub async fn delete(&self, id: Uuid) -> SqlxResult<bool> {
        let result = sqlx::query("DELETE FROM team WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
