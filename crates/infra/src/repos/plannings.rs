use crate::{db::Db, models::PlanningRow};
use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewPlanning {
    pub tournament_id: Uuid,
    pub type_tournoi: String,
    pub status: String,
    pub planning_data: serde_json::Value,
    pub total_matches: i32,
    pub ai_comments: Option<String>,
}

#[derive(Clone)]
pub struct PlanningRepo {
    pool: Db,
}

impl PlanningRepo {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: Uuid) -> SqlxResult<Option<PlanningRow>> {
        sqlx::query_as::<_, PlanningRow>(
            r#"
            SELECT id, tournament_id, type_tournoi, status, planning_data,
                   total_matches, ai_comments, created_at, updated_at
            FROM ai_tournament_planning
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list_by_tournament(&self, tournament_id: Uuid) -> SqlxResult<Vec<PlanningRow>> {
        sqlx::query_as::<_, PlanningRow>(
            r#"
            SELECT id, tournament_id, type_tournoi, status, planning_data,
                   total_matches, ai_comments, created_at, updated_at
            FROM ai_tournament_planning
            WHERE tournament_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(tournament_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Single-column status lookup.
    pub async fn get_status(&self, id: Uuid) -> SqlxResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT status FROM ai_tournament_planning WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Unconditional status overwrite; any string is accepted.
    pub async fn update_status(&self, id: Uuid, status: &str) -> SqlxResult<bool> {
        let result = sqlx::query(
            "UPDATE ai_tournament_planning SET status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Hard delete; matches and poules are removed by the store's cascade.
    pub async fn delete(&self, id: Uuid) -> SqlxResult<bool> {
        let result = sqlx::query("DELETE FROM ai_tournament_planning WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Insert used inside the orchestrator's transaction.
pub async fn insert_planning<'e>(
    executor: impl PgExecutor<'e>,
    data: NewPlanning,
) -> SqlxResult<PlanningRow> {
    sqlx::query_as::<_, PlanningRow>(
        r#"
        INSERT INTO ai_tournament_planning (tournament_id, type_tournoi, status,
                                            planning_data, total_matches, ai_comments)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, tournament_id, type_tournoi, status, planning_data,
                  total_matches, ai_comments, created_at, updated_at
        "#,
    )
    .bind(data.tournament_id)
    .bind(data.type_tournoi)
    .bind(data.status)
    .bind(data.planning_data)
    .bind(data.total_matches)
    .bind(data.ai_comments)
    .fetch_one(executor)
    .await
}
