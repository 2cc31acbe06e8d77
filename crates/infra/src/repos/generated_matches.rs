use crate::{db::Db, models::GeneratedMatchRow};
use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewGeneratedMatch {
    pub match_id_ai: String,
    pub equipe_a: String,
    pub equipe_b: String,
    pub terrain: i32,
    pub horaire_prevu: DateTime<Utc>,
    pub phase: String,
    pub journee: Option<i32>,
    pub poule_id: Option<String>,
}

#[derive(Clone)]
pub struct GeneratedMatchRepo {
    pool: Db,
}

impl GeneratedMatchRepo {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }

    /// Matches of one planning, in schedule order.
    pub async fn list_by_planning(&self, planning_id: Uuid) -> SqlxResult<Vec<GeneratedMatchRow>> {
        sqlx::query_as::<_, GeneratedMatchRow>(
            r#"
            SELECT id, planning_id, match_id_ai, equipe_a, equipe_b, terrain,
                   horaire_prevu, phase, journee, poule_id, status, created_at
            FROM ai_generated_match
            WHERE planning_id = $1
            ORDER BY horaire_prevu ASC, created_at ASC
            "#,
        )
        .bind(planning_id)
        .fetch_all(&self.pool)
        .await
    }
}

/// Batch insert used inside the orchestrator's transaction.
pub async fn insert_matches<'e>(
    executor: impl PgExecutor<'e>,
    planning_id: Uuid,
    matches: &[NewGeneratedMatch],
) -> SqlxResult<Vec<GeneratedMatchRow>> {
    if matches.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = sqlx::QueryBuilder::new(
        "INSERT INTO ai_generated_match (planning_id, match_id_ai, equipe_a, equipe_b, \
         terrain, horaire_prevu, phase, journee, poule_id) ",
    );
    query.push_values(matches, |mut b, m| {
        b.push_bind(planning_id)
            .push_bind(&m.match_id_ai)
            .push_bind(&m.equipe_a)
            .push_bind(&m.equipe_b)
            .push_bind(m.terrain)
            .push_bind(m.horaire_prevu)
            .push_bind(&m.phase)
            .push_bind(m.journee)
            .push_bind(&m.poule_id);
    });
    query.push(
        " RETURNING id, planning_id, match_id_ai, equipe_a, equipe_b, terrain, \
         horaire_prevu, phase, journee, poule_id, status, created_at",
    );

    query
        .build_query_as::<GeneratedMatchRow>()
        .fetch_all(executor)
        .await
}
