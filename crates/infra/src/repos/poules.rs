use crate::{db::Db, models::PouleRow};
use sqlx::{PgExecutor, Result as SqlxResult};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewPoule {
    pub poule_id: String,
    pub nom_poule: String,
    pub equipes: Vec<String>,
    pub nb_equipes: i32,
    pub nb_matches: i32,
}

#[derive(Clone)]
pub struct PouleRepo {
    pool: Db,
}

impl PouleRepo {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }

    pub async fn list_by_planning(&self, planning_id: Uuid) -> SqlxResult<Vec<PouleRow>> {
        sqlx::query_as::<_, PouleRow>(
            r#"
            SELECT id, planning_id, poule_id, nom_poule, equipes, nb_equipes,
                   nb_matches, created_at
            FROM ai_generated_poule
            WHERE planning_id = $1
            ORDER BY nom_poule ASC
            "#,
        )
        .bind(planning_id)
        .fetch_all(&self.pool)
        .await
    }
}

/// Batch insert used inside the orchestrator's transaction.
pub async fn insert_poules<'e>(
    executor: impl PgExecutor<'e>,
    planning_id: Uuid,
    poules: &[NewPoule],
) -> SqlxResult<Vec<PouleRow>> {
    if poules.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = sqlx::QueryBuilder::new(
        "INSERT INTO ai_generated_poule (planning_id, poule_id, nom_poule, equipes, \
         nb_equipes, nb_matches) ",
    );
    query.push_values(poules, |mut b, p| {
        b.push_bind(planning_id)
            .push_bind(&p.poule_id)
            .push_bind(&p.nom_poule)
            .push_bind(&p.equipes)
            .push_bind(p.nb_equipes)
            .push_bind(p.nb_matches);
    });
    query.push(
        " RETURNING id, planning_id, poule_id, nom_poule, equipes, nb_equipes, \
         nb_matches, created_at",
    );

    query.build_query_as::<PouleRow>().fetch_all(executor).await
}
