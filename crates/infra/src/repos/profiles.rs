use crate::{db::Db, models::ProfileRow};
use sqlx::Result as SqlxResult;
use uuid::Uuid;

#[derive(Clone)]
pub struct ProfileRepo {
    pool: Db,
}

impl ProfileRepo {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: Uuid) -> SqlxResult<Option<ProfileRow>> {
        sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, email, first_name, last_name, display_name, phone, created_at, updated_at
            FROM profile
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn get_by_email(&self, email: &str) -> SqlxResult<Option<ProfileRow>> {
        sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, email, first_name, last_name, display_name, phone, created_at, updated_at
            FROM profile
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }
}
