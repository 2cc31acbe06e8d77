/// Alias used by every repo so the pool type is named in one place.
pub type Db = sqlx::PgPool;
