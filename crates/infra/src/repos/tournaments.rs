use crate::{db::Db, models::TournamentRow};
use chrono::{NaiveDate, NaiveTime};
use sqlx::Result as SqlxResult;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct CreateTournamentData {
    pub name: String,
    pub description: Option<String>,
    pub tournament_type: String,
    pub max_teams: i32,
    pub courts_available: i32,
    pub start_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub match_duration_minutes: i32,
    pub break_duration_minutes: i32,
    pub constraints: serde_json::Value,
    pub organizer_id: Uuid,
    pub status: String,
}

#[derive(Clone)]
pub struct TournamentRepo {
    pool: Db,
}

impl TournamentRepo {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: Uuid) -> SqlxResult<Option<TournamentRow>> {
        sqlx::query_as::<_, TournamentRow>(
            r#"
            SELECT id, name, description, tournament_type, max_teams, courts_available,
                   start_date, start_time, match_duration_minutes, break_duration_minutes,
                   constraints, organizer_id, status, created_at, updated_at
            FROM tournament
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn list(&self) -> SqlxResult<Vec<TournamentRow>> {
        sqlx::query_as::<_, TournamentRow>(
            r#"
            SELECT id, name, description, tournament_type, max_teams, courts_available,
                   start_date, start_time, match_duration_minutes, break_duration_minutes,
                   constraints, organizer_id, status, created_at, updated_at
            FROM tournament
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Create a new tournament
    pub async fn create(&self, data: CreateTournamentData) -> SqlxResult<TournamentRow> {
        sqlx::query_as::<_, TournamentRow>(
            r#"
            INSERT INTO tournament (name, description, tournament_type, max_teams,
                                    courts_available, start_date, start_time,
                                    match_duration_minutes, break_duration_minutes,
                                    constraints, organizer_id, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id, name, description, tournament_type, max_teams, courts_available,
                      start_date, start_time, match_duration_minutes, break_duration_minutes,
                      constraints, organizer_id, status, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.tournament_type)
        .bind(data.max_teams)
        .bind(data.courts_available)
        .bind(data.start_date)
        .bind(data.start_time)
        .bind(data.match_duration_minutes)
        .bind(data.break_duration_minutes)
        .bind(data.constraints)
        .bind(data.organizer_id)
        .bind(data.status)
        .fetch_one(&self.pool)
        .await
    }

    /// Unconditional status overwrite; any string is accepted.
    pub async fn update_status(&self, id: Uuid, status: &str) -> SqlxResult<Option<TournamentRow>> {
        sqlx::query_as::<_, TournamentRow>(
            r#"
            UPDATE tournament
            SET status = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, tournament_type, max_teams, courts_available,
                      start_date, start_time, match_duration_minutes, break_duration_minutes,
                      constraints, organizer_id, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }
}
