use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub display_name: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TournamentRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub tournament_type: String,
    pub max_teams: i32,
    pub courts_available: i32,
    pub start_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub match_duration_minutes: i32,
    pub break_duration_minutes: i32,
    pub constraints: serde_json::Value, // JSONB field
    pub organizer_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TeamRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub tournament_id: Uuid,
    pub captain_id: Option<Uuid>,
    pub contact_email: String,
    pub contact_phone: String,
    pub skill_level: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TeamMemberRow {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub position: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// `team_member` joined with the owning profile's email (roster read path).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TeamMemberWithEmailRow {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub position: Option<String>,
    pub status: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PlanningRow {
    pub id: Uuid,
    pub tournament_id: Uuid,
    pub type_tournoi: String,
    pub status: String,
    pub planning_data: serde_json::Value, // JSONB field
    pub total_matches: i32,
    pub ai_comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct GeneratedMatchRow {
    pub id: Uuid,
    pub planning_id: Uuid,
    pub match_id_ai: String,
    pub equipe_a: String,
    pub equipe_b: String,
    pub terrain: i32,
    pub horaire_prevu: DateTime<Utc>,
    pub phase: String,
    pub journee: Option<i32>,
    pub poule_id: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PouleRow {
    pub id: Uuid,
    pub planning_id: Uuid,
    pub poule_id: String,
    pub nom_poule: String,
    pub equipes: Vec<String>,
    pub nb_equipes: i32,
    pub nb_matches: i32,
    pub created_at: DateTime<Utc>,
}
