use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use infra::models::{TeamRow, TournamentRow};
use infra::repos::{CreateTeamData, CreateTournamentData};

use crate::error::AppError;
use crate::response::ApiResponse;
use crate::services::{TournamentService, TournamentWithCount, TournamentWithTeams};
use crate::state::AppState;

pub const SKILL_LEVELS: [&str; 5] = ["debutant", "amateur", "confirme", "expert", "professionnel"];

#[derive(Debug, Deserialize)]
pub struct CreateTournamentRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub tournament_type: String,
    pub max_teams: i32,
    pub courts_available: i32,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default = "default_match_duration")]
    pub match_duration_minutes: i32,
    #[serde(default = "default_break_duration")]
    pub break_duration_minutes: i32,
    #[serde(default = "default_constraints")]
    pub constraints: serde_json::Value,
    pub organizer_id: Uuid,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_match_duration() -> i32 {
    15
}

fn default_break_duration() -> i32 {
    5
}

fn default_constraints() -> serde_json::Value {
    json!({})
}

fn default_status() -> String {
    "draft".to_string()
}

impl CreateTournamentRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Le nom du tournoi est requis".to_string()));
        }
        if self.tournament_type.trim().is_empty() {
            return Err(AppError::Validation("Le type de tournoi est requis".to_string()));
        }
        if !(2..=64).contains(&self.max_teams) {
            return Err(AppError::Validation(
                "max_teams doit être compris entre 2 et 64".to_string(),
            ));
        }
        if !(1..=20).contains(&self.courts_available) {
            return Err(AppError::Validation(
                "courts_available doit être compris entre 1 et 20".to_string(),
            ));
        }
        if !(5..=120).contains(&self.match_duration_minutes) {
            return Err(AppError::Validation(
                "match_duration_minutes doit être compris entre 5 et 120".to_string(),
            ));
        }
        if !(0..=60).contains(&self.break_duration_minutes) {
            return Err(AppError::Validation(
                "break_duration_minutes doit être compris entre 0 et 60".to_string(),
            ));
        }
        Ok(())
    }

    fn into_data(self) -> CreateTournamentData {
        CreateTournamentData {
            name: self.name,
            description: self.description,
            tournament_type: self.tournament_type,
            max_teams: self.max_teams,
            courts_available: self.courts_available,
            start_date: self.start_date,
            start_time: self.start_time,
            match_duration_minutes: self.match_duration_minutes,
            break_duration_minutes: self.break_duration_minutes,
            constraints: self.constraints,
            organizer_id: self.organizer_id,
            status: self.status,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub tournament_id: Uuid,
    #[serde(default)]
    pub captain_id: Option<Uuid>,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default = "default_skill_level")]
    pub skill_level: String,
    #[serde(default)]
    pub notes: String,
}

fn default_skill_level() -> String {
    "debutant".to_string()
}

impl CreateTeamRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Le nom de l'équipe est requis".to_string()));
        }
        if !SKILL_LEVELS.contains(&self.skill_level.as_str()) {
            return Err(AppError::Validation(format!(
                "skill_level invalide: '{}'",
                self.skill_level
            )));
        }
        Ok(())
    }

    pub fn into_data(self) -> CreateTeamData {
        CreateTeamData {
            name: self.name,
            description: self.description,
            tournament_id: self.tournament_id,
            captain_id: self.captain_id,
            contact_email: self.contact_email,
            contact_phone: self.contact_phone,
            skill_level: self.skill_level,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateTournamentStatusRequest {
    pub status: String,
}

pub async fn create_tournament(
    State(state): State<AppState>,
    Json(request): Json<CreateTournamentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TournamentRow>>), AppError> {
    request.validate()?;

    let tournament = TournamentService::new(state.db.clone())
        .create_tournament(request.into_data())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Tournoi créé avec succès", tournament)),
    ))
}

pub async fn get_tournaments(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TournamentWithCount>>>, AppError> {
    let tournaments = TournamentService::new(state.db.clone())
        .get_tournaments()
        .await?;

    Ok(Json(ApiResponse::ok(
        format!("{} tournoi(s) récupéré(s) avec succès", tournaments.len()),
        tournaments,
    )))
}

pub async fn get_tournament(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
) -> Result<Json<ApiResponse<TournamentWithCount>>, AppError> {
    let tournament = TournamentService::new(state.db.clone())
        .get_tournament_by_id(tournament_id)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Tournoi récupéré avec succès",
        tournament,
    )))
}

pub async fn get_tournament_with_teams(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
) -> Result<Json<ApiResponse<TournamentWithTeams>>, AppError> {
    let data = TournamentService::new(state.db.clone())
        .get_tournament_with_teams(tournament_id)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Tournoi et équipes récupérés avec succès",
        data,
    )))
}

pub async fn get_tournament_teams(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<TeamRow>>>, AppError> {
    let teams = TournamentService::new(state.db.clone())
        .get_tournament_teams(tournament_id)
        .await?;

    Ok(Json(ApiResponse::ok(
        format!("{} équipe(s) récupérée(s) avec succès", teams.len()),
        teams,
    )))
}

pub async fn update_tournament_status(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
    Json(request): Json<UpdateTournamentStatusRequest>,
) -> Result<Json<ApiResponse<TournamentRow>>, AppError> {
    let updated = TournamentService::new(state.db.clone())
        .update_tournament_status(tournament_id, &request.status)
        .await?;

    Ok(Json(ApiResponse::ok(
        format!("Statut du tournoi mis à jour vers '{}'", request.status),
        updated,
    )))
}

pub async fn create_team(
    State(state): State<AppState>,
    Path(tournament_id): Path<Uuid>,
    Json(request): Json<CreateTeamRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TeamRow>>), AppError> {
    if request.tournament_id != tournament_id {
        return Err(AppError::Validation(
            "L'ID du tournoi dans l'URL ne correspond pas à celui de la requête".to_string(),
        ));
    }
    request.validate()?;

    let team = TournamentService::new(state.db.clone())
        .create_team(request.into_data())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Équipe créée avec succès", team)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateTournamentRequest {
        serde_json::from_value(json!({
            "name": "Tournoi Test",
            "tournament_type": "round_robin",
            "max_teams": 8,
            "courts_available": 2,
            "start_date": "2025-07-15",
            "organizer_id": "550e8400-e29b-41d4-a716-446655440001"
        }))
        .unwrap()
    }

    #[test]
    fn defaults_are_applied() {
        let r = request();
        assert_eq!(r.match_duration_minutes, 15);
        assert_eq!(r.break_duration_minutes, 5);
        assert_eq!(r.status, "draft");
        assert!(r.validate().is_ok());
    }

    #[test]
    fn max_teams_bounds_are_enforced() {
        let mut r = request();
        r.max_teams = 1;
        assert!(matches!(r.validate(), Err(AppError::Validation(msg)) if msg.contains("max_teams")));

        let mut r = request();
        r.max_teams = 65;
        assert!(r.validate().is_err());
    }

    #[test]
    fn courts_bounds_are_enforced() {
        let mut r = request();
        r.courts_available = 0;
        assert!(
            matches!(r.validate(), Err(AppError::Validation(msg)) if msg.contains("courts_available"))
        );

        let mut r = request();
        r.courts_available = 21;
        assert!(r.validate().is_err());
    }

    #[test]
    fn unknown_skill_level_is_rejected() {
        let team: CreateTeamRequest = serde_json::from_value(json!({
            "name": "Équipe A",
            "tournament_id": "550e8400-e29b-41d4-a716-446655440000",
            "skill_level": "galactique"
        }))
        .unwrap();
        assert!(team.validate().is_err());
    }
}
