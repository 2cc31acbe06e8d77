use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use infra::models::{TeamMemberRow, TeamRow};
use infra::repos::NewTeamMember;

use crate::error::AppError;
use crate::response::ApiResponse;
use crate::services::{TeamWithMembers, TournamentService};
use crate::state::AppState;

const MEMBER_ROLES: [&str; 2] = ["captain", "player"];
const MEMBER_STATUSES: [&str; 3] = ["active", "inactive", "pending"];

#[derive(Debug, Deserialize)]
pub struct TeamsQuery {
    #[serde(default)]
    pub tournament_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct AddTeamMemberRequest {
    pub user_id: Uuid,
    #[serde(default = "default_member_status")]
    pub status: String,
    #[serde(default = "default_member_role")]
    pub role: String,
    #[serde(default)]
    pub position: Option<String>,
}

fn default_member_status() -> String {
    "active".to_string()
}

fn default_member_role() -> String {
    "player".to_string()
}

#[derive(Debug, Deserialize)]
pub struct AddTeamMembersRequest {
    pub team_id: Uuid,
    pub players: Vec<AddTeamMemberRequest>,
}

impl AddTeamMembersRequest {
    fn validate(&self) -> Result<(), AppError> {
        if self.players.is_empty() {
            return Err(AppError::Validation(
                "Au moins un joueur est requis".to_string(),
            ));
        }
        for player in &self.players {
            if !MEMBER_ROLES.contains(&player.role.as_str()) {
                return Err(AppError::Validation(format!(
                    "role invalide: '{}'",
                    player.role
                )));
            }
            if !MEMBER_STATUSES.contains(&player.status.as_str()) {
                return Err(AppError::Validation(format!(
                    "status invalide: '{}'",
                    player.status
                )));
            }
        }
        Ok(())
    }
}

pub async fn get_teams(
    State(state): State<AppState>,
    Query(query): Query<TeamsQuery>,
) -> Result<Json<ApiResponse<Vec<TeamRow>>>, AppError> {
    let teams = TournamentService::new(state.db.clone())
        .get_teams(query.tournament_id)
        .await?;

    Ok(Json(ApiResponse::ok(
        format!("{} équipe(s) récupérée(s) avec succès", teams.len()),
        teams,
    )))
}

pub async fn get_teams_with_members(
    State(state): State<AppState>,
    Query(query): Query<TeamsQuery>,
) -> Result<Json<ApiResponse<Vec<TeamWithMembers>>>, AppError> {
    let teams = TournamentService::new(state.db.clone())
        .get_teams_with_members(query.tournament_id)
        .await?;

    Ok(Json(ApiResponse::ok(
        format!("{} équipe(s) récupérée(s) avec succès", teams.len()),
        teams,
    )))
}

pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<ApiResponse<TeamRow>>, AppError> {
    let team = TournamentService::new(state.db.clone())
        .get_team_by_id(team_id)
        .await?;

    Ok(Json(ApiResponse::ok("Équipe récupérée avec succès", team)))
}

pub async fn delete_team(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<ApiResponse<TeamRow>>, AppError> {
    TournamentService::new(state.db.clone())
        .delete_team_by_id(team_id)
        .await?;

    Ok(Json(ApiResponse::ok_empty("Équipe supprimée avec succès")))
}

pub async fn add_team_members(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    Json(request): Json<AddTeamMembersRequest>,
) -> Result<Json<ApiResponse<Vec<TeamMemberRow>>>, AppError> {
    if request.team_id != team_id {
        return Err(AppError::Validation(
            "L'ID de l'équipe dans l'URL ne correspond pas à celui de la requête".to_string(),
        ));
    }
    request.validate()?;

    let members: Vec<NewTeamMember> = request
        .players
        .into_iter()
        .map(|p| NewTeamMember {
            team_id,
            user_id: p.user_id,
            role: p.role,
            position: p.position,
            status: p.status,
        })
        .collect();

    let added = TournamentService::new(state.db.clone())
        .add_team_members(members)
        .await?;

    Ok(Json(ApiResponse::ok(
        format!("{} joueur(s) ajouté(s) à l'équipe avec succès", added.len()),
        added,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_roster_is_rejected() {
        let request: AddTeamMembersRequest = serde_json::from_value(json!({
            "team_id": "550e8400-e29b-41d4-a716-446655440000",
            "players": []
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn member_defaults_and_role_validation() {
        let request: AddTeamMembersRequest = serde_json::from_value(json!({
            "team_id": "550e8400-e29b-41d4-a716-446655440000",
            "players": [
                { "user_id": "550e8400-e29b-41d4-a716-446655440001" }
            ]
        }))
        .unwrap();
        assert_eq!(request.players[0].role, "player");
        assert_eq!(request.players[0].status, "active");
        assert!(request.validate().is_ok());

        let bad: AddTeamMembersRequest = serde_json::from_value(json!({
            "team_id": "550e8400-e29b-41d4-a716-446655440000",
            "players": [
                { "user_id": "550e8400-e29b-41d4-a716-446655440001", "role": "coach" }
            ]
        }))
        .unwrap();
        assert!(bad.validate().is_err());
    }
}
