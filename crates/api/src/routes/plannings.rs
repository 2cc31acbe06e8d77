use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use infra::models::PlanningRow;

use crate::error::AppError;
use crate::response::ApiResponse;
use crate::services::{PlanningService, PlanningWithDetails};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GeneratePlanningRequest {
    pub tournament_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct RegeneratePlanningRequest {
    pub planning_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlanningStatusRequest {
    pub status: String,
}

pub async fn generate_planning(
    State(state): State<AppState>,
    Json(request): Json<GeneratePlanningRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PlanningRow>>), AppError> {
    let planning = PlanningService::new(state.db.clone(), state.generator.clone())
        .generate_planning(request.tournament_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Planning généré avec succès", planning)),
    ))
}

pub async fn regenerate_planning(
    State(state): State<AppState>,
    Json(request): Json<RegeneratePlanningRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PlanningRow>>), AppError> {
    let planning = PlanningService::new(state.db.clone(), state.generator.clone())
        .regenerate_planning(request.planning_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Planning régénéré avec succès", planning)),
    ))
}

pub async fn get_planning_status(
    State(state): State<AppState>,
    Path(planning_id): Path<Uuid>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let status = PlanningService::new(state.db.clone(), state.generator.clone())
        .get_planning_status(planning_id)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Statut du planning récupéré avec succès",
        json!({ "planning_id": planning_id, "status": status }),
    )))
}

pub async fn get_planning_with_details(
    State(state): State<AppState>,
    Path(planning_id): Path<Uuid>,
) -> Result<Json<ApiResponse<PlanningWithDetails>>, AppError> {
    let details = PlanningService::new(state.db.clone(), state.generator.clone())
        .get_planning_with_details(planning_id)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Planning récupéré avec succès",
        details,
    )))
}

pub async fn update_planning_status(
    State(state): State<AppState>,
    Path(planning_id): Path<Uuid>,
    Json(request): Json<UpdatePlanningStatusRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    PlanningService::new(state.db.clone(), state.generator.clone())
        .update_planning_status(planning_id, &request.status)
        .await?;

    Ok(Json(ApiResponse::ok(
        format!("Statut du planning mis à jour vers '{}'", request.status),
        json!({ "planning_id": planning_id, "new_status": request.status }),
    )))
}
