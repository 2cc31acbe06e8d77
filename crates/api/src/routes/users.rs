use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use infra::models::ProfileRow;
use infra::repos::ProfileRepo;

use crate::error::AppError;
use crate::response::ApiResponse;
use crate::services::spawn_invitation;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserByEmailQuery {
    pub email: String,
}

pub async fn get_user_by_id(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProfileRow>>, AppError> {
    let user = ProfileRepo::new(state.db.clone())
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Utilisateur avec l'ID {user_id} non trouvé"))
        })?;

    let message = format!("Utilisateur {} récupéré avec succès", user.email);
    Ok(Json(ApiResponse::ok(message, user)))
}

/// Lookup by email; an unknown address gets an invitation email
/// (fire-and-forget) and still answers success with no data.
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Query(query): Query<UserByEmailQuery>,
) -> Result<Json<ApiResponse<ProfileRow>>, AppError> {
    let user = ProfileRepo::new(state.db.clone())
        .get_by_email(&query.email)
        .await?;

    match user {
        Some(user) => {
            let message = format!("Utilisateur {} récupéré avec succès", user.email);
            Ok(Json(ApiResponse::ok(message, user)))
        }
        None => {
            if let Some(email_service) = state.email_service() {
                spawn_invitation(email_service.clone(), query.email.clone());
            }
            Ok(Json(ApiResponse::ok_empty(format!(
                "Utilisateur avec l'email {} non trouvé, invitation envoyée",
                query.email
            ))))
        }
    }
}
