use std::collections::BTreeMap;
use std::time::Instant;

use axum::{extract::State, Json};
use chrono::Utc;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::json;

use crate::state::AppState;

static STARTED_AT: Lazy<Instant> = Lazy::new(Instant::now);

/// Pin the start instant as early as main() wants to.
pub fn init_uptime() {
    Lazy::force(&STARTED_AT);
}

fn app_version() -> String {
    std::env::var("APP_VERSION").unwrap_or_else(|_| "1.0.0".to_string())
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<Utc>,
    pub version: String,
    pub services: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct DetailedHealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<Utc>,
    pub version: String,
    pub uptime: String,
    pub services: BTreeMap<String, serde_json::Value>,
}

async fn database_healthy(state: &AppState) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db)
        .await?;
    Ok(())
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut services = BTreeMap::new();

    services.insert(
        "database".to_string(),
        match database_healthy(&state).await {
            Ok(()) => "healthy".to_string(),
            Err(_) => "unhealthy".to_string(),
        },
    );
    services.insert("ai_planning".to_string(), "healthy".to_string());
    services.insert(
        "email".to_string(),
        if state.email_service().is_some() {
            "healthy".to_string()
        } else {
            "disabled".to_string()
        },
    );

    let status = if services.values().any(|s| s == "unhealthy") {
        "degraded"
    } else {
        "healthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        timestamp: Utc::now(),
        version: app_version(),
        services,
    })
}

pub async fn detailed_health_check(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    let now = Utc::now();
    let mut services = BTreeMap::new();

    let db_detail = match database_healthy(&state).await {
        Ok(()) => json!({
            "status": "healthy",
            "last_check": now,
            "details": "Connexion base de données OK"
        }),
        Err(e) => json!({
            "status": "unhealthy",
            "last_check": now,
            "details": format!("Erreur connexion DB: {e}")
        }),
    };
    services.insert("database".to_string(), db_detail);

    services.insert(
        "ai_planning".to_string(),
        json!({
            "status": "healthy",
            "last_check": now,
            "details": "Service disponible"
        }),
    );

    services.insert(
        "email".to_string(),
        json!({
            "status": if state.email_service().is_some() { "healthy" } else { "disabled" },
            "last_check": now,
            "details": if state.email_service().is_some() {
                "Service disponible"
            } else {
                "Configuration absente"
            }
        }),
    );

    let unhealthy = services
        .values()
        .filter(|s| s.get("status").and_then(|v| v.as_str()) == Some("unhealthy"))
        .count();
    let status = match unhealthy {
        0 => "healthy",
        n if n < services.len() => "degraded",
        _ => "unhealthy",
    };

    let uptime_seconds = STARTED_AT.elapsed().as_secs();
    let uptime = format!("{}h {}m", uptime_seconds / 3600, (uptime_seconds % 3600) / 60);

    Json(DetailedHealthResponse {
        status: status.to_string(),
        timestamp: now,
        version: app_version(),
        uptime,
        services,
    })
}

pub async fn ping() -> Json<serde_json::Value> {
    Json(json!({ "status": "pong", "timestamp": Utc::now() }))
}
