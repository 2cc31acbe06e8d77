use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{
        header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE},
        Method, StatusCode,
    },
    routing::{get, patch, post},
    Router,
};
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::routes::{health, plannings, teams, tournaments, users};
use crate::state::AppState;

/// Build the Axum router: REST surface + health endpoints.
pub fn build_router(state: AppState) -> Router {
    // Rate limiting on the AI generation endpoints: each call is an
    // expensive upstream completion request.
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(6) // 1 token every 6 seconds = ~10/min
        .burst_size(5)
        .finish()
        .unwrap();

    let rate_limited_routes = Router::new()
        .route("/api/planning/generate", post(plannings::generate_planning))
        .route(
            "/api/planning/regenerate",
            post(plannings::regenerate_planning),
        )
        .layer(GovernorLayer::new(Arc::new(governor_conf)));

    Router::new()
        // Liveness endpoints
        .route("/api/health", get(health::health_check))
        .route("/api/health/detailed", get(health::detailed_health_check))
        .route("/api/health/ping", get(health::ping))
        // Tournament directory
        .route(
            "/api/tournaments",
            post(tournaments::create_tournament).get(tournaments::get_tournaments),
        )
        .route(
            "/api/tournaments/{tournament_id}",
            get(tournaments::get_tournament),
        )
        .route(
            "/api/tournaments/{tournament_id}/with-teams",
            get(tournaments::get_tournament_with_teams),
        )
        .route(
            "/api/tournaments/{tournament_id}/teams",
            get(tournaments::get_tournament_teams).post(tournaments::create_team),
        )
        .route(
            "/api/tournaments/{tournament_id}/status",
            patch(tournaments::update_tournament_status),
        )
        // Teams
        .route("/api/teams", get(teams::get_teams))
        .route("/api/teams/with-members", get(teams::get_teams_with_members))
        .route(
            "/api/teams/{team_id}",
            get(teams::get_team).delete(teams::delete_team),
        )
        .route("/api/teams/{team_id}/members", post(teams::add_team_members))
        // Planning reads and status updates
        .route(
            "/api/planning/{planning_id}/status",
            get(plannings::get_planning_status).patch(plannings::update_planning_status),
        )
        .route(
            "/api/planning/{planning_id}/details",
            get(plannings::get_planning_with_details),
        )
        // Users
        .route("/api/users", get(users::get_user_by_email))
        .route("/api/users/{user_id}", get(users::get_user_by_id))
        // Rate-limited generation routes
        .merge(rate_limited_routes)
        // App state (PgPool, planning generator, email)
        .with_state(state)
        // Useful default middlewares
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(60),
        ))
        .layer({
            let allowed_origins = std::env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000,http://localhost:3001".to_string());

            let origins: Vec<HeaderValue> = allowed_origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([CONTENT_TYPE, AUTHORIZATION])
                .allow_credentials(true)
        })
}
