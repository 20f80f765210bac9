//! Route definitions for the Farm Navigator platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Farm source data
        .nest("/farms", farm_routes())
        // Simulation runs
        .nest("/simulations", simulation_routes())
        // Saved plans and points
        .nest("/plans", plan_routes())
        // Photo checks
        .nest("/photo-checks", photo_check_routes())
        // Reward catalog
        .nest("/rewards", reward_routes())
}

/// Farm data routes
fn farm_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_farms))
        .route("/:farm_id", get(handlers::get_farm))
        .route("/:farm_id/ndvi", get(handlers::get_farm_ndvi))
        .route("/:farm_id/weather", get(handlers::get_farm_weather))
}

/// Simulation routes
fn simulation_routes() -> Router<AppState> {
    Router::new().route("/run", post(handlers::run_simulation))
}

/// Saved plan and point routes
fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_plans).post(handlers::create_plan))
        .route("/points/total", get(handlers::get_total_points))
        .route("/:plan_id", get(handlers::get_plan))
        .route("/:plan_id/export", get(handlers::export_plan_timeline))
}

/// Photo check routes
fn photo_check_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_photo_checks).post(handlers::create_photo_check),
        )
        .route("/:check_id", get(handlers::get_photo_check))
        .route("/:check_id/apply-fix", post(handlers::apply_photo_fix))
}

/// Reward routes
fn reward_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_rewards))
        .route("/:reward_id/redeem", post(handlers::redeem_reward))
}
