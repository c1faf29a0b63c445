pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Configuration;
pub use error::ServerError;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

use fitbit_oauth::FitbitOAuthClient;
use services::{Advisor, UserStore};

// Request bodies are single JSON documents; anything bigger is a bug.
const MAX_BODY_BYTES: usize = 16 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub user_store: Arc<dyn UserStore>,
    pub oauth_client: Arc<FitbitOAuthClient>,
    pub advisor: Arc<Advisor>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/auth/oauth", post(handlers::refresh_access_token))
        .route("/auth/login-complete", post(handlers::login_complete))
        .route("/api/health-report", post(handlers::health_report))
        .route("/api/report-comment", post(handlers::report_comment))
        .route(
            "/api/exercise-recommendations",
            post(handlers::exercise_recommendations),
        )
        .route("/fcm/device-token", post(handlers::save_device_token))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}
