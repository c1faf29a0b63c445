mod device_token;
mod exercise;
mod health_report;
mod login_complete;
mod refresh_token;
mod report_comment;

pub use device_token::save_device_token;
pub use exercise::exercise_recommendations;
pub use health_report::health_report;
pub use login_complete::login_complete;
pub use refresh_token::refresh_access_token;
pub use report_comment::report_comment;

use axum::Json;

use crate::error::ServerError;
use crate::models::HealthResponse;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Caller input gate shared by every handler: the field must be present and
/// non-blank before any store or provider call is made.
pub(crate) fn required(value: Option<String>, name: &str) -> Result<String, ServerError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServerError::Validation(format!("{name} is required")))
}
