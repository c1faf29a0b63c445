use axum::{extract::State, Json};

use crate::error::ServerError;
use crate::handlers::required;
use crate::models::HealthReportRequest;
use crate::AppState;

/// Returns the daily health report for a user and date, or `{}` when no
/// report exists for that day.
pub async fn health_report(
    State(state): State<AppState>,
    Json(request): Json<HealthReportRequest>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let encoded_id = required(request.encoded_id, "encodedId")?;
    let report_date = required(request.report_date, "report_date")?;

    let user = state.user_store.find_user(&encoded_id).await?;
    let report = state
        .user_store
        .find_daily_report(user.id, &report_date)
        .await?;

    match report {
        Some(report) => {
            let body =
                serde_json::to_value(report).map_err(|e| ServerError::Internal(e.to_string()))?;
            Ok(Json(body))
        }
        None => Ok(Json(serde_json::json!({}))),
    }
}
