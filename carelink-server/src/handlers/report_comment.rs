use axum::{extract::State, Json};
use chrono::NaiveDate;

use crate::error::ServerError;
use crate::handlers::required;
use crate::models::{ReportCommentRequest, ReportCommentResponse};
use crate::AppState;

const NO_DOCTOR_ADVICE: &str = "의사 조언이 없습니다.";
const NO_GUARDIAN_ADVICE: &str = "보호자 조언이 없습니다.";

/// Dates arrive from the app in loose shapes ("2025 / 01 / 03"); strip
/// whitespace, normalize slashes and insist the result is a real date.
pub(crate) fn clean_report_date(raw: &str) -> Result<String, ServerError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == '/' { '-' } else { c })
        .collect();

    let parsed = NaiveDate::parse_from_str(&cleaned, "%Y-%m-%d")
        .map_err(|_| ServerError::Validation(format!("Invalid date format: {raw}")))?;

    Ok(parsed.format("%Y-%m-%d").to_string())
}

/// Fetches the caregiver or doctor comment attached to a user's report,
/// falling back to the role-specific "no advice" label.
pub async fn report_comment(
    State(state): State<AppState>,
    Json(request): Json<ReportCommentRequest>,
) -> Result<Json<ReportCommentResponse>, ServerError> {
    let encoded_id = required(request.encoded_id, "encodedId")?;
    let report_date = clean_report_date(&required(request.report_date, "report_date")?)?;
    let role = required(request.role, "role")?.to_lowercase();

    let user = state.user_store.find_user(&encoded_id).await?;
    let comment = state
        .user_store
        .find_report_comment(user.id, &report_date, &role)
        .await?;

    let label = if role == "doctor" {
        NO_DOCTOR_ADVICE
    } else {
        NO_GUARDIAN_ADVICE
    };

    Ok(Json(ReportCommentResponse {
        content: comment.unwrap_or_else(|| label.to_string()),
    }))
}
