use serde::{Deserialize, Serialize};

// Field presence is validated in the handlers so that a missing field yields
// the documented `{ "error": "<field> is required" }` body instead of a serde
// rejection.

// POST /auth/oauth
#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub expires_in: u64,
    pub expiration_time: String,
}

// POST /auth/login-complete
#[derive(Debug, Deserialize)]
pub struct LoginCompleteRequest {
    #[serde(default)]
    pub fitbit_user_id: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

// POST /api/health-report
#[derive(Debug, Deserialize)]
pub struct HealthReportRequest {
    #[serde(default, rename = "encodedId")]
    pub encoded_id: Option<String>,
    #[serde(default)]
    pub report_date: Option<String>,
}

// POST /api/report-comment
#[derive(Debug, Deserialize)]
pub struct ReportCommentRequest {
    #[serde(default, rename = "encodedId")]
    pub encoded_id: Option<String>,
    #[serde(default)]
    pub report_date: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReportCommentResponse {
    pub content: String,
}

// POST /api/exercise-recommendations
#[derive(Debug, Deserialize)]
pub struct ExerciseRequest {
    #[serde(default, rename = "encodedId")]
    pub encoded_id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExerciseResponse {
    pub exercise_month_analysis: String,
    pub exercise_yesterday_analysis: String,
    pub exercise_recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// POST /fcm/device-token
#[derive(Debug, Deserialize)]
pub struct DeviceTokenRequest {
    #[serde(default, rename = "fcmToken")]
    pub fcm_token: Option<String>,
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// Health check
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
