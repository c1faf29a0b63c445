use axum::{extract::State, Json};

use crate::error::ServerError;
use crate::handlers::required;
use crate::models::{LoginCompleteRequest, MessageResponse};
use crate::AppState;

/// Stores the token pair handed over by the Fitbit login flow. The row must
/// already exist; a zero-row update means the Fitbit user is unknown to us.
pub async fn login_complete(
    State(state): State<AppState>,
    Json(request): Json<LoginCompleteRequest>,
) -> Result<Json<MessageResponse>, ServerError> {
    let fitbit_user_id = required(request.fitbit_user_id, "fitbit_user_id")?;
    let access_token = required(request.access_token, "access_token")?;
    let refresh_token = required(request.refresh_token, "refresh_token")?;

    let affected = state
        .user_store
        .save_login_tokens(&fitbit_user_id, &access_token, &refresh_token)
        .await
        .map_err(|e| ServerError::Persistence(e.to_string()))?;

    if affected == 0 {
        tracing::warn!(fitbit_user_id = %fitbit_user_id, "login-complete for unknown user");
        return Err(ServerError::NotFound(format!(
            "userId {fitbit_user_id} is either not found or invalid"
        )));
    }

    tracing::info!(fitbit_user_id = %fitbit_user_id, "login tokens stored");

    Ok(Json(MessageResponse {
        message: "토큰 저장 완료".to_string(),
    }))
}
