use axum::{extract::State, Json};

use crate::error::ServerError;
use crate::handlers::required;
use crate::models::{DeviceTokenRequest, MessageResponse};
use crate::AppState;

/// Registers or replaces the push-notification token for a device. One row
/// per user; re-registering reactivates and overwrites the existing row.
pub async fn save_device_token(
    State(state): State<AppState>,
    Json(request): Json<DeviceTokenRequest>,
) -> Result<Json<MessageResponse>, ServerError> {
    let fcm_token = required(request.fcm_token, "fcmToken")?;
    let user_id = required(request.user_id, "userId")?;
    let platform = required(request.platform, "platform")?;

    state
        .user_store
        .upsert_device_token(&user_id, &fcm_token, &platform)
        .await
        .map_err(|e| ServerError::Persistence(e.to_string()))?;

    tracing::info!(user_id = %user_id, platform = %platform, "device token saved");

    Ok(Json(MessageResponse {
        message: "Token saved or updated successfully".to_string(),
    }))
}
