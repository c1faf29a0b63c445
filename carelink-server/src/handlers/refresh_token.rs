use axum::{extract::State, Json};
use chrono::{DateTime, Duration, FixedOffset, Utc};

use crate::error::ServerError;
use crate::handlers::required;
use crate::models::{RefreshTokenRequest, RefreshTokenResponse};
use crate::AppState;

// Expirations are persisted in KST (UTC+9, no DST) because the mobile app and
// the reporting jobs read the column as local wall-clock text.
const KST_OFFSET_SECS: i32 = 9 * 3600;
const EXPIRATION_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn kst() -> FixedOffset {
    FixedOffset::east_opt(KST_OFFSET_SECS).expect("nine hours is a valid offset")
}

pub(crate) fn expiration_time(now: DateTime<Utc>, expires_in_secs: u64) -> String {
    let expires_at = now + Duration::seconds(expires_in_secs as i64);
    expires_at
        .with_timezone(&kst())
        .format(EXPIRATION_FORMAT)
        .to_string()
}

/// The credential-refresh workflow. Three sequential hard gates: validate the
/// caller against the user store, exchange our client credentials with the
/// provider, persist the token pair. Failure at any gate aborts without
/// touching the next one; nothing is retried.
pub async fn refresh_access_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<Json<RefreshTokenResponse>, ServerError> {
    let user_id = required(request.user_id, "userId")?;

    tracing::debug!(user_id = %user_id, "access token refresh requested");

    let user = state.user_store.find_user(&user_id).await?;

    let grant = state.oauth_client.exchange_client_credentials().await?;

    let expiration_time = expiration_time(Utc::now(), grant.expires_in);
    state
        .user_store
        .save_access_token(user.id, &grant.access_token, &expiration_time)
        .await
        .map_err(|e| ServerError::Persistence(e.to_string()))?;

    tracing::info!(
        user_id = %user.encoded_id,
        expires_at = %expiration_time,
        "access token refreshed"
    );

    Ok(Json(RefreshTokenResponse {
        access_token: grant.access_token,
        expires_in: grant.expires_in,
        expiration_time,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn expiration_is_now_plus_lifetime_in_kst() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().unwrap();
        assert_eq!(expiration_time(now, 3600), "2025-01-01 10:00:00");
    }

    #[test]
    fn expiration_crosses_midnight_in_the_fixed_zone() {
        // 15:30 UTC is already the next day in KST.
        let now = Utc
            .with_ymd_and_hms(2024, 12, 31, 15, 30, 0)
            .single()
            .unwrap();
        assert_eq!(expiration_time(now, 0), "2025-01-01 00:30:00");
    }

    #[test]
    fn expiration_format_has_no_zone_suffix() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().unwrap();
        let formatted = expiration_time(now, 28800);
        assert_eq!(formatted.len(), 19);
        assert_eq!(formatted, "2025-06-02 05:00:00");
    }
}
