use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tower::util::ServiceExt;

use carelink_server::config::OpenAiConfiguration;
use carelink_server::models::{
    ActivityAverage, ActivitySummary, DailyHealthReport, UserRecord,
};
use carelink_server::services::{Advisor, StoreError, UserStore};
use carelink_server::{router, AppState};
use fitbit_oauth::FitbitOAuthClient;

/// In-memory stand-in for the MySQL store. Records every call so tests can
/// assert how many store interactions a request caused.
#[derive(Default)]
pub struct MemoryUserStore {
    pub users: Vec<UserRecord>,
    pub report: Option<DailyHealthReport>,
    pub comment: Option<String>,
    pub find_calls: AtomicUsize,
    pub saved_tokens: Mutex<Vec<(i64, String, String)>>,
    pub login_tokens: Mutex<Vec<(String, String, String)>>,
    pub device_tokens: Mutex<Vec<(String, String, String)>>,
}

impl MemoryUserStore {
    pub fn with_user(id: i64, encoded_id: &str) -> Self {
        Self {
            users: vec![UserRecord {
                id,
                encoded_id: encoded_id.to_string(),
            }],
            ..Self::default()
        }
    }

    pub fn find_call_count(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_user(&self, encoded_id: &str) -> Result<UserRecord, StoreError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.users
            .iter()
            .find(|u| u.encoded_id == encoded_id)
            .cloned()
            .ok_or_else(|| StoreError::UserNotFound(encoded_id.to_string()))
    }

    async fn save_access_token(
        &self,
        user_id: i64,
        access_token: &str,
        expires_at: &str,
    ) -> Result<(), StoreError> {
        self.saved_tokens.lock().unwrap().push((
            user_id,
            access_token.to_string(),
            expires_at.to_string(),
        ));
        Ok(())
    }

    async fn save_login_tokens(
        &self,
        encoded_id: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<u64, StoreError> {
        if !self.users.iter().any(|u| u.encoded_id == encoded_id) {
            return Ok(0);
        }
        self.login_tokens.lock().unwrap().push((
            encoded_id.to_string(),
            access_token.to_string(),
            refresh_token.to_string(),
        ));
        Ok(1)
    }

    async fn find_daily_report(
        &self,
        _user_id: i64,
        _report_date: &str,
    ) -> Result<Option<DailyHealthReport>, StoreError> {
        Ok(self.report.clone())
    }

    async fn find_report_comment(
        &self,
        _user_id: i64,
        _report_date: &str,
        _role: &str,
    ) -> Result<Option<String>, StoreError> {
        Ok(self.comment.clone())
    }

    async fn find_monthly_average(
        &self,
        _user_id: i64,
        _recorded_at: &str,
    ) -> Result<Option<ActivityAverage>, StoreError> {
        Ok(None)
    }

    async fn find_activity_summary(
        &self,
        _user_id: i64,
        _date: &str,
    ) -> Result<Option<ActivitySummary>, StoreError> {
        Ok(None)
    }

    async fn upsert_device_token(
        &self,
        user_id: &str,
        fcm_token: &str,
        platform: &str,
    ) -> Result<(), StoreError> {
        self.device_tokens.lock().unwrap().push((
            user_id.to_string(),
            fcm_token.to_string(),
            platform.to_string(),
        ));
        Ok(())
    }
}

pub fn test_app(store: Arc<MemoryUserStore>, provider_url: &str, chat_url: &str) -> Router {
    let oauth_client = FitbitOAuthClient::with_token_url(
        "test-client",
        "test-secret",
        &format!("{provider_url}/oauth2/token"),
    )
    .expect("valid token URL");

    let openai = OpenAiConfiguration {
        api_key: "sk-test".to_string(),
        model: "gpt-4".to_string(),
    };

    router(AppState {
        user_store: store,
        oauth_client: Arc::new(oauth_client),
        advisor: Arc::new(Advisor::with_chat_url(
            &openai,
            &format!("{chat_url}/v1/chat/completions"),
        )),
    })
}

pub async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("valid request"),
        )
        .await
        .expect("infallible");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}
