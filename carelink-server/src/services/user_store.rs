use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use thiserror::Error;

use crate::config::DatabaseConfiguration;
use crate::models::{ActivityAverage, ActivitySummary, DailyHealthReport, UserRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database connection error: {0}")]
    Unavailable(String),

    #[error("database query error: {0}")]
    Query(String),

    #[error("userId {0} is either not found or invalid")]
    UserNotFound(String),

    /// `encodedId` is supposed to be unique; more than one match is a
    /// data-integrity fault, never a silent pick.
    #[error("multiple users share encodedId {0}")]
    AmbiguousUser(String),
}

/// Everything the handlers need from the relational store. All queries are
/// parameterized; the trait exists so tests can substitute an in-memory
/// implementation.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user(&self, encoded_id: &str) -> Result<UserRecord, StoreError>;

    /// Writes the token and its expiration together in one statement, keyed
    /// by the internal id. Never writes one without the other.
    async fn save_access_token(
        &self,
        user_id: i64,
        access_token: &str,
        expires_at: &str,
    ) -> Result<(), StoreError>;

    /// Returns the number of rows touched so callers can distinguish an
    /// unknown user from a successful write.
    async fn save_login_tokens(
        &self,
        encoded_id: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<u64, StoreError>;

    async fn find_daily_report(
        &self,
        user_id: i64,
        report_date: &str,
    ) -> Result<Option<DailyHealthReport>, StoreError>;

    async fn find_report_comment(
        &self,
        user_id: i64,
        report_date: &str,
        role: &str,
    ) -> Result<Option<String>, StoreError>;

    async fn find_monthly_average(
        &self,
        user_id: i64,
        recorded_at: &str,
    ) -> Result<Option<ActivityAverage>, StoreError>;

    async fn find_activity_summary(
        &self,
        user_id: i64,
        date: &str,
    ) -> Result<Option<ActivitySummary>, StoreError>;

    async fn upsert_device_token(
        &self,
        user_id: &str,
        fcm_token: &str,
        platform: &str,
    ) -> Result<(), StoreError>;
}

pub struct MySqlUserStore {
    pool: MySqlPool,
}

impl MySqlUserStore {
    pub async fn connect(config: &DatabaseConfiguration) -> Result<Self, StoreError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url())
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        tracing::info!(host = %config.host, database = %config.name, "connected to MySQL");
        Ok(Self { pool })
    }

    async fn acquire(&self) -> Result<sqlx::pool::PoolConnection<sqlx::MySql>, StoreError> {
        // Connections come back to the pool on drop, on every exit path.
        self.pool
            .acquire()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

fn query_fault(err: sqlx::Error) -> StoreError {
    StoreError::Query(err.to_string())
}

#[async_trait]
impl UserStore for MySqlUserStore {
    async fn find_user(&self, encoded_id: &str) -> Result<UserRecord, StoreError> {
        let mut conn = self.acquire().await?;

        let mut rows = sqlx::query_as::<_, UserRecord>(
            "SELECT id, encodedId FROM users WHERE encodedId = ?",
        )
        .bind(encoded_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(query_fault)?;

        if rows.len() > 1 {
            return Err(StoreError::AmbiguousUser(encoded_id.to_string()));
        }
        rows.pop()
            .ok_or_else(|| StoreError::UserNotFound(encoded_id.to_string()))
    }

    async fn save_access_token(
        &self,
        user_id: i64,
        access_token: &str,
        expires_at: &str,
    ) -> Result<(), StoreError> {
        let mut conn = self.acquire().await?;

        sqlx::query("UPDATE users SET access_token = ?, access_token_expires = ? WHERE id = ?")
            .bind(access_token)
            .bind(expires_at)
            .bind(user_id)
            .execute(&mut *conn)
            .await
            .map_err(query_fault)?;

        Ok(())
    }

    async fn save_login_tokens(
        &self,
        encoded_id: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<u64, StoreError> {
        let mut conn = self.acquire().await?;

        let result = sqlx::query(
            "UPDATE users \
             SET access_token = ?, refresh_token = ?, updated_at = NOW() \
             WHERE encodedId = ?",
        )
        .bind(access_token)
        .bind(refresh_token)
        .bind(encoded_id)
        .execute(&mut *conn)
        .await
        .map_err(query_fault)?;

        Ok(result.rows_affected())
    }

    async fn find_daily_report(
        &self,
        user_id: i64,
        report_date: &str,
    ) -> Result<Option<DailyHealthReport>, StoreError> {
        let mut conn = self.acquire().await?;

        sqlx::query_as::<_, DailyHealthReport>(
            "SELECT user_id, report_date, steps, distance_km, calories_out, \
                    resting_heart_rate, sleep_minutes, summary \
             FROM daily_health_reports WHERE user_id = ? AND report_date = ?",
        )
        .bind(user_id)
        .bind(report_date)
        .fetch_optional(&mut *conn)
        .await
        .map_err(query_fault)
    }

    async fn find_report_comment(
        &self,
        user_id: i64,
        report_date: &str,
        role: &str,
    ) -> Result<Option<String>, StoreError> {
        let mut conn = self.acquire().await?;

        let report_id: Option<i64> = sqlx::query_scalar(
            "SELECT report_id FROM health_reports_pdf WHERE user_id = ? AND report_date = ?",
        )
        .bind(user_id)
        .bind(report_date)
        .fetch_optional(&mut *conn)
        .await
        .map_err(query_fault)?;

        let Some(report_id) = report_id else {
            return Ok(None);
        };

        sqlx::query_scalar("SELECT content FROM comments WHERE report_id = ? AND role = ?")
            .bind(report_id)
            .bind(role)
            .fetch_optional(&mut *conn)
            .await
            .map_err(query_fault)
    }

    async fn find_monthly_average(
        &self,
        user_id: i64,
        recorded_at: &str,
    ) -> Result<Option<ActivityAverage>, StoreError> {
        let mut conn = self.acquire().await?;

        sqlx::query_as::<_, ActivityAverage>(
            "SELECT user_id, recorded_at, period_type, steps_avg, distance_km_avg, \
                    calories_out_avg, resting_heart_rate_avg, sleep_minutes_avg \
             FROM fitbit_average_history \
             WHERE user_id = ? AND recorded_at = ? AND period_type = '30D'",
        )
        .bind(user_id)
        .bind(recorded_at)
        .fetch_optional(&mut *conn)
        .await
        .map_err(query_fault)
    }

    async fn find_activity_summary(
        &self,
        user_id: i64,
        date: &str,
    ) -> Result<Option<ActivitySummary>, StoreError> {
        let mut conn = self.acquire().await?;

        sqlx::query_as::<_, ActivitySummary>(
            "SELECT user_id, date, steps, distance_km, calories_out, active_minutes, \
                    resting_heart_rate \
             FROM fitbit_activity_summary WHERE user_id = ? AND date = ?",
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&mut *conn)
        .await
        .map_err(query_fault)
    }

    async fn upsert_device_token(
        &self,
        user_id: &str,
        fcm_token: &str,
        platform: &str,
    ) -> Result<(), StoreError> {
        let mut conn = self.acquire().await?;

        let existing: Option<String> =
            sqlx::query_scalar("SELECT user_id FROM device_tokens WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(&mut *conn)
                .await
                .map_err(query_fault)?;

        let query = if existing.is_some() {
            sqlx::query(
                "UPDATE device_tokens \
                 SET fcm_token = ?, platform = ?, is_active = TRUE \
                 WHERE user_id = ?",
            )
            .bind(fcm_token)
            .bind(platform)
            .bind(user_id)
        } else {
            sqlx::query(
                "INSERT INTO device_tokens (user_id, fcm_token, platform, is_active) \
                 VALUES (?, ?, ?, TRUE)",
            )
            .bind(user_id)
            .bind(fcm_token)
            .bind(platform)
        };

        query.execute(&mut *conn).await.map_err(query_fault)?;
        Ok(())
    }
}
