use chrono::NaiveDate;
use serde::Serialize;

/// The credential row in `users`. `id` is internal and never serialized out;
/// `encodedId` is the identifier every outside caller uses.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    #[sqlx(rename = "encodedId")]
    pub encoded_id: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DailyHealthReport {
    pub user_id: i64,
    pub report_date: NaiveDate,
    pub steps: Option<i64>,
    pub distance_km: Option<f64>,
    pub calories_out: Option<i64>,
    pub resting_heart_rate: Option<i64>,
    pub sleep_minutes: Option<i64>,
    pub summary: Option<String>,
}

/// Rolling average row from `fitbit_average_history` (one per period type).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ActivityAverage {
    pub user_id: i64,
    pub recorded_at: NaiveDate,
    pub period_type: String,
    pub steps_avg: Option<f64>,
    pub distance_km_avg: Option<f64>,
    pub calories_out_avg: Option<f64>,
    pub resting_heart_rate_avg: Option<f64>,
    pub sleep_minutes_avg: Option<f64>,
}

/// Single-day row from `fitbit_activity_summary`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ActivitySummary {
    pub user_id: i64,
    pub date: NaiveDate,
    pub steps: Option<i64>,
    pub distance_km: Option<f64>,
    pub calories_out: Option<i64>,
    pub active_minutes: Option<i64>,
    pub resting_heart_rate: Option<i64>,
}
