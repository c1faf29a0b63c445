use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::error::ServerError;
use crate::handlers::required;
use crate::models::{ExerciseRequest, ExerciseResponse};
use crate::services::StoreError;
use crate::AppState;

const FALLBACK_MESSAGE: &str = "네트워크 연결을 확인하세요.";
const PROMPT_FAILURE: &str = "AI 응답을 가져오지 못했습니다.";

impl ExerciseResponse {
    fn fallback(message: &str) -> Self {
        Self {
            exercise_month_analysis: FALLBACK_MESSAGE.to_string(),
            exercise_yesterday_analysis: FALLBACK_MESSAGE.to_string(),
            exercise_recommendation: FALLBACK_MESSAGE.to_string(),
            message: Some(message.to_string()),
        }
    }
}

fn prompt_payload<T: Serialize>(value: &Option<T>) -> String {
    value
        .as_ref()
        .and_then(|v| serde_json::to_string(v).ok())
        .unwrap_or_else(|| "{}".to_string())
}

fn month_prompt(month_data: &str) -> String {
    format!(
        "당신은 노인 헬스케어 전문가입니다.\n\
         [한 달 평균 운동 데이터] {month_data}\n\
         이 데이터를 기반으로 사용자의 한 달간 운동 습관과 건강 상태를 분석해주세요 (200자 이내)."
    )
}

fn yesterday_prompt(yesterday_data: &str) -> String {
    format!(
        "당신은 노인 헬스케어 전문가입니다.\n\
         [어제 운동 데이터] {yesterday_data}\n\
         이 데이터를 기반으로 어제 하루의 운동 분석해주세요 (200자 이내)."
    )
}

fn recommendation_prompt(month_data: &str, yesterday_data: &str) -> String {
    format!(
        "당신은 노인 헬스케어 전문가입니다.\n\
         [한 달 평균 운동 데이터] {month_data}\n\
         [어제 운동 데이터] {yesterday_data}\n\
         이 정보를 기반으로 다음을 알려주세요:\n\
         1. 추천 운동 2~3가지 (이유 포함)\n\
         2. 운동 시 주의사항\n\
         3. 전반적인 피드백\n\
         모든 응답은 200자 이내 요약문으로 제공해주세요."
    )
}

/// Builds three generative-text analyses from the user's 30-day averages and
/// yesterday's activity. The three prompts run concurrently and degrade
/// independently: a failed prompt yields its fallback string, never a 5xx.
pub async fn exercise_recommendations(
    State(state): State<AppState>,
    Json(request): Json<ExerciseRequest>,
) -> Result<Response, ServerError> {
    let encoded_id = required(request.encoded_id, "encodedId")?;
    let date_raw = required(request.date, "date")?;
    let date = NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d")
        .map_err(|_| ServerError::Validation(format!("Invalid date format: {date_raw}")))?;

    let user = match state.user_store.find_user(&encoded_id).await {
        Ok(user) => user,
        Err(StoreError::UserNotFound(_)) => {
            // The app renders the fallback texts directly, so an unknown user
            // still gets a well-formed body.
            return Ok((
                StatusCode::NOT_FOUND,
                Json(ExerciseResponse::fallback("User not found")),
            )
                .into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let yesterday = (date - Duration::days(1)).format("%Y-%m-%d").to_string();
    let month_data = state
        .user_store
        .find_monthly_average(user.id, &date_raw)
        .await?;
    let yesterday_data = state
        .user_store
        .find_activity_summary(user.id, &yesterday)
        .await?;

    let month_json = prompt_payload(&month_data);
    let yesterday_json = prompt_payload(&yesterday_data);

    let month_prompt_text = month_prompt(&month_json);
    let yesterday_prompt_text = yesterday_prompt(&yesterday_json);
    let recommendation_prompt_text = recommendation_prompt(&month_json, &yesterday_json);
    let (month, yesterday, recommendation) = tokio::join!(
        state.advisor.complete(&month_prompt_text),
        state.advisor.complete(&yesterday_prompt_text),
        state.advisor.complete(&recommendation_prompt_text),
    );

    for result in [&month, &yesterday, &recommendation] {
        if let Err(e) = result {
            tracing::warn!(user_id = %user.encoded_id, error = %e, "advisor prompt failed");
        }
    }

    let response = ExerciseResponse {
        exercise_month_analysis: month.unwrap_or_else(|_| PROMPT_FAILURE.to_string()),
        exercise_yesterday_analysis: yesterday.unwrap_or_else(|_| PROMPT_FAILURE.to_string()),
        exercise_recommendation: recommendation.unwrap_or_else(|_| PROMPT_FAILURE.to_string()),
        message: None,
    };

    Ok(Json(response).into_response())
}
