use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::mood::trend::{trend_points, trend_summary, TrendPoint};
use crate::mood::MoodEntry;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct LogMoodRequest {
    pub user_id: String,
    pub mood: String,
}

#[derive(Debug, Serialize)]
pub struct LogMoodResponse {
    pub confirmation: String,
}

#[derive(Debug, Serialize)]
pub struct MoodHistoryResponse {
    pub entries: Vec<MoodEntry>,
}

#[derive(Debug, Serialize)]
pub struct MoodTrendResponse {
    pub summary: String,
    pub points: Vec<TrendPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_path: Option<String>,
}

/// POST /api/v1/mood
pub async fn handle_log_mood(
    State(state): State<AppState>,
    Json(req): Json<LogMoodRequest>,
) -> Result<Json<LogMoodResponse>, AppError> {
    let confirmation = state.mood.store_mood(&req.user_id, &req.mood).await?;
    Ok(Json(LogMoodResponse { confirmation }))
}

/// GET /api/v1/mood/history
pub async fn handle_mood_history(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<MoodHistoryResponse>, AppError> {
    let entries = state.mood.get_mood_history(&params.user_id).await;
    Ok(Json(MoodHistoryResponse { entries }))
}

/// GET /api/v1/mood/trend
pub async fn handle_mood_trend(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<MoodTrendResponse>, AppError> {
    let entries = state.mood.get_mood_history(&params.user_id).await;
    let summary = trend_summary(&entries);
    let points = trend_points(&entries);

    // No numeric ratings → summary only, no chart artifact.
    let chart_path = if points.is_empty() {
        None
    } else {
        let path = state.trend.render(&points).await?;
        Some(path.to_string_lossy().into_owned())
    };

    Ok(Json(MoodTrendResponse {
        summary,
        points,
        chart_path,
    }))
}
