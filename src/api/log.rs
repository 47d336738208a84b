use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;

use super::routes::AppState;
use crate::error::AppError;
use crate::models::ExerciseLog;
use crate::services::log_service::LogError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogQuery {
    pub user_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

/// GET /api/exercise/log
///
/// Unlike the create routes, failures here ride the hard channel: a missing
/// user is a 404, a driver failure a 500. Malformed `from`/`to`/`limit`
/// values never fail the request.
pub async fn get_log(
    State(state): State<AppState>,
    Query(query): Query<LogQuery>,
) -> Result<Json<ExerciseLog>, AppError> {
    let user_id = match query.user_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id,
        _ => return Err(AppError::Validation("userId is required".to_string())),
    };

    let log = state
        .log
        .get_log(
            user_id,
            query.from.as_deref(),
            query.to.as_deref(),
            query.limit.as_deref(),
        )
        .await?;
    Ok(Json(log))
}

impl From<LogError> for AppError {
    fn from(err: LogError) -> Self {
        match err {
            LogError::UserNotFound(_) => AppError::NotFound,
            LogError::Database(err) => AppError::Database(err),
        }
    }
}
