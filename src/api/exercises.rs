use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
    Form,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::warn;

use super::routes::AppState;
use super::FailurePayload;
use crate::dates::parse_date;
use crate::error::store_error_code;
use crate::models::AddExerciseResponse;

/// Form body for POST /api/exercise/add. Every field is taken as a raw
/// string so validation failures become soft payloads instead of rejections.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddExerciseRequest {
    pub user_id: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub date: Option<String>,
}

/// POST /api/exercise/add
///
/// The exercise is only written after the referenced user is confirmed to
/// exist. An omitted or unparsable `date` defaults to now.
pub async fn add_exercise(
    State(state): State<AppState>,
    Form(payload): Form<AddExerciseRequest>,
) -> Response {
    let user_id = payload.user_id.as_deref().map(str::trim).unwrap_or("");
    if user_id.is_empty() {
        return Json(FailurePayload::exercise_user_lookup(None)).into_response();
    }

    let user = match state.users.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return Json(FailurePayload::exercise_user_lookup(None)).into_response(),
        Err(err) => {
            warn!(user_id, error = %err, "user lookup failed");
            return Json(FailurePayload::exercise_user_lookup(store_error_code(&err)))
                .into_response();
        }
    };

    // Required-field checks mirror the original's schema validation, which
    // also surfaced as a soft payload on save.
    let description = payload.description.as_deref().map(str::trim).unwrap_or("");
    if description.is_empty() {
        return Json(FailurePayload::exercise_save(None)).into_response();
    }
    // Durations are numbers, not integers: `30.5` is valid and round-trips.
    let duration: f64 = match payload
        .duration
        .as_deref()
        .map(str::trim)
        .unwrap_or("")
        .parse::<f64>()
    {
        Ok(minutes) if minutes.is_finite() => minutes,
        _ => return Json(FailurePayload::exercise_save(None)).into_response(),
    };
    let date = parse_date(payload.date.as_deref()).unwrap_or_else(Utc::now);

    match state
        .exercises
        .add_exercise(&user.id, &user.username, description, duration, date)
        .await
    {
        Ok(exercise) => Json(AddExerciseResponse::from(exercise)).into_response(),
        Err(err) => {
            warn!(user_id, error = %err, "exercise save failed");
            Json(FailurePayload::exercise_save(store_error_code(&err))).into_response()
        }
    }
}
