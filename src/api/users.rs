use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
    Form,
};
use tracing::warn;

use super::routes::AppState;
use super::FailurePayload;
use crate::error::AppError;
use crate::models::{CreateUserRequest, UserResponse};

/// POST /api/exercise/new-user
///
/// Store failures (including a duplicate username) come back as a 200 with
/// a `{message, error_code}` body, never as an error status.
pub async fn create_user(
    State(state): State<AppState>,
    Form(payload): Form<CreateUserRequest>,
) -> Response {
    let username = payload.username.as_deref().map(str::trim).unwrap_or("");
    if username.is_empty() {
        return Json(FailurePayload::user_creation(None)).into_response();
    }

    match state.users.create_user(username).await {
        Ok(user) => Json(UserResponse::from(user)).into_response(),
        Err(err) => {
            warn!(username, error = %err, "user creation failed");
            Json(FailurePayload::user_creation(err.code())).into_response()
        }
    }
}

/// GET /api/exercise/users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.users.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
