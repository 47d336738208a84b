use axum::{
    response::Html,
    routing::{get, post},
    Router,
};
use mongodb::Database;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::exercises::add_exercise;
use super::health::health_check;
use super::log::get_log;
use super::users::{create_user, list_users};
use crate::error::AppError;
use crate::services::{ExerciseService, LogService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub exercises: ExerciseService,
    pub log: LogService,
}

pub fn create_routes(db: Database) -> Router {
    let users = UserService::new(&db);
    let exercises = ExerciseService::new(&db);
    let log = LogService::new(users.clone(), exercises.clone());
    let state = AppState {
        users,
        exercises,
        log,
    };

    let exercise_api = Router::new()
        .route("/new-user", post(create_user))
        .route("/users", get(list_users))
        .route("/add", post(add_exercise))
        .route("/log", get(get_log));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .nest("/api/exercise", exercise_api)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(include_str!("../../public/index.html"))
}

// Unknown routes get the plain-text 404 the original's catch-all produced.
async fn not_found() -> AppError {
    AppError::NotFound
}
