use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::dates::{format_date, parse_date, parse_limit};
use crate::models::{Exercise, ExerciseLog, LogEntry};
use crate::services::{ExerciseService, UserService};

#[derive(Error, Debug)]
pub enum LogError {
    #[error("unknown user id: {0}")]
    UserNotFound(String),
    #[error(transparent)]
    Database(#[from] mongodb::error::Error),
}

/// Answers "what did user X do, optionally within a date window, optionally
/// capped in count" as a single shaped response.
#[derive(Clone)]
pub struct LogService {
    users: UserService,
    exercises: ExerciseService,
}

impl LogService {
    pub fn new(users: UserService, exercises: ExerciseService) -> Self {
        Self { users, exercises }
    }

    /// The raw `from`/`to`/`limit` values come straight off the query
    /// string. A bound that does not parse is open: `from` falls back to the
    /// epoch and `to` to the current time, so malformed input widens the
    /// window instead of failing the request.
    pub async fn get_log(
        &self,
        user_id: &str,
        from_raw: Option<&str>,
        to_raw: Option<&str>,
        limit_raw: Option<&str>,
    ) -> Result<ExerciseLog, LogError> {
        let from = parse_date(from_raw);
        let to = parse_date(to_raw);

        let user = self
            .users
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| LogError::UserNotFound(user_id.to_string()))?;

        let window_start = from.unwrap_or(DateTime::UNIX_EPOCH);
        let window_end = to.unwrap_or_else(Utc::now);
        let exercises = self
            .exercises
            .query_exercises(user_id, window_start, window_end, parse_limit(limit_raw))
            .await?;

        Ok(shape_log(user_id, &user.username, from, to, exercises))
    }
}

/// The `_id` echoed back is the queried id exactly as supplied, and the
/// `from`/`to` keys appear only for bounds that actually parsed. Entries
/// keep the store's descending date order.
fn shape_log(
    user_id: &str,
    username: &str,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
    exercises: Vec<Exercise>,
) -> ExerciseLog {
    ExerciseLog {
        id: user_id.to_string(),
        username: username.to_string(),
        from: from.as_ref().map(format_date),
        to: to.as_ref().map(format_date),
        count: exercises.len(),
        log: exercises
            .into_iter()
            .map(|exercise| LogEntry {
                description: exercise.description,
                duration: exercise.duration,
                date: format_date(&exercise.date),
            })
            .collect(),
    }
}
