use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dates::format_date;

/// A single logged exercise. `username` is a denormalized copy of the
/// owner's name at creation time; users are never renamed, so it cannot go
/// stale. `date` is stored as a BSON datetime so range filters compare on
/// the native type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub description: String,
    pub duration: f64,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
    pub user_id: String,
    pub username: String,
}

/// Success body for POST /api/exercise/add. The identifying field is the
/// owning user's id, not the exercise's store-assigned id, and the date is
/// rendered as a human-readable day string.
#[derive(Debug, Serialize)]
pub struct AddExerciseResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub description: String,
    #[serde(serialize_with = "duration_as_js_number")]
    pub duration: f64,
    pub date: String,
}

impl From<Exercise> for AddExerciseResponse {
    fn from(exercise: Exercise) -> Self {
        AddExerciseResponse {
            id: exercise.user_id,
            username: exercise.username,
            description: exercise.description,
            duration: exercise.duration,
            date: format_date(&exercise.date),
        }
    }
}

/// Shaped response for GET /api/exercise/log. `from`/`to` are present only
/// when the corresponding query parameter parsed as a date; otherwise the
/// key is absent from the JSON entirely.
#[derive(Debug, Serialize)]
pub struct ExerciseLog {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    pub count: usize,
    pub log: Vec<LogEntry>,
}

#[derive(Debug, Serialize)]
pub struct LogEntry {
    pub description: String,
    #[serde(serialize_with = "duration_as_js_number")]
    pub duration: f64,
    pub date: String,
}

// Durations are JS numbers in the original: fractional values pass through,
// and integral values stringify without a decimal point. Serde would render
// a plain f64 of 30 as 30.0, so integral durations are emitted as integers.
fn duration_as_js_number<S>(minutes: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if minutes.fract() == 0.0 {
        serializer.serialize_i64(*minutes as i64)
    } else {
        serializer.serialize_f64(*minutes)
    }
}
