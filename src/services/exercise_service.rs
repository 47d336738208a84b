use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Collection, Database};

use crate::models::Exercise;

#[derive(Clone)]
pub struct ExerciseService {
    exercises: Collection<Exercise>,
}

impl ExerciseService {
    pub fn new(db: &Database) -> Self {
        Self {
            exercises: db.collection("exercises"),
        }
    }

    /// Persists a new exercise for an already-verified user. The caller is
    /// responsible for the existence check and for defaulting `date`.
    pub async fn add_exercise(
        &self,
        user_id: &str,
        username: &str,
        description: &str,
        duration: f64,
        date: DateTime<Utc>,
    ) -> mongodb::error::Result<Exercise> {
        let mut exercise = Exercise {
            id: None,
            description: description.to_string(),
            duration,
            date,
            user_id: user_id.to_string(),
            username: username.to_string(),
        };
        let inserted = self.exercises.insert_one(&exercise).await?;
        exercise.id = inserted.inserted_id.as_object_id();
        Ok(exercise)
    }

    /// Exercises for one user with dates strictly inside (from, to),
    /// most recent first. A positive `limit` truncates the result;
    /// anything else returns the full history.
    pub async fn query_exercises(
        &self,
        user_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        limit: Option<i64>,
    ) -> mongodb::error::Result<Vec<Exercise>> {
        let mut find = self
            .exercises
            .find(window_filter(user_id, from, to))
            .sort(doc! { "date": -1 });
        if let Some(limit) = limit {
            find = find.limit(limit);
        }
        let cursor = find.await?;
        cursor.try_collect().await
    }
}

// Both bounds are exclusive: an exercise dated exactly at `from` or `to` is
// not part of the window.
fn window_filter(user_id: &str, from: DateTime<Utc>, to: DateTime<Utc>) -> Document {
    doc! {
        "userId": user_id,
        "date": {
            "$gt": mongodb::bson::DateTime::from_chrono(from),
            "$lt": mongodb::bson::DateTime::from_chrono(to),
        },
    }
}
