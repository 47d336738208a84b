// API routes and handlers

pub mod exercises;
pub mod health;
pub mod log;
pub mod routes;
pub mod users;

use serde::Serialize;

/// Soft-failure channel: store and validation failures on the create routes
/// are answered as a normal 200 response with this body, matching the
/// original service. `error_code` is the store's numeric code and is left
/// out of the JSON when the failure has none.
#[derive(Debug, Serialize)]
pub struct FailurePayload {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i32>,
}

impl FailurePayload {
    fn new(message: &str, error_code: Option<i32>) -> Self {
        Self {
            message: message.to_string(),
            error_code,
        }
    }

    pub fn user_creation(error_code: Option<i32>) -> Self {
        Self::new(
            "User creation unsuccessful. See error code for details",
            error_code,
        )
    }

    pub fn exercise_user_lookup(error_code: Option<i32>) -> Self {
        Self::new(
            "Could not add exercise. See error code for details",
            error_code,
        )
    }

    pub fn exercise_save(error_code: Option<i32>) -> Self {
        Self::new(
            "Failed to save exercise. See error code for details",
            error_code,
        )
    }
}
