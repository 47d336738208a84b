use serde::{Deserialize, Serialize};

/// A tracked user. The id is a short random string generated at creation,
/// stored as the document `_id` like the original service did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
}

/// Form body for POST /api/exercise/new-user. `username` stays optional so a
/// missing field surfaces as a soft failure payload instead of a 422.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            username: user.username,
            id: user.id,
        }
    }
}
