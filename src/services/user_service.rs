use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use rand::{distributions::Alphanumeric, Rng};
use thiserror::Error;

use crate::error::store_error_code;
use crate::models::User;

const USER_ID_LEN: usize = 9;
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Error, Debug)]
pub enum CreateUserError {
    #[error("username already taken")]
    Duplicate { code: i32 },
    #[error(transparent)]
    Database(#[from] mongodb::error::Error),
}

impl CreateUserError {
    /// The store's numeric failure code, passed through to the client
    /// payload when one exists.
    pub fn code(&self) -> Option<i32> {
        match self {
            CreateUserError::Duplicate { code } => Some(*code),
            CreateUserError::Database(err) => store_error_code(err),
        }
    }
}

#[derive(Clone)]
pub struct UserService {
    users: Collection<User>,
}

impl UserService {
    pub fn new(db: &Database) -> Self {
        Self {
            users: db.collection("users"),
        }
    }

    /// Creates the unique index on `username`. Called once at startup;
    /// uniqueness is otherwise enforced entirely by the store.
    pub async fn ensure_indexes(&self) -> mongodb::error::Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.users.create_index(index).await?;
        Ok(())
    }

    pub async fn create_user(&self, username: &str) -> Result<User, CreateUserError> {
        let user = User {
            id: generate_id(),
            username: username.to_string(),
        };
        match self.users.insert_one(&user).await {
            Ok(_) => Ok(user),
            Err(err) => match store_error_code(&err) {
                Some(code) if code == DUPLICATE_KEY_CODE => {
                    Err(CreateUserError::Duplicate { code })
                }
                _ => Err(CreateUserError::Database(err)),
            },
        }
    }

    pub async fn list_users(&self) -> mongodb::error::Result<Vec<User>> {
        use futures::TryStreamExt;

        let cursor = self.users.find(doc! {}).await?;
        cursor.try_collect().await
    }

    pub async fn get_user_by_id(&self, id: &str) -> mongodb::error::Result<Option<User>> {
        self.users.find_one(doc! { "_id": id }).await
    }
}

/// Short random alphanumeric id, standing in for the original's shortid.
/// Ids are opaque to every consumer, so any collision-resistant scheme works.
fn generate_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(USER_ID_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_short_alphanumeric_and_distinct() {
        let first = generate_id();
        let second = generate_id();
        assert_eq!(first.len(), USER_ID_LEN);
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(first, second);
    }
}
