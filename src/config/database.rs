use anyhow::Result;
use mongodb::{Client, Database};
use std::env;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub connection_uri: String,
    pub database_name: String,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let connection_uri =
            env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let database_name =
            env::var("MONGO_DB").unwrap_or_else(|_| "exercise_tracker".to_string());

        Ok(DatabaseConfig {
            connection_uri,
            database_name,
        })
    }

    pub async fn connect(&self) -> Result<Database> {
        let client = Client::with_uri_str(&self.connection_uri).await?;
        Ok(client.database(&self.database_name))
    }
}
