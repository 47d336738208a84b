use exercise_tracker::api::routes::create_routes;
use exercise_tracker::config::{AppConfig, DatabaseConfig};
use exercise_tracker::services::UserService;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let app_config = AppConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;

    let db = db_config.connect().await?;
    // Mongoose created the unique username index from the schema; here it is
    // bootstrapped explicitly before the server accepts requests.
    UserService::new(&db).ensure_indexes().await?;

    let app = create_routes(db);

    let listener = TcpListener::bind(app_config.server_address()).await?;
    info!(
        "Exercise tracker listening on http://{}",
        app_config.server_address()
    );

    axum::serve(listener, app).await?;

    Ok(())
}
