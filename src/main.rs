//! Server entrypoint: load config, prepare the database, serve the API.

use std::sync::Arc;
use student_records::{app, connect, ensure_database_exists, run_migrations, AppState, Config, PgStudentRepository};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("student_records=info,tower_http=info")),
        )
        .init();
    if dotenv.is_err() {
        tracing::warn!(".env file not found, using process environment");
    }

    let config = Config::from_env()?;

    ensure_database_exists(&config.database).await?;
    let pool = connect(&config.database).await?;
    run_migrations(&pool).await?;

    let state = AppState::new(Arc::new(PgStudentRepository::new(pool)), config.api.clone());
    let router = app(state, &config.server.frontend_dir);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
