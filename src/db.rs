//! Database bootstrap: create the database if needed, open the pool, apply migrations.

use crate::config::DatabaseConfig;
use crate::error::StoreError;
use sqlx::postgres::PgPoolOptions;
use sqlx::{ConnectOptions, PgPool};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Connect to the `postgres` maintenance database with the same credentials and
/// `CREATE DATABASE` when the configured one does not exist.
pub async fn ensure_database_exists(config: &DatabaseConfig) -> Result<(), StoreError> {
    let db_name = config.database_name()?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let admin = config.connect_options()?.database("postgres");
    let mut conn = admin.connect().await.map_err(StoreError::Db)?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await
        .map_err(StoreError::Db)?;
    if exists.0 {
        tracing::debug!(database = %db_name, "database already exists");
    } else {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await
            .map_err(StoreError::Db)?;
        tracing::info!(database = %db_name, "database created");
    }
    Ok(())
}

pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options()?)
        .await
        .map_err(StoreError::Db)?;
    tracing::info!("database connection established");
    Ok(pool)
}

/// Apply the embedded `migrations/` files. Already-applied versions are skipped.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    MIGRATOR.run(pool).await?;
    tracing::info!("migrations completed");
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
