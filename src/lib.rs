//! Student records: REST backend for the `students` table on PostgreSQL.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod state;

pub use config::{ApiOptions, Config};
pub use db::{connect, ensure_database_exists, run_migrations};
pub use error::{AppError, ConfigError, ConflictField, StoreError};
pub use models::{NewStudent, Student, StudentInput};
pub use repository::{InMemoryStudentRepository, PgStudentRepository, StudentRepository};
pub use routes::{app, common_routes, student_routes};
pub use state::AppState;
