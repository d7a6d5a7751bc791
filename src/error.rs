//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Which unique column a write collided with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictField {
    Email,
    StudentId,
    Unknown,
}

impl ConflictField {
    /// Classify a unique-violation by constraint name first, then by message text.
    pub fn classify(constraint: Option<&str>, message: &str) -> Self {
        for text in constraint.into_iter().chain(std::iter::once(message)) {
            if text.contains("email") {
                return ConflictField::Email;
            }
            if text.contains("student_id") {
                return ConflictField::StudentId;
            }
        }
        ConflictField::Unknown
    }

    pub fn message(self) -> &'static str {
        match self {
            ConflictField::Email => "Email already exists",
            ConflictField::StudentId => "Student ID already exists",
            ConflictField::Unknown => "Duplicate entry",
        }
    }
}

/// Errors returned by a [`crate::repository::StudentRepository`].
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("unique constraint violated: {0:?}")]
    Conflict(ConflictField),
    #[error("database: {0}")]
    Db(#[source] sqlx::Error),
    #[error("migration: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return StoreError::Conflict(ConflictField::classify(db.constraint(), db.message()));
            }
        }
        StoreError::Db(e)
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// [`AppError::from_store`] for operations that never write.
    pub fn from_read(operation: &'static str, fallback: &'static str, err: StoreError) -> Self {
        Self::from_store(operation, fallback, false, err)
    }

    /// Map a repository failure for `operation` to a client-facing error.
    /// Unclassified failures are logged here and reduced to `fallback`.
    pub fn from_store(
        operation: &'static str,
        fallback: &'static str,
        detailed_conflicts: bool,
        err: StoreError,
    ) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound("Student not found".into()),
            StoreError::Conflict(field) => {
                tracing::warn!(operation, ?field, "unique constraint violated");
                let field = if detailed_conflicts { field } else { ConflictField::Unknown };
                AppError::Conflict(field.message().into())
            }
            other => {
                tracing::error!(operation, error = %other, "storage failure");
                AppError::Internal(fallback.into())
            }
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
