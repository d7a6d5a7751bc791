//! Student record, request payload and input validation.

use crate::config::ApiOptions;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// A stored row of the `students` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub student_id: String,
    pub course: String,
    pub year_of_study: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated user-supplied fields. Has no id or timestamps; those are assigned by storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub student_id: String,
    pub course: String,
    pub year_of_study: i32,
}

/// Request body for create and update. Every field is optional at the wire level so that
/// a missing field is reported by name instead of as a generic decode failure.
/// `id`, `created_at` and `updated_at` are accepted and ignored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StudentInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub student_id: Option<String>,
    pub course: Option<String>,
    pub year_of_study: Option<i32>,
}

impl StudentInput {
    pub fn validate(self, options: &ApiOptions) -> Result<NewStudent, AppError> {
        let first_name = required("first_name", self.first_name)?;
        let last_name = required("last_name", self.last_name)?;
        let email = required("email", self.email)?;
        let student_id = required("student_id", self.student_id)?;
        let course = required("course", self.course)?;
        let year_of_study = self
            .year_of_study
            .ok_or_else(|| AppError::BadRequest("year_of_study is required".into()))?;
        if year_of_study < 1 {
            return Err(AppError::BadRequest("year_of_study must be at least 1".into()));
        }
        if options.validate_email && !is_valid_email(&email) {
            return Err(AppError::BadRequest("Invalid email format".into()));
        }
        Ok(NewStudent {
            first_name,
            last_name,
            email,
            student_id,
            course,
            year_of_study,
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!("{} is required", field))),
    }
}

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
        .is_match(email)
}
