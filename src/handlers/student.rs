//! Student CRUD handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::models::StudentInput;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid student ID".into()))
}

fn body(payload: Result<Json<StudentInput>, JsonRejection>) -> Result<StudentInput, AppError> {
    payload
        .map(|Json(input)| input)
        .map_err(|rejection| match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(rejection.body_text()),
            _ => AppError::BadRequest(rejection.body_text()),
        })
}

/// 404 unless a record with `id` exists.
async fn ensure_exists(state: &AppState, id: i32) -> Result<(), AppError> {
    let existing = state
        .repo
        .get(id)
        .await
        .map_err(|e| AppError::from_read("check_exists", "Failed to retrieve student", e))?;
    match existing {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound("Student not found".into())),
    }
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state
        .repo
        .list()
        .await
        .map_err(|e| AppError::from_read("list", "Failed to retrieve students", e))?;
    Ok((StatusCode::OK, Json(rows)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = state
        .repo
        .get(id)
        .await
        .map_err(|e| AppError::from_read("read", "Failed to retrieve student", e))?
        .ok_or_else(|| AppError::NotFound("Student not found".into()))?;
    Ok((StatusCode::OK, Json(row)))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<StudentInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let student = body(payload)?.validate(&state.options)?;
    let row = state
        .repo
        .create(&student)
        .await
        .map_err(|e| AppError::from_store("create", "Failed to create student", state.options.detailed_conflicts, e))?;
    tracing::info!(id = row.id, student_id = %row.student_id, "student created");
    Ok((StatusCode::CREATED, Json(row)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: Result<Json<StudentInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let student = body(payload)?.validate(&state.options)?;
    ensure_exists(&state, id).await?;
    let row = state
        .repo
        .update(id, &student)
        .await
        .map_err(|e| AppError::from_store("update", "Failed to update student", state.options.detailed_conflicts, e))?;
    Ok((StatusCode::OK, Json(row)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    ensure_exists(&state, id).await?;
    state
        .repo
        .delete(id)
        .await
        .map_err(|e| AppError::from_store("delete", "Failed to delete student", state.options.detailed_conflicts, e))?;
    tracing::info!(id, "student deleted");
    Ok((
        StatusCode::OK,
        Json(MessageBody {
            message: "Student deleted successfully",
        }),
    ))
}
