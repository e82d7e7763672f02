//! REST handlers for the student resource.
//!
//! Each handler decodes the request, validates it, calls the store
//! capability, and maps the result into the JSON envelope contract.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::common::ApiError;
use crate::domains::students::models::{NewStudent, Student, StudentPatch};
use crate::server::app::AppState;

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub status: String,
}

/// Parse a path id, mapping non-integer ids to a 400 envelope.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .map_err(|_| ApiError::BadRequest(format!("invalid student id: {raw}")))
}

/// Decode a JSON body, distinguishing empty bodies from malformed ones.
fn decode_body<T: serde::de::DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    if body.is_empty() {
        return Err(ApiError::EmptyBody);
    }

    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// POST /api/students
pub async fn create_student(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    tracing::info!("creating a student");

    let new: NewStudent = decode_body(&body)?;
    new.validate()?;

    let id = state.store.create(&new).await?;
    tracing::info!(id, "student created");

    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// GET /api/students/{id}
pub async fn get_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Student>, ApiError> {
    let id = parse_id(&raw_id)?;
    tracing::info!(id, "getting a student");

    let student = state.store.get(id).await.inspect_err(|e| {
        tracing::error!(id, error = %e, "error getting student");
    })?;

    Ok(Json(student))
}

/// GET /api/students
pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, ApiError> {
    tracing::info!("fetching all students");

    let students = state.store.list().await?;
    Ok(Json(students))
}

/// PATCH /api/students/{id}
pub async fn update_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<Student>, ApiError> {
    let id = parse_id(&raw_id)?;
    tracing::info!(id, "modifying a student");

    let patch: StudentPatch = decode_body(&body)?;
    let updated = state.store.update(id, &patch).await?;

    Ok(Json(updated))
}

/// DELETE /api/students/{id}
pub async fn delete_student(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let id = parse_id(&raw_id)?;
    tracing::info!(id, "deleting a student");

    state.store.delete(id).await?;

    Ok(Json(DeletedResponse {
        status: "success".to_string(),
    }))
}
