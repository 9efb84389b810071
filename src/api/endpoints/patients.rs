//! Patient endpoints. These go straight to the repository — patients
//! have no cross-entity invariants of their own, only the immutable DNI.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ApiResponse};
use crate::db::repository;
use crate::models::{Patient, PatientUpdate};

/// `GET /api/pacientes`
pub async fn list(
    State(ctx): State<ApiContext>,
) -> Result<Json<ApiResponse<Vec<Patient>>>, ApiError> {
    let conn = ctx.lock_db()?;
    let data = repository::get_all_patients(&conn)?;
    let count = data.len();
    Ok(Json(ApiResponse::ok_list(
        "patients retrieved successfully",
        data,
        count,
    )))
}

/// `GET /api/pacientes/:dni`
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(dni): Path<String>,
) -> Result<Json<ApiResponse<Patient>>, ApiError> {
    let conn = ctx.lock_db()?;
    let patient = repository::get_patient(&conn, &dni)?.ok_or_else(|| {
        ApiError::not_found(
            "error fetching patient",
            format!("patient not found with DNI {dni}"),
        )
    })?;
    Ok(Json(ApiResponse::ok("patient found", patient)))
}

/// `POST /api/pacientes`
pub async fn register(
    State(ctx): State<ApiContext>,
    Json(patient): Json<Patient>,
) -> Result<(StatusCode, Json<ApiResponse<Patient>>), ApiError> {
    let errors = patient.validate();
    if !errors.is_empty() {
        return Err(ApiError::InvalidInput { errors });
    }

    let conn = ctx.lock_db()?;
    if repository::patient_exists(&conn, &patient.pac_dni)? {
        return Err(ApiError::conflict(
            "error registering patient",
            format!("a patient already exists with DNI {}", patient.pac_dni),
        ));
    }
    repository::insert_patient(&conn, &patient)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("patient registered successfully", patient)),
    ))
}

/// `PUT /api/pacientes/:dni` — updates every field except the DNI.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(dni): Path<String>,
    Json(input): Json<PatientUpdate>,
) -> Result<Json<ApiResponse<Patient>>, ApiError> {
    let errors = input.validate();
    if !errors.is_empty() {
        return Err(ApiError::InvalidInput { errors });
    }

    let conn = ctx.lock_db()?;
    let existing = repository::get_patient(&conn, &dni)?.ok_or_else(|| {
        ApiError::not_found(
            "error updating patient",
            format!("patient not found with DNI {dni}"),
        )
    })?;
    let updated = input.apply_to(&existing);
    repository::update_patient(&conn, &updated)?;
    Ok(Json(ApiResponse::ok("patient updated successfully", updated)))
}

/// `DELETE /api/pacientes/:dni` — removes the patient and, with it, all
/// of the patient's medical records.
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(dni): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let conn = ctx.lock_db()?;
    if !repository::patient_exists(&conn, &dni)? {
        return Err(ApiError::not_found(
            "error deleting patient",
            format!("patient not found with DNI {dni}"),
        ));
    }
    repository::delete_patient(&conn, &dni)?;
    Ok(Json(ApiResponse::message_only("patient deleted successfully")))
}
