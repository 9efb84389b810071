//! Doctor endpoints, mirroring the patient surface plus the
//! specialty lookup.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ApiResponse};
use crate::db::repository;
use crate::models::{Doctor, DoctorUpdate};

/// `GET /api/medicos`
pub async fn list(
    State(ctx): State<ApiContext>,
) -> Result<Json<ApiResponse<Vec<Doctor>>>, ApiError> {
    let conn = ctx.lock_db()?;
    let data = repository::get_all_doctors(&conn)?;
    let count = data.len();
    Ok(Json(ApiResponse::ok_list(
        "doctors retrieved successfully",
        data,
        count,
    )))
}

/// `GET /api/medicos/:cmp`
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(cmp): Path<String>,
) -> Result<Json<ApiResponse<Doctor>>, ApiError> {
    let conn = ctx.lock_db()?;
    let doctor = repository::get_doctor(&conn, &cmp)?.ok_or_else(|| {
        ApiError::not_found(
            "error fetching doctor",
            format!("doctor not found with CMP {cmp}"),
        )
    })?;
    Ok(Json(ApiResponse::ok("doctor found", doctor)))
}

/// `GET /api/medicos/especialidad/:nombre` — exact specialty match.
pub async fn by_specialty(
    State(ctx): State<ApiContext>,
    Path(nombre): Path<String>,
) -> Result<Json<ApiResponse<Vec<Doctor>>>, ApiError> {
    let conn = ctx.lock_db()?;
    let data = repository::get_doctors_by_specialty(&conn, &nombre)?;
    let count = data.len();
    Ok(Json(ApiResponse::ok_list("doctors found", data, count)))
}

/// `POST /api/medicos`
pub async fn register(
    State(ctx): State<ApiContext>,
    Json(doctor): Json<Doctor>,
) -> Result<(StatusCode, Json<ApiResponse<Doctor>>), ApiError> {
    let errors = doctor.validate();
    if !errors.is_empty() {
        return Err(ApiError::InvalidInput { errors });
    }

    let conn = ctx.lock_db()?;
    if repository::doctor_exists(&conn, &doctor.med_cmp)? {
        return Err(ApiError::conflict(
            "error registering doctor",
            format!("a doctor already exists with CMP {}", doctor.med_cmp),
        ));
    }
    repository::insert_doctor(&conn, &doctor)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("doctor registered successfully", doctor)),
    ))
}

/// `PUT /api/medicos/:cmp` — updates every field except the CMP.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(cmp): Path<String>,
    Json(input): Json<DoctorUpdate>,
) -> Result<Json<ApiResponse<Doctor>>, ApiError> {
    let errors = input.validate();
    if !errors.is_empty() {
        return Err(ApiError::InvalidInput { errors });
    }

    let conn = ctx.lock_db()?;
    let existing = repository::get_doctor(&conn, &cmp)?.ok_or_else(|| {
        ApiError::not_found(
            "error updating doctor",
            format!("doctor not found with CMP {cmp}"),
        )
    })?;
    let updated = input.apply_to(&existing);
    repository::update_doctor(&conn, &updated)?;
    Ok(Json(ApiResponse::ok("doctor updated successfully", updated)))
}

/// `DELETE /api/medicos/:cmp` — removes the doctor and the records
/// they attended.
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(cmp): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let conn = ctx.lock_db()?;
    if !repository::doctor_exists(&conn, &cmp)? {
        return Err(ApiError::not_found(
            "error deleting doctor",
            format!("doctor not found with CMP {cmp}"),
        ));
    }
    repository::delete_doctor(&conn, &cmp)?;
    Ok(Json(ApiResponse::message_only("doctor deleted successfully")))
}
