//! Medical-record endpoints: full CRUD plus the three lookup queries.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ApiResponse};
use crate::models::{MedicalRecordInput, MedicalRecordResponse};
use crate::records;

type ListEnvelope = Json<ApiResponse<Vec<MedicalRecordResponse>>>;
type SingleEnvelope = Json<ApiResponse<MedicalRecordResponse>>;

/// `GET /api/historias-clinicas`
pub async fn list(State(ctx): State<ApiContext>) -> Result<ListEnvelope, ApiError> {
    let conn = ctx.lock_db()?;
    let data = records::list_all(&conn)
        .map_err(|e| ApiError::from_record("error listing medical records", e))?;
    let count = data.len();
    Ok(Json(ApiResponse::ok_list(
        "medical records retrieved successfully",
        data,
        count,
    )))
}

/// `GET /api/historias-clinicas/:id`
pub async fn get(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<SingleEnvelope, ApiError> {
    let conn = ctx.lock_db()?;
    let record = records::get_by_id(&conn, id)
        .map_err(|e| ApiError::from_record("error fetching medical record", e))?;
    Ok(Json(ApiResponse::ok("medical record found", record)))
}

/// `POST /api/historias-clinicas`
pub async fn register(
    State(ctx): State<ApiContext>,
    Json(input): Json<MedicalRecordInput>,
) -> Result<(StatusCode, SingleEnvelope), ApiError> {
    let errors = input.validate();
    if !errors.is_empty() {
        return Err(ApiError::InvalidInput { errors });
    }

    let mut conn = ctx.lock_db()?;
    let created = records::register(&mut conn, &input)
        .map_err(|e| ApiError::from_record("error registering medical record", e))?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            "medical record registered successfully",
            created,
        )),
    ))
}

/// `PUT /api/historias-clinicas/:id`
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
    Json(input): Json<MedicalRecordInput>,
) -> Result<SingleEnvelope, ApiError> {
    let errors = input.validate();
    if !errors.is_empty() {
        return Err(ApiError::InvalidInput { errors });
    }

    let mut conn = ctx.lock_db()?;
    let updated = records::update(&mut conn, id, &input)
        .map_err(|e| ApiError::from_record("error updating medical record", e))?;
    Ok(Json(ApiResponse::ok(
        "medical record updated successfully",
        updated,
    )))
}

/// `DELETE /api/historias-clinicas/:id`
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let mut conn = ctx.lock_db()?;
    records::delete(&mut conn, id)
        .map_err(|e| ApiError::from_record("error deleting medical record", e))?;
    Ok(Json(ApiResponse::message_only(
        "medical record deleted successfully",
    )))
}

/// `GET /api/historias-clinicas/paciente/:dni`
pub async fn by_patient(
    State(ctx): State<ApiContext>,
    Path(dni): Path<String>,
) -> Result<ListEnvelope, ApiError> {
    let conn = ctx.lock_db()?;
    let data = records::find_by_patient(&conn, &dni)
        .map_err(|e| ApiError::from_record("error searching records by patient", e))?;
    let count = data.len();
    Ok(Json(ApiResponse::ok_list(
        "patient medical records retrieved successfully",
        data,
        count,
    )))
}

/// `GET /api/historias-clinicas/medico/:cmp`
pub async fn by_doctor(
    State(ctx): State<ApiContext>,
    Path(cmp): Path<String>,
) -> Result<ListEnvelope, ApiError> {
    let conn = ctx.lock_db()?;
    let data = records::find_by_doctor(&conn, &cmp)
        .map_err(|e| ApiError::from_record("error searching records by doctor", e))?;
    let count = data.len();
    Ok(Json(ApiResponse::ok_list(
        "doctor medical records retrieved successfully",
        data,
        count,
    )))
}

#[derive(Deserialize)]
pub struct DateRangeQuery {
    pub inicio: NaiveDate,
    pub fin: NaiveDate,
}

/// `GET /api/historias-clinicas/fechas?inicio=yyyy-MM-dd&fin=yyyy-MM-dd`
pub async fn by_date_range(
    State(ctx): State<ApiContext>,
    Query(range): Query<DateRangeQuery>,
) -> Result<ListEnvelope, ApiError> {
    let conn = ctx.lock_db()?;
    let data = records::find_by_date_range(&conn, range.inicio, range.fin)
        .map_err(|e| ApiError::from_record("error searching records by date range", e))?;
    let count = data.len();
    Ok(Json(ApiResponse::ok_list(
        "medical records in date range retrieved successfully",
        data,
        count,
    )))
}
