//! Record service — validated creation, update and deletion of medical
//! records, with referential-integrity checks against patients and
//! doctors and projection into the denormalized response shape.
//!
//! Mutating operations run inside a single transaction: a failed lookup
//! or validation leaves no partial state behind.

use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use thiserror::Error;

use crate::db::{repository, DatabaseError};
use crate::models::record::{CLINICAL_TEXT_MAX, CLINICAL_TEXT_MIN};
use crate::models::{MedicalRecord, MedicalRecordInput, MedicalRecordResponse};

#[derive(Debug, Error)]
pub enum RecordError {
    /// A referenced key (record id, patient DNI, doctor CMP) did not resolve.
    #[error("{0}")]
    NotFound(String),

    /// A structural constraint was violated before any store mutation.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<rusqlite::Error> for RecordError {
    fn from(err: rusqlite::Error) -> Self {
        RecordError::Database(DatabaseError::Sqlite(err))
    }
}

type Result<T> = std::result::Result<T, RecordError>;

/// List every record, in store iteration order.
pub fn list_all(conn: &Connection) -> Result<Vec<MedicalRecordResponse>> {
    Ok(project_all(repository::get_all_records(conn)?))
}

pub fn get_by_id(conn: &Connection, id: i64) -> Result<MedicalRecordResponse> {
    let record = repository::get_record(conn, id)?
        .ok_or_else(|| RecordError::NotFound(format!("medical record not found with id {id}")))?;
    Ok(MedicalRecordResponse::from(&record))
}

/// Register a new record. The date of care defaults to today when absent.
pub fn register(conn: &mut Connection, input: &MedicalRecordInput) -> Result<MedicalRecordResponse> {
    let tx = conn.transaction().map_err(DatabaseError::from)?;

    let paciente = resolve_patient(&tx, &input.pac_dni)?;
    let medico = resolve_doctor(&tx, &input.med_cmp)?;
    let fecha = input
        .hist_fecha_atencion
        .unwrap_or_else(|| Local::now().date_naive());
    validate_clinical_fields(input, fecha)?;

    let mut record = MedicalRecord {
        hist_id: 0,
        paciente,
        medico,
        hist_fecha_atencion: fecha,
        hist_diagnostico: input.hist_diagnostico.clone(),
        hist_analisis: input.hist_analisis.clone(),
        hist_tratamiento: input.hist_tratamiento.clone(),
    };
    record.hist_id = repository::insert_record(&tx, &record)?;
    tx.commit().map_err(DatabaseError::from)?;

    tracing::debug!(id = record.hist_id, "medical record registered");
    Ok(MedicalRecordResponse::from(&record))
}

/// Update an existing record, re-resolving both associations.
pub fn update(
    conn: &mut Connection,
    id: i64,
    input: &MedicalRecordInput,
) -> Result<MedicalRecordResponse> {
    let tx = conn.transaction().map_err(DatabaseError::from)?;

    if !repository::record_exists(&tx, id)? {
        return Err(RecordError::NotFound(format!(
            "medical record not found with id {id}"
        )));
    }
    let paciente = resolve_patient(&tx, &input.pac_dni)?;
    let medico = resolve_doctor(&tx, &input.med_cmp)?;
    let fecha = input.hist_fecha_atencion.ok_or_else(|| {
        RecordError::Validation("date of care is required when updating".to_string())
    })?;
    validate_clinical_fields(input, fecha)?;

    let record = MedicalRecord {
        hist_id: id,
        paciente,
        medico,
        hist_fecha_atencion: fecha,
        hist_diagnostico: input.hist_diagnostico.clone(),
        hist_analisis: input.hist_analisis.clone(),
        hist_tratamiento: input.hist_tratamiento.clone(),
    };
    repository::update_record(&tx, &record)?;
    tx.commit().map_err(DatabaseError::from)?;

    tracing::debug!(id, "medical record updated");
    Ok(MedicalRecordResponse::from(&record))
}

pub fn delete(conn: &mut Connection, id: i64) -> Result<()> {
    let tx = conn.transaction().map_err(DatabaseError::from)?;
    if !repository::record_exists(&tx, id)? {
        return Err(RecordError::NotFound(format!(
            "medical record not found with id {id}"
        )));
    }
    repository::delete_record(&tx, id)?;
    tx.commit().map_err(DatabaseError::from)?;

    tracing::debug!(id, "medical record deleted");
    Ok(())
}

/// Records of one patient, newest date of care first.
pub fn find_by_patient(conn: &Connection, dni: &str) -> Result<Vec<MedicalRecordResponse>> {
    Ok(project_all(repository::get_records_by_patient(conn, dni)?))
}

/// Records attended by one doctor, newest date of care first.
pub fn find_by_doctor(conn: &Connection, cmp: &str) -> Result<Vec<MedicalRecordResponse>> {
    Ok(project_all(repository::get_records_by_doctor(conn, cmp)?))
}

/// Records inside an inclusive date range, newest first. An inverted
/// range (start after end) yields an empty list.
pub fn find_by_date_range(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<MedicalRecordResponse>> {
    Ok(project_all(repository::get_records_by_date_range(
        conn, start, end,
    )?))
}

fn resolve_patient(conn: &Connection, dni: &str) -> Result<crate::models::Patient> {
    repository::get_patient(conn, dni)?
        .ok_or_else(|| RecordError::NotFound(format!("patient not found with DNI {dni}")))
}

fn resolve_doctor(conn: &Connection, cmp: &str) -> Result<crate::models::Doctor> {
    repository::get_doctor(conn, cmp)?
        .ok_or_else(|| RecordError::NotFound(format!("doctor not found with CMP {cmp}")))
}

/// Text-length and date constraints, re-checked inside the service so
/// callers bypassing the HTTP boundary get the same guarantees.
fn validate_clinical_fields(input: &MedicalRecordInput, fecha: NaiveDate) -> Result<()> {
    check_text("diagnosis", &input.hist_diagnostico, true)?;
    if let Some(analisis) = &input.hist_analisis {
        check_text("analysis", analisis, false)?;
    }
    check_text("treatment", &input.hist_tratamiento, true)?;
    if fecha > Local::now().date_naive() {
        return Err(RecordError::Validation(
            "date of care cannot be in the future".to_string(),
        ));
    }
    Ok(())
}

fn check_text(field: &str, value: &str, required: bool) -> Result<()> {
    let n = value.chars().count();
    if required && (n < CLINICAL_TEXT_MIN || n > CLINICAL_TEXT_MAX) {
        return Err(RecordError::Validation(format!(
            "{field} must be between {CLINICAL_TEXT_MIN} and {CLINICAL_TEXT_MAX} characters"
        )));
    }
    if !required && n > CLINICAL_TEXT_MAX {
        return Err(RecordError::Validation(format!(
            "{field} must be at most {CLINICAL_TEXT_MAX} characters"
        )));
    }
    Ok(())
}

fn project_all(records: Vec<MedicalRecord>) -> Vec<MedicalRecordResponse> {
    records.iter().map(MedicalRecordResponse::from).collect()
}
