use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::Patient;

const PATIENT_COLUMNS: &str =
    "pac_dni, pac_nombre, pac_apellido_paterno, pac_apellido_materno, pac_direccion, pac_telefono";

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO pacientes (pac_dni, pac_nombre, pac_apellido_paterno,
         pac_apellido_materno, pac_direccion, pac_telefono)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            patient.pac_dni,
            patient.pac_nombre,
            patient.pac_apellido_paterno,
            patient.pac_apellido_materno,
            patient.pac_direccion,
            patient.pac_telefono,
        ],
    )?;
    Ok(())
}

/// Update every editable field; the DNI is the lookup key and never changes.
pub fn update_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE pacientes SET pac_nombre = ?2, pac_apellido_paterno = ?3,
         pac_apellido_materno = ?4, pac_direccion = ?5, pac_telefono = ?6
         WHERE pac_dni = ?1",
        params![
            patient.pac_dni,
            patient.pac_nombre,
            patient.pac_apellido_paterno,
            patient.pac_apellido_materno,
            patient.pac_direccion,
            patient.pac_telefono,
        ],
    )?;
    Ok(())
}

pub fn get_patient(conn: &Connection, dni: &str) -> Result<Option<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PATIENT_COLUMNS} FROM pacientes WHERE pac_dni = ?1"
    ))?;
    let patient = stmt
        .query_row(params![dni], patient_from_row)
        .optional()?;
    Ok(patient)
}

pub fn patient_exists(conn: &Connection, dni: &str) -> Result<bool, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM pacientes WHERE pac_dni = ?1",
        params![dni],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

pub fn get_all_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("SELECT {PATIENT_COLUMNS} FROM pacientes"))?;
    let rows = stmt.query_map([], patient_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn delete_patient(conn: &Connection, dni: &str) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM pacientes WHERE pac_dni = ?1", params![dni])?;
    Ok(())
}

pub(crate) fn patient_from_row(row: &rusqlite::Row<'_>) -> Result<Patient, rusqlite::Error> {
    Ok(Patient {
        pac_dni: row.get(0)?,
        pac_nombre: row.get(1)?,
        pac_apellido_paterno: row.get(2)?,
        pac_apellido_materno: row.get(3)?,
        pac_direccion: row.get(4)?,
        pac_telefono: row.get(5)?,
    })
}
