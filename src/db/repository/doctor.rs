use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::Doctor;

const DOCTOR_COLUMNS: &str = "med_cmp, med_nombre, med_apellidos, espe_nombre";

pub fn insert_doctor(conn: &Connection, doctor: &Doctor) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO medicos (med_cmp, med_nombre, med_apellidos, espe_nombre)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            doctor.med_cmp,
            doctor.med_nombre,
            doctor.med_apellidos,
            doctor.espe_nombre,
        ],
    )?;
    Ok(())
}

/// Update every editable field; the CMP is the lookup key and never changes.
pub fn update_doctor(conn: &Connection, doctor: &Doctor) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE medicos SET med_nombre = ?2, med_apellidos = ?3, espe_nombre = ?4
         WHERE med_cmp = ?1",
        params![
            doctor.med_cmp,
            doctor.med_nombre,
            doctor.med_apellidos,
            doctor.espe_nombre,
        ],
    )?;
    Ok(())
}

pub fn get_doctor(conn: &Connection, cmp: &str) -> Result<Option<Doctor>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {DOCTOR_COLUMNS} FROM medicos WHERE med_cmp = ?1"
    ))?;
    let doctor = stmt.query_row(params![cmp], doctor_from_row).optional()?;
    Ok(doctor)
}

pub fn doctor_exists(conn: &Connection, cmp: &str) -> Result<bool, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM medicos WHERE med_cmp = ?1",
        params![cmp],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

pub fn get_all_doctors(conn: &Connection) -> Result<Vec<Doctor>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("SELECT {DOCTOR_COLUMNS} FROM medicos"))?;
    let rows = stmt.query_map([], doctor_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Exact-match specialty lookup.
pub fn get_doctors_by_specialty(
    conn: &Connection,
    especialidad: &str,
) -> Result<Vec<Doctor>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {DOCTOR_COLUMNS} FROM medicos WHERE espe_nombre = ?1"
    ))?;
    let rows = stmt.query_map(params![especialidad], doctor_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn delete_doctor(conn: &Connection, cmp: &str) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM medicos WHERE med_cmp = ?1", params![cmp])?;
    Ok(())
}

pub(crate) fn doctor_from_row(row: &rusqlite::Row<'_>) -> Result<Doctor, rusqlite::Error> {
    Ok(Doctor {
        med_cmp: row.get(0)?,
        med_nombre: row.get(1)?,
        med_apellidos: row.get(2)?,
        espe_nombre: row.get(3)?,
    })
}
