use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::{Doctor, MedicalRecord, Patient};

/// Records are always read with their patient and doctor joined in, so
/// callers get a fully resolved entity in one query.
const RECORD_SELECT: &str = "SELECT h.hist_id, h.hist_fecha_atencion, h.hist_diagnostico,
        h.hist_analisis, h.hist_tratamiento,
        p.pac_dni, p.pac_nombre, p.pac_apellido_paterno, p.pac_apellido_materno,
        p.pac_direccion, p.pac_telefono,
        m.med_cmp, m.med_nombre, m.med_apellidos, m.espe_nombre
     FROM historias_clinicas h
     JOIN pacientes p ON p.pac_dni = h.pac_dni
     JOIN medicos m ON m.med_cmp = h.med_cmp";

/// Descending by date of care; equal dates fall back to insertion order.
const ORDER_BY_DATE_DESC: &str = " ORDER BY h.hist_fecha_atencion DESC, h.hist_id ASC";

/// Insert a record and return its generated id.
pub fn insert_record(conn: &Connection, record: &MedicalRecord) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO historias_clinicas (pac_dni, med_cmp, hist_fecha_atencion,
         hist_diagnostico, hist_analisis, hist_tratamiento)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            record.paciente.pac_dni,
            record.medico.med_cmp,
            record.hist_fecha_atencion,
            record.hist_diagnostico,
            record.hist_analisis,
            record.hist_tratamiento,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_record(conn: &Connection, record: &MedicalRecord) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE historias_clinicas SET pac_dni = ?2, med_cmp = ?3, hist_fecha_atencion = ?4,
         hist_diagnostico = ?5, hist_analisis = ?6, hist_tratamiento = ?7
         WHERE hist_id = ?1",
        params![
            record.hist_id,
            record.paciente.pac_dni,
            record.medico.med_cmp,
            record.hist_fecha_atencion,
            record.hist_diagnostico,
            record.hist_analisis,
            record.hist_tratamiento,
        ],
    )?;
    Ok(())
}

pub fn get_record(conn: &Connection, id: i64) -> Result<Option<MedicalRecord>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("{RECORD_SELECT} WHERE h.hist_id = ?1"))?;
    let record = stmt.query_row(params![id], record_from_row).optional()?;
    Ok(record)
}

pub fn record_exists(conn: &Connection, id: i64) -> Result<bool, DatabaseError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM historias_clinicas WHERE hist_id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

pub fn get_all_records(conn: &Connection) -> Result<Vec<MedicalRecord>, DatabaseError> {
    let mut stmt = conn.prepare(RECORD_SELECT)?;
    let rows = stmt.query_map([], record_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn delete_record(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    conn.execute(
        "DELETE FROM historias_clinicas WHERE hist_id = ?1",
        params![id],
    )?;
    Ok(())
}

pub fn get_records_by_patient(
    conn: &Connection,
    dni: &str,
) -> Result<Vec<MedicalRecord>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "{RECORD_SELECT} WHERE h.pac_dni = ?1{ORDER_BY_DATE_DESC}"
    ))?;
    let rows = stmt.query_map(params![dni], record_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn get_records_by_doctor(
    conn: &Connection,
    cmp: &str,
) -> Result<Vec<MedicalRecord>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "{RECORD_SELECT} WHERE h.med_cmp = ?1{ORDER_BY_DATE_DESC}"
    ))?;
    let rows = stmt.query_map(params![cmp], record_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Inclusive date range; a start after the end simply matches nothing.
pub fn get_records_by_date_range(
    conn: &Connection,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<MedicalRecord>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "{RECORD_SELECT} WHERE h.hist_fecha_atencion BETWEEN ?1 AND ?2{ORDER_BY_DATE_DESC}"
    ))?;
    let rows = stmt.query_map(params![start, end], record_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

fn record_from_row(row: &rusqlite::Row<'_>) -> Result<MedicalRecord, rusqlite::Error> {
    Ok(MedicalRecord {
        hist_id: row.get(0)?,
        hist_fecha_atencion: row.get(1)?,
        hist_diagnostico: row.get(2)?,
        hist_analisis: row.get(3)?,
        hist_tratamiento: row.get(4)?,
        paciente: Patient {
            pac_dni: row.get(5)?,
            pac_nombre: row.get(6)?,
            pac_apellido_paterno: row.get(7)?,
            pac_apellido_materno: row.get(8)?,
            pac_direccion: row.get(9)?,
            pac_telefono: row.get(10)?,
        },
        medico: Doctor {
            med_cmp: row.get(11)?,
            med_nombre: row.get(12)?,
            med_apellidos: row.get(13)?,
            espe_nombre: row.get(14)?,
        },
    })
}
