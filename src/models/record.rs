use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{check_length, is_digits, Doctor, Patient};

pub const CLINICAL_TEXT_MIN: usize = 10;
pub const CLINICAL_TEXT_MAX: usize = 5000;

/// A medical-history entry. Carries the resolved patient and doctor so
/// the response projection never needs a second lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct MedicalRecord {
    pub hist_id: i64,
    pub paciente: Patient,
    pub medico: Doctor,
    pub hist_fecha_atencion: NaiveDate,
    pub hist_diagnostico: String,
    pub hist_analisis: Option<String>,
    pub hist_tratamiento: String,
}

/// Payload for registering or updating a medical record. The date of
/// care is optional on registration and defaults to today.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecordInput {
    pub pac_dni: String,
    pub med_cmp: String,
    pub hist_fecha_atencion: Option<NaiveDate>,
    pub hist_diagnostico: String,
    pub hist_analisis: Option<String>,
    pub hist_tratamiento: String,
}

impl MedicalRecordInput {
    /// Field-level structural checks, as `"<field>: <message>"` entries.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !is_digits(&self.pac_dni, 8, 8) {
            errors.push("pacDni: must be exactly 8 digits".to_string());
        }
        if !is_digits(&self.med_cmp, 4, 10) {
            errors.push("medCmp: must be between 4 and 10 digits".to_string());
        }
        if let Some(fecha) = self.hist_fecha_atencion {
            if fecha > Local::now().date_naive() {
                errors.push("histFechaAtencion: cannot be in the future".to_string());
            }
        }
        check_length(
            &mut errors,
            "histDiagnostico",
            Some(&self.hist_diagnostico),
            CLINICAL_TEXT_MIN,
            CLINICAL_TEXT_MAX,
        );
        check_length(
            &mut errors,
            "histAnalisis",
            self.hist_analisis.as_deref(),
            0,
            CLINICAL_TEXT_MAX,
        );
        check_length(
            &mut errors,
            "histTratamiento",
            Some(&self.hist_tratamiento),
            CLINICAL_TEXT_MIN,
            CLINICAL_TEXT_MAX,
        );
        errors
    }
}

/// Response projection: the record's clinical fields plus identifying
/// fields denormalized from the associated patient and doctor, so the
/// client never fetches those separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecordResponse {
    pub hist_id: i64,
    pub pac_dni: String,
    pub pac_nombre_completo: String,
    pub pac_telefono: Option<String>,
    pub med_cmp: String,
    pub med_nombre_completo: String,
    pub med_especialidad: String,
    pub hist_fecha_atencion: NaiveDate,
    pub hist_diagnostico: String,
    pub hist_analisis: Option<String>,
    pub hist_tratamiento: String,
}

impl From<&MedicalRecord> for MedicalRecordResponse {
    fn from(record: &MedicalRecord) -> Self {
        Self {
            hist_id: record.hist_id,
            pac_dni: record.paciente.pac_dni.clone(),
            pac_nombre_completo: record.paciente.full_name(),
            pac_telefono: record.paciente.pac_telefono.clone(),
            med_cmp: record.medico.med_cmp.clone(),
            med_nombre_completo: record.medico.full_name(),
            med_especialidad: record.medico.espe_nombre.clone(),
            hist_fecha_atencion: record.hist_fecha_atencion,
            hist_diagnostico: record.hist_diagnostico.clone(),
            hist_analisis: record.hist_analisis.clone(),
            hist_tratamiento: record.hist_tratamiento.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> MedicalRecordInput {
        MedicalRecordInput {
            pac_dni: "12345678".into(),
            med_cmp: "1111".into(),
            hist_fecha_atencion: None,
            hist_diagnostico: "chest pain evaluation".into(),
            hist_analisis: None,
            hist_tratamiento: "prescribed rest and monitoring".into(),
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(input().validate().is_empty());
    }

    #[test]
    fn diagnosis_boundaries() {
        let mut i = input();
        i.hist_diagnostico = "a".repeat(9);
        assert!(!i.validate().is_empty());
        i.hist_diagnostico = "a".repeat(10);
        assert!(i.validate().is_empty());
        i.hist_diagnostico = "a".repeat(5000);
        assert!(i.validate().is_empty());
        i.hist_diagnostico = "a".repeat(5001);
        assert!(!i.validate().is_empty());
    }

    #[test]
    fn analysis_optional_but_bounded() {
        let mut i = input();
        i.hist_analisis = Some("ok".into());
        assert!(i.validate().is_empty());
        i.hist_analisis = Some("a".repeat(5001));
        assert!(i.validate().iter().any(|e| e.starts_with("histAnalisis:")));
    }

    #[test]
    fn future_date_rejected() {
        let mut i = input();
        i.hist_fecha_atencion = Some(Local::now().date_naive() + chrono::Days::new(1));
        assert!(i
            .validate()
            .iter()
            .any(|e| e.starts_with("histFechaAtencion:")));
    }

    #[test]
    fn today_accepted() {
        let mut i = input();
        i.hist_fecha_atencion = Some(Local::now().date_naive());
        assert!(i.validate().is_empty());
    }

    #[test]
    fn malformed_keys_rejected() {
        let mut i = input();
        i.pac_dni = "12ab5678".into();
        i.med_cmp = "12".into();
        let errors = i.validate();
        assert!(errors.iter().any(|e| e.starts_with("pacDni:")));
        assert!(errors.iter().any(|e| e.starts_with("medCmp:")));
    }

    #[test]
    fn projection_denormalizes_both_entities() {
        let record = MedicalRecord {
            hist_id: 7,
            paciente: Patient {
                pac_dni: "12345678".into(),
                pac_nombre: "Ana".into(),
                pac_apellido_paterno: "Lopez".into(),
                pac_apellido_materno: None,
                pac_direccion: None,
                pac_telefono: Some("987654321".into()),
            },
            medico: Doctor {
                med_cmp: "1111".into(),
                med_nombre: "Juan".into(),
                med_apellidos: "Perez".into(),
                espe_nombre: "Cardiologia".into(),
            },
            hist_fecha_atencion: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            hist_diagnostico: "chest pain evaluation".into(),
            hist_analisis: None,
            hist_tratamiento: "prescribed rest and monitoring".into(),
        };

        let response = MedicalRecordResponse::from(&record);
        assert_eq!(response.hist_id, 7);
        assert_eq!(response.pac_nombre_completo, "Ana Lopez");
        assert_eq!(response.pac_telefono.as_deref(), Some("987654321"));
        assert_eq!(response.med_nombre_completo, "Juan Perez");
        assert_eq!(response.med_especialidad, "Cardiologia");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["pacNombreCompleto"], "Ana Lopez");
        assert_eq!(json["medNombreCompleto"], "Juan Perez");
        assert_eq!(json["medEspecialidad"], "Cardiologia");
        assert_eq!(json["histFechaAtencion"], "2026-03-01");
    }
}
