use serde::{Deserialize, Serialize};

use super::{check_length, is_digits};

/// A patient, keyed by national identity number (DNI). The DNI is
/// immutable once assigned; updates go through [`PatientUpdate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub pac_dni: String,
    pub pac_nombre: String,
    pub pac_apellido_paterno: String,
    pub pac_apellido_materno: Option<String>,
    pub pac_direccion: Option<String>,
    pub pac_telefono: Option<String>,
}

impl Patient {
    /// Given name plus paternal surname, plus maternal surname when present.
    pub fn full_name(&self) -> String {
        let mut name = format!("{} {}", self.pac_nombre, self.pac_apellido_paterno);
        if let Some(materno) = &self.pac_apellido_materno {
            if !materno.is_empty() {
                name.push(' ');
                name.push_str(materno);
            }
        }
        name
    }

    /// Field-level structural checks, as `"<field>: <message>"` entries.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !is_digits(&self.pac_dni, 8, 8) {
            errors.push("pacDni: must be exactly 8 digits".to_string());
        }
        validate_editable_fields(
            &mut errors,
            &self.pac_nombre,
            &self.pac_apellido_paterno,
            self.pac_apellido_materno.as_deref(),
            self.pac_direccion.as_deref(),
            self.pac_telefono.as_deref(),
        );
        errors
    }
}

/// Update payload for a patient — everything but the DNI.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientUpdate {
    pub pac_nombre: String,
    pub pac_apellido_paterno: String,
    pub pac_apellido_materno: Option<String>,
    pub pac_direccion: Option<String>,
    pub pac_telefono: Option<String>,
}

impl PatientUpdate {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        validate_editable_fields(
            &mut errors,
            &self.pac_nombre,
            &self.pac_apellido_paterno,
            self.pac_apellido_materno.as_deref(),
            self.pac_direccion.as_deref(),
            self.pac_telefono.as_deref(),
        );
        errors
    }

    /// Produce the updated entity, keeping the immutable DNI.
    pub fn apply_to(&self, existing: &Patient) -> Patient {
        Patient {
            pac_dni: existing.pac_dni.clone(),
            pac_nombre: self.pac_nombre.clone(),
            pac_apellido_paterno: self.pac_apellido_paterno.clone(),
            pac_apellido_materno: self.pac_apellido_materno.clone(),
            pac_direccion: self.pac_direccion.clone(),
            pac_telefono: self.pac_telefono.clone(),
        }
    }
}

fn validate_editable_fields(
    errors: &mut Vec<String>,
    nombre: &str,
    paterno: &str,
    materno: Option<&str>,
    direccion: Option<&str>,
    telefono: Option<&str>,
) {
    check_length(errors, "pacNombre", Some(nombre), 2, 100);
    check_length(errors, "pacApellidoPaterno", Some(paterno), 2, 100);
    check_length(errors, "pacApellidoMaterno", materno, 0, 100);
    check_length(errors, "pacDireccion", direccion, 0, 255);
    if let Some(tel) = telefono {
        if !is_digits(tel, 9, 15) {
            errors.push("pacTelefono: must be between 9 and 15 digits".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> Patient {
        Patient {
            pac_dni: "12345678".into(),
            pac_nombre: "Ana".into(),
            pac_apellido_paterno: "Lopez".into(),
            pac_apellido_materno: None,
            pac_direccion: None,
            pac_telefono: Some("987654321".into()),
        }
    }

    #[test]
    fn full_name_without_maternal_surname() {
        assert_eq!(ana().full_name(), "Ana Lopez");
    }

    #[test]
    fn full_name_with_maternal_surname() {
        let mut p = ana();
        p.pac_apellido_materno = Some("Garcia".into());
        assert_eq!(p.full_name(), "Ana Lopez Garcia");
    }

    #[test]
    fn full_name_ignores_empty_maternal_surname() {
        let mut p = ana();
        p.pac_apellido_materno = Some(String::new());
        assert_eq!(p.full_name(), "Ana Lopez");
    }

    #[test]
    fn valid_patient_passes() {
        assert!(ana().validate().is_empty());
    }

    #[test]
    fn dni_must_be_eight_digits() {
        let mut p = ana();
        p.pac_dni = "1234".into();
        let errors = p.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("pacDni:"));
    }

    #[test]
    fn phone_length_checked_when_present() {
        let mut p = ana();
        p.pac_telefono = Some("12345".into());
        assert!(p.validate().iter().any(|e| e.starts_with("pacTelefono:")));
    }

    #[test]
    fn short_name_rejected() {
        let mut p = ana();
        p.pac_nombre = "A".into();
        assert!(p.validate().iter().any(|e| e.starts_with("pacNombre:")));
    }

    #[test]
    fn update_preserves_dni() {
        let update = PatientUpdate {
            pac_nombre: "Maria".into(),
            pac_apellido_paterno: "Quispe".into(),
            pac_apellido_materno: None,
            pac_direccion: Some("Av. Lima 123".into()),
            pac_telefono: None,
        };
        let updated = update.apply_to(&ana());
        assert_eq!(updated.pac_dni, "12345678");
        assert_eq!(updated.pac_nombre, "Maria");
        assert_eq!(updated.pac_direccion.as_deref(), Some("Av. Lima 123"));
    }

    #[test]
    fn wire_names_are_camel_case() {
        let json = serde_json::to_value(ana()).unwrap();
        assert_eq!(json["pacDni"], "12345678");
        assert_eq!(json["pacApellidoPaterno"], "Lopez");
        assert!(json["pacApellidoMaterno"].is_null());
    }
}
