use serde::{Deserialize, Serialize};

use super::{check_length, is_digits};

/// A doctor, keyed by professional license number (CMP). The CMP is
/// immutable; updates go through [`DoctorUpdate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub med_cmp: String,
    pub med_nombre: String,
    pub med_apellidos: String,
    pub espe_nombre: String,
}

impl Doctor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.med_nombre, self.med_apellidos)
    }

    /// Display label: full name plus specialty.
    pub fn display_label(&self) -> String {
        format!("{} - {}", self.full_name(), self.espe_nombre)
    }

    /// Field-level structural checks, as `"<field>: <message>"` entries.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !is_digits(&self.med_cmp, 4, 10) {
            errors.push("medCmp: must be between 4 and 10 digits".to_string());
        }
        validate_editable_fields(&mut errors, &self.med_nombre, &self.med_apellidos, &self.espe_nombre);
        errors
    }
}

/// Update payload for a doctor — everything but the CMP.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorUpdate {
    pub med_nombre: String,
    pub med_apellidos: String,
    pub espe_nombre: String,
}

impl DoctorUpdate {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        validate_editable_fields(&mut errors, &self.med_nombre, &self.med_apellidos, &self.espe_nombre);
        errors
    }

    pub fn apply_to(&self, existing: &Doctor) -> Doctor {
        Doctor {
            med_cmp: existing.med_cmp.clone(),
            med_nombre: self.med_nombre.clone(),
            med_apellidos: self.med_apellidos.clone(),
            espe_nombre: self.espe_nombre.clone(),
        }
    }
}

fn validate_editable_fields(errors: &mut Vec<String>, nombre: &str, apellidos: &str, especialidad: &str) {
    check_length(errors, "medNombre", Some(nombre), 2, 100);
    check_length(errors, "medApellidos", Some(apellidos), 2, 200);
    check_length(errors, "espeNombre", Some(especialidad), 2, 100);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn juan() -> Doctor {
        Doctor {
            med_cmp: "1111".into(),
            med_nombre: "Juan".into(),
            med_apellidos: "Perez".into(),
            espe_nombre: "Cardiologia".into(),
        }
    }

    #[test]
    fn full_name_concatenates_surnames() {
        assert_eq!(juan().full_name(), "Juan Perez");
    }

    #[test]
    fn display_label_appends_specialty() {
        assert_eq!(juan().display_label(), "Juan Perez - Cardiologia");
    }

    #[test]
    fn valid_doctor_passes() {
        assert!(juan().validate().is_empty());
    }

    #[test]
    fn cmp_length_bounds() {
        let mut d = juan();
        d.med_cmp = "123".into();
        assert!(d.validate().iter().any(|e| e.starts_with("medCmp:")));
        d.med_cmp = "12345678901".into();
        assert!(d.validate().iter().any(|e| e.starts_with("medCmp:")));
        d.med_cmp = "1234567890".into();
        assert!(d.validate().is_empty());
    }

    #[test]
    fn specialty_required() {
        let mut d = juan();
        d.espe_nombre = String::new();
        assert!(d.validate().iter().any(|e| e.starts_with("espeNombre:")));
    }

    #[test]
    fn update_preserves_cmp() {
        let update = DoctorUpdate {
            med_nombre: "Carlos".into(),
            med_apellidos: "Diaz Soto".into(),
            espe_nombre: "Pediatria".into(),
        };
        let updated = update.apply_to(&juan());
        assert_eq!(updated.med_cmp, "1111");
        assert_eq!(updated.display_label(), "Carlos Diaz Soto - Pediatria");
    }
}
