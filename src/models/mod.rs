//! Persisted data shapes and their request/response counterparts.
//!
//! Wire names keep the camelCase Spanish identifiers the mobile client
//! already speaks (`pacDni`, `medCmp`, `histFechaAtencion`, ...); Rust
//! fields are the snake_case equivalents.

pub mod doctor;
pub mod patient;
pub mod record;

pub use doctor::{Doctor, DoctorUpdate};
pub use patient::{Patient, PatientUpdate};
pub use record::{MedicalRecord, MedicalRecordInput, MedicalRecordResponse};

/// True when `s` is ASCII digits only, with a length inside `min..=max`.
pub(crate) fn is_digits(s: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

/// Push a `"<field>: <message>"` entry when `value` falls outside
/// `min..=max` characters. `min == 0` also admits a missing value.
pub(crate) fn check_length(
    errors: &mut Vec<String>,
    field: &str,
    value: Option<&str>,
    min: usize,
    max: usize,
) {
    match value {
        Some(v) => {
            let n = v.chars().count();
            if n < min || n > max {
                if min == 0 {
                    errors.push(format!("{field}: must be at most {max} characters"));
                } else {
                    errors.push(format!("{field}: must be between {min} and {max} characters"));
                }
            }
        }
        None if min > 0 => errors.push(format!("{field}: is required")),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_accepts_exact_range() {
        assert!(is_digits("12345678", 8, 8));
        assert!(!is_digits("1234567", 8, 8));
        assert!(!is_digits("123456789", 8, 8));
        assert!(!is_digits("1234567a", 8, 8));
    }

    #[test]
    fn check_length_flags_missing_required() {
        let mut errors = Vec::new();
        check_length(&mut errors, "pacNombre", None, 2, 100);
        assert_eq!(errors, vec!["pacNombre: is required"]);
    }

    #[test]
    fn check_length_allows_missing_optional() {
        let mut errors = Vec::new();
        check_length(&mut errors, "pacDireccion", None, 0, 255);
        assert!(errors.is_empty());
    }
}
