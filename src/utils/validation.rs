//! Utilidades de validación
//!
//! Reglas de validación compartidas por los formularios: número de licencia
//! de conductor y formato de username.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

/// Longitud exacta de un número de licencia (AAA#####)
pub const LICENSE_NUMBER_LENGTH: usize = 8;
const LICENSE_LETTERS: usize = 3;

lazy_static! {
    /// Letras, dígitos y @ . + - _
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[\w.@+-]+$").unwrap();
}

fn license_error(message: &'static str, value: &str) -> ValidationError {
    let mut error = ValidationError::new("license_number");
    error.message = Some(message.into());
    error.add_param("value".into(), &value.to_string());
    error
}

/// Validar número de licencia: 3 letras mayúsculas seguidas de 5 dígitos.
///
/// Devuelve el valor sin modificar cuando es válido.
pub fn validate_license_number(value: &str) -> Result<&str, ValidationError> {
    let chars: Vec<char> = value.chars().collect();

    if chars.len() != LICENSE_NUMBER_LENGTH {
        return Err(license_error(
            "License number should consist of 8 characters",
            value,
        ));
    }

    let (letters, digits) = chars.split_at(LICENSE_LETTERS);

    if !letters.iter().all(|c| c.is_ascii_uppercase()) {
        return Err(license_error(
            "First 3 characters should be uppercase letters",
            value,
        ));
    }

    if !digits.iter().all(|c| c.is_ascii_digit()) {
        return Err(license_error("Last 5 characters should be digits", value));
    }

    Ok(value)
}

/// Regla `custom` para `#[derive(Validate)]`
pub fn license_number_rule(value: &str) -> Result<(), ValidationError> {
    validate_license_number(value).map(|_| ())
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("This field is required.".into());
        return Err(error);
    }
    Ok(())
}
