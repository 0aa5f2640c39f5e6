//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::ValidationError;

use crate::utils::errors::AppError;

lazy_static! {
    // Matrículas: alfanuméricas, guiones y espacios, 2 a 15 caracteres
    static ref PLATE_RE: Regex = Regex::new(r"^[A-Z0-9][A-Z0-9 \-]{1,14}$").unwrap();
}

/// Validar formato de matrícula (se normaliza a mayúsculas antes de comparar)
pub fn validate_plate_number(value: &str) -> Result<(), ValidationError> {
    if PLATE_RE.is_match(&value.to_uppercase()) {
        return Ok(());
    }
    let mut error = ValidationError::new("plate_number");
    error.add_param("value".into(), &value.to_string());
    Err(error)
}

/// Validar y convertir string a UUID
pub fn validate_uuid(value: &str, field: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value.trim())
        .map_err(|_| AppError::Validation(format!("'{}' is not a valid {}", value, field)))
}

/// Validar y convertir string a datetime RFC3339
pub fn validate_datetime(value: &str, field: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            AppError::Validation(format!("'{}' must be an RFC3339 datetime ({})", field, value))
        })
}

/// Convertir un f64 de la API a Decimal
pub fn decimal_from_f64(value: f64, field: &str) -> Result<Decimal, AppError> {
    Decimal::from_f64_retain(value)
        .ok_or_else(|| AppError::Validation(format!("Invalid numeric value for '{}'", field)))
}

/// Validar que un rango de fechas sea coherente (fin estrictamente después del inicio)
pub fn validate_date_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), AppError> {
    if end <= start {
        return Err(AppError::Validation(
            "End date must be after start date".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_plate_number_accepts_common_formats() {
        assert!(validate_plate_number("555001").is_ok());
        assert!(validate_plate_number("AB-123-CD").is_ok());
        assert!(validate_plate_number("ab 123 cd").is_ok());
    }

    #[test]
    fn test_plate_number_rejects_garbage() {
        assert!(validate_plate_number("").is_err());
        assert!(validate_plate_number("X").is_err());
        assert!(validate_plate_number("PLAQUE_INVALIDA!").is_err());
        assert!(validate_plate_number("0123456789ABCDEF").is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("not-a-uuid", "driver id").is_err());
        assert!(validate_uuid("a9e9bd90-6e1c-4b07-9a4e-0d0b9a3c8f11", "driver id").is_ok());
    }

    #[test]
    fn test_validate_date_range() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        assert!(validate_date_range(start, end).is_ok());
        assert!(validate_date_range(end, start).is_err());
        // el mismo instante tampoco es válido
        assert!(validate_date_range(start, start).is_err());
    }

    #[test]
    fn test_decimal_from_f64() {
        assert_eq!(
            decimal_from_f64(500.0, "distance_km").unwrap(),
            Decimal::from(500)
        );
        assert!(decimal_from_f64(f64::NAN, "distance_km").is_err());
    }
}
