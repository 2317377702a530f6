//! Validaciones de entrada
//!
//! Helpers de validación para coordenadas y datos de carga que entran
//! al motor de pricing. Todo se valida en el boundary, nunca adentro
//! del algoritmo.

use rust_decimal::Decimal;

use crate::utils::errors::{invalid_input_error, AppError, AppResult};

/// Validar que una latitud/longitud esté dentro de rango WGS84
pub fn validate_coordinate(lat: Decimal, lng: Decimal) -> AppResult<()> {
    let lat_max = Decimal::from(90);
    let lng_max = Decimal::from(180);

    if lat < -lat_max || lat > lat_max {
        return Err(invalid_input_error("latitude out of range (-90..90)"));
    }
    if lng < -lng_max || lng > lng_max {
        return Err(invalid_input_error("longitude out of range (-180..180)"));
    }
    Ok(())
}

/// Convertir un f64 del payload a Decimal, rechazando NaN/inf/negativos
pub fn non_negative_decimal(value: f64, field: &str) -> AppResult<Decimal> {
    if !value.is_finite() {
        return Err(AppError::InvalidInput(format!(
            "{} must be a finite number",
            field
        )));
    }
    if value < 0.0 {
        return Err(AppError::InvalidInput(format!(
            "{} must not be negative",
            field
        )));
    }
    Decimal::from_f64_retain(value)
        .ok_or_else(|| AppError::InvalidInput(format!("{} is not a valid number", field)))
}

/// Normalizar el prefijo de tracking: minúsculas, mínimo 4 chars y solo
/// caracteres de un UUID. El prefijo termina en un patrón LIKE, así que
/// cualquier metacarácter (%, _) se rechaza acá y nunca llega al query.
pub fn tracking_id_prefix(raw: &str) -> AppResult<String> {
    let prefix = raw.trim().to_lowercase();

    if prefix.len() < 4 {
        return Err(AppError::InvalidInput(
            "tracking id must be at least 4 characters".to_string(),
        ));
    }
    if !prefix
        .chars()
        .all(|c| c.is_ascii_hexdigit() || c == '-')
    {
        return Err(AppError::InvalidInput(
            "tracking id must contain only hex characters".to_string(),
        ));
    }

    Ok(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_range() {
        assert!(validate_coordinate(Decimal::from(-6), Decimal::from(106)).is_ok());
        assert!(validate_coordinate(Decimal::from(91), Decimal::from(0)).is_err());
        assert!(validate_coordinate(Decimal::from(0), Decimal::from(-181)).is_err());
    }

    #[test]
    fn test_tracking_prefix_rejects_like_wildcards() {
        // Un prefijo de solo wildcards matchearía cualquier orden
        assert!(tracking_id_prefix("%%%%").is_err());
        assert!(tracking_id_prefix("a1b_").is_err());
        assert!(tracking_id_prefix("ab\\cd").is_err());
    }

    #[test]
    fn test_tracking_prefix_normalizes_valid_input() {
        assert_eq!(tracking_id_prefix(" A1B2C3 ").unwrap(), "a1b2c3");
        assert_eq!(tracking_id_prefix("550e-84").unwrap(), "550e-84");
        assert!(tracking_id_prefix("a1b").is_err());
    }

    #[test]
    fn test_non_negative_decimal() {
        assert!(non_negative_decimal(12.5, "weight").is_ok());
        assert!(non_negative_decimal(-1.0, "weight").is_err());
        assert!(non_negative_decimal(f64::NAN, "weight").is_err());
        assert!(non_negative_decimal(f64::INFINITY, "volume").is_err());
    }
}
