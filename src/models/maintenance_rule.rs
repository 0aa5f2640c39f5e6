//! Modelo de MaintenanceRule
//!
//! Reglas de mantenimiento recomendado (aceite, filtros, neumáticos, frenos).
//! Datos de referencia estáticos: el core nunca los muta.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const RULE_TYPES: &[&str] = &["oil", "filter", "tire", "brake"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MaintenanceRule {
    pub id: Uuid,
    pub rule_type: String,
    pub recommended_km: Option<Decimal>,
    pub recommended_months: Option<i32>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Validar que el tipo de regla sea uno de los conocidos
pub fn is_valid_rule_type(value: &str) -> bool {
    RULE_TYPES.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_types() {
        assert!(is_valid_rule_type("oil"));
        assert!(is_valid_rule_type("brake"));
        assert!(!is_valid_rule_type("paint"));
    }
}
