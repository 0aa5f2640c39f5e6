//! Modelo de Maintenance
//!
//! Registros de mantenimiento de un vehículo. Cada cambio de estado
//! dispara la reconciliación del vehículo referenciado.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del mantenimiento - mapea al ENUM maintenance_status
///
/// pending → in_progress → done
/// pending | in_progress → canceled
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "maintenance_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Pending,
    InProgress,
    Done,
    Canceled,
}

impl MaintenanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceStatus::Pending => "pending",
            MaintenanceStatus::InProgress => "in_progress",
            MaintenanceStatus::Done => "done",
            MaintenanceStatus::Canceled => "canceled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(MaintenanceStatus::Pending),
            "in_progress" => Some(MaintenanceStatus::InProgress),
            "done" => Some(MaintenanceStatus::Done),
            "canceled" => Some(MaintenanceStatus::Canceled),
            _ => None,
        }
    }

    /// Un mantenimiento abierto mantiene al vehículo fuera de servicio
    pub fn is_open(&self) -> bool {
        matches!(self, MaintenanceStatus::Pending | MaintenanceStatus::InProgress)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, MaintenanceStatus::Done | MaintenanceStatus::Canceled)
    }

    /// Tabla de transiciones del ciclo de vida del mantenimiento
    pub fn can_transition_to(self, next: MaintenanceStatus) -> bool {
        matches!(
            (self, next),
            (MaintenanceStatus::Pending, MaintenanceStatus::InProgress)
                | (MaintenanceStatus::Pending, MaintenanceStatus::Canceled)
                | (MaintenanceStatus::InProgress, MaintenanceStatus::Done)
                | (MaintenanceStatus::InProgress, MaintenanceStatus::Canceled)
        )
    }
}

/// Maintenance principal - mapea exactamente a la tabla maintenances
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Maintenance {
    pub id: Uuid,
    pub maintenance_rule_id: Uuid,
    pub vehicle_id: Uuid,
    pub target_type: String,
    pub component: String,
    pub status: MaintenanceStatus,
    pub description: Option<String>,
    pub cost: Option<Decimal>,
    pub date: Option<DateTime<Utc>>,
    pub km_at_maintenance: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_states() {
        assert!(MaintenanceStatus::Pending.is_open());
        assert!(MaintenanceStatus::InProgress.is_open());
        assert!(!MaintenanceStatus::Done.is_open());
        assert!(!MaintenanceStatus::Canceled.is_open());
    }

    #[test]
    fn test_allowed_transitions() {
        assert!(MaintenanceStatus::Pending.can_transition_to(MaintenanceStatus::InProgress));
        assert!(MaintenanceStatus::Pending.can_transition_to(MaintenanceStatus::Canceled));
        assert!(MaintenanceStatus::InProgress.can_transition_to(MaintenanceStatus::Done));
        assert!(MaintenanceStatus::InProgress.can_transition_to(MaintenanceStatus::Canceled));
    }

    #[test]
    fn test_denied_transitions() {
        assert!(!MaintenanceStatus::Pending.can_transition_to(MaintenanceStatus::Done));
        for next in [
            MaintenanceStatus::Pending,
            MaintenanceStatus::InProgress,
            MaintenanceStatus::Done,
            MaintenanceStatus::Canceled,
        ] {
            assert!(!MaintenanceStatus::Done.can_transition_to(next));
            assert!(!MaintenanceStatus::Canceled.can_transition_to(next));
        }
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            MaintenanceStatus::parse("in_progress"),
            Some(MaintenanceStatus::InProgress)
        );
        assert_eq!(MaintenanceStatus::parse("paused"), None);
    }
}
