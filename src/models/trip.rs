//! Modelo de Trip
//!
//! Este módulo contiene el struct Trip, su máquina de estados y la tabla de
//! transiciones permitidas. Toda validación de cambio de estado pasa por
//! `TripStatus::can_transition_to` en lugar de comparar strings en cada
//! call site.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del trip - mapea al ENUM trip_status
///
/// pending → active → done
/// pending → canceled
/// active  → canceled
///
/// `done` y `canceled` son terminales.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "trip_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TripStatus {
    Pending,
    Active,
    Done,
    Canceled,
}

impl TripStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Pending => "pending",
            TripStatus::Active => "active",
            TripStatus::Done => "done",
            TripStatus::Canceled => "canceled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(TripStatus::Pending),
            "active" => Some(TripStatus::Active),
            "done" => Some(TripStatus::Done),
            "canceled" => Some(TripStatus::Canceled),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TripStatus::Done | TripStatus::Canceled)
    }

    /// Tabla de transiciones del ciclo de vida del trip
    pub fn can_transition_to(self, next: TripStatus) -> bool {
        matches!(
            (self, next),
            (TripStatus::Pending, TripStatus::Active)
                | (TripStatus::Pending, TripStatus::Canceled)
                | (TripStatus::Active, TripStatus::Done)
                | (TripStatus::Active, TripStatus::Canceled)
        )
    }
}

/// Trip principal - mapea exactamente a la tabla trips
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trip {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub truck_id: Uuid,
    pub trailer_id: Uuid,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: TripStatus,
    pub fuel_liters: Option<Decimal>,
    pub distance_km: Decimal,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_transitions() {
        assert!(TripStatus::Pending.can_transition_to(TripStatus::Active));
        assert!(TripStatus::Pending.can_transition_to(TripStatus::Canceled));
        assert!(TripStatus::Active.can_transition_to(TripStatus::Done));
        assert!(TripStatus::Active.can_transition_to(TripStatus::Canceled));
    }

    #[test]
    fn test_denied_transitions() {
        // no se puede saltar la activación
        assert!(!TripStatus::Pending.can_transition_to(TripStatus::Done));
        // los estados terminales no salen a ningún lado
        for next in [
            TripStatus::Pending,
            TripStatus::Active,
            TripStatus::Done,
            TripStatus::Canceled,
        ] {
            assert!(!TripStatus::Done.can_transition_to(next));
            assert!(!TripStatus::Canceled.can_transition_to(next));
        }
        // no hay vuelta atrás desde active
        assert!(!TripStatus::Active.can_transition_to(TripStatus::Pending));
    }

    #[test]
    fn test_terminal_states() {
        assert!(TripStatus::Done.is_terminal());
        assert!(TripStatus::Canceled.is_terminal());
        assert!(!TripStatus::Pending.is_terminal());
        assert!(!TripStatus::Active.is_terminal());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(TripStatus::parse("pending"), Some(TripStatus::Pending));
        assert_eq!(TripStatus::parse("active"), Some(TripStatus::Active));
        assert_eq!(TripStatus::parse("finished"), None);
    }
}
