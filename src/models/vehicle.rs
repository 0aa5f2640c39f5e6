//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes de estado.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.
//!
//! `status` y `current_km` son campos derivados: solo los escriben el
//! proyector de estado y los efectos de Trip/Maintenance, nunca un update
//! genérico del vehículo.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del vehículo - mapea al ENUM vehicle_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Active,
    Available,
    Maintenance,
    Inactive,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Active => "active",
            VehicleStatus::Available => "available",
            VehicleStatus::Maintenance => "maintenance",
            VehicleStatus::Inactive => "inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(VehicleStatus::Active),
            "available" => Some(VehicleStatus::Available),
            "maintenance" => Some(VehicleStatus::Maintenance),
            "inactive" => Some(VehicleStatus::Inactive),
            _ => None,
        }
    }
}

/// Tipo de vehículo - mapea al ENUM vehicle_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "vehicle_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Truck,
    Trailer,
}

impl VehicleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Truck => "truck",
            VehicleType::Trailer => "trailer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "truck" => Some(VehicleType::Truck),
            "trailer" => Some(VehicleType::Trailer),
            _ => None,
        }
    }
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub plate_number: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub vehicle_type: VehicleType,
    pub current_km: Decimal,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for s in [
            VehicleStatus::Active,
            VehicleStatus::Available,
            VehicleStatus::Maintenance,
            VehicleStatus::Inactive,
        ] {
            assert_eq!(VehicleStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(VehicleStatus::parse("retired"), None);
    }

    #[test]
    fn test_vehicle_type_parse() {
        assert_eq!(VehicleType::parse("truck"), Some(VehicleType::Truck));
        assert_eq!(VehicleType::parse("trailer"), Some(VehicleType::Trailer));
        assert_eq!(VehicleType::parse("van"), None);
    }
}
