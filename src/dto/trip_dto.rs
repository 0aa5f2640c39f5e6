use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::trip::Trip;

// Request para crear un trip
//
// Todos los campos llegan opcionales: la presencia de los obligatorios se
// valida en el controller para responder 400 con el mensaje de siempre en
// lugar del rechazo genérico de serde.
#[derive(Debug, Deserialize)]
pub struct CreateTripRequest {
    pub driver_id: Option<String>,
    pub truck_id: Option<String>,
    pub trailer_id: Option<String>,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub fuel_liters: Option<f64>,
    pub distance_km: Option<f64>,
    pub remarks: Option<String>,
}

// Request para actualizar un trip
#[derive(Debug, Deserialize, Default)]
pub struct UpdateTripRequest {
    pub driver_id: Option<String>,
    pub truck_id: Option<String>,
    pub trailer_id: Option<String>,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub fuel_liters: Option<f64>,
    pub distance_km: Option<f64>,
    pub remarks: Option<String>,
}

impl UpdateTripRequest {
    /// ¿El patch toca fechas o recursos? En ese caso hay que re-chequear
    /// conflictos de reserva.
    pub fn touches_booking(&self) -> bool {
        self.start_date.is_some()
            || self.end_date.is_some()
            || self.driver_id.is_some()
            || self.truck_id.is_some()
            || self.trailer_id.is_some()
    }

    pub fn touches_resources(&self) -> bool {
        self.driver_id.is_some() || self.truck_id.is_some() || self.trailer_id.is_some()
    }
}

// Response de trip
#[derive(Debug, Serialize)]
pub struct TripResponse {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub truck_id: Uuid,
    pub trailer_id: Uuid,
    pub start_location: Option<String>,
    pub end_location: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: String,
    pub fuel_liters: Option<f64>,
    pub distance_km: f64,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Trip> for TripResponse {
    fn from(trip: Trip) -> Self {
        Self {
            id: trip.id,
            driver_id: trip.driver_id,
            truck_id: trip.truck_id,
            trailer_id: trip.trailer_id,
            start_location: trip.start_location,
            end_location: trip.end_location,
            start_date: trip.start_date,
            end_date: trip.end_date,
            status: trip.status.as_str().to_string(),
            fuel_liters: trip
                .fuel_liters
                .map(|f| f.to_string().parse().unwrap_or(0.0)),
            distance_km: trip.distance_km.to_string().parse().unwrap_or(0.0),
            remarks: trip.remarks,
            created_at: trip.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touches_booking() {
        let mut patch = UpdateTripRequest::default();
        assert!(!patch.touches_booking());

        patch.fuel_liters = Some(120.0);
        assert!(!patch.touches_booking());

        patch.end_date = Some("2024-01-02T00:00:00Z".to_string());
        assert!(patch.touches_booking());

        let resource_patch = UpdateTripRequest {
            truck_id: Some("x".to_string()),
            ..Default::default()
        };
        assert!(resource_patch.touches_booking());
        assert!(resource_patch.touches_resources());
    }
}
