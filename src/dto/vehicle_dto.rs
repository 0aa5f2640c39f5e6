use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vehicle::Vehicle;

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(custom = "crate::utils::validation::validate_plate_number")]
    pub plate_number: String,

    #[validate(length(min = 2, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub model: Option<String>,

    pub vehicle_type: String,

    pub current_km: Option<f64>,
}

// Request para actualizar un vehículo
//
// status y current_km no se aceptan aquí: los escribe la reconciliación
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(custom = "crate::utils::validation::validate_plate_number")]
    pub plate_number: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub model: Option<String>,
}

// Filtros para listados de vehículos
#[derive(Debug, Deserialize)]
pub struct VehicleFilters {
    pub status: Option<String>,
    pub vehicle_type: Option<String>,
}

// Response de vehículo
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub plate_number: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub vehicle_type: String,
    pub current_km: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            plate_number: vehicle.plate_number,
            brand: vehicle.brand,
            model: vehicle.model,
            vehicle_type: vehicle.vehicle_type.as_str().to_string(),
            current_km: vehicle.current_km.to_string().parse().unwrap_or(0.0),
            status: vehicle.status.as_str().to_string(),
            created_at: vehicle.created_at,
        }
    }
}
