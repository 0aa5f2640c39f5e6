//! CRUD de vehículos
//!
//! Alta y datos descriptivos de la flota. El estado y el odómetro no se
//! tocan por acá: son campos derivados que administra la reconciliación.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::response_dto::ApiResponse;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters, VehicleResponse,
};
use crate::models::vehicle::{VehicleStatus, VehicleType};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use crate::utils::validation;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        // Validar campos
        request.validate()?;

        let vehicle_type = VehicleType::parse(&request.vehicle_type).ok_or_else(|| {
            AppError::Validation(format!(
                "Vehicle type must be 'truck' or 'trailer', got '{}'",
                request.vehicle_type
            ))
        })?;

        let current_km = match request.current_km {
            Some(km) => {
                let km = validation::decimal_from_f64(km, "current_km")?;
                if km < Decimal::ZERO {
                    return Err(AppError::Validation(
                        "current_km cannot be negative".to_string(),
                    ));
                }
                km
            }
            None => Decimal::ZERO,
        };

        // Verificar que la matrícula no exista
        if self.repository.plate_exists(&request.plate_number).await? {
            return Err(AppError::Conflict(
                "La matrícula ya está registrada".to_string(),
            ));
        }

        let vehicle = self
            .repository
            .create(
                request.plate_number,
                request.brand,
                request.model,
                vehicle_type,
                current_km,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(vehicle.into())
    }

    pub async fn list(&self, filters: VehicleFilters) -> Result<Vec<VehicleResponse>, AppError> {
        let status = filters
            .status
            .as_deref()
            .map(|s| {
                VehicleStatus::parse(s)
                    .ok_or_else(|| AppError::Validation(format!("Unknown vehicle status '{}'", s)))
            })
            .transpose()?;
        let vehicle_type = filters
            .vehicle_type
            .as_deref()
            .map(|t| {
                VehicleType::parse(t)
                    .ok_or_else(|| AppError::Validation(format!("Unknown vehicle type '{}'", t)))
            })
            .transpose()?;

        let vehicles = self.repository.list(status, vehicle_type).await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let vehicle = self
            .repository
            .update_details(id, request.plate_number, request.brand, request.model)
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        Ok(())
    }
}
