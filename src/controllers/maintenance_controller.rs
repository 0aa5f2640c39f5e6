//! Ciclo de vida de los mantenimientos
//!
//! Dueño de la máquina de estados del Maintenance. Cada cambio de estado
//! dispara la reconciliación del vehículo referenciado: un registro abierto
//! fuerza `maintenance` sin importar qué más esté pasando con el vehículo.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::maintenance_dto::{
    CreateMaintenanceRequest, MaintenanceResponse, UpdateMaintenanceRequest,
};
use crate::dto::response_dto::ApiResponse;
use crate::models::maintenance::MaintenanceStatus;
use crate::repositories::maintenance_repository::{MaintenanceRepository, NewMaintenance};
use crate::repositories::maintenance_rule_repository::MaintenanceRuleRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::VehicleStatusProjector;
use crate::state::VehicleLockRegistry;
use crate::utils::errors::AppError;
use crate::utils::validation;

pub struct MaintenanceController {
    maintenances: MaintenanceRepository,
    rules: MaintenanceRuleRepository,
    vehicles: VehicleRepository,
    projector: VehicleStatusProjector,
}

impl MaintenanceController {
    pub fn new(pool: PgPool, locks: VehicleLockRegistry) -> Self {
        Self {
            maintenances: MaintenanceRepository::new(pool.clone()),
            rules: MaintenanceRuleRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            projector: VehicleStatusProjector::new(pool, locks),
        }
    }

    pub async fn create(
        &self,
        request: CreateMaintenanceRequest,
    ) -> Result<ApiResponse<MaintenanceResponse>, AppError> {
        // Campos obligatorios
        let (Some(rule_id), Some(vehicle_id), Some(target_type), Some(component)) = (
            request.maintenance_rule_id.as_deref(),
            request.vehicle_id.as_deref(),
            request.target_type.clone(),
            request.component.clone(),
        ) else {
            return Err(AppError::Validation("Missing required fields".to_string()));
        };

        let rule_id = validation::validate_uuid(rule_id, "maintenance rule id")?;
        let vehicle_id = validation::validate_uuid(vehicle_id, "vehicle id")?;

        self.rules
            .find_by_id(rule_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Maintenance rule not found".to_string()))?;
        self.vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let cost = request
            .cost
            .map(|c| validation::decimal_from_f64(c, "cost"))
            .transpose()?;
        let km_at_maintenance = request
            .km_at_maintenance
            .map(|k| validation::decimal_from_f64(k, "km_at_maintenance"))
            .transpose()?;
        let date = request
            .date
            .as_deref()
            .map(|d| validation::validate_datetime(d, "date"))
            .transpose()?;

        let new = NewMaintenance {
            maintenance_rule_id: rule_id,
            vehicle_id,
            target_type,
            component,
            description: request.description,
            cost,
            date,
            km_at_maintenance,
        };

        let maintenance = self.maintenances.insert(&new).await?;

        // el registro recién creado está abierto, así que la reconciliación
        // fuerza el vehículo a `maintenance` incondicionalmente
        self.projector.reconcile(vehicle_id).await?;

        Ok(ApiResponse::success_with_message(
            maintenance.into(),
            "Maintenance created".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        patch: UpdateMaintenanceRequest,
    ) -> Result<ApiResponse<MaintenanceResponse>, AppError> {
        let maintenance = self
            .maintenances
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Maintenance not found".to_string()))?;

        let requested_status = match patch.status.as_deref() {
            Some(s) => Some(MaintenanceStatus::parse(s).ok_or_else(|| {
                AppError::Validation(format!("Unknown maintenance status '{}'", s))
            })?),
            None => None,
        };

        if let Some(next) = requested_status {
            if next != maintenance.status && !maintenance.status.can_transition_to(next) {
                return Err(AppError::InvalidTransition(format!(
                    "Cannot transition maintenance from '{}' to '{}'",
                    maintenance.status.as_str(),
                    next.as_str()
                )));
            }
        }

        let mut updated = maintenance.clone();
        if let Some(next) = requested_status {
            updated.status = next;
        }
        if let Some(description) = patch.description {
            updated.description = Some(description);
        }
        if let Some(cost) = patch.cost {
            updated.cost = Some(validation::decimal_from_f64(cost, "cost")?);
        }
        if let Some(date) = patch.date.as_deref() {
            updated.date = Some(validation::validate_datetime(date, "date")?);
        }
        if let Some(km) = patch.km_at_maintenance {
            updated.km_at_maintenance = Some(validation::decimal_from_f64(km, "km_at_maintenance")?);
        }

        let persisted = self.maintenances.update(&updated).await?;

        // cada cambio re-dispara la proyección del vehículo
        self.projector.reconcile(persisted.vehicle_id).await?;

        Ok(ApiResponse::success_with_message(
            persisted.into(),
            "Maintenance updated successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<MaintenanceResponse, AppError> {
        let maintenance = self
            .maintenances
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Maintenance not found".to_string()))?;

        Ok(maintenance.into())
    }

    pub async fn list(&self) -> Result<Vec<MaintenanceResponse>, AppError> {
        let maintenances = self.maintenances.list().await?;
        Ok(maintenances
            .into_iter()
            .map(MaintenanceResponse::from)
            .collect())
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<MaintenanceResponse>, AppError> {
        let deleted = self
            .maintenances
            .delete(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Maintenance not found".to_string()))?;

        // borrar un registro abierto puede liberar el vehículo
        if deleted.status.is_open() {
            self.projector.reconcile(deleted.vehicle_id).await?;
        }

        Ok(ApiResponse::success_with_message(
            deleted.into(),
            "delete successfully".to_string(),
        ))
    }
}
