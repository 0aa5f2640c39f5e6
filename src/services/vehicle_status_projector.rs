//! Proyector de estado de vehículos
//!
//! Recalcula el estado derivado de un vehículo a partir de los registros que
//! lo referencian. Es el único escritor de `vehicles.status`: los ciclos de
//! vida de Trip y Maintenance nunca escriben el estado directamente, siempre
//! piden una reconciliación.
//!
//! Prioridad de proyección (invariante central del sistema):
//!   1. mantenimiento abierto  → `maintenance`
//!   2. trip activo            → `active`
//!   3. nada                   → `inactive`
//!
//! Un vehículo en mantenimiento nunca aparece como conducible aunque esté
//! reservado en un trip activo.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::vehicle::VehicleStatus;
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::state::VehicleLockRegistry;
use crate::utils::errors::AppError;

/// Decisión pura de proyección, separada para poder testearla sin base
pub fn project_status(open_maintenances: i64, has_active_trip: bool) -> VehicleStatus {
    if open_maintenances > 0 {
        VehicleStatus::Maintenance
    } else if has_active_trip {
        VehicleStatus::Active
    } else {
        VehicleStatus::Inactive
    }
}

pub struct VehicleStatusProjector {
    pool: PgPool,
    locks: VehicleLockRegistry,
}

impl VehicleStatusProjector {
    pub fn new(pool: PgPool, locks: VehicleLockRegistry) -> Self {
        Self { pool, locks }
    }

    /// Reconcilia el estado de un vehículo. Idempotente: función pura del
    /// estado actual de la base.
    ///
    /// Las reconciliaciones del mismo vehículo se serializan con el lock del
    /// registry; un trip y un mantenimiento pueden disparar esto a la vez
    /// sobre el mismo vehículo.
    pub async fn reconcile(&self, vehicle_id: Uuid) -> Result<VehicleStatus, AppError> {
        let lock = self.locks.lock_for(vehicle_id).await;
        let _guard = lock.lock().await;

        let open_maintenances =
            MaintenanceRepository::count_open_for_vehicle(&self.pool, vehicle_id).await?;

        // el mantenimiento abierto manda; solo consultamos trips si no hay
        let has_active_trip = if open_maintenances > 0 {
            false
        } else {
            TripRepository::find_active_for_vehicle(&self.pool, vehicle_id)
                .await?
                .is_some()
        };

        let status = project_status(open_maintenances, has_active_trip);
        VehicleRepository::set_status(&self.pool, vehicle_id, status).await?;

        tracing::debug!(
            vehicle_id = %vehicle_id,
            status = status.as_str(),
            open_maintenances,
            "vehicle reconciled"
        );

        drop(_guard);
        self.locks.cleanup_unused().await;

        Ok(status)
    }

    /// Reconcilia camión y remolque de un trip en paralelo
    pub async fn reconcile_pair(&self, truck_id: Uuid, trailer_id: Uuid) -> Result<(), AppError> {
        futures::future::try_join(self.reconcile(truck_id), self.reconcile(trailer_id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_maintenance_wins() {
        assert_eq!(project_status(1, false), VehicleStatus::Maintenance);
        // aunque haya trip activo, mantenimiento manda
        assert_eq!(project_status(1, true), VehicleStatus::Maintenance);
        assert_eq!(project_status(3, true), VehicleStatus::Maintenance);
    }

    #[test]
    fn test_active_trip_projects_active() {
        assert_eq!(project_status(0, true), VehicleStatus::Active);
    }

    #[test]
    fn test_idle_projects_inactive() {
        assert_eq!(project_status(0, false), VehicleStatus::Inactive);
    }
}
