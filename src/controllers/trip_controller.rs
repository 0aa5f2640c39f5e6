//! Ciclo de vida de los trips
//!
//! Este controller es el dueño de la máquina de estados del Trip: valida
//! transiciones, consulta el conflict checker y emite los efectos sobre
//! vehículos (odómetro vía incremento atómico, estado vía el proyector).
//!
//! El chequeo de conflictos y la persistencia corren en una sola transacción
//! SERIALIZABLE para cerrar la ventana check-then-act entre requests
//! concurrentes sobre los mismos recursos.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::response_dto::ApiResponse;
use crate::dto::trip_dto::{CreateTripRequest, TripResponse, UpdateTripRequest};
use crate::models::trip::TripStatus;
use crate::models::vehicle::{Vehicle, VehicleType};
use crate::repositories::trip_repository::{NewTrip, TripRepository};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::conflict_checker::{self, ResourceIds};
use crate::services::VehicleStatusProjector;
use crate::state::VehicleLockRegistry;
use crate::utils::errors::{map_serialization_failure, AppError};
use crate::utils::validation;

/// La activación solo es válida con `now` dentro de la ventana reservada,
/// inclusive en ambos extremos.
fn activation_window_contains(
    now: DateTime<Utc>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> bool {
    now >= start && now <= end
}

/// Incremento de odómetro que produce un patch sobre camión y remolque.
///
/// - al activar se aplica la distancia completa del trip
/// - con el trip ya activo, una revisión de distance_km aplica solo la
///   diferencia contra el valor anterior, nunca el valor absoluto
/// - en cualquier otro caso no se toca el odómetro
fn odometer_increment(
    current: TripStatus,
    requested: Option<TripStatus>,
    old_distance: Decimal,
    new_distance: Decimal,
) -> Option<Decimal> {
    let activating = requested == Some(TripStatus::Active) && current != TripStatus::Active;
    if activating {
        return Some(new_distance);
    }
    if current == TripStatus::Active && new_distance != old_distance {
        return Some(new_distance - old_distance);
    }
    None
}

pub struct TripController {
    pool: PgPool,
    trips: TripRepository,
    vehicles: VehicleRepository,
    projector: VehicleStatusProjector,
}

impl TripController {
    pub fn new(pool: PgPool, locks: VehicleLockRegistry) -> Self {
        Self {
            trips: TripRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            projector: VehicleStatusProjector::new(pool.clone(), locks),
            pool,
        }
    }

    pub async fn create(
        &self,
        request: CreateTripRequest,
    ) -> Result<ApiResponse<TripResponse>, AppError> {
        // Campos obligatorios
        let (
            Some(driver_id),
            Some(truck_id),
            Some(trailer_id),
            Some(start_date),
            Some(end_date),
            Some(distance_km),
        ) = (
            request.driver_id.as_deref(),
            request.truck_id.as_deref(),
            request.trailer_id.as_deref(),
            request.start_date.as_deref(),
            request.end_date.as_deref(),
            request.distance_km,
        )
        else {
            return Err(AppError::Validation("Missing required fields".to_string()));
        };

        let driver_id = validation::validate_uuid(driver_id, "driver id")?;
        let truck_id = validation::validate_uuid(truck_id, "truck id")?;
        let trailer_id = validation::validate_uuid(trailer_id, "trailer id")?;
        let start_date = validation::validate_datetime(start_date, "start_date")?;
        let end_date = validation::validate_datetime(end_date, "end_date")?;
        validation::validate_date_range(start_date, end_date)?;

        let distance_km = validation::decimal_from_f64(distance_km, "distance_km")?;
        if distance_km < Decimal::ZERO {
            return Err(AppError::Validation(
                "distance_km cannot be negative".to_string(),
            ));
        }
        let fuel_liters = request
            .fuel_liters
            .map(|f| validation::decimal_from_f64(f, "fuel_liters"))
            .transpose()?;

        let status = match request.status.as_deref() {
            Some(s) => TripStatus::parse(s)
                .ok_or_else(|| AppError::Validation(format!("Unknown trip status '{}'", s)))?,
            None => TripStatus::Pending,
        };

        // el camión tiene que ser un camión y el remolque un remolque
        self.expect_vehicle(truck_id, VehicleType::Truck).await?;
        self.expect_vehicle(trailer_id, VehicleType::Trailer).await?;

        let resources = ResourceIds {
            driver_id,
            truck_id,
            trailer_id,
        };

        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        let conflicts =
            conflict_checker::find_conflicts(&mut *tx, resources, start_date, end_date, None)
                .await?;
        if !conflicts.is_empty() {
            return Err(AppError::Conflict(
                "Driver, truck or trailer already assigned during this period".to_string(),
            ));
        }

        let new_trip = NewTrip {
            driver_id,
            truck_id,
            trailer_id,
            start_location: request.start_location,
            end_location: request.end_location,
            start_date,
            end_date,
            status,
            fuel_liters,
            distance_km,
            remarks: request.remarks,
        };

        // sin efectos sobre vehículos en la creación
        let trip = TripRepository::insert(&mut *tx, &new_trip).await?;
        tx.commit().await.map_err(map_serialization_failure)?;

        Ok(ApiResponse::success_with_message(
            trip.into(),
            "create successfully".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: Uuid,
        patch: UpdateTripRequest,
    ) -> Result<ApiResponse<TripResponse>, AppError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        let trip = TripRepository::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Trip not found".to_string()))?;

        // un trip terminado queda bloqueado para siempre
        if trip.status == TripStatus::Done {
            return Err(AppError::Locked("Trip locked".to_string()));
        }

        // los recursos son inmutables mientras el trip está activo
        if trip.status == TripStatus::Active && patch.touches_resources() {
            return Err(AppError::InvalidTransition(
                "Cannot change resources while active".to_string(),
            ));
        }

        let requested_status = match patch.status.as_deref() {
            Some(s) => Some(
                TripStatus::parse(s)
                    .ok_or_else(|| AppError::Validation(format!("Unknown trip status '{}'", s)))?,
            ),
            None => None,
        };

        // ventana y recursos efectivos: valor del patch o el existente
        let start = match patch.start_date.as_deref() {
            Some(s) => validation::validate_datetime(s, "start_date")?,
            None => trip.start_date,
        };
        let end = match patch.end_date.as_deref() {
            Some(s) => validation::validate_datetime(s, "end_date")?,
            None => trip.end_date,
        };
        validation::validate_date_range(start, end)?;

        let driver_id = match patch.driver_id.as_deref() {
            Some(s) => validation::validate_uuid(s, "driver id")?,
            None => trip.driver_id,
        };
        let truck_id = match patch.truck_id.as_deref() {
            Some(s) => validation::validate_uuid(s, "truck id")?,
            None => trip.truck_id,
        };
        let trailer_id = match patch.trailer_id.as_deref() {
            Some(s) => validation::validate_uuid(s, "trailer id")?,
            None => trip.trailer_id,
        };

        if patch.truck_id.is_some() {
            self.expect_vehicle(truck_id, VehicleType::Truck).await?;
        }
        if patch.trailer_id.is_some() {
            self.expect_vehicle(trailer_id, VehicleType::Trailer).await?;
        }

        // re-chequeo de conflictos si el patch toca la reserva
        if patch.touches_booking() {
            let resources = ResourceIds {
                driver_id,
                truck_id,
                trailer_id,
            };
            let conflicts =
                conflict_checker::find_conflicts(&mut *tx, resources, start, end, Some(id)).await?;
            if !conflicts.is_empty() {
                return Err(AppError::Conflict("Resource already booked".to_string()));
            }
        }

        let status_changing = matches!(requested_status, Some(next) if next != trip.status);
        if let Some(next) = requested_status {
            if next != trip.status {
                if !trip.status.can_transition_to(next) {
                    return Err(AppError::InvalidTransition(format!(
                        "Cannot transition trip from '{}' to '{}'",
                        trip.status.as_str(),
                        next.as_str()
                    )));
                }

                // activar solo dentro de la ventana reservada
                if next == TripStatus::Active {
                    let now = Utc::now();
                    if !activation_window_contains(now, start, end) {
                        return Err(AppError::InvalidActivation(
                            "Invalid activation time".to_string(),
                        ));
                    }
                }
            }
        }

        let effective_distance = match patch.distance_km {
            Some(d) => {
                let d = validation::decimal_from_f64(d, "distance_km")?;
                if d < Decimal::ZERO {
                    return Err(AppError::Validation(
                        "distance_km cannot be negative".to_string(),
                    ));
                }
                d
            }
            None => trip.distance_km,
        };

        let delta = odometer_increment(
            trip.status,
            requested_status,
            trip.distance_km,
            effective_distance,
        );

        // aplicar el resto del patch y persistir
        let mut updated = trip.clone();
        updated.driver_id = driver_id;
        updated.truck_id = truck_id;
        updated.trailer_id = trailer_id;
        updated.start_date = start;
        updated.end_date = end;
        updated.distance_km = effective_distance;
        if let Some(next) = requested_status {
            updated.status = next;
        }
        if let Some(loc) = patch.start_location {
            updated.start_location = Some(loc);
        }
        if let Some(loc) = patch.end_location {
            updated.end_location = Some(loc);
        }
        if let Some(fuel) = patch.fuel_liters {
            updated.fuel_liters = Some(validation::decimal_from_f64(fuel, "fuel_liters")?);
        }
        if let Some(remarks) = patch.remarks {
            updated.remarks = Some(remarks);
        }

        let persisted = TripRepository::update(&mut *tx, &updated).await?;

        // incremento atómico del odómetro, en la misma transacción que el trip
        if let Some(delta) = delta {
            if delta != Decimal::ZERO {
                VehicleRepository::increment_km(
                    &mut *tx,
                    &[updated.truck_id, updated.trailer_id],
                    delta,
                )
                .await?;
            }
        }

        tx.commit().await.map_err(map_serialization_failure)?;

        // tras cualquier cambio de estado el proyector reconcilia ambos
        // vehículos; es el árbitro final de vehicles.status
        if status_changing {
            self.projector
                .reconcile_pair(updated.truck_id, updated.trailer_id)
                .await?;
        }

        Ok(ApiResponse::success_with_message(
            persisted.into(),
            "updated successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<TripResponse, AppError> {
        let trip = TripRepository::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Trip not found".to_string()))?;

        Ok(trip.into())
    }

    pub async fn list(&self) -> Result<Vec<TripResponse>, AppError> {
        let trips = self.trips.list().await?;
        Ok(trips.into_iter().map(TripResponse::from).collect())
    }

    pub async fn get_by_driver(&self, driver_id: &str) -> Result<Vec<TripResponse>, AppError> {
        if driver_id.trim().is_empty() {
            return Err(AppError::Validation("Driver ID is required".to_string()));
        }
        let driver_id = validation::validate_uuid(driver_id, "driver id")?;

        let trips = self.trips.list_by_driver(driver_id).await?;
        Ok(trips.into_iter().map(TripResponse::from).collect())
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<TripResponse>, AppError> {
        let trip = TripRepository::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Trip not found".to_string()))?;

        if trip.status == TripStatus::Active {
            return Err(AppError::Locked(
                "Cannot delete an active trip".to_string(),
            ));
        }

        let deleted = self
            .trips
            .delete(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Trip not found".to_string()))?;

        self.projector
            .reconcile_pair(deleted.truck_id, deleted.trailer_id)
            .await?;

        Ok(ApiResponse::success_with_message(
            deleted.into(),
            "delete successfully".to_string(),
        ))
    }

    async fn expect_vehicle(
        &self,
        id: Uuid,
        expected_type: VehicleType,
    ) -> Result<Vehicle, AppError> {
        let vehicle = self
            .vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle with id '{}' not found", id)))?;

        if vehicle.vehicle_type != expected_type {
            return Err(AppError::Validation(format!(
                "Vehicle '{}' is not a {}",
                vehicle.plate_number,
                expected_type.as_str()
            )));
        }

        Ok(vehicle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dt(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_activation_window_is_inclusive() {
        let start = dt(1, 0);
        let end = dt(2, 0);

        assert!(activation_window_contains(dt(1, 12), start, end));
        // los extremos cuentan
        assert!(activation_window_contains(start, start, end));
        assert!(activation_window_contains(end, start, end));
        // fuera de la ventana no
        assert!(!activation_window_contains(dt(2, 1), start, end));
        assert!(!activation_window_contains(Utc.with_ymd_and_hms(2024, 5, 31, 23, 0, 0).unwrap(), start, end));
    }

    #[test]
    fn test_activation_applies_full_distance() {
        let delta = odometer_increment(
            TripStatus::Pending,
            Some(TripStatus::Active),
            Decimal::from(500),
            Decimal::from(500),
        );
        assert_eq!(delta, Some(Decimal::from(500)));
    }

    #[test]
    fn test_activation_uses_patched_distance() {
        // si el patch trae distance_km junto con la activación, se aplica
        // la distancia efectiva
        let delta = odometer_increment(
            TripStatus::Pending,
            Some(TripStatus::Active),
            Decimal::from(500),
            Decimal::from(650),
        );
        assert_eq!(delta, Some(Decimal::from(650)));
    }

    #[test]
    fn test_revision_while_active_applies_delta_only() {
        // currentKm=1000, distance 500 ya aplicada; patch a 700 → +200
        let delta = odometer_increment(
            TripStatus::Active,
            None,
            Decimal::from(500),
            Decimal::from(700),
        );
        assert_eq!(delta, Some(Decimal::from(200)));

        // bajar la distancia produce un delta negativo
        let delta = odometer_increment(
            TripStatus::Active,
            None,
            Decimal::from(500),
            Decimal::from(450),
        );
        assert_eq!(delta, Some(Decimal::from(-50)));
    }

    #[test]
    fn test_unchanged_distance_is_a_noop() {
        let delta = odometer_increment(
            TripStatus::Active,
            None,
            Decimal::from(500),
            Decimal::from(500),
        );
        assert_eq!(delta, None);
    }

    #[test]
    fn test_distance_patch_on_pending_trip_does_not_touch_odometer() {
        let delta = odometer_increment(
            TripStatus::Pending,
            None,
            Decimal::from(500),
            Decimal::from(900),
        );
        assert_eq!(delta, None);
    }

    #[test]
    fn test_completing_active_trip_with_distance_patch_applies_delta() {
        let delta = odometer_increment(
            TripStatus::Active,
            Some(TripStatus::Done),
            Decimal::from(500),
            Decimal::from(700),
        );
        assert_eq!(delta, Some(Decimal::from(200)));
    }

    #[test]
    fn test_reactivation_request_on_active_trip_is_not_an_activation() {
        // patch status=active con el trip ya activo: solo aplica la revisión
        let delta = odometer_increment(
            TripStatus::Active,
            Some(TripStatus::Active),
            Decimal::from(500),
            Decimal::from(700),
        );
        assert_eq!(delta, Some(Decimal::from(200)));
    }
}
