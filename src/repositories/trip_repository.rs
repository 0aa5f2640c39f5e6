use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::trip::{Trip, TripStatus};
use crate::utils::errors::AppError;

// Datos de un trip nuevo, ya validados por el controller
#[derive(Debug)]
pub struct NewTrip {
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
}

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Trip>, AppError> {
        let trips = sqlx::query_as::<_, Trip>("SELECT * FROM trips ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(trips)
    }

    pub async fn list_by_driver(&self, driver_id: Uuid) -> Result<Vec<Trip>, AppError> {
        let trips = sqlx::query_as::<_, Trip>(
            "SELECT * FROM trips WHERE driver_id = $1 ORDER BY start_date DESC",
        )
        .bind(driver_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(trips)
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>("DELETE FROM trips WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(trip)
    }

    /// Lectura por id sobre el pool o dentro de una transacción abierta
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
    ) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>("SELECT * FROM trips WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(trip)
    }

    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        new_trip: &NewTrip,
    ) -> Result<Trip, AppError> {
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (id, driver_id, truck_id, trailer_id, start_location, end_location,
                               start_date, end_date, status, fuel_liters, distance_km, remarks, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new_trip.driver_id)
        .bind(new_trip.truck_id)
        .bind(new_trip.trailer_id)
        .bind(new_trip.start_location.as_deref())
        .bind(new_trip.end_location.as_deref())
        .bind(new_trip.start_date)
        .bind(new_trip.end_date)
        .bind(new_trip.status)
        .bind(new_trip.fuel_liters)
        .bind(new_trip.distance_km)
        .bind(new_trip.remarks.as_deref())
        .fetch_one(executor)
        .await?;

        Ok(trip)
    }

    /// Persiste el estado completo del trip ya mergeado por el controller
    pub async fn update<'e>(executor: impl PgExecutor<'e>, trip: &Trip) -> Result<Trip, AppError> {
        let updated = sqlx::query_as::<_, Trip>(
            r#"
            UPDATE trips
            SET driver_id = $2, truck_id = $3, trailer_id = $4, start_location = $5,
                end_location = $6, start_date = $7, end_date = $8, status = $9,
                fuel_liters = $10, distance_km = $11, remarks = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(trip.id)
        .bind(trip.driver_id)
        .bind(trip.truck_id)
        .bind(trip.trailer_id)
        .bind(trip.start_location.as_deref())
        .bind(trip.end_location.as_deref())
        .bind(trip.start_date)
        .bind(trip.end_date)
        .bind(trip.status)
        .bind(trip.fuel_liters)
        .bind(trip.distance_km)
        .bind(trip.remarks.as_deref())
        .fetch_one(executor)
        .await?;

        Ok(updated)
    }

    /// Trips candidatos a conflicto: no cancelados, que comparten al menos un
    /// recurso con la propuesta. El filtro de ventana temporal se aplica en
    /// el conflict checker.
    pub async fn find_sharing_resources<'e>(
        executor: impl PgExecutor<'e>,
        driver_id: Uuid,
        truck_id: Uuid,
        trailer_id: Uuid,
        exclude_trip_id: Option<Uuid>,
    ) -> Result<Vec<Trip>, AppError> {
        let trips = sqlx::query_as::<_, Trip>(
            r#"
            SELECT * FROM trips
            WHERE status != 'canceled'
              AND ($4::uuid IS NULL OR id != $4)
              AND (driver_id = $1 OR truck_id = $2 OR trailer_id = $3)
            "#,
        )
        .bind(driver_id)
        .bind(truck_id)
        .bind(trailer_id)
        .bind(exclude_trip_id)
        .fetch_all(executor)
        .await?;

        Ok(trips)
    }

    /// ¿Hay algún trip activo que use este vehículo como camión o remolque?
    pub async fn find_active_for_vehicle<'e>(
        executor: impl PgExecutor<'e>,
        vehicle_id: Uuid,
    ) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            SELECT * FROM trips
            WHERE status = 'active' AND (truck_id = $1 OR trailer_id = $1)
            LIMIT 1
            "#,
        )
        .bind(vehicle_id)
        .fetch_optional(executor)
        .await?;

        Ok(trip)
    }
}
