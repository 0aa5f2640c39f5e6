use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::vehicle::{Vehicle, VehicleStatus, VehicleType};
use crate::utils::errors::AppError;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        plate_number: String,
        brand: Option<String>,
        model: Option<String>,
        vehicle_type: VehicleType,
        current_km: Decimal,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, plate_number, brand, model, vehicle_type, current_km, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, 'available', $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(plate_number)
        .bind(brand)
        .bind(model)
        .bind(vehicle_type)
        .bind(current_km)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn list(
        &self,
        status: Option<VehicleStatus>,
        vehicle_type: Option<VehicleType>,
    ) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE ($1::vehicle_status IS NULL OR status = $1)
              AND ($2::vehicle_type IS NULL OR vehicle_type = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status)
        .bind(vehicle_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn plate_exists(&self, plate_number: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE plate_number = $1)")
                .bind(plate_number)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn update_details(
        &self,
        id: Uuid,
        plate_number: Option<String>,
        brand: Option<String>,
        model: Option<String>,
    ) -> Result<Vehicle, AppError> {
        // Obtener vehículo actual
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET plate_number = $2, brand = $3, model = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(plate_number.unwrap_or(current.plate_number))
        .bind(brand.or(current.brand))
        .bind(model.or(current.model))
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehicle not found".to_string()));
        }

        Ok(())
    }

    /// Escritura de estado, usada solo por el proyector
    pub async fn set_status<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
        status: VehicleStatus,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE vehicles SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(executor)
            .await?;

        Ok(())
    }

    /// Incremento atómico del odómetro a nivel de storage.
    ///
    /// El delta se aplica en una sola sentencia SQL para que incrementos
    /// concurrentes de trips distintos no se pisen entre sí.
    pub async fn increment_km<'e>(
        executor: impl PgExecutor<'e>,
        ids: &[Uuid],
        delta: Decimal,
    ) -> Result<(), AppError> {
        sqlx::query("UPDATE vehicles SET current_km = current_km + $2 WHERE id = ANY($1)")
            .bind(ids)
            .bind(delta)
            .execute(executor)
            .await?;

        Ok(())
    }
}
