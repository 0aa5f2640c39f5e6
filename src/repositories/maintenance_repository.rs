use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::maintenance::Maintenance;
use crate::utils::errors::AppError;

// Datos de un mantenimiento nuevo, ya validados por el controller
#[derive(Debug)]
pub struct NewMaintenance {
    pub maintenance_rule_id: Uuid,
    pub vehicle_id: Uuid,
    pub target_type: String,
    pub component: String,
    pub description: Option<String>,
    pub cost: Option<Decimal>,
    pub date: Option<DateTime<Utc>>,
    pub km_at_maintenance: Option<Decimal>,
}

pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, new: &NewMaintenance) -> Result<Maintenance, AppError> {
        let maintenance = sqlx::query_as::<_, Maintenance>(
            r#"
            INSERT INTO maintenances (id, maintenance_rule_id, vehicle_id, target_type, component,
                                      status, description, cost, date, km_at_maintenance, created_at)
            VALUES ($1, $2, $3, $4, $5, 'pending', $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.maintenance_rule_id)
        .bind(new.vehicle_id)
        .bind(&new.target_type)
        .bind(&new.component)
        .bind(new.description.as_deref())
        .bind(new.cost)
        .bind(new.date)
        .bind(new.km_at_maintenance)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(maintenance)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Maintenance>, AppError> {
        let maintenance =
            sqlx::query_as::<_, Maintenance>("SELECT * FROM maintenances WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(maintenance)
    }

    pub async fn list(&self) -> Result<Vec<Maintenance>, AppError> {
        let maintenances =
            sqlx::query_as::<_, Maintenance>("SELECT * FROM maintenances ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(maintenances)
    }

    pub async fn update(&self, maintenance: &Maintenance) -> Result<Maintenance, AppError> {
        let updated = sqlx::query_as::<_, Maintenance>(
            r#"
            UPDATE maintenances
            SET status = $2, description = $3, cost = $4, date = $5, km_at_maintenance = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(maintenance.id)
        .bind(maintenance.status)
        .bind(maintenance.description.as_deref())
        .bind(maintenance.cost)
        .bind(maintenance.date)
        .bind(maintenance.km_at_maintenance)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<Maintenance>, AppError> {
        let maintenance =
            sqlx::query_as::<_, Maintenance>("DELETE FROM maintenances WHERE id = $1 RETURNING *")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(maintenance)
    }

    /// Mantenimientos abiertos (pending | in_progress) de un vehículo
    pub async fn count_open_for_vehicle<'e>(
        executor: impl PgExecutor<'e>,
        vehicle_id: Uuid,
    ) -> Result<i64, AppError> {
        let result: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM maintenances
            WHERE vehicle_id = $1 AND status IN ('pending', 'in_progress')
            "#,
        )
        .bind(vehicle_id)
        .fetch_one(executor)
        .await?;

        Ok(result.0)
    }
}
