use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::maintenance_rule::MaintenanceRule;
use crate::utils::errors::AppError;

pub struct MaintenanceRuleRepository {
    pool: PgPool,
}

impl MaintenanceRuleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        rule_type: String,
        recommended_km: Option<Decimal>,
        recommended_months: Option<i32>,
        description: Option<String>,
        is_active: bool,
    ) -> Result<MaintenanceRule, AppError> {
        let rule = sqlx::query_as::<_, MaintenanceRule>(
            r#"
            INSERT INTO maintenance_rules (id, rule_type, recommended_km, recommended_months,
                                           description, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(rule_type)
        .bind(recommended_km)
        .bind(recommended_months)
        .bind(description)
        .bind(is_active)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(rule)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MaintenanceRule>, AppError> {
        let rule =
            sqlx::query_as::<_, MaintenanceRule>("SELECT * FROM maintenance_rules WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(rule)
    }

    pub async fn list(&self, active_only: bool) -> Result<Vec<MaintenanceRule>, AppError> {
        let rules = sqlx::query_as::<_, MaintenanceRule>(
            r#"
            SELECT * FROM maintenance_rules
            WHERE ($1 = false OR is_active = true)
            ORDER BY created_at DESC
            "#,
        )
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(rules)
    }
}
