//! Reglas de mantenimiento
//!
//! Datos de referencia: se crean y consultan, el core nunca los muta.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::maintenance_rule_dto::{
    CreateMaintenanceRuleRequest, MaintenanceRuleFilters, MaintenanceRuleResponse,
};
use crate::dto::response_dto::ApiResponse;
use crate::models::maintenance_rule::is_valid_rule_type;
use crate::repositories::maintenance_rule_repository::MaintenanceRuleRepository;
use crate::utils::errors::AppError;
use crate::utils::validation;

pub struct MaintenanceRuleController {
    repository: MaintenanceRuleRepository,
}

impl MaintenanceRuleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: MaintenanceRuleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateMaintenanceRuleRequest,
    ) -> Result<ApiResponse<MaintenanceRuleResponse>, AppError> {
        let Some(rule_type) = request.rule_type else {
            return Err(AppError::Validation("Missing required fields".to_string()));
        };

        if !is_valid_rule_type(&rule_type) {
            return Err(AppError::Validation(format!(
                "Unknown maintenance rule type '{}'",
                rule_type
            )));
        }

        let recommended_km = request
            .recommended_km
            .map(|k| validation::decimal_from_f64(k, "recommended_km"))
            .transpose()?;

        let rule = self
            .repository
            .create(
                rule_type,
                recommended_km,
                request.recommended_months,
                request.description,
                request.is_active.unwrap_or(true),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            rule.into(),
            "Maintenance rule created".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<MaintenanceRuleResponse, AppError> {
        let rule = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Maintenance rule not found".to_string()))?;

        Ok(rule.into())
    }

    pub async fn list(
        &self,
        filters: MaintenanceRuleFilters,
    ) -> Result<Vec<MaintenanceRuleResponse>, AppError> {
        let rules = self
            .repository
            .list(filters.active_only.unwrap_or(false))
            .await?;

        Ok(rules.into_iter().map(MaintenanceRuleResponse::from).collect())
    }
}
