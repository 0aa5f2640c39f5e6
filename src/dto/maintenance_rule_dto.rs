use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::maintenance_rule::MaintenanceRule;

// Request para crear una regla de mantenimiento
#[derive(Debug, Deserialize)]
pub struct CreateMaintenanceRuleRequest {
    pub rule_type: Option<String>,
    pub recommended_km: Option<f64>,
    pub recommended_months: Option<i32>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

// Filtros para listados de reglas
#[derive(Debug, Deserialize)]
pub struct MaintenanceRuleFilters {
    pub active_only: Option<bool>,
}

// Response de regla de mantenimiento
#[derive(Debug, Serialize)]
pub struct MaintenanceRuleResponse {
    pub id: Uuid,
    pub rule_type: String,
    pub recommended_km: Option<f64>,
    pub recommended_months: Option<i32>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<MaintenanceRule> for MaintenanceRuleResponse {
    fn from(rule: MaintenanceRule) -> Self {
        Self {
            id: rule.id,
            rule_type: rule.rule_type,
            recommended_km: rule
                .recommended_km
                .map(|k| k.to_string().parse().unwrap_or(0.0)),
            recommended_months: rule.recommended_months,
            description: rule.description,
            is_active: rule.is_active,
            created_at: rule.created_at,
        }
    }
}
