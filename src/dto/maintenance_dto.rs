use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::maintenance::Maintenance;

// Request para crear un mantenimiento
#[derive(Debug, Deserialize)]
pub struct CreateMaintenanceRequest {
    pub maintenance_rule_id: Option<String>,
    pub vehicle_id: Option<String>,
    pub target_type: Option<String>,
    pub component: Option<String>,
    pub description: Option<String>,
    pub cost: Option<f64>,
    pub date: Option<String>,
    pub km_at_maintenance: Option<f64>,
}

// Request para actualizar un mantenimiento (principalmente el estado)
#[derive(Debug, Deserialize, Default)]
pub struct UpdateMaintenanceRequest {
    pub status: Option<String>,
    pub description: Option<String>,
    pub cost: Option<f64>,
    pub date: Option<String>,
    pub km_at_maintenance: Option<f64>,
}

// Response de mantenimiento
#[derive(Debug, Serialize)]
pub struct MaintenanceResponse {
    pub id: Uuid,
    pub maintenance_rule_id: Uuid,
    pub vehicle_id: Uuid,
    pub target_type: String,
    pub component: String,
    pub status: String,
    pub description: Option<String>,
    pub cost: Option<f64>,
    pub date: Option<DateTime<Utc>>,
    pub km_at_maintenance: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<Maintenance> for MaintenanceResponse {
    fn from(m: Maintenance) -> Self {
        Self {
            id: m.id,
            maintenance_rule_id: m.maintenance_rule_id,
            vehicle_id: m.vehicle_id,
            target_type: m.target_type,
            component: m.component,
            status: m.status.as_str().to_string(),
            description: m.description,
            cost: m.cost.map(|c| c.to_string().parse().unwrap_or(0.0)),
            date: m.date,
            km_at_maintenance: m
                .km_at_maintenance
                .map(|k| k.to_string().parse().unwrap_or(0.0)),
            created_at: m.created_at,
        }
    }
}
