use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::maintenance_rule_controller::MaintenanceRuleController;
use crate::dto::maintenance_rule_dto::{
    CreateMaintenanceRuleRequest, MaintenanceRuleFilters, MaintenanceRuleResponse,
};
use crate::dto::response_dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_rule_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_rule))
        .route("/", get(list_rules))
        .route("/:id", get(get_rule))
}

async fn create_rule(
    State(state): State<AppState>,
    Json(request): Json<CreateMaintenanceRuleRequest>,
) -> Result<Json<ApiResponse<MaintenanceRuleResponse>>, AppError> {
    let controller = MaintenanceRuleController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_rules(
    State(state): State<AppState>,
    Query(filters): Query<MaintenanceRuleFilters>,
) -> Result<Json<Vec<MaintenanceRuleResponse>>, AppError> {
    let controller = MaintenanceRuleController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MaintenanceRuleResponse>, AppError> {
    let controller = MaintenanceRuleController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}
