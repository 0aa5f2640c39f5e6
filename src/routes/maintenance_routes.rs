use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::maintenance_dto::{
    CreateMaintenanceRequest, MaintenanceResponse, UpdateMaintenanceRequest,
};
use crate::dto::response_dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new()
        .route("/create-maintenance", post(create_maintenance))
        .route("/update-maintenance/:id", put(update_maintenance))
        .route("/maintenances", get(list_maintenances))
        .route("/maintenance/:id", get(get_maintenance))
        .route("/delete-maintenance/:id", delete(delete_maintenance))
}

async fn create_maintenance(
    State(state): State<AppState>,
    Json(request): Json<CreateMaintenanceRequest>,
) -> Result<Json<ApiResponse<MaintenanceResponse>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone(), state.vehicle_locks.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn update_maintenance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateMaintenanceRequest>,
) -> Result<Json<ApiResponse<MaintenanceResponse>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone(), state.vehicle_locks.clone());
    let response = controller.update(id, patch).await?;
    Ok(Json(response))
}

async fn list_maintenances(
    State(state): State<AppState>,
) -> Result<Json<Vec<MaintenanceResponse>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone(), state.vehicle_locks.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_maintenance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MaintenanceResponse>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone(), state.vehicle_locks.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn delete_maintenance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MaintenanceResponse>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone(), state.vehicle_locks.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
