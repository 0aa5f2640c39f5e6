use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::trip_controller::TripController;
use crate::dto::response_dto::ApiResponse;
use crate::dto::trip_dto::{CreateTripRequest, TripResponse, UpdateTripRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_trip_router() -> Router<AppState> {
    Router::new()
        .route("/create-trip", post(create_trip))
        .route("/update-trip/:id", put(update_trip))
        .route("/trips", get(list_trips))
        .route("/trip/:id", get(get_trip))
        .route("/driver-trips/:driver_id", get(get_driver_trips))
        .route("/delete-trip/:id", delete(delete_trip))
}

async fn create_trip(
    State(state): State<AppState>,
    Json(request): Json<CreateTripRequest>,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let controller = TripController::new(state.pool.clone(), state.vehicle_locks.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn update_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateTripRequest>,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let controller = TripController::new(state.pool.clone(), state.vehicle_locks.clone());
    let response = controller.update(id, patch).await?;
    Ok(Json(response))
}

async fn list_trips(
    State(state): State<AppState>,
) -> Result<Json<Vec<TripResponse>>, AppError> {
    let controller = TripController::new(state.pool.clone(), state.vehicle_locks.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TripResponse>, AppError> {
    let controller = TripController::new(state.pool.clone(), state.vehicle_locks.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn get_driver_trips(
    State(state): State<AppState>,
    Path(driver_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<TripResponse>>>, AppError> {
    let controller = TripController::new(state.pool.clone(), state.vehicle_locks.clone());
    let trips = controller.get_by_driver(&driver_id).await?;
    let message = format!("Found {} trips for driver", trips.len());
    Ok(Json(ApiResponse::success_with_message(trips, message)))
}

async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let controller = TripController::new(state.pool.clone(), state.vehicle_locks.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
