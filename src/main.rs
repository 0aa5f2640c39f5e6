mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use database::connection::mask_database_url;
use database::DatabaseConnection;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::default();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(if config.is_development() {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    info!("🚚 Fleet Management Backend");
    info!("===========================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    if let Ok(url) = std::env::var("DATABASE_URL") {
        info!("✅ Base de datos conectada: {}", mask_database_url(&url));
    }

    let pool = db_connection.pool().clone();
    let app_state = AppState::new(pool, config.clone());

    // CORS: permisivo en desarrollo, orígenes explícitos si están configurados
    let cors = if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    // Crear router de la API
    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api", routes::trip_routes::create_trip_router())
        .nest("/api", routes::maintenance_routes::create_maintenance_router())
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest(
            "/api/maintenance-rule",
            routes::maintenance_rule_routes::create_maintenance_rule_router(),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🚛 Endpoints - Trip:");
    info!("   POST /api/create-trip - Crear trip");
    info!("   PUT  /api/update-trip/:id - Actualizar trip");
    info!("   GET  /api/trips - Listar trips");
    info!("   GET  /api/trip/:id - Obtener trip");
    info!("   GET  /api/driver-trips/:driver_id - Trips por conductor");
    info!("   DELETE /api/delete-trip/:id - Eliminar trip");
    info!("🔧 Endpoints - Maintenance:");
    info!("   POST /api/create-maintenance - Crear mantenimiento");
    info!("   PUT  /api/update-maintenance/:id - Actualizar mantenimiento");
    info!("   GET  /api/maintenances - Listar mantenimientos");
    info!("   GET  /api/maintenance/:id - Obtener mantenimiento");
    info!("   DELETE /api/delete-maintenance/:id - Eliminar mantenimiento");
    info!("🚗 Endpoints - Vehicle:");
    info!("   POST /api/vehicle - Crear vehículo");
    info!("   GET  /api/vehicle - Listar vehículos");
    info!("   GET  /api/vehicle/:id - Obtener vehículo");
    info!("   PUT  /api/vehicle/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicle/:id - Eliminar vehículo");
    info!("📋 Endpoints - MaintenanceRule:");
    info!("   POST /api/maintenance-rule - Crear regla");
    info!("   GET  /api/maintenance-rule - Listar reglas");
    info!("   GET  /api/maintenance-rule/:id - Obtener regla");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "fleet-backend",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
