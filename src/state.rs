//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::config::environment::EnvironmentConfig;

/// Registry de locks por vehículo.
///
/// Las escrituras de estado de un mismo vehículo se serializan acá: un
/// trip y un mantenimiento pueden disparar una reconciliación del mismo
/// vehículo en paralelo, y el proyector tiene que ser el árbitro final.
#[derive(Clone, Default)]
pub struct VehicleLockRegistry {
    locks: Arc<RwLock<HashMap<Uuid, Arc<Mutex<()>>>>>,
}

impl VehicleLockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Obtener (o crear) el lock de un vehículo
    pub async fn lock_for(&self, vehicle_id: Uuid) -> Arc<Mutex<()>> {
        {
            let locks = self.locks.read().await;
            if let Some(lock) = locks.get(&vehicle_id) {
                return lock.clone();
            }
        }

        let mut locks = self.locks.write().await;
        let lock = locks
            .entry(vehicle_id)
            .or_insert_with(|| {
                log::debug!("🔒 Creando lock para vehículo '{}'", vehicle_id);
                Arc::new(Mutex::new(()))
            })
            .clone();
        lock
    }

    /// Limpiar locks que ya nadie usa
    pub async fn cleanup_unused(&self) {
        let mut locks = self.locks.write().await;
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }
}

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub vehicle_locks: VehicleLockRegistry,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            pool,
            config,
            vehicle_locks: VehicleLockRegistry::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_same_vehicle_gets_same_lock() {
        let registry = VehicleLockRegistry::new();
        let id = Uuid::new_v4();

        let a = registry.lock_for(id).await;
        let b = registry.lock_for(id).await;
        assert!(Arc::ptr_eq(&a, &b));

        let other = registry.lock_for(Uuid::new_v4()).await;
        assert!(!Arc::ptr_eq(&a, &other));
    }

    #[tokio::test]
    async fn test_cleanup_drops_unreferenced_locks() {
        let registry = VehicleLockRegistry::new();
        let id = Uuid::new_v4();

        {
            let _held = registry.lock_for(id).await;
            registry.cleanup_unused().await;
            // sigue vivo mientras alguien lo tenga
            let again = registry.lock_for(id).await;
            assert!(Arc::ptr_eq(&_held, &again));
        }

        registry.cleanup_unused().await;
        // tras el cleanup se crea uno nuevo
        let fresh = registry.lock_for(id).await;
        assert_eq!(Arc::strong_count(&fresh), 2);
    }
}
