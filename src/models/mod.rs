//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod maintenance;
pub mod maintenance_rule;
pub mod trip;
pub mod vehicle;
