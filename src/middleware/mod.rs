//! Middleware del sistema
//!
//! Este módulo contiene el middleware de CORS y trazas HTTP.

pub mod cors;

pub use cors::*;
