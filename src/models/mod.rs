//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod cached_route;
pub mod customer;
pub mod fleet;
pub mod order;
pub mod pricing_rule;
