//! Services module
//!
//! Este módulo contiene la lógica de negocio y servicios de la aplicación.
//! Los servicios encapsulan operaciones complejas que pueden involucrar
//! múltiples modelos o integraciones externas.

pub mod distance_service;
pub mod order_pricing_service;
pub mod pricing_engine;
pub mod routing_service;

pub use distance_service::*;
pub use routing_service::*;
