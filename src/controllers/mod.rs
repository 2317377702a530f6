//! Controllers de la aplicación
//!
//! Orquestan repositorios y servicios para atender cada request.

pub mod fleet_controller;
pub mod order_controller;
pub mod pricing_controller;
