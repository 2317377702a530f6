//! Repositorios de acceso a datos
//!
//! Cada repositorio envuelve el pool de PostgreSQL y expone operaciones
//! tipadas. Las reglas de pricing y las flotas son read-only desde la
//! perspectiva del motor (solo las muta el flujo administrativo).

pub mod customer_repository;
pub mod distance_cache_repository;
pub mod fleet_repository;
pub mod order_repository;
pub mod pricing_rule_repository;
