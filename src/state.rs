//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::services::routing_service::RouteProvider;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub route_provider: Arc<dyn RouteProvider>,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        config: EnvironmentConfig,
        route_provider: Arc<dyn RouteProvider>,
    ) -> Self {
        Self {
            pool,
            config,
            route_provider,
        }
    }
}
