//! Configuración de conexión a PostgreSQL
//!
//! Este módulo maneja la conexión a la base de datos PostgreSQL.

use anyhow::Result;
use sqlx::PgPool;

use crate::config::database::DatabaseConfig;

/// Crear un pool de conexiones a la base de datos
pub async fn create_pool(database_url: Option<&str>) -> Result<PgPool> {
    let database_url = match database_url {
        Some(url) => url.to_string(),
        None => std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set in environment variables"),
    };

    let config = DatabaseConfig::new(database_url);
    let pool = config.create_pool().await?;

    Ok(pool)
}
