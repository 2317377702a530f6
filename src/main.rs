use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use logistik_backend::config::environment::EnvironmentConfig;
use logistik_backend::database::create_pool;
use logistik_backend::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use logistik_backend::routes;
use logistik_backend::services::routing_service::{TomTomConfig, TomTomRouteProvider};
use logistik_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚚 Logistik Backend - Pricing & Orders API");
    info!("==========================================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let pool = match create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Adaptador de routing con config explícita (la API key no se lee
    // del entorno adentro del motor)
    let route_provider = Arc::new(TomTomRouteProvider::new(TomTomConfig {
        api_key: config.tomtom_api_key.clone(),
        base_url: config.tomtom_base_url.clone(),
    }));

    // Sin CORS_ORIGINS configurado se permite cualquier origen (desarrollo)
    let cors = if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let app_state = AppState::new(pool, config.clone(), route_provider);

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/fleets", routes::fleet_routes::create_fleet_router())
        .nest("/api/pricing", routes::pricing_routes::create_pricing_router())
        .nest("/api/order", routes::order_routes::create_order_router())
        .nest("/api/track", routes::order_routes::create_tracking_router())
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🚛 Master data:");
    info!("   GET  /api/fleets - Listar categorías de flota");
    info!("💰 Pricing:");
    info!("   POST /api/pricing/simulate - Simular precio de un envío");
    info!("📦 Órdenes:");
    info!("   POST /api/order - Crear orden (aplica costo calculado)");
    info!("   GET  /api/order?customer_id=... - Listar órdenes del customer");
    info!("   GET  /api/order/:id - Obtener orden");
    info!("   GET  /api/track?id=... - Tracking público por resi corto");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint de health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "logistik-backend",
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
