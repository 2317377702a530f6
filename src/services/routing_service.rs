//! Adaptador del proveedor de routing (TomTom)
//!
//! Llama al calculateRoute de TomTom con timeout explícito y convierte la
//! respuesta a RouteQuote. Cualquier desviación (HTTP error, timeout, shape
//! inesperado, lista de rutas vacía) se mapea a RouteUnavailable; esta capa
//! nunca reintenta, eso lo decide el caller.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::cached_route::{Coordinate, RouteQuote, RouteSource};
use crate::models::fleet::TravelMode;
use crate::utils::errors::{AppError, AppResult};

/// Configuración inmutable del adaptador, inyectada en la construcción.
/// El motor de pricing nunca lee la API key del entorno.
#[derive(Debug, Clone)]
pub struct TomTomConfig {
    pub api_key: String,
    pub base_url: String,
}

/// Contrato del proveedor de rutas. Detrás de un trait para poder testear
/// el resolver de distancias sin red.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    async fn fetch_route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        mode: TravelMode,
    ) -> AppResult<RouteQuote>;
}

#[derive(Debug, Deserialize)]
struct TomTomRouteResponse {
    routes: Vec<TomTomRoute>,
}

#[derive(Debug, Deserialize)]
struct TomTomRoute {
    summary: TomTomSummary,
}

#[derive(Debug, Deserialize)]
struct TomTomSummary {
    #[serde(rename = "lengthInMeters")]
    length_in_meters: f64,
    #[serde(rename = "travelTimeInSeconds")]
    travel_time_in_seconds: f64,
}

pub struct TomTomRouteProvider {
    config: TomTomConfig,
    client: reqwest::Client,
}

impl TomTomRouteProvider {
    pub fn new(config: TomTomConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }
}

#[async_trait]
impl RouteProvider for TomTomRouteProvider {
    async fn fetch_route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        mode: TravelMode,
    ) -> AppResult<RouteQuote> {
        let url = format!(
            "{}/routing/1/calculateRoute/{},{}:{},{}/json",
            self.config.base_url, origin.lat, origin.lng, destination.lat, destination.lng
        );

        let mut params: Vec<(&str, String)> = vec![
            ("key", self.config.api_key.clone()),
            ("travelMode", mode.as_str().to_string()),
            ("traffic", "true".to_string()),
            ("routeType", "fastest".to_string()),
        ];

        // Perfil de vehículo pesado con defaults fijos
        if mode == TravelMode::Truck {
            params.push(("vehicleWeight", "12000".to_string()));
            params.push(("vehicleLength", "12".to_string()));
            params.push(("vehicleWidth", "2.5".to_string()));
        }

        log::info!(
            "🛣️ Requesting route {}:{} -> {}:{} (mode {})",
            origin.lat,
            origin.lng,
            destination.lat,
            destination.lng,
            mode.as_str()
        );

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::RouteUnavailable("routing provider timed out".to_string())
                } else {
                    AppError::RouteUnavailable(format!("routing provider request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("❌ TomTom returned {}: {}", status, body);
            return Err(AppError::RouteUnavailable(format!(
                "routing provider returned status {}",
                status
            )));
        }

        let payload: TomTomRouteResponse = response.json().await.map_err(|e| {
            AppError::RouteUnavailable(format!("malformed routing response: {}", e))
        })?;

        let route = payload.routes.first().ok_or_else(|| {
            AppError::RouteUnavailable("no routes in provider response".to_string())
        })?;

        let distance_km = Decimal::from_f64_retain(route.summary.length_in_meters / 1000.0)
            .ok_or_else(|| {
                AppError::RouteUnavailable("invalid distance in provider response".to_string())
            })?
            .round_dp(2);

        let duration_minutes = (route.summary.travel_time_in_seconds / 60.0).round() as i32;

        log::info!(
            "✅ Route resolved: {} km, {} min",
            distance_km,
            duration_minutes
        );

        Ok(RouteQuote {
            distance_km,
            duration_minutes,
            // TomTom no devuelve peajes en este endpoint
            toll_fee: Decimal::ZERO,
            source: RouteSource::Live,
        })
    }
}
