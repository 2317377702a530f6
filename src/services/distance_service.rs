//! Resolución de distancias (cache-aside sobre el Route Provider)
//!
//! Cuantiza ambas coordenadas, busca la lane exacta en el cache y solo en
//! miss llama al proveedor, escribiendo el resultado de vuelta. El write-back
//! es tolerante a conflictos: dos requests concurrentes de una lane nueva
//! pueden hacer ambos la llamada en vivo, pero el insert duplicado nunca
//! falla el quote.

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::cached_route::{CachedRoute, Coordinate, LaneKey, RouteQuote};
use crate::models::fleet::TravelMode;
use crate::services::routing_service::RouteProvider;
use crate::utils::errors::AppResult;

/// Contrato del cache de distancias. La implementación de producción es
/// la tabla cached_routes en PostgreSQL.
#[async_trait]
pub trait DistanceCache: Send + Sync {
    async fn find(&self, key: &LaneKey) -> AppResult<Option<CachedRoute>>;

    /// Debe tragarse el conflicto de clave duplicada (upsert-or-ignore)
    async fn insert(&self, key: &LaneKey, route: &RouteQuote) -> AppResult<()>;
}

pub struct DistanceService {
    cache: Arc<dyn DistanceCache>,
    provider: Arc<dyn RouteProvider>,
}

impl DistanceService {
    pub fn new(cache: Arc<dyn DistanceCache>, provider: Arc<dyn RouteProvider>) -> Self {
        Self { cache, provider }
    }

    /// Resolver distancia y duración de una lane
    pub async fn resolve(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        mode: TravelMode,
    ) -> AppResult<RouteQuote> {
        let key = LaneKey::quantized(origin, destination);

        if let Some(hit) = self.cache.find(&key).await? {
            log::info!(
                "📦 Cache hit for lane {},{} -> {},{}",
                key.origin_lat,
                key.origin_lng,
                key.dest_lat,
                key.dest_lng
            );
            return Ok(hit.to_quote());
        }

        // Miss: llamada en vivo con las coordenadas ya cuantizadas
        let quantized_origin = origin.quantized();
        let quantized_destination = destination.quantized();
        let live = self
            .provider
            .fetch_route(&quantized_origin, &quantized_destination, mode)
            .await?;

        self.cache.insert(&key, &live).await?;

        Ok(live)
    }
}
