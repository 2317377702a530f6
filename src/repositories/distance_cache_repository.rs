use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::cached_route::{CachedRoute, LaneKey, RouteQuote};
use crate::services::distance_service::DistanceCache;
use crate::utils::errors::AppResult;

/// Cache de distancias sobre PostgreSQL (tabla cached_routes).
/// Lookup exacto e indexado sobre la 4-tupla cuantizada, nunca búsqueda
/// espacial: solo se benefician requests repetidos de la misma lane.
pub struct DistanceCacheRepository {
    pool: PgPool,
}

impl DistanceCacheRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DistanceCache for DistanceCacheRepository {
    async fn find(&self, key: &LaneKey) -> AppResult<Option<CachedRoute>> {
        let cached = sqlx::query_as::<_, CachedRoute>(
            r#"
            SELECT origin_lat, origin_lng, dest_lat, dest_lng,
                   distance_km, duration_minutes, toll_fee, created_at
            FROM cached_routes
            WHERE origin_lat = $1 AND origin_lng = $2
              AND dest_lat = $3 AND dest_lng = $4
            "#,
        )
        .bind(key.origin_lat)
        .bind(key.origin_lng)
        .bind(key.dest_lat)
        .bind(key.dest_lng)
        .fetch_optional(&self.pool)
        .await?;

        Ok(cached)
    }

    /// Insert tolerante a conflictos: dos requests concurrentes de una lane
    /// nueva pueden intentar cachear a la vez. ON CONFLICT DO NOTHING - el
    /// conflicto significa "alguien más ya la cacheó" y nunca llega al caller.
    async fn insert(&self, key: &LaneKey, route: &RouteQuote) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO cached_routes
                (origin_lat, origin_lng, dest_lat, dest_lng,
                 distance_km, duration_minutes, toll_fee, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW())
            ON CONFLICT (origin_lat, origin_lng, dest_lat, dest_lng) DO NOTHING
            "#,
        )
        .bind(key.origin_lat)
        .bind(key.origin_lng)
        .bind(key.dest_lat)
        .bind(key.dest_lng)
        .bind(route.distance_km)
        .bind(route.duration_minutes)
        .bind(route.toll_fee)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
