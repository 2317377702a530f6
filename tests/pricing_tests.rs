//! Tests de integración del motor de pricing y la resolución de distancias,
//! con implementaciones en memoria del cache y del proveedor de rutas.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use uuid::Uuid;

use logistik_backend::models::cached_route::{
    CachedRoute, Coordinate, LaneKey, RouteQuote, RouteSource,
};
use logistik_backend::models::fleet::{Fleet, TravelMode};
use logistik_backend::models::pricing_rule::PricingRule;
use logistik_backend::services::distance_service::{DistanceCache, DistanceService};
use logistik_backend::services::pricing_engine::{
    self, CustomerClass, QuoteRequest, ServiceTier,
};
use logistik_backend::services::routing_service::RouteProvider;
use logistik_backend::utils::errors::{AppError, AppResult};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

struct InMemoryCache {
    rows: Mutex<HashMap<LaneKey, CachedRoute>>,
}

impl InMemoryCache {
    fn new() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl DistanceCache for InMemoryCache {
    async fn find(&self, key: &LaneKey) -> AppResult<Option<CachedRoute>> {
        Ok(self.rows.lock().await.get(key).cloned())
    }

    async fn insert(&self, key: &LaneKey, route: &RouteQuote) -> AppResult<()> {
        let mut rows = self.rows.lock().await;
        rows.entry(key.clone()).or_insert_with(|| CachedRoute {
            origin_lat: key.origin_lat,
            origin_lng: key.origin_lng,
            dest_lat: key.dest_lat,
            dest_lng: key.dest_lng,
            distance_km: route.distance_km,
            duration_minutes: route.duration_minutes,
            toll_fee: route.toll_fee,
            created_at: Utc::now(),
        });
        Ok(())
    }
}

struct FixedProvider {
    distance_km: Decimal,
    duration_minutes: i32,
    calls: AtomicUsize,
}

impl FixedProvider {
    fn new(distance_km: &str, duration_minutes: i32) -> Self {
        Self {
            distance_km: dec(distance_km),
            duration_minutes,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RouteProvider for FixedProvider {
    async fn fetch_route(
        &self,
        _origin: &Coordinate,
        _destination: &Coordinate,
        _mode: TravelMode,
    ) -> AppResult<RouteQuote> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(RouteQuote {
            distance_km: self.distance_km,
            duration_minutes: self.duration_minutes,
            toll_fee: Decimal::ZERO,
            source: RouteSource::Live,
        })
    }
}

fn pickup_fleet() -> Fleet {
    Fleet {
        id: Uuid::new_v4(),
        name: "Pickup Bak".to_string(),
        fleet_type: "PICKUP".to_string(),
        travel_mode: "car".to_string(),
        max_weight_kg_limit: dec("1000"),
        max_volume_cbm_limit: dec("5"),
        surcharge_weight_price: dec("500"),
        surcharge_volume_price: dec("20000"),
        description: None,
        sort_order: 0,
        created_at: Utc::now(),
    }
}

fn pickup_rule() -> PricingRule {
    PricingRule {
        id: Uuid::new_v4(),
        fleet_type: "PICKUP".to_string(),
        base_fare: Decimal::ZERO,
        base_rate_per_km: dec("10000"),
        min_distance_km: 10,
        min_price_lumpsum: dec("300000"),
        sla_express_multiplier: dec("1.5"),
        loading_unloading_rate: Decimal::ZERO,
        doc_return_fee: Decimal::ZERO,
        created_at: Utc::now(),
    }
}

fn lane() -> (Coordinate, Coordinate) {
    (
        Coordinate::new(dec("-6.175392"), dec("106.827153")),
        Coordinate::new(dec("-6.914744"), dec("107.609810")),
    )
}

#[tokio::test]
async fn quote_end_to_end_with_cache_miss_then_hit() {
    let cache = Arc::new(InMemoryCache::new());
    let provider = Arc::new(FixedProvider::new("50", 90));
    let distances = DistanceService::new(cache, provider.clone());

    let fleet = pickup_fleet();
    let rule = pickup_rule();
    let (origin, destination) = lane();

    let request = QuoteRequest {
        origin,
        destination,
        fleet_id: fleet.id,
        weight_kg: dec("1200"),
        volume_cbm: dec("4"),
        service: ServiceTier::Standard,
        customer_class: CustomerClass::Retail,
    };

    let route = distances
        .resolve(&origin, &destination, TravelMode::Car)
        .await
        .unwrap();
    let first = pricing_engine::compute_breakdown(&fleet, &rule, &route, &request).unwrap();

    // base 500000 + surcharge de peso 100000 => HPP 600000 => /0.8 = 750000
    assert_eq!(first.total_cost_basis, dec("600000"));
    assert_eq!(first.final_selling_price, 750_000);
    assert!(!first.cache_hit);

    let route = distances
        .resolve(&origin, &destination, TravelMode::Car)
        .await
        .unwrap();
    let second = pricing_engine::compute_breakdown(&fleet, &rule, &route, &request).unwrap();

    // Mismo precio, servido del cache, una sola llamada al proveedor
    assert_eq!(second.final_selling_price, first.final_selling_price);
    assert!(second.cache_hit);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn express_corporate_total_follows_fixed_ordering() {
    let cache = Arc::new(InMemoryCache::new());
    let provider = Arc::new(FixedProvider::new("50", 90));
    let distances = DistanceService::new(cache, provider);

    let fleet = pickup_fleet();
    let rule = pickup_rule();
    let (origin, destination) = lane();

    let request = QuoteRequest {
        origin,
        destination,
        fleet_id: fleet.id,
        weight_kg: Decimal::ZERO,
        volume_cbm: Decimal::ZERO,
        service: ServiceTier::Express,
        customer_class: CustomerClass::Corporate,
    };

    let route = distances
        .resolve(&origin, &destination, TravelMode::Car)
        .await
        .unwrap();
    let breakdown = pricing_engine::compute_breakdown(&fleet, &rule, &route, &request).unwrap();

    // 500000 -> /0.8 = 625000 -> x1.5 = 937500 -> /0.98 = 956632.65 -> 957000
    assert_eq!(breakdown.final_selling_price, 957_000);
    // Los componentes del breakdown solo llevan el margen base
    assert_eq!(breakdown.base_price, 625_000);
}

#[test]
fn rule_not_found_and_route_unavailable_are_distinct() {
    let rule_missing = AppError::RuleNotFound("no pricing rule for category 'FUSO'".to_string());
    let route_failed = AppError::RouteUnavailable("routing provider timed out".to_string());

    // Los callers deben poder renderizar mensajes distintos
    assert!(matches!(rule_missing, AppError::RuleNotFound(_)));
    assert!(matches!(route_failed, AppError::RouteUnavailable(_)));

    let rule_status = rule_missing.into_response().status();
    let route_status = route_failed.into_response().status();
    assert_eq!(rule_status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(route_status, StatusCode::BAD_GATEWAY);
    assert_ne!(rule_status, route_status);
}

#[test]
fn ceiling_rounding_matches_customer_facing_rule() {
    assert_eq!(pricing_engine::ceil_to_thousands(dec("1")), dec("1000"));
    assert_eq!(pricing_engine::ceil_to_thousands(dec("1000")), dec("1000"));
    assert_eq!(pricing_engine::ceil_to_thousands(dec("1001")), dec("2000"));
}
