//! Controller del endpoint de simulación de precio
//!
//! Orquesta el flujo completo del quote: validación de entrada, lookup de
//! master data (fallando cerrado si falta), resolución de distancia con
//! cache-aside y cálculo del breakdown.

use std::sync::Arc;

use sqlx::PgPool;
use validator::Validate;

use crate::dto::pricing_dto::{SimulatePriceDetails, SimulatePriceRequest, SimulatePriceResponse};
use crate::models::cached_route::Coordinate;
use crate::repositories::distance_cache_repository::DistanceCacheRepository;
use crate::repositories::fleet_repository::FleetRepository;
use crate::repositories::pricing_rule_repository::PricingRuleRepository;
use crate::services::distance_service::DistanceService;
use crate::services::pricing_engine::{
    self, CustomerClass, QuoteRequest, ServiceTier,
};
use crate::services::routing_service::RouteProvider;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{non_negative_decimal, validate_coordinate};

pub struct PricingController {
    fleets: FleetRepository,
    rules: PricingRuleRepository,
    distances: DistanceService,
}

impl PricingController {
    pub fn new(pool: PgPool, provider: Arc<dyn RouteProvider>) -> Self {
        let cache = Arc::new(DistanceCacheRepository::new(pool.clone()));
        Self {
            fleets: FleetRepository::new(pool.clone()),
            rules: PricingRuleRepository::new(pool),
            distances: DistanceService::new(cache, provider),
        }
    }

    pub async fn simulate(
        &self,
        request: SimulatePriceRequest,
    ) -> AppResult<SimulatePriceResponse> {
        request.validate()?;

        let origin = Coordinate::new(request.origin_lat, request.origin_lng);
        let destination = Coordinate::new(request.dest_lat, request.dest_lng);
        validate_coordinate(origin.lat, origin.lng)?;
        validate_coordinate(destination.lat, destination.lng)?;

        let weight_kg = non_negative_decimal(request.weight.unwrap_or(0.0), "weight")?;
        let volume_cbm = non_negative_decimal(request.volume.unwrap_or(0.0), "volume")?;

        // Master data: la ausencia es error de configuración, no del usuario
        let fleet = self
            .fleets
            .find_by_id(request.fleet_id)
            .await?
            .ok_or_else(|| {
                AppError::CategoryNotFound(format!("fleet '{}'", request.fleet_id))
            })?;

        let rule = self
            .rules
            .find_by_fleet_type(&fleet.fleet_type)
            .await?
            .ok_or_else(|| {
                AppError::RuleNotFound(format!(
                    "no pricing rule for category '{}'",
                    fleet.fleet_type
                ))
            })?;

        let travel_mode = fleet.travel_mode()?;

        let route = self
            .distances
            .resolve(&origin, &destination, travel_mode)
            .await?;

        let quote_request = QuoteRequest {
            origin,
            destination,
            fleet_id: fleet.id,
            weight_kg,
            volume_cbm,
            service: request.service_type.unwrap_or(ServiceTier::Standard),
            customer_class: request.customer_class.unwrap_or(CustomerClass::Retail),
        };

        let breakdown = pricing_engine::compute_breakdown(&fleet, &rule, &route, &quote_request)?;

        log::info!(
            "💰 Quote: fleet {} ({}), {} km, total {}",
            fleet.name,
            fleet.fleet_type,
            breakdown.distance_km,
            breakdown.final_selling_price
        );

        Ok(SimulatePriceResponse {
            estimated_price: breakdown.final_selling_price,
            distance_km: breakdown.distance_km,
            duration_minutes: breakdown.duration_minutes,
            duration_text: pricing_engine::duration_text(breakdown.duration_minutes),
            details: SimulatePriceDetails {
                base_price: breakdown.base_price,
                surcharge_weight: breakdown.weight_surcharge,
                surcharge_volume: breakdown.volume_surcharge,
                is_cached: breakdown.cache_hit,
                travel_mode: fleet.travel_mode.clone(),
            },
        })
    }
}
