//! Aplicación de costos en la creación de órdenes
//!
//! Path simplificado: confía en el total_distance_km que manda el cliente y
//! no captura peso/volumen, así que no hay surcharges. Falla cerrado si la
//! flota o la regla no existen - nunca se sustituye una categoría arbitraria.
//!
//! TODO: derivar la distancia desde las coordenadas de la orden vía
//! DistanceService en lugar de confiar en el total_distance_km del cliente;
//! hoy un cliente manipulado puede alterar el precio cobrado.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::repositories::fleet_repository::FleetRepository;
use crate::repositories::pricing_rule_repository::PricingRuleRepository;
use crate::services::pricing_engine::{self, OrderPrice, ServiceTier};
use crate::utils::errors::{AppError, AppResult};

pub struct OrderPricingService {
    fleets: FleetRepository,
    rules: PricingRuleRepository,
}

impl OrderPricingService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            fleets: FleetRepository::new(pool.clone()),
            rules: PricingRuleRepository::new(pool),
        }
    }

    /// Calcular el precio de una orden a partir de la distancia declarada.
    /// `corporate` viene del risk_status del customer (SAFE => corporate).
    pub async fn price_order(
        &self,
        fleet_id: Uuid,
        distance_km: Decimal,
        tier: ServiceTier,
        corporate: bool,
    ) -> AppResult<OrderPrice> {
        if distance_km < Decimal::ZERO {
            return Err(AppError::InvalidInput(
                "total_distance_km must not be negative".to_string(),
            ));
        }

        let fleet = self
            .fleets
            .find_by_id(fleet_id)
            .await?
            .ok_or_else(|| AppError::CategoryNotFound(format!("fleet '{}'", fleet_id)))?;

        let rule = self
            .rules
            .find_by_fleet_type(&fleet.fleet_type)
            .await?
            .ok_or_else(|| {
                AppError::RuleNotFound(format!("no pricing rule for category '{}'", fleet.fleet_type))
            })?;

        log::info!(
            "💰 Pricing order: fleet {} ({}), {} km, tier {:?}, corporate {}",
            fleet.name,
            fleet.fleet_type,
            distance_km,
            tier,
            corporate
        );

        Ok(pricing_engine::shipping_price(
            distance_km,
            &rule,
            tier,
            corporate,
        ))
    }
}
