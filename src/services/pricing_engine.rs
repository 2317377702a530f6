//! Motor de pricing
//!
//! Convierte distancia + regla de la categoría + carga declarada en un
//! precio final con breakdown itemizado. El orden importa: los surcharges
//! entran al costo ANTES del margen, el multiplicador express se aplica
//! sobre el precio ya con margen, y el spread corporate va al final.
//!
//! Margen por inversión: selling = costo / (1 - margen). Es margen sobre
//! el precio de venta (gross margin), no markup sobre el costo; multiplicar
//! por 1.2 NO es equivalente y dejaría el margen corto.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::cached_route::{Coordinate, RouteQuote};
use crate::models::fleet::Fleet;
use crate::models::pricing_rule::PricingRule;
use crate::utils::errors::{AppError, AppResult};

/// Margen base: 20% del precio de venta
fn base_margin() -> Decimal {
    Decimal::new(20, 2)
}

/// Spread adicional para cuentas corporate: 2%, aplicado al final
fn corporate_margin() -> Decimal {
    Decimal::new(2, 2)
}

fn thousand() -> Decimal {
    Decimal::from(1000)
}

/// Nivel de servicio del envío
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceTier {
    Standard,
    Express,
}

impl ServiceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceTier::Standard => "STANDARD",
            ServiceTier::Express => "EXPRESS",
        }
    }
}

/// Clase de cliente para el spread de margen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CustomerClass {
    Retail,
    Corporate,
}

/// Request ya validado que entra al motor (transitorio, no se persiste)
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub fleet_id: Uuid,
    pub weight_kg: Decimal,
    pub volume_cbm: Decimal,
    pub service: ServiceTier,
    pub customer_class: CustomerClass,
}

/// Breakdown itemizado devuelto al caller (transitorio).
/// Los componentes se redondean cada uno por separado con el margen base
/// solamente; el gran total sí lleva express/corporate. Por eso el breakdown
/// no siempre suma exacto al total: aproximación de display conocida, no
/// un bug de reconciliación.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteBreakdown {
    pub base_price: i64,
    pub weight_surcharge: i64,
    pub volume_surcharge: i64,
    /// HPP: costo total antes del margen
    pub total_cost_basis: Decimal,
    pub final_selling_price: i64,
    pub distance_km: Decimal,
    pub duration_minutes: i32,
    pub cache_hit: bool,
}

/// Costo base con piso: ninguna lane puede quedar por debajo del lumpsum
/// mínimo de la regla, por corta que sea la distancia calculada
pub fn base_cost(distance_km: Decimal, rule: &PricingRule) -> Decimal {
    let raw = distance_km * rule.base_rate_per_km + rule.base_fare;
    raw.max(rule.min_price_lumpsum)
}

/// Surcharge por exceso en una dimensión: solo sobre lo que pasa del límite
/// estándar, cero en o por debajo del límite (sin prorrateo)
pub fn overage_surcharge(declared: Decimal, limit: Decimal, rate: Decimal) -> Decimal {
    if declared > limit {
        (declared - limit) * rate
    } else {
        Decimal::ZERO
    }
}

/// Inversión de margen: selling = costo / (1 - margen)
pub fn invert_margin(cost: Decimal, margin: Decimal) -> Decimal {
    cost / (Decimal::ONE - margin)
}

/// Multiplicador express sobre el precio YA con margen; STANDARD es no-op
pub fn apply_service_tier(selling: Decimal, tier: ServiceTier, multiplier: Decimal) -> Decimal {
    match tier {
        ServiceTier::Express => selling * multiplier,
        ServiceTier::Standard => selling,
    }
}

/// Spread corporate del 2%, aplicado después del express
pub fn apply_customer_class(selling: Decimal, class: CustomerClass) -> Decimal {
    match class {
        CustomerClass::Corporate => invert_margin(selling, corporate_margin()),
        CustomerClass::Retail => selling,
    }
}

/// Redondeo al múltiplo de 1000 inmediato superior (precio de cara al cliente)
pub fn ceil_to_thousands(value: Decimal) -> Decimal {
    (value / thousand()).ceil() * thousand()
}

/// Convertir un monto ya redondeado a unidades enteras de moneda
pub fn to_currency_units(value: Decimal) -> AppResult<i64> {
    value
        .to_i64()
        .ok_or_else(|| AppError::Internal("price overflows currency units".to_string()))
}

/// Duración legible para el cliente
pub fn duration_text(duration_minutes: i32) -> String {
    format!("{} jam {} menit", duration_minutes / 60, duration_minutes % 60)
}

/// Calcular el breakdown completo de un quote a partir de la ruta resuelta
/// y el master data de la categoría
pub fn compute_breakdown(
    fleet: &Fleet,
    rule: &PricingRule,
    route: &RouteQuote,
    request: &QuoteRequest,
) -> AppResult<QuoteBreakdown> {
    if request.weight_kg < Decimal::ZERO || request.volume_cbm < Decimal::ZERO {
        return Err(AppError::InvalidInput(
            "weight and volume must not be negative".to_string(),
        ));
    }

    let final_base_price = base_cost(route.distance_km, rule);

    let surcharge_weight = overage_surcharge(
        request.weight_kg,
        fleet.max_weight_kg_limit,
        fleet.surcharge_weight_price,
    );
    let surcharge_volume = overage_surcharge(
        request.volume_cbm,
        fleet.max_volume_cbm_limit,
        fleet.surcharge_volume_price,
    );

    // HPP antes del margen: base + surcharges
    let total_hpp = final_base_price + surcharge_weight + surcharge_volume;

    // Margen -> express -> corporate, en ese orden
    let selling = invert_margin(total_hpp, base_margin());
    let selling = apply_service_tier(selling, request.service, rule.sla_express_multiplier);
    let selling = apply_customer_class(selling, request.customer_class);

    Ok(QuoteBreakdown {
        base_price: to_currency_units(ceil_to_thousands(invert_margin(
            final_base_price,
            base_margin(),
        )))?,
        weight_surcharge: to_currency_units(ceil_to_thousands(invert_margin(
            surcharge_weight,
            base_margin(),
        )))?,
        volume_surcharge: to_currency_units(ceil_to_thousands(invert_margin(
            surcharge_volume,
            base_margin(),
        )))?,
        total_cost_basis: total_hpp,
        final_selling_price: to_currency_units(ceil_to_thousands(selling))?,
        distance_km: route.distance_km,
        duration_minutes: route.duration_minutes,
        cache_hit: route.is_cached(),
    })
}

/// Precio calculado para una orden (path simplificado, sin surcharges)
#[derive(Debug, Clone)]
pub struct OrderPrice {
    /// Precio de venta final, ya redondeado a miles
    pub selling_price: Decimal,
    /// HPP del envío
    pub cost_basis: Decimal,
}

/// Path de pricing de la creación de órdenes: mismo base/piso/margen/express/
/// corporate que el quote pero sin surcharges de carga (no se capturan en
/// este flujo).
pub fn shipping_price(
    distance_km: Decimal,
    rule: &PricingRule,
    tier: ServiceTier,
    corporate: bool,
) -> OrderPrice {
    let hpp = base_cost(distance_km, rule);

    let selling = invert_margin(hpp, base_margin());
    let selling = apply_service_tier(selling, tier, rule.sla_express_multiplier);
    let selling = if corporate {
        apply_customer_class(selling, CustomerClass::Corporate)
    } else {
        selling
    };

    OrderPrice {
        selling_price: ceil_to_thousands(selling),
        cost_basis: hpp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cached_route::RouteSource;
    use chrono::Utc;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn test_rule() -> PricingRule {
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

    fn test_fleet() -> Fleet {
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

    fn test_route(distance: &str) -> RouteQuote {
        RouteQuote {
            distance_km: dec(distance),
            duration_minutes: 90,
            toll_fee: Decimal::ZERO,
            source: RouteSource::Live,
        }
    }

    fn test_request(weight: &str, volume: &str, tier: ServiceTier, class: CustomerClass) -> QuoteRequest {
        QuoteRequest {
            origin: Coordinate::new(dec("-6.1754"), dec("106.8272")),
            destination: Coordinate::new(dec("-6.9147"), dec("107.6098")),
            fleet_id: Uuid::new_v4(),
            weight_kg: dec(weight),
            volume_cbm: dec(volume),
            service: tier,
            customer_class: class,
        }
    }

    #[test]
    fn test_base_cost_respects_lumpsum_floor() {
        let rule = test_rule();
        // 50 km * 10000 = 500000 > lumpsum 300000
        assert_eq!(base_cost(dec("50"), &rule), dec("500000"));
        // 20 km * 10000 = 200000 < lumpsum 300000 -> aplica el piso
        assert_eq!(base_cost(dec("20"), &rule), dec("300000"));
    }

    #[test]
    fn test_no_surcharge_at_or_below_limit() {
        assert_eq!(overage_surcharge(dec("1000"), dec("1000"), dec("500")), Decimal::ZERO);
        assert_eq!(overage_surcharge(dec("800"), dec("1000"), dec("500")), Decimal::ZERO);
    }

    #[test]
    fn test_weight_surcharge_scenario() {
        // límite 1000 kg, tarifa 500/kg, declarado 1200 kg => 200 * 500
        assert_eq!(overage_surcharge(dec("1200"), dec("1000"), dec("500")), dec("100000"));
    }

    #[test]
    fn test_margin_inversion_is_division_not_markup() {
        // selling = C / 0.8, exacto
        assert_eq!(invert_margin(dec("100000"), base_margin()), dec("125000"));
        // markup 1.2 daría 120000 y dejaría corto el margen
        assert_ne!(invert_margin(dec("100000"), base_margin()), dec("120000"));
    }

    #[test]
    fn test_standard_tier_is_noop() {
        let selling = dec("125000");
        assert_eq!(
            apply_service_tier(selling, ServiceTier::Standard, dec("1.5")),
            selling
        );
    }

    #[test]
    fn test_ceil_to_thousands() {
        assert_eq!(ceil_to_thousands(dec("1")), dec("1000"));
        assert_eq!(ceil_to_thousands(dec("1000")), dec("1000"));
        assert_eq!(ceil_to_thousands(dec("1001")), dec("2000"));
    }

    #[test]
    fn test_golden_margin_express_corporate_ordering() {
        // HPP 100000 -> /0.8 = 125000 -> x1.5 = 187500 -> /0.98 = 191326.53...
        let selling = invert_margin(dec("100000"), base_margin());
        let selling = apply_service_tier(selling, ServiceTier::Express, dec("1.5"));
        let selling = apply_customer_class(selling, CustomerClass::Corporate);

        assert_eq!(selling.round_dp(2), dec("191326.53"));
        assert_eq!(ceil_to_thousands(selling), dec("192000"));
    }

    #[test]
    fn test_breakdown_retail_standard() {
        let fleet = test_fleet();
        let rule = test_rule();
        let route = test_route("50");
        let request = test_request("1200", "4", ServiceTier::Standard, CustomerClass::Retail);

        let breakdown = compute_breakdown(&fleet, &rule, &route, &request).unwrap();

        // base 500000, surcharge peso 100000, volumen dentro del límite
        assert_eq!(breakdown.total_cost_basis, dec("600000"));
        assert_eq!(breakdown.base_price, 625_000);
        assert_eq!(breakdown.weight_surcharge, 125_000);
        assert_eq!(breakdown.volume_surcharge, 0);
        // 600000 / 0.8 = 750000, ya múltiplo de 1000
        assert_eq!(breakdown.final_selling_price, 750_000);
        assert!(!breakdown.cache_hit);
    }

    #[test]
    fn test_breakdown_components_ignore_express_and_corporate() {
        let fleet = test_fleet();
        let rule = test_rule();
        let route = test_route("50");
        let request = test_request("0", "0", ServiceTier::Express, CustomerClass::Corporate);

        let breakdown = compute_breakdown(&fleet, &rule, &route, &request).unwrap();

        // El componente base solo lleva el margen base...
        assert_eq!(breakdown.base_price, 625_000);
        // ...mientras el total lleva express y corporate:
        // 500000/0.8 = 625000 -> x1.5 = 937500 -> /0.98 = 956632.65 -> 957000
        assert_eq!(breakdown.final_selling_price, 957_000);
    }

    #[test]
    fn test_breakdown_rejects_negative_cargo() {
        let fleet = test_fleet();
        let rule = test_rule();
        let route = test_route("50");
        let mut request = test_request("10", "1", ServiceTier::Standard, CustomerClass::Retail);
        request.weight_kg = dec("-1");

        let result = compute_breakdown(&fleet, &rule, &route, &request);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_shipping_price_skips_surcharges() {
        let rule = test_rule();

        let price = shipping_price(dec("50"), &rule, ServiceTier::Standard, false);
        assert_eq!(price.cost_basis, dec("500000"));
        assert_eq!(price.selling_price, dec("625000"));

        // Corporate: 625000 / 0.98 = 637755.10 -> 638000
        let corporate = shipping_price(dec("50"), &rule, ServiceTier::Standard, true);
        assert_eq!(corporate.selling_price, dec("638000"));

        // Express corporate: 625000 * 1.5 = 937500 -> /0.98 -> 957000
        let both = shipping_price(dec("50"), &rule, ServiceTier::Express, true);
        assert_eq!(both.selling_price, dec("957000"));
    }

    #[test]
    fn test_duration_text() {
        assert_eq!(duration_text(90), "1 jam 30 menit");
        assert_eq!(duration_text(45), "0 jam 45 menit");
    }
}
