//! Modelo de PricingRule
//!
//! Una regla por categoría de flota (fleet_type es unique). Todos los
//! montos son Decimal, nunca float binario, para evitar drift de redondeo
//! en la matemática de dinero.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Regla maestra de pricing (HPP) - mapea a la tabla pricing_rules
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PricingRule {
    pub id: Uuid,
    /// Categoría de flota, unique (1:1 con la categoría)
    pub fleet_type: String,
    pub base_fare: Decimal,
    pub base_rate_per_km: Decimal,
    /// Distancia mínima facturable; informativa para master data
    pub min_distance_km: i32,
    pub min_price_lumpsum: Decimal,
    pub sla_express_multiplier: Decimal,
    pub loading_unloading_rate: Decimal,
    pub doc_return_fee: Decimal,
    pub created_at: DateTime<Utc>,
}
