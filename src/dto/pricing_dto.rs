use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::services::pricing_engine::{CustomerClass, ServiceTier};

// Request del endpoint de simulación de precio
#[derive(Debug, Deserialize, Validate)]
pub struct SimulatePriceRequest {
    pub origin_lat: Decimal,
    pub origin_lng: Decimal,
    pub dest_lat: Decimal,
    pub dest_lng: Decimal,
    pub fleet_id: Uuid,

    #[validate(range(min = 0.0))]
    pub weight: Option<f64>,
    #[validate(range(min = 0.0))]
    pub volume: Option<f64>,

    pub service_type: Option<ServiceTier>,
    pub customer_class: Option<CustomerClass>,
}

// Detalle itemizado del quote
#[derive(Debug, Serialize)]
pub struct SimulatePriceDetails {
    pub base_price: i64,
    pub surcharge_weight: i64,
    pub surcharge_volume: i64,
    pub is_cached: bool,
    pub travel_mode: String,
}

// Response del endpoint de simulación
#[derive(Debug, Serialize)]
pub struct SimulatePriceResponse {
    pub estimated_price: i64,
    pub distance_km: Decimal,
    pub duration_minutes: i32,
    pub duration_text: String,
    pub details: SimulatePriceDetails,
}
