use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::order::Order;
use crate::services::pricing_engine::ServiceTier;

// Request para crear una orden
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub customer_id: Uuid,
    pub fleet_id: Uuid,

    #[validate(length(min = 1, max = 100))]
    pub origin_city: String,
    #[validate(length(min = 1))]
    pub origin_address: String,
    pub origin_lat: Option<Decimal>,
    pub origin_lng: Option<Decimal>,

    #[validate(length(min = 1, max = 100))]
    pub dest_city: String,
    #[validate(length(min = 1))]
    pub dest_address: String,
    pub dest_lat: Option<Decimal>,
    pub dest_lng: Option<Decimal>,

    // Distancia declarada por el cliente (ver nota en order_pricing_service)
    #[validate(range(min = 0.0))]
    pub total_distance_km: f64,

    pub service_type: Option<ServiceTier>,

    #[validate(length(min = 1))]
    pub item_description: String,
}

// Response de una orden priceada
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub fleet_id: Uuid,
    pub origin_city: String,
    pub dest_city: String,
    pub total_distance_km: Decimal,
    pub service_type: String,
    pub item_description: String,
    pub base_price: Decimal,
    pub final_total_price: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            customer_id: order.customer_id,
            fleet_id: order.fleet_id,
            origin_city: order.origin_city,
            dest_city: order.dest_city,
            total_distance_km: order.total_distance_km,
            service_type: order.service_type,
            item_description: order.item_description,
            base_price: order.base_price,
            final_total_price: order.final_total_price,
            status: order.status,
            created_at: order.created_at,
        }
    }
}

// Response del tracking público (sin datos sensibles)
#[derive(Debug, Serialize)]
pub struct TrackingResponse {
    pub order_id: Uuid,
    pub status: String,
    pub origin: String,
    pub dest: String,
}
