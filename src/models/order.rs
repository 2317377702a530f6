//! Modelo de Order (transacción logística)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estados del ciclo de vida de una orden, persistidos como texto
pub mod status {
    pub const PENDING: &str = "PENDING";
    pub const SEARCHING_DRIVER: &str = "SEARCHING_DRIVER";
    pub const DRIVER_ASSIGNED: &str = "DRIVER_ASSIGNED";
    pub const IN_TRANSIT: &str = "IN_TRANSIT";
    pub const DELIVERED: &str = "DELIVERED";
    pub const COMPLETED: &str = "COMPLETED";
    pub const CANCELLED: &str = "CANCELLED";
}

/// Order principal - mapea exactamente a la tabla orders
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub fleet_id: Uuid,

    pub origin_city: String,
    pub origin_address: String,
    pub origin_lat: Option<Decimal>,
    pub origin_lng: Option<Decimal>,

    pub dest_city: String,
    pub dest_address: String,
    pub dest_lat: Option<Decimal>,
    pub dest_lng: Option<Decimal>,

    pub total_distance_km: Decimal,
    /// STANDARD | EXPRESS
    pub service_type: String,
    pub item_description: String,

    pub base_price: Decimal,
    pub final_total_price: Decimal,

    pub status: String,
    pub created_at: DateTime<Utc>,
}
