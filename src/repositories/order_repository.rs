use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::order::{status, Order};
use crate::utils::errors::AppResult;

/// Datos ya validados y priceados para insertar una orden
pub struct NewOrder {
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
    pub service_type: String,
    pub item_description: String,
    pub base_price: Decimal,
    pub final_total_price: Decimal,
}

pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_order: NewOrder) -> AppResult<Order> {
        let id = Uuid::new_v4();

        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders
                (id, customer_id, fleet_id,
                 origin_city, origin_address, origin_lat, origin_lng,
                 dest_city, dest_address, dest_lat, dest_lng,
                 total_distance_km, service_type, item_description,
                 base_price, final_total_price, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                    $12, $13, $14, $15, $16, $17, NOW())
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(new_order.customer_id)
        .bind(new_order.fleet_id)
        .bind(new_order.origin_city)
        .bind(new_order.origin_address)
        .bind(new_order.origin_lat)
        .bind(new_order.origin_lng)
        .bind(new_order.dest_city)
        .bind(new_order.dest_address)
        .bind(new_order.dest_lat)
        .bind(new_order.dest_lng)
        .bind(new_order.total_distance_km)
        .bind(new_order.service_type)
        .bind(new_order.item_description)
        .bind(new_order.base_price)
        .bind(new_order.final_total_price)
        .bind(status::PENDING)
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    pub async fn find_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE customer_id = $1 ORDER BY created_at DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Tracking público por prefijo corto del UUID (ej. los 8 primeros chars).
    /// El caller valida que el prefijo sea solo hex y guiones, así el LIKE
    /// nunca recibe wildcards.
    pub async fn find_by_short_id(&self, short_id: &str) -> AppResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE id::text LIKE $1 || '%' LIMIT 1",
        )
        .bind(short_id.to_lowercase())
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }
}
