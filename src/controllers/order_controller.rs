//! Controller de órdenes
//!
//! Creación de órdenes (aplicando el costo calculado), listado por customer
//! y tracking público por prefijo del ID.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::order_dto::{CreateOrderRequest, OrderResponse, TrackingResponse};
use crate::dto::ApiResponse;
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::order_repository::{NewOrder, OrderRepository};
use crate::services::order_pricing_service::OrderPricingService;
use crate::services::pricing_engine::ServiceTier;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::{non_negative_decimal, tracking_id_prefix};

pub struct OrderController {
    customers: CustomerRepository,
    orders: OrderRepository,
    pricing: OrderPricingService,
}

impl OrderController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            customers: CustomerRepository::new(pool.clone()),
            orders: OrderRepository::new(pool.clone()),
            pricing: OrderPricingService::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateOrderRequest,
    ) -> AppResult<ApiResponse<OrderResponse>> {
        request.validate()?;

        let customer = self
            .customers
            .find_by_id(request.customer_id)
            .await?
            .ok_or_else(|| not_found_error("Customer", &request.customer_id.to_string()))?;

        let distance_km = non_negative_decimal(request.total_distance_km, "total_distance_km")?;
        let tier = request.service_type.unwrap_or(ServiceTier::Standard);

        let price = self
            .pricing
            .price_order(
                request.fleet_id,
                distance_km,
                tier,
                customer.is_corporate_equivalent(),
            )
            .await?;

        let order = self
            .orders
            .create(NewOrder {
                customer_id: customer.id,
                fleet_id: request.fleet_id,
                origin_city: request.origin_city,
                origin_address: request.origin_address,
                origin_lat: request.origin_lat,
                origin_lng: request.origin_lng,
                dest_city: request.dest_city,
                dest_address: request.dest_address,
                dest_lat: request.dest_lat,
                dest_lng: request.dest_lng,
                total_distance_km: distance_km,
                service_type: tier.as_str().to_string(),
                item_description: request.item_description,
                base_price: price.selling_price,
                final_total_price: price.selling_price,
            })
            .await?;

        log::info!("📦 Order created: {} ({})", order.id, order.status);

        Ok(ApiResponse::success_with_message(
            order.into(),
            "Orden creada exitosamente".to_string(),
        ))
    }

    pub async fn list_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<OrderResponse>> {
        let orders = self.orders.find_by_customer(customer_id).await?;
        Ok(orders.into_iter().map(OrderResponse::from).collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<OrderResponse> {
        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Order", &id.to_string()))?;

        Ok(order.into())
    }

    pub async fn track(&self, short_id: &str) -> AppResult<TrackingResponse> {
        let prefix = tracking_id_prefix(short_id)?;

        let order = self
            .orders
            .find_by_short_id(&prefix)
            .await?
            .ok_or_else(|| AppError::NotFound("Resi tidak ditemukan".to_string()))?;

        Ok(TrackingResponse {
            order_id: order.id,
            status: order.status,
            origin: order.origin_city,
            dest: order.dest_city,
        })
    }
}
