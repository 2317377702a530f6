use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::controllers::order_controller::OrderController;
use crate::dto::order_dto::{CreateOrderRequest, OrderResponse, TrackingResponse};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_order_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_order))
        .route("/", get(list_orders))
        .route("/:id", get(get_order))
}

pub fn create_tracking_router() -> Router<AppState> {
    Router::new().route("/", get(track_order))
}

async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<ApiResponse<OrderResponse>>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct ListOrdersQuery {
    customer_id: Uuid,
}

async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.list_by_customer(query.customer_id).await?;
    Ok(Json(response))
}

async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct TrackQuery {
    id: String,
}

async fn track_order(
    State(state): State<AppState>,
    Query(query): Query<TrackQuery>,
) -> Result<Json<TrackingResponse>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.track(&query.id).await?;
    Ok(Json(response))
}
