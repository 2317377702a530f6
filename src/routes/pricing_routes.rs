use axum::{extract::State, routing::post, Json, Router};

use crate::controllers::pricing_controller::PricingController;
use crate::dto::pricing_dto::{SimulatePriceRequest, SimulatePriceResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_pricing_router() -> Router<AppState> {
    Router::new().route("/simulate", post(simulate_price))
}

async fn simulate_price(
    State(state): State<AppState>,
    Json(request): Json<SimulatePriceRequest>,
) -> Result<Json<SimulatePriceResponse>, AppError> {
    let controller = PricingController::new(state.pool.clone(), state.route_provider.clone());
    let response = controller.simulate(request).await?;
    Ok(Json(response))
}
