use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::fleet_controller::FleetController;
use crate::dto::fleet_dto::FleetResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_fleet_router() -> Router<AppState> {
    Router::new().route("/", get(list_fleets))
}

async fn list_fleets(
    State(state): State<AppState>,
) -> Result<Json<Vec<FleetResponse>>, AppError> {
    let controller = FleetController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}
