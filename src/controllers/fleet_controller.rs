//! Controller del master data de flotas

use sqlx::PgPool;

use crate::dto::fleet_dto::FleetResponse;
use crate::repositories::fleet_repository::FleetRepository;
use crate::utils::errors::AppResult;

pub struct FleetController {
    repository: FleetRepository,
}

impl FleetController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: FleetRepository::new(pool),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<FleetResponse>> {
        let fleets = self.repository.list_ordered().await?;
        Ok(fleets.into_iter().map(FleetResponse::from).collect())
    }
}
