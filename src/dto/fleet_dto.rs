use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::fleet::Fleet;

// Response del listado de flotas (master data pública)
#[derive(Debug, Serialize)]
pub struct FleetResponse {
    pub id: Uuid,
    pub name: String,
    pub fleet_type: String,
    pub travel_mode: String,
    pub max_weight_kg_limit: Decimal,
    pub max_volume_cbm_limit: Decimal,
    pub description: Option<String>,
}

impl From<Fleet> for FleetResponse {
    fn from(fleet: Fleet) -> Self {
        Self {
            id: fleet.id,
            name: fleet.name,
            fleet_type: fleet.fleet_type,
            travel_mode: fleet.travel_mode,
            max_weight_kg_limit: fleet.max_weight_kg_limit,
            max_volume_cbm_limit: fleet.max_volume_cbm_limit,
            description: fleet.description,
        }
    }
}
