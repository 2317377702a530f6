//! Modelo de Fleet (categoría de armada)
//!
//! Una categoría de flota es un perfil de pricing y capacidad compartido
//! por uno o más tipos físicos de vehículo: modo de routing, límites
//! estándar de peso/volumen y tarifas de surcharge por exceso.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Modo de viaje para el routing API (perfil truck vs car)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Truck,
    Car,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Truck => "truck",
            TravelMode::Car => "car",
        }
    }
}

impl TryFrom<&str> for TravelMode {
    type Error = AppError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "truck" => Ok(TravelMode::Truck),
            "car" => Ok(TravelMode::Car),
            other => Err(AppError::Internal(format!(
                "unknown travel mode '{}' in fleet master data",
                other
            ))),
        }
    }
}

/// Fleet principal - mapea exactamente a la tabla fleets
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Fleet {
    pub id: Uuid,
    pub name: String,
    /// Categoría de pricing (PICKUP, ENGKEL, FUSO, ...) - clave hacia pricing_rules
    pub fleet_type: String,
    /// Modo de routing: 'truck' o 'car'
    pub travel_mode: String,
    pub max_weight_kg_limit: Decimal,
    pub max_volume_cbm_limit: Decimal,
    /// Costo adicional por kg sobre el límite estándar
    pub surcharge_weight_price: Decimal,
    /// Costo adicional por m3 sobre el límite estándar
    pub surcharge_volume_price: Decimal,
    pub description: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl Fleet {
    pub fn travel_mode(&self) -> Result<TravelMode, AppError> {
        TravelMode::try_from(self.travel_mode.as_str())
    }
}
