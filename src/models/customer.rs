//! Modelo de Customer (shipper)
//!
//! Perfil mínimo del customer: el motor de pricing solo necesita el
//! risk_status para decidir el margen corporativo en la creación de órdenes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado de riesgo del customer
pub const RISK_SAFE: &str = "SAFE";
pub const RISK_CAUTION: &str = "CAUTION";
pub const RISK_BLACKLIST: &str = "BLACKLIST";

/// Customer principal - mapea a la tabla customers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub full_name: String,
    pub phone_number: String,
    pub company_name: Option<String>,
    pub city: Option<String>,
    /// SAFE | CAUTION | BLACKLIST
    pub risk_status: String,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Los customers verificados (SAFE) se tratan como cuentas corporate
    /// para el margen adicional del 2%
    pub fn is_corporate_equivalent(&self) -> bool {
        self.risk_status == RISK_SAFE
    }
}
