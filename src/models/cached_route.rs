//! Modelos de rutas y cache de distancias
//!
//! Una "lane" es un par origen-destino cuantizado a 4 decimales
//! (~11 m de resolución). La cuantización se aplica igual en lectura
//! y escritura, si no las claves del cache nunca coinciden.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Decimales de precisión para las claves del cache de distancias
pub const COORDINATE_PRECISION: u32 = 4;

/// Coordenada geográfica (lat, lng) en decimal fijo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: Decimal,
    pub lng: Decimal,
}

impl Coordinate {
    pub fn new(lat: Decimal, lng: Decimal) -> Self {
        Self { lat, lng }
    }

    /// Cuantizar a 4 decimales. Idempotente: quantize(quantize(c)) == quantize(c)
    pub fn quantized(&self) -> Self {
        Self {
            lat: self.lat.round_dp(COORDINATE_PRECISION),
            lng: self.lng.round_dp(COORDINATE_PRECISION),
        }
    }
}

/// Clave exacta de una lane en el cache (siempre cuantizada)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LaneKey {
    pub origin_lat: Decimal,
    pub origin_lng: Decimal,
    pub dest_lat: Decimal,
    pub dest_lng: Decimal,
}

impl LaneKey {
    /// Construir la clave cuantizando ambas coordenadas
    pub fn quantized(origin: &Coordinate, destination: &Coordinate) -> Self {
        let o = origin.quantized();
        let d = destination.quantized();
        Self {
            origin_lat: o.lat,
            origin_lng: o.lng,
            dest_lat: d.lat,
            dest_lng: d.lng,
        }
    }
}

/// Origen del dato de ruta: cache local o llamada en vivo al proveedor.
/// Solo metadata de observabilidad, nunca afecta el precio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RouteSource {
    Cache,
    Live,
}

/// Resultado de resolver la distancia de una lane
#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuote {
    pub distance_km: Decimal,
    pub duration_minutes: i32,
    pub toll_fee: Decimal,
    pub source: RouteSource,
}

impl RouteQuote {
    pub fn is_cached(&self) -> bool {
        self.source == RouteSource::Cache
    }
}

/// Fila persistida del cache de distancias - mapea a la tabla cached_routes.
/// Unique sobre la 4-tupla cuantizada; nunca se actualiza in place y no expira
/// (sin TTL por ahora, las lanes no cambian seguido).
#[derive(Debug, Clone, FromRow)]
pub struct CachedRoute {
    pub origin_lat: Decimal,
    pub origin_lng: Decimal,
    pub dest_lat: Decimal,
    pub dest_lng: Decimal,
    pub distance_km: Decimal,
    pub duration_minutes: i32,
    pub toll_fee: Decimal,
    pub created_at: DateTime<Utc>,
}

impl CachedRoute {
    /// Convertir la fila del cache en una RouteQuote con source = CACHE
    pub fn to_quote(&self) -> RouteQuote {
        RouteQuote {
            distance_km: self.distance_km,
            duration_minutes: self.duration_minutes,
            toll_fee: self.toll_fee,
            source: RouteSource::Cache,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_quantization_is_idempotent() {
        let c = Coordinate::new(
            Decimal::from_str("-6.17539199").unwrap(),
            Decimal::from_str("106.82717001").unwrap(),
        );
        let once = c.quantized();
        let twice = once.quantized();
        assert_eq!(once, twice);
        assert_eq!(once.lat, Decimal::from_str("-6.1754").unwrap());
        assert_eq!(once.lng, Decimal::from_str("106.8272").unwrap());
    }

    #[test]
    fn test_lane_key_quantizes_both_ends() {
        let origin = Coordinate::new(
            Decimal::from_str("-6.123456").unwrap(),
            Decimal::from_str("106.654321").unwrap(),
        );
        let dest = Coordinate::new(
            Decimal::from_str("-7.987654").unwrap(),
            Decimal::from_str("110.123456").unwrap(),
        );
        let key = LaneKey::quantized(&origin, &dest);
        assert_eq!(key.origin_lat, Decimal::from_str("-6.1235").unwrap());
        assert_eq!(key.dest_lng, Decimal::from_str("110.1235").unwrap());

        // La misma lane produce la misma clave aunque la entrada tenga más decimales
        let key2 = LaneKey::quantized(&origin.quantized(), &dest.quantized());
        assert_eq!(key, key2);
    }
}
