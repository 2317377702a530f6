pub mod fleet_routes;
pub mod order_routes;
pub mod pricing_routes;
