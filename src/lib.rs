//! Backend de logística: registro de clientes y flotas, ciclo de vida de
//! órdenes y motor de pricing con cache de distancias sobre TomTom.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
