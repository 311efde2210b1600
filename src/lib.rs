pub mod config;
pub mod handlers;
pub mod hub;
pub mod models;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod utils;
