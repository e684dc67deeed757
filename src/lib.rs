pub mod config;
pub mod models;
pub mod services;
pub mod socket;
pub mod telemetry;
pub mod utils;
pub mod views;
