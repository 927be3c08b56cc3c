// fleetdeck-api: Async Rust client for the Fleetdeck tracking service REST API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod aggregators;
mod devices;
mod warehouses;

pub use client::ApiClient;
pub use error::Error;
