//! Equipment Inventory Service
//!
//! A Rust REST API server exposing an equipment stock table held in
//! DynamoDB: CRUD on equipment records plus reservation bookkeeping
//! (quantity holds and releases) for workspace bookings.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
