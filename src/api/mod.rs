//! API handlers for the equipment REST endpoints

pub mod equipment;
pub mod health;
pub mod openapi;
