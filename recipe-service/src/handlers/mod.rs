//! HTTP handlers for the recipe service.

pub mod app;
pub mod health;
pub mod metrics;
pub mod recipe;
