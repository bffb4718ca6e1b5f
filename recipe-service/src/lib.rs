//! recipe-service: turns a list of ingredients into a recipe using a
//! text generation provider.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::{AppState, Application};
