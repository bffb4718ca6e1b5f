//! Request and response payloads for the recipe API.

pub mod recipe;

pub use recipe::{RecipeRequest, RecipeResponse};
