pub mod metrics;
pub mod prompt;
pub mod providers;
pub mod recipe;

pub use recipe::RecipeGenerator;
