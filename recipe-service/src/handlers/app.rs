use askama::Template;
use axum::{extract::State, response::IntoResponse};

use crate::startup::AppState;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub model: String,
}

/// Landing page with the ingredients form.
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    IndexTemplate {
        model: state.generator.provider().model().to_string(),
    }
}
