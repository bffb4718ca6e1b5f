use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Client-facing message for failures whose cause must stay server-side.
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred while generating the recipe";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Content blocked: {0}")]
    ContentBlocked(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::ContentBlocked(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::GenerationFailed(_)
            | AppError::InternalError(_)
            | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Message safe to hand back to the client.
    pub fn client_message(&self) -> String {
        match self {
            AppError::ValidationError(errors) => first_validation_message(errors)
                .unwrap_or_else(|| "Invalid request".to_string()),
            AppError::BadRequest(msg)
            | AppError::PayloadTooLarge(msg)
            | AppError::ContentBlocked(msg)
            | AppError::GenerationFailed(msg)
            | AppError::ServiceUnavailable(msg) => msg.clone(),
            AppError::InternalError(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            AppError::ConfigError(_) => "Configuration error".to_string(),
        }
    }
}

fn first_validation_message(errors: &validator::ValidationErrors) -> Option<String> {
    errors
        .field_errors()
        .into_values()
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

/// Outcome tag carried by every JSON response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: ResponseStatus,
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::InternalError(err) => {
                tracing::error!(error = ?err, "Unhandled error while serving request");
            }
            AppError::ConfigError(err) => {
                tracing::error!(error = %err, "Configuration error surfaced to a request");
            }
            other => {
                tracing::debug!(status = status.as_u16(), error = %other, "Request failed");
            }
        }

        (
            status,
            Json(ErrorResponse {
                status: ResponseStatus::Error,
                error: self.client_message(),
            }),
        )
            .into_response()
    }
}
