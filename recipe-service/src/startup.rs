//! Application startup and lifecycle management.

use crate::config::{CorsConfig, ProviderKind, RecipeConfig};
use crate::handlers::{
    app::index,
    health::{health_check, readiness_check},
    metrics::metrics,
    recipe::generate_recipe,
};
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::mock::MockTextProvider;
use crate::services::providers::{GenerationParams, TextProvider};
use crate::services::RecipeGenerator;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::{request_id_middleware, REQUEST_ID_HEADER},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Largest accepted request body. Enforced by the body extractor so an
/// oversized upload still gets the JSON error body.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared application state. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RecipeConfig>,
    pub generator: RecipeGenerator,
}

impl AppState {
    pub fn new(config: RecipeConfig, provider: Arc<dyn TextProvider>) -> Self {
        let params = GenerationParams {
            temperature: config.models.temperature,
            max_tokens: config.models.max_output_tokens,
        };

        Self {
            config: Arc::new(config),
            generator: RecipeGenerator::new(provider, params),
        }
    }
}

/// Construct the text provider selected by configuration.
pub fn build_provider(config: &RecipeConfig) -> Result<Arc<dyn TextProvider>, AppError> {
    match config.provider {
        ProviderKind::Gemini => {
            let provider = GeminiTextProvider::new(GeminiConfig {
                api_key: config.google.api_key.clone(),
                model: config.models.text_model.clone(),
                api_base: config.google.api_base.clone(),
                timeout: Duration::from_secs(config.models.request_timeout_secs),
            })
            .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?;

            tracing::info!(
                model = %config.models.text_model,
                "Initialized Gemini text provider"
            );
            Ok(Arc::new(provider))
        }
        ProviderKind::Mock => {
            tracing::warn!("Using mock text provider; recipes are canned responses");
            Ok(Arc::new(MockTextProvider::echo()))
        }
    }
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if config.allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

/// Build the HTTP router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate_recipe))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics))
        .route_layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: RecipeConfig) -> Result<Self, AppError> {
        let provider = build_provider(&config)?;
        Self::build_with_provider(config, provider).await
    }

    /// Build the application around an already constructed provider.
    pub async fn build_with_provider(
        config: RecipeConfig,
        provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        // Port 0 binds a random port, used by tests
        let address = config.common.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            e
        })?;
        let port = listener.local_addr()?.port();

        let router = build_router(AppState::new(config, provider));

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        tracing::info!("recipe-service listening on port {}", self.port);

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
