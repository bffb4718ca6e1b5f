use recipe_service::config::RecipeConfig;
use recipe_service::services::metrics::init_metrics;
use recipe_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = RecipeConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing("recipe-service", "info", config.otlp_endpoint.as_deref());
    init_metrics();

    tracing::info!(
        provider = ?config.provider,
        model = %config.models.text_model,
        address = %config.common.address(),
        "Starting recipe-service"
    );

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    app.run_until_stopped().await?;

    Ok(())
}
