use recipe_service::config::RecipeConfig;
use recipe_service::services::metrics::init_metrics;
use recipe_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let otlp_endpoint = std::env::var("OTLP_ENDPOINT").ok();
    init_tracing("recipe-service", "info", otlp_endpoint.as_deref());

    init_metrics();

    // Fail fast: missing datastore credentials stop startup here
    let config = RecipeConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    tracing::info!(
        service = "recipe-service",
        version = env!("CARGO_PKG_VERSION"),
        openai_model = %config.models.openai_model,
        gemini_model = %config.models.gemini_model,
        "Starting recipe service"
    );

    let application = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    application
        .run_until_stopped()
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))
}
