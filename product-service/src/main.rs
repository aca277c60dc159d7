use product_service::config::ProductConfig;
use product_service::services::init_metrics;
use product_service::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Must precede tracing so OTLP_ENDPOINT can come from .env
    dotenvy::dotenv().ok();

    init_tracing(
        "product-service",
        "info",
        std::env::var("OTLP_ENDPOINT")
            .ok()
            .filter(|s| !s.is_empty())
            .as_deref(),
    );

    // Initialize metrics recorder (must be before any metrics are recorded)
    init_metrics();

    let config = ProductConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let application = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start product service: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    application.run_until_stopped().await
}
