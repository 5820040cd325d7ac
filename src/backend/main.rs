/**
 * Taskboard Server Entry Point
 *
 * Loads `.env`, initializes tracing, resolves `AppConfig` and serves the
 * axum app until the process is stopped.
 */
use taskboard::backend::server::create_app;
use taskboard::shared::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = AppConfig::load()?;
    if config.uses_default_secret() {
        tracing::warn!("[Server] JWT_SECRET is not set; using the development default");
    }
    let port = config.port;

    let app = create_app(config).await;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("[Server] Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
