use anyhow::Context;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use activities::config::AppConfig;
use activities::services::activity_directory::ActivityDirectory;
use activities::web::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load .env
    dotenv().ok();

    // 2. Start logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 3. Config and seeded directory
    let config = AppConfig::from_env();
    let directory = ActivityDirectory::seeded();
    info!(
        activities = directory.list_activities().len(),
        "activity directory seeded"
    );

    // 4. Build the app and bind (with fallback port)
    let app = web::app(AppState::new(directory), &config.static_dir);
    let listener = bind(&config).await?;

    let bound_addr = listener.local_addr()?;
    info!(addr = %bound_addr, "server listening");
    info!("open http://{}/ to browse activities", bound_addr);

    // 5. Serve
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

// Falls back to the next port once when the configured one is taken.
async fn bind(config: &AppConfig) -> anyhow::Result<TcpListener> {
    match TcpListener::bind((config.host.as_str(), config.port)).await {
        Ok(listener) => Ok(listener),
        Err(e) => {
            let fallback = config
                .port
                .checked_add(1)
                .with_context(|| format!("cannot bind {}:{}: {}", config.host, config.port, e))?;
            warn!(
                host = %config.host,
                port = config.port,
                error = %e,
                fallback,
                "bind failed, trying fallback port"
            );
            TcpListener::bind((config.host.as_str(), fallback))
                .await
                .with_context(|| format!("cannot bind fallback {}:{}", config.host, fallback))
        }
    }
}
