//! Surf Report server binary

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use surf_report::config::{Cli, Config};
use surf_report::{create_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "surf_report_server=debug,surf_report=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::load(&cli)?;

    tracing::info!("Starting Surf Report Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!(
        lat = %config.location.lat,
        lng = %config.location.lng,
        store = %config.store.file.display(),
        "Serving forecast for configured spot"
    );
    if config.stormglass.api_key.is_empty() {
        tracing::warn!("No Stormglass API key configured, refreshes will be rejected upstream");
    }

    let address = config.server.address.clone();
    let restore = config.store.restore;
    let state = AppState::from_config(config)?;
    state.reports.restore_on_start(restore).await?;

    // Build application
    let app = create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
