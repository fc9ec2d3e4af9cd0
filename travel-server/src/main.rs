use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use travel_server::catalog::{CatalogSource, JsonCatalog, SampleCatalog};
use travel_server::config::AppConfig;
use travel_server::web::{AppState, create_router};

const DEFAULT_LOG_FILTER: &str = "travel_server=info,tower_http=info";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    if let Err(e) = run(AppConfig::from_env()).await {
        error!(error = %e, "server exited with an error");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Seed data: a JSON file if configured, otherwise the built-in sample
    let catalog: Box<dyn CatalogSource> = match &config.catalog_path {
        Some(path) => {
            info!(path = %path.display(), "loading catalog");
            Box::new(JsonCatalog::load(path)?)
        }
        None => Box::new(SampleCatalog),
    };
    let state = AppState::new(catalog.as_ref(), &config)?;

    if let Some(home) = config.home {
        state.reported.report(home).await;
    }

    // Resolve permission in the background; listings stay "popular" until then
    let location = state.location.clone();
    tokio::spawn(async move {
        match location.request_permission().await {
            Ok(status) => info!(permission = ?status.permission(), "initial location resolved"),
            Err(e) => warn!(error = %e, "initial location request did not finish"),
        }
    });

    let app = create_router(state.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(
        addr = %config.bind_addr,
        itinerary = %config.itinerary,
        review_radius_km = config.review_radius_km,
        "travel server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let cancelled = state.location.cancel();
    info!(cancelled, "shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
