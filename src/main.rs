use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use carefinder_core::config::{radius_from_env_value, registry_file_from_env_value};
use carefinder_core::constants::{DEFAULT_MAX_RADIUS_KM, DEFAULT_RADIUS_KM};
use carefinder_core::{CoreConfig, HospitalRegistry};
use carefinder_providers::config::{
    api_key_from_env_value, endpoints_from_env_value, timeout_from_env_value,
};
use carefinder_providers::ProviderConfig;

/// Main entry point for Carefinder
///
/// Starts the REST server (configurable via CAREFINDER_REST_ADDR, default 0.0.0.0:3000).
///
/// # Environment Variables
/// - `CAREFINDER_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `CAREFINDER_DEFAULT_RADIUS_KM`: radius used when a search omits one (default: 5)
/// - `CAREFINDER_MAX_RADIUS_KM`: largest radius a search may request (default: 50)
/// - `CAREFINDER_REGISTRY_FILE`: JSON file the hospital registry is loaded from and saved to
/// - `GOOGLE_PLACES_API_KEY`: enables Google Places ahead of OpenStreetMap
/// - `OVERPASS_ENDPOINTS`: comma-separated Overpass interpreter URLs
/// - `CAREFINDER_PROVIDER_TIMEOUT_SECS`: upstream request timeout (default: 10)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - any configuration value is invalid,
/// - the registry file exists but cannot be read,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("carefinder=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("CAREFINDER_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::new(
        radius_from_env_value(
            std::env::var("CAREFINDER_DEFAULT_RADIUS_KM").ok(),
            DEFAULT_RADIUS_KM,
        )?,
        radius_from_env_value(
            std::env::var("CAREFINDER_MAX_RADIUS_KM").ok(),
            DEFAULT_MAX_RADIUS_KM,
        )?,
        registry_file_from_env_value(std::env::var("CAREFINDER_REGISTRY_FILE").ok()),
    )?;

    let registry = match cfg.registry_file() {
        Some(path) => HospitalRegistry::load_from_path(path)?,
        None => {
            tracing::warn!(
                "CAREFINDER_REGISTRY_FILE not set, registrations are kept in memory only"
            );
            HospitalRegistry::new()
        }
    };

    let provider_cfg = ProviderConfig::new(
        endpoints_from_env_value(std::env::var("OVERPASS_ENDPOINTS").ok()),
        api_key_from_env_value(std::env::var("GOOGLE_PLACES_API_KEY").ok()),
        timeout_from_env_value(std::env::var("CAREFINDER_PROVIDER_TIMEOUT_SECS").ok())?,
    );
    let aggregator = provider_cfg.build_aggregator()?;

    let registered = registry.len();
    let state = AppState::new(cfg, registry, aggregator);
    tracing::info!(
        "++ Starting Carefinder REST on {} ({} registered hospitals)",
        rest_addr,
        registered
    );

    let app = api_rest::router(state);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("-- Carefinder stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

