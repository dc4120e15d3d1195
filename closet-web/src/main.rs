//! closet-web - Virtual closet web service
//!
//! Browse and filter the clothing inventory, match it against live weather
//! for a city, build outfits, and append new items.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use closet_common::config::{self, TomlConfig, DEFAULT_HOST, DEFAULT_PORT};
use closet_common::InventoryStore;
use closet_web::api::BuildInfo;
use closet_web::weather::WeatherClient;
use closet_web::{build_router, AppState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for closet-web
#[derive(Parser, Debug)]
#[command(name = "closet-web")]
#[command(about = "Virtual closet web service")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(long, env = "CLOSET_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "CLOSET_PORT")]
    port: Option<u16>,

    /// Folder holding the inventory file
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Inventory CSV file (relative paths resolve against the root folder)
    #[arg(short, long, env = "CLOSET_INVENTORY")]
    inventory: Option<PathBuf>,

    /// OpenWeatherMap API key
    #[arg(long, env = "CLOSET_WEATHER_API_KEY", hide_env_values = true)]
    weather_api_key: Option<String>,

    /// Match weather filters by condition set instead of raw substring
    #[arg(long)]
    strict_weather: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let (mut toml, config_source) = TomlConfig::load().context("Failed to load config file")?;

    // Initialize tracing: RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("closet_web={0},closet_common={0},tower_http={0}", toml.logging.level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting closet-web {}", BuildInfo::CURRENT);

    config_source.log();

    let root_folder = config::resolve_root_folder(args.root_folder.as_deref(), &toml);
    let inventory_path = config::resolve_inventory_path(args.inventory.as_deref(), &toml, &root_folder);
    info!("Inventory file: {}", inventory_path.display());

    let store = InventoryStore::load(&inventory_path)
        .with_context(|| format!("Failed to load inventory from {}", inventory_path.display()))?;
    info!("✓ Loaded {} items", store.len());

    if args.weather_api_key.is_some() {
        toml.weather.api_key = args.weather_api_key.clone();
    }
    let weather = WeatherClient::new(&toml.weather).context("Failed to create weather client")?;
    if !weather.has_api_key() {
        warn!("No weather API key configured; the weather view will be unavailable");
    }

    let weather_match = if args.strict_weather {
        closet_common::WeatherMatch::Strict
    } else {
        toml.matching.weather_match()
    };
    info!("Weather matching: {:?}", weather_match);

    let state = AppState::new(store, weather, weather_match);
    let app = build_router(state);

    let host = args
        .host
        .or(toml.host.clone())
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = args.port.or(toml.port).unwrap_or(DEFAULT_PORT);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", host, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("closet-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
