use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tf2schema_core::ItemInstance;
use tf2schema_events::SchemaEvent;
use tf2schema_manager::{ManagerConfig, ReplaceOutcome, SchemaManager};
use tf2schema_steam::{SteamConfig, SteamSchemaSource};
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cache;

/// Defindex of the Mann Co. Supply Crate Key, logged once the schema is ready.
const KEY_DEFINDEX: u32 = 5021;
const UNIQUE_QUALITY: u32 = 6;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tf2schema_worker=debug,tf2schema_manager=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let manager_config = ManagerConfig::from_env().context("invalid manager configuration")?;
    let steam_config = SteamConfig::from_env();
    let cache_path = std::env::var("SCHEMA_CACHE_PATH").ok().map(PathBuf::from);
    tracing::info!(
        interval = ?manager_config.refresh_interval,
        language = %steam_config.language,
        cache = ?cache_path,
        "Loaded configuration"
    );

    // --- Manager ---
    let source = Arc::new(SteamSchemaSource::new(steam_config));
    let manager = SchemaManager::new(manager_config, source);

    if let Some(path) = &cache_path {
        match cache::load(path).await {
            Ok(Some(snapshot)) => match manager.set_schema(snapshot) {
                ReplaceOutcome::Accepted => tracing::info!("Seeded schema from cache file"),
                ReplaceOutcome::Rejected(reason) => {
                    tracing::warn!(?reason, "Ignoring cached schema")
                }
            },
            Ok(None) => tracing::info!("No cache file yet"),
            Err(e) => tracing::warn!(error = %e, "Failed to read cache file"),
        }
    }

    // Subscribe before initializing so the first update is persisted too.
    let persist_handle = cache_path.clone().map(|path| {
        tokio::spawn(persist_updates(path, manager.subscribe()))
    });

    manager
        .initialize()
        .await
        .context("initial schema load failed")?;

    let key = ItemInstance::new(KEY_DEFINDEX, UNIQUE_QUALITY);
    match manager.item_name(&key, false) {
        Some(name) => tracing::info!(defindex = KEY_DEFINDEX, %name, "Schema ready"),
        None => tracing::warn!(defindex = KEY_DEFINDEX, "Schema ready but key is missing"),
    }

    shutdown_signal().await;

    // --- Shutdown ---
    manager.shutdown();
    tracing::info!(state = ?manager.scheduler_state(), "Refresh timer stopped");

    // Dropping the last manager handle closes the event bus, which ends the
    // persistence task.
    drop(manager);
    if let Some(handle) = persist_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Write every new snapshot to `path`.
async fn persist_updates(path: PathBuf, mut rx: broadcast::Receiver<SchemaEvent>) {
    loop {
        match rx.recv().await {
            Ok(SchemaEvent::SchemaUpdated(schema)) => {
                match cache::save(&path, &schema).await {
                    Ok(()) => tracing::debug!(path = %path.display(), "Schema cache written"),
                    Err(e) => tracing::warn!(error = %e, "Failed to write schema cache"),
                }
            }
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Cache writer lagged behind schema events");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT (Ctrl-C), shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
