//! Release Relay Server
//!
//! Main entry point that wires all crates together and starts the server.

use std::future::IntoFuture;

use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt};

use relay_auth::PasswordHasher;
use relay_core::config::{AppConfig, LogFormat};
use relay_core::error::AppError;
use relay_database::{DocumentStore, SeedData};

#[tokio::main]
async fn main() {
    let env = std::env::var("RELAY_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting release relay v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Document store ───────────────────────────────────
    let store = DocumentStore::new();

    // ── Step 2: Seed fixture ─────────────────────────────────────
    if config.seed.enabled {
        let hasher = PasswordHasher::new();
        let summary = SeedData::from_path(&config.seed.path)?
            .apply(&store, |password| hasher.hash_password(password))?;
        tracing::info!(
            path = %config.seed.path,
            users = summary.users,
            recipients = summary.recipients,
            groups = summary.groups,
            applications = summary.applications,
            "Seed fixture loaded"
        );
    } else {
        tracing::info!("Seed fixture disabled");
    }

    // ── Step 3: Services and router ──────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = std::time::Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = relay_api::build_state(config, &store)?;
    let app = relay_api::build_app(state);

    // ── Step 4: Bind ─────────────────────────────────────────────
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::configuration(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("Release relay listening on {}", addr);

    // ── Step 5: Serve until shutdown ─────────────────────────────
    // Open event streams never end on their own, so the drain is bounded.
    let (drained_tx, drained_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = drained_tx.send(());
    })
    .into_future();

    tokio::select! {
        result = server => result?,
        _ = async {
            let _ = drained_rx.await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(grace_seconds = grace.as_secs(), "Shutdown grace period elapsed");
        }
    }

    tracing::info!("Release relay shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
