//! HTTP server initialization and runtime setup.
//!
//! Handles storage setup, service wiring, and the Axum server lifecycle
//! including graceful shutdown.

use crate::application::services::ShortenerService;
use crate::config::Config;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::SqliteLinkRepository;
use crate::infrastructure::storage::SqliteStorage;
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool
/// - Apply migrations
/// - Shortener service
/// - Axum HTTP server
///
/// On SIGINT/SIGTERM the server stops accepting connections and waits up to
/// `shutdown_timeout` seconds for in-flight requests. The storage handle is
/// closed exactly once afterwards, whether or not draining finished.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let storage = Arc::new(
        SqliteStorage::connect(&config.database_url, &config.storage_options())
            .await
            .context("Failed to open database")?,
    );
    tracing::info!("Connected to database");

    let link_repository = Arc::new(SqliteLinkRepository::new(storage.clone()));
    let shortener = Arc::new(
        ShortenerService::new(
            link_repository.clone(),
            RandomCodeGenerator,
            config.code_length,
        )
        .with_retry_policy(config.retry_policy()),
    );

    let state = AppState::new(shortener, storage);
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    let shutdown = Arc::new(Notify::new());
    let server = axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
    .into_future();

    let drain_deadline = Duration::from_secs(config.shutdown_timeout);
    let served = tokio::select! {
        result = server => result.context("Server error"),
        () = drain_timeout(shutdown, drain_deadline) => {
            tracing::warn!(
                "In-flight requests did not finish within {}s, forcing shutdown",
                drain_deadline.as_secs()
            );
            Ok(())
        }
    };

    link_repository
        .close()
        .await
        .context("Failed to close storage")?;
    tracing::info!("Server exiting");

    served
}

/// Resolves once SIGINT or SIGTERM is received, then wakes the drain timer.
async fn shutdown_signal(shutdown: Arc<Notify>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutting down server...");
    shutdown.notify_one();
}

/// Completes `deadline` after shutdown has been requested.
async fn drain_timeout(shutdown: Arc<Notify>, deadline: Duration) {
    shutdown.notified().await;
    tokio::time::sleep(deadline).await;
}
