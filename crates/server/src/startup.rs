use std::sync::Arc;

use axum::Router;
use configs::{AppConfig, GeneratorKind};
use service::Store;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// One store per process, built with the configured generator.
pub fn build_store(cfg: &AppConfig) -> Arc<Store> {
    let store = match cfg.ids.generator {
        GeneratorKind::Random => Store::default(),
        GeneratorKind::Sequential => {
            warn!("sequential id generator enabled; secrets are guessable, do not use in production");
            Store::sequential()
        }
    };
    Arc::new(store)
}

pub fn build_app(cfg: &AppConfig) -> Router {
    let state = AppState::new(build_store(cfg));
    routes::build_router(state, build_cors())
}

/// Resolves once `signal` fires. If the listener could not be installed the
/// future never resolves, so the server keeps running instead of exiting.
pub async fn shutdown_on<F, E>(signal: F)
where
    F: std::future::Future<Output = Result<(), E>>,
    E: std::fmt::Display,
{
    match signal.await {
        Ok(()) => {
            info!(service = "server", event = "shutdown_signal", "received shutdown signal, shutting down");
        }
        Err(e) => {
            error!(service = "server", event = "signal_install_failed", error = %e, "cannot listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

/// Public entry: build the app and run the HTTP server until `shutdown` resolves.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg);
    let addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, generator = ?cfg.ids.generator, "complaint desk listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
