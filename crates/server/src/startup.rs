use std::future::Future;

use axum::Router;
use common::admin_http::spawn_admin_server;
use configs::AppConfig;
use service::ItemStore;
use tokio::net::TcpListener;
use tracing::info;

use crate::errors::StartupError;
use crate::observability::{self, ITEMS_STORED};
use crate::routes::{self, AppState};

/// Seeded store wrapped in handler state, with the item gauge primed.
pub async fn seeded_state() -> AppState {
    let store = ItemStore::seeded();
    ITEMS_STORED.set(store.len().await as i64);
    AppState::new(store)
}

async fn bind(addr: String) -> Result<TcpListener, StartupError> {
    TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })
}

/// Serve `app` on `listener` until `shutdown` resolves; in-flight requests are drained.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Public entry: build the store and router, bind, and serve until `shutdown`.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = seeded_state().await;
    let app = routes::build_router(state, &cfg.http);

    let admin = if cfg.admin.enabled {
        Some(spawn_admin_server(&cfg.admin.bind_addr(), observability::encode_metrics).await?)
    } else {
        None
    };

    let listener = bind(cfg.server.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(
        %addr,
        event = "listen",
        compression = cfg.http.compression,
        body_limit = cfg.http.body_limit_bytes,
        "item server listening"
    );

    serve(listener, app, shutdown).await?;
    info!(%addr, event = "drained", "item server stopped accepting connections");

    if let Some(handle) = admin {
        handle.abort();
    }
    Ok(())
}
