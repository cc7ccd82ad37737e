//! Lightweight admin HTTP server
//!
//! Exposes `/healthz` and `/metrics` endpoints, with metrics provided by caller.

use axum::http::StatusCode;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

pub type MetricsFn = fn() -> (StatusCode, String);

async fn healthz() -> &'static str { "OK" }

/// Router with the admin endpoints; `metrics_fn` renders the `/metrics` body.
pub fn admin_router(metrics_fn: MetricsFn) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(move || async move { metrics_fn() }))
}

/// Bind `addr` and serve the admin router on the current runtime.
/// Bind errors are returned; serve errors are logged by the spawned task.
pub async fn spawn_admin_server(addr: &str, metrics_fn: MetricsFn) -> anyhow::Result<JoinHandle<()>> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!(addr = %local, event = "admin_listen", "admin server listening");
    Ok(tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, admin_router(metrics_fn)).await {
            error!(error = %e, event = "admin_serve_failed", "admin server stopped");
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_metrics() -> (StatusCode, String) {
        (StatusCode::OK, "item_bench_items 10\n".to_string())
    }

    #[tokio::test]
    async fn serves_healthz_and_metrics() -> anyhow::Result<()> {
        // port 0: let the OS pick, then read it back from a probe bind
        let probe = TcpListener::bind("127.0.0.1:0").await?;
        let addr = probe.local_addr()?;
        drop(probe);

        let handle = spawn_admin_server(&addr.to_string(), fake_metrics).await?;
        let base = format!("http://{addr}");

        let res = reqwest::get(format!("{base}/healthz")).await?;
        assert_eq!(res.status(), reqwest::StatusCode::OK);
        assert_eq!(res.text().await?, "OK");

        let res = reqwest::get(format!("{base}/metrics")).await?;
        assert_eq!(res.status(), reqwest::StatusCode::OK);
        assert!(res.text().await?.contains("item_bench_items 10"));

        handle.abort();
        Ok(())
    }
}
