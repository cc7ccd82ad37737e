use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Json, Router,
};
use configs::HttpConfig;
use service::ItemRepository;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

pub mod items;

/// Shared handler state: the injected item store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ItemRepository>,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemRepository>) -> Self {
        Self { store }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: item CRUD, health and the middleware stack.
pub fn build_router(state: AppState, http: &HttpConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .route("/items", get(items::list_items).post(items::create_item))
        .route(
            "/items/:id",
            get(items::get_item).put(items::update_item).delete(items::delete_item),
        )
        .with_state(state)
        .layer(DefaultBodyLimit::max(http.body_limit_bytes))
        .layer(CatchPanicLayer::new());

    if http.compression {
        router = router.layer(CompressionLayer::new());
    }

    if http.request_logging {
        router = router.layer(
            TraceLayer::new_for_http()
                // one INFO span per request carrying method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        );
    }

    router
}
