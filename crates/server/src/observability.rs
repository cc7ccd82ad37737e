use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, register_int_gauge, Encoder, IntCounterVec, IntGauge, TextEncoder};

// Prometheus metrics (default registry)
pub static OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "item_bench_operations_total",
        "Item operations handled, by operation and outcome",
        &["op", "outcome"]
    )
    .expect("register operations_total")
});

pub static ITEMS_STORED: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "item_bench_items",
        "Items currently held by the store"
    )
    .expect("register items")
});

pub const OUTCOME_OK: &str = "ok";
pub const OUTCOME_NOT_FOUND: &str = "not_found";
pub const OUTCOME_INVALID: &str = "invalid";

pub fn record(op: &str, outcome: &str) {
    OPERATIONS_TOTAL.with_label_values(&[op, outcome]).inc();
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_metrics_include_recorded_series() {
        record("detail", OUTCOME_NOT_FOUND);
        ITEMS_STORED.set(ITEMS_STORED.get());
        let (status, body) = encode_metrics();
        assert_eq!(status, axum::http::StatusCode::OK);
        assert!(body.contains("item_bench_operations_total"));
        assert!(body.contains(r#"op="detail""#));
        assert!(body.contains("item_bench_items"));
    }
}
