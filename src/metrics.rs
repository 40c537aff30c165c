/// Metrics and telemetry for the Marquee admin core
///
/// Prometheus-compatible counters for moderation activity. Dashboards live
/// elsewhere; this module only exports the counters and the text endpoint.
use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

lazy_static! {
    /// Lifecycle transitions by kind and outcome
    pub static ref TRANSITIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "moderation_transitions_total",
        "Total number of lifecycle transitions",
        &["action", "outcome"]
    )
    .unwrap();

    /// Bulk operation per-id outcomes by kind
    pub static ref BULK_OUTCOMES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "moderation_bulk_outcomes_total",
        "Per-id outcomes of bulk operations",
        &["action", "outcome"]
    )
    .unwrap();

    /// Listing queries served
    pub static ref LISTING_QUERIES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "admin_listing_queries_total",
        "Account listing queries",
        &["outcome"]
    )
    .unwrap();
}

/// Render all registered metrics in Prometheus text format
pub fn render() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
