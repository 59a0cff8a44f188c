use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_gauge, Encoder, IntCounter, IntGauge, TextEncoder};

// Prometheus metrics (default registry)
pub static USERS_REGISTERED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "complaint_desk_users_registered_total",
        "Total users registered"
    )
    .expect("register users_registered_total")
});

pub static COMPLAINTS_SUBMITTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "complaint_desk_complaints_submitted_total",
        "Total complaints submitted"
    )
    .expect("register complaints_submitted_total")
});

pub static COMPLAINTS_RESOLVED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "complaint_desk_complaints_resolved_total",
        "Total resolve requests that succeeded, repeats included"
    )
    .expect("register complaints_resolved_total")
});

pub static NOT_FOUND_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "complaint_desk_not_found_total",
        "Total lookups for unknown secrets or complaint ids"
    )
    .expect("register not_found_total")
});

pub static OPEN_COMPLAINTS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "complaint_desk_open_complaints",
        "Complaints not yet resolved, sampled at scrape time"
    )
    .expect("register open_complaints")
});

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

/// Touch every metric so it shows up in the first scrape, even at zero.
pub fn register_all() {
    Lazy::force(&USERS_REGISTERED_TOTAL);
    Lazy::force(&COMPLAINTS_SUBMITTED_TOTAL);
    Lazy::force(&COMPLAINTS_RESOLVED_TOTAL);
    Lazy::force(&NOT_FOUND_TOTAL);
    Lazy::force(&OPEN_COMPLAINTS);
}
