//! Prometheus metrics for Push-Gateway.
//!
//! All metrics follow the naming convention: `pg_<area>_<metric>_<unit>`.
//! Counters are created lazily and work without registration; registration
//! only makes them visible to [`encode_metrics`].

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // PUSH RECEIVER METRICS
    // =========================================================================

    /// Push callbacks handled, by mode and outcome
    pub static ref PUSH_MESSAGES: CounterVec = CounterVec::new(
        Opts::new("pg_push_messages_total", "Push callbacks handled"),
        // mode: plain or secure
        // outcome: ok or an error kind (signature_mismatch, decode_error, padding_error,
        // frame_too_short, length_mismatch, serialization_error, handler_error)
        &["mode", "outcome"]
    ).expect("metric creation failed");

    /// Envelopes decrypted successfully
    pub static ref ENVELOPES_OPENED: Counter = Counter::new(
        "pg_push_envelopes_opened_total",
        "Encrypted envelopes decrypted and parsed"
    ).expect("metric creation failed");

    /// Envelopes produced for replies
    pub static ref ENVELOPES_SEALED: Counter = Counter::new(
        "pg_push_envelopes_sealed_total",
        "Reply envelopes encrypted and signed"
    ).expect("metric creation failed");

    /// Signature verification failures (for alerting)
    pub static ref SIGNATURE_FAILURES: Counter = Counter::new(
        "pg_signature_failures_total",
        "Total signature verification failures"
    ).expect("metric creation failed");

    /// Decrypt or frame failures, by error kind
    pub static ref DECRYPT_FAILURES: CounterVec = CounterVec::new(
        Opts::new("pg_decrypt_failures_total", "Envelope decrypt failures"),
        &["kind"]
    ).expect("metric creation failed");

    /// Business handler failures
    pub static ref HANDLER_FAILURES: Counter = Counter::new(
        "pg_handler_failures_total",
        "Errors reported by the business handler"
    ).expect("metric creation failed");

    // =========================================================================
    // PHONE DECRYPTION METRICS
    // =========================================================================

    /// Phone-number decryptions, by result
    pub static ref PHONE_DECRYPTIONS: CounterVec = CounterVec::new(
        Opts::new("pg_phone_decryptions_total", "Phone-number record decryptions"),
        // result: ok or a failure kind (invalid_request, session_error, decode_error,
        // padding_error, serialization_error)
        &["result"]
    ).expect("metric creation failed");
}

/// Handle proving metrics were registered.
pub struct MetricsHandle {
    _registered: usize,
}

/// Register all metrics with the global registry. Safe to call more than once.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Push receiver
        Box::new(PUSH_MESSAGES.clone()),
        Box::new(ENVELOPES_OPENED.clone()),
        Box::new(ENVELOPES_SEALED.clone()),
        Box::new(SIGNATURE_FAILURES.clone()),
        Box::new(DECRYPT_FAILURES.clone()),
        Box::new(HANDLER_FAILURES.clone()),
        // Phone decryption
        Box::new(PHONE_DECRYPTIONS.clone()),
    ];

    let count = metrics.len();
    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registered: count,
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
