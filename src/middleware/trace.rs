//! Per-request tracing: method, path, status, latency.

use std::future::Future;
use std::time::Instant;

use tracing::{Instrument, debug, info_span, warn};

use crate::response::Response;

/// Runs `fut` inside a `request` span and records how it finished.
///
/// 5xx responses are logged at `warn`, everything else at `debug` so that
/// a busy lookup endpoint stays quiet at the default `info` level.
pub async fn trace<F>(method: &str, path: &str, fut: F) -> Response
where
    F: Future<Output = Response>,
{
    let span = info_span!("request", %method, %path);
    let started = Instant::now();

    let response = fut.instrument(span.clone()).await;

    let status = response.status_code().as_u16();
    let latency_us = started.elapsed().as_micros() as u64;
    span.in_scope(|| {
        if status >= 500 {
            warn!(status, latency_us, "request failed");
        } else {
            debug!(status, latency_us, "request completed");
        }
    });
    response
}
