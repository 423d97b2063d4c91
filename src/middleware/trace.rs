//! Per-request tracing span with method, path, status and latency.

use std::future::Future;
use std::time::Instant;

use tracing::{Instrument, info, info_span};

use crate::response::Response;

/// Runs `fut` inside a `request` span and logs its outcome on completion.
pub(crate) async fn traced<F>(method: &str, path: &str, fut: F) -> Response
where
    F: Future<Output = Response>,
{
    let span = info_span!("request", %method, %path);
    let started = Instant::now();

    async move {
        let response = fut.await;
        info!(
            status = response.status.as_u16(),
            latency_us = started.elapsed().as_micros() as u64,
            "request finished",
        );
        response
    }
    .instrument(span)
    .await
}
