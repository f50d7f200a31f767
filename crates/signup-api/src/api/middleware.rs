//! Request logging middleware.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{debug, warn};

/// Log method, path, status and latency of every request.
///
/// Client errors and server errors are logged at `warn`, the rest at `debug`.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    if status.is_client_error() || status.is_server_error() {
        warn!(%method, %path, status = status.as_u16(), elapsed_ms, "Signup API request rejected");
    } else {
        debug!(%method, %path, status = status.as_u16(), elapsed_ms, "Signup API request handled");
    }

    response
}
