//! Built-in Kubernetes health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the pod serve traffic? Failure → pulled from load-balancer. |
//!
//! Both are generic over the router state so they can sit next to stateful
//! routes:
//!
//! ```rust,no_run
//! use grubdash::{Method, Router, health};
//!
//! let app = Router::new()
//!     .on(Method::Get, "/healthz", health::liveness::<()>)
//!     .on(Method::Get, "/readyz", health::readiness::<()>);
//! ```

use std::sync::Arc;

use crate::{Request, Response};

/// Liveness probe. Always `200 OK` with body `"ok"`.
pub async fn liveness<S>(_req: Request, _state: Arc<S>) -> Response {
    Response::text("ok")
}

/// Readiness probe. The order store is in memory and available as soon as the
/// router exists, so this answers `200 OK` with body `"ready"`.
pub async fn readiness<S>(_req: Request, _state: Arc<S>) -> Response {
    Response::text("ready")
}
