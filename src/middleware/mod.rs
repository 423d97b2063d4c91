//! Middleware layer.
//!
//! Cross-cutting request handling that sits between the router and the
//! terminal handler work:
//!
//! - [`Pipeline`]: ordered validation steps with fail-fast semantics. The
//!   order routes are built from these.
//! - `trace`: per-request span with method, path, status and latency, applied
//!   by the server to every request.

mod pipeline;
pub(crate) mod trace;

pub use pipeline::Pipeline;
