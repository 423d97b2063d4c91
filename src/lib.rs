//! # grubdash
//!
//! Order management for a food-delivery service: create, read, update,
//! delete and list orders over HTTP, each request checked by an ordered chain
//! of validation steps before it touches the store.
//!
//! The crate has two halves:
//!
//! - [`orders`]: the domain. [`OrderResource`](orders::OrderResource) owns an
//!   injected [`OrderStore`](orders::OrderStore) and
//!   [`IdSupplier`](orders::IdSupplier) and runs one validation chain per
//!   operation. Nothing in it knows about HTTP.
//! - A deliberately small HTTP layer: radix-tree routing via [`matchit`],
//!   hyper for the wire, graceful shutdown on SIGTERM / Ctrl-C. TLS, rate
//!   limiting and body-size limits belong to the reverse proxy in front.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use grubdash::Server;
//! use grubdash::orders::{self, MemoryStore, OrderResource, RandomIds};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), grubdash::Error> {
//!     let resource = OrderResource::new(MemoryStore::new(), RandomIds);
//!     let app = orders::router(resource);
//!
//!     Server::bind("0.0.0.0:5000".parse().unwrap()).await?.serve(app).await
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod config;
pub mod health;
pub mod middleware;
pub mod orders;

pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
