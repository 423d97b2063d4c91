//! Unified infrastructure error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::orders::OrderError;

/// The error type returned by the service's fallible startup and serving paths.
///
/// Request-level failures (404, 400, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values built from
/// [`OrderError`](crate::orders::OrderError), not as `Error`s. This type
/// surfaces infrastructure failures: binding a port, accepting a connection,
/// loading the seed data.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("seed file {}: {source}", path.display())]
    SeedIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("seed file {}: {source}", path.display())]
    Seed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("seed data contains order id `{0}` more than once")]
    DuplicateId(String),

    #[error("seed order `{id}` is invalid: {reason}")]
    InvalidSeed {
        id: String,
        #[source]
        reason: OrderError,
    },
}
