//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::orders::{IdSupplier, RandomIds, SequentialIds};

/// Runtime configuration for the `grubdash` binary.
///
/// Every flag falls back to an environment variable, so the same image runs
/// unchanged under docker-compose or a Kubernetes manifest.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "GRUBDASH_ADDR", default_value = "0.0.0.0:5000")]
    pub addr: SocketAddr,

    /// JSON file with the initial orders (array of orders)
    #[arg(long, env = "GRUBDASH_SEED")]
    pub seed: Option<PathBuf>,

    /// How new order ids are generated
    #[arg(long, env = "GRUBDASH_IDS", value_enum, default_value_t = IdStrategy::Random)]
    pub ids: IdStrategy,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(short, long, env = "GRUBDASH_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum IdStrategy {
    /// 32 hex characters from a random UUID
    Random,
    /// "1", "2", ... counting from one
    Sequential,
}

impl IdStrategy {
    pub fn supplier(self) -> Box<dyn IdSupplier> {
        match self {
            Self::Random => Box::new(RandomIds),
            Self::Sequential => Box::new(SequentialIds::default()),
        }
    }
}
