//! `grubdash` binary: configure, seed, serve.
//!
//! Run with:
//!   cargo run -- --seed orders.json --ids sequential
//!
//! Try:
//!   curl http://localhost:5000/orders
//!   curl -X POST http://localhost:5000/orders \
//!        -H 'content-type: application/json' \
//!        -d '{"data":{"deliverTo":"123 Main","mobileNumber":"555-1212","dishes":[{"quantity":2}]}}'
//!   curl -X DELETE http://localhost:5000/orders/1

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use grubdash::config::Config;
use grubdash::orders::{self, MemoryStore, OrderResource, seed};
use grubdash::{Error, Server};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    fmt().with_env_filter(env_filter).with_target(true).init();

    let store = match &config.seed {
        Some(path) => MemoryStore::with_orders(seed::load(path)?),
        None => MemoryStore::new(),
    };
    let resource = OrderResource::with_ids(store, config.ids.supplier());

    tracing::info!(ids = ?config.ids, "starting grubdash");
    Server::bind(config.addr).await?.serve(orders::router(resource)).await
}
