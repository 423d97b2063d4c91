//! Loading the initial order collection from a JSON file.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::error::Error;
use super::model::Order;

/// Reads a JSON array of orders. Ids must be unique and every order must
/// pass [`Order::validate`].
pub fn load(path: &Path) -> Result<Vec<Order>, Error> {
    let raw = std::fs::read(path)
        .map_err(|source| Error::SeedIo { path: path.to_owned(), source })?;
    let orders = parse(&raw).map_err(|e| match e {
        Error::Seed { source, .. } => Error::Seed { path: path.to_owned(), source },
        other => other,
    })?;
    info!(path = %path.display(), orders = orders.len(), "seed data loaded");
    Ok(orders)
}

/// Parses seed data from bytes. Used by [`load`]; errors carry an empty path.
pub fn parse(raw: &[u8]) -> Result<Vec<Order>, Error> {
    let orders: Vec<Order> = serde_json::from_slice(raw)
        .map_err(|source| Error::Seed { path: Default::default(), source })?;

    let mut seen = HashSet::new();
    for order in &orders {
        if !seen.insert(&order.id) {
            return Err(Error::DuplicateId(order.id.to_string()));
        }
        order.validate()
            .map_err(|reason| Error::InvalidSeed { id: order.id.to_string(), reason })?;
    }
    Ok(orders)
}
