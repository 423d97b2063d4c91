//! Storage and id generation seams.
//!
//! [`OrderResource`](super::OrderResource) never touches a global collection:
//! it owns an [`OrderStore`] and an [`IdSupplier`] handed to it at
//! construction, so tests get an isolated store and a persistent backend can
//! slot in later.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use super::model::{Order, OrderId};

/// An ordered collection of orders keyed by [`OrderId`].
pub trait OrderStore: Send + Sync {
    /// Every order, in insertion order.
    fn all(&self) -> Vec<Order>;

    fn get(&self, id: &OrderId) -> Option<&Order>;

    fn get_mut(&mut self, id: &OrderId) -> Option<&mut Order>;

    /// Appends an order. The caller guarantees the id is not already present.
    fn insert(&mut self, order: Order);

    /// Removes and returns the order with `id`, if any.
    fn remove(&mut self, id: &OrderId) -> Option<Order>;

    fn contains(&self, id: &OrderId) -> bool {
        self.get(id).is_some()
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The in-memory store: a `Vec` searched linearly.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    orders: Vec<Order>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with `orders`, kept in the given order.
    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self { orders }
    }

    fn position(&self, id: &OrderId) -> Option<usize> {
        self.orders.iter().position(|o| o.id == *id)
    }
}

impl OrderStore for MemoryStore {
    fn all(&self) -> Vec<Order> {
        self.orders.clone()
    }

    fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == *id)
    }

    fn get_mut(&mut self, id: &OrderId) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.id == *id)
    }

    fn insert(&mut self, order: Order) {
        self.orders.push(order);
    }

    fn remove(&mut self, id: &OrderId) -> Option<Order> {
        let index = self.position(id)?;
        Some(self.orders.remove(index))
    }

    fn len(&self) -> usize {
        self.orders.len()
    }
}

/// Hands out fresh order ids.
pub trait IdSupplier: Send + Sync {
    fn next_id(&self) -> OrderId;
}

impl<F> IdSupplier for F
where
    F: Fn() -> OrderId + Send + Sync,
{
    fn next_id(&self) -> OrderId {
        self()
    }
}

/// Random 128-bit ids rendered as 32 lowercase hex characters.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIds;

impl IdSupplier for RandomIds {
    fn next_id(&self) -> OrderId {
        OrderId::new(Uuid::new_v4().simple().to_string())
    }
}

/// Monotonic decimal ids: `"1"`, `"2"`, ...
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn starting_at(first: u64) -> Self {
        Self { next: AtomicU64::new(first) }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdSupplier for SequentialIds {
    fn next_id(&self) -> OrderId {
        OrderId::new(self.next.fetch_add(1, Ordering::SeqCst).to_string())
    }
}
