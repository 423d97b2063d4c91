//! Validation steps and the per-operation chains built from them.
//!
//! Each operation's chain runs against the store (read-only) and an
//! [`Exchange`]: the route id, the draft from the body, and the stored order
//! once a step has looked it up. Steps only validate; the mutation happens in
//! [`OrderResource`](super::OrderResource) after the chain passes.

use crate::middleware::Pipeline;

use super::draft::OrderDraft;
use super::error::{Field, OrderError};
use super::model::{Order, OrderId, OrderStatus};
use super::store::OrderStore;

/// The environment every step sees: the store, read-only.
pub type DynStore = dyn OrderStore;

/// A chain over the order store.
pub type Chain = Pipeline<DynStore, Exchange, OrderError>;

/// Per-request context threaded through a chain.
#[derive(Debug, Default)]
pub struct Exchange {
    pub route_id: Option<OrderId>,
    pub draft: OrderDraft,
    /// Filled by [`order_exists`].
    pub found: Option<Order>,
}

impl Exchange {
    pub fn new(route_id: Option<OrderId>, draft: OrderDraft) -> Self {
        Self { route_id, draft, found: None }
    }

    fn route_id(&self) -> OrderId {
        self.route_id.clone().unwrap_or_default()
    }

    /// The order looked up by [`order_exists`], or `NotFound` if no step did.
    pub fn take_found(&mut self) -> Result<Order, OrderError> {
        let id = self.route_id();
        self.found.take().ok_or(OrderError::NotFound(id))
    }
}

// ── Chains ────────────────────────────────────────────────────────────────────

pub fn read() -> Chain {
    Chain::new("read").step("order_exists", order_exists)
}

pub fn create() -> Chain {
    Chain::new("create")
        .step("require_deliver_to", require_deliver_to)
        .step("require_mobile_number", require_mobile_number)
        .step("require_dishes", require_dishes)
        .step("require_quantities", require_quantities)
        .step("known_status_if_present", known_status_if_present)
}

pub fn update() -> Chain {
    Chain::new("update")
        .step("order_exists", order_exists)
        .step("id_matches_route", id_matches_route)
        .step("require_status", require_status)
        .step("require_deliver_to", require_deliver_to)
        .step("require_mobile_number", require_mobile_number)
        .step("require_dishes", require_dishes)
        .step("require_quantities", require_quantities)
        .step("known_status", known_status)
        .step("not_delivered", not_delivered)
}

pub fn delete() -> Chain {
    Chain::new("delete")
        .step("order_exists", order_exists)
        .step("is_pending", is_pending)
}

// ── Steps ─────────────────────────────────────────────────────────────────────

fn order_exists(store: &DynStore, cx: &mut Exchange) -> Result<(), OrderError> {
    let id = cx.route_id();
    match store.get(&id) {
        Some(order) => {
            cx.found = Some(order.clone());
            Ok(())
        }
        None => Err(OrderError::NotFound(id)),
    }
}

fn id_matches_route(_: &DynStore, cx: &mut Exchange) -> Result<(), OrderError> {
    cx.draft.check_id(&cx.route_id())
}

fn require_status(_: &DynStore, cx: &mut Exchange) -> Result<(), OrderError> {
    cx.draft.text(Field::Status).map(drop)
}

fn require_deliver_to(_: &DynStore, cx: &mut Exchange) -> Result<(), OrderError> {
    cx.draft.text(Field::DeliverTo).map(drop)
}

fn require_mobile_number(_: &DynStore, cx: &mut Exchange) -> Result<(), OrderError> {
    cx.draft.text(Field::MobileNumber).map(drop)
}

fn require_dishes(_: &DynStore, cx: &mut Exchange) -> Result<(), OrderError> {
    cx.draft.dish_list().map(drop)
}

fn require_quantities(_: &DynStore, cx: &mut Exchange) -> Result<(), OrderError> {
    cx.draft.dishes().map(drop)
}

fn known_status(_: &DynStore, cx: &mut Exchange) -> Result<(), OrderError> {
    cx.draft.status().map(drop)
}

fn known_status_if_present(_: &DynStore, cx: &mut Exchange) -> Result<(), OrderError> {
    cx.draft.status_if_present().map(drop)
}

fn not_delivered(_: &DynStore, cx: &mut Exchange) -> Result<(), OrderError> {
    match &cx.found {
        Some(order) if order.status.is_terminal() => Err(OrderError::ImmutableOrder),
        _ => Ok(()),
    }
}

fn is_pending(_: &DynStore, cx: &mut Exchange) -> Result<(), OrderError> {
    match &cx.found {
        Some(order) if order.status == OrderStatus::Pending => Ok(()),
        _ => Err(OrderError::NotPending),
    }
}
