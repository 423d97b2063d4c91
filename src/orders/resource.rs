//! The order resource: chains plus terminal steps over an owned store.

use tracing::{debug, info, warn};

use super::chains::{self, Chain, Exchange};
use super::draft::OrderDraft;
use super::error::{Field, OrderError};
use super::model::{Order, OrderId, OrderStatus};
use super::store::{IdSupplier, OrderStore};

/// How many ids `create` draws before giving up on the supplier.
const MAX_ID_DRAWS: usize = 16;

/// The five order operations.
///
/// Each fallible operation runs its validation chain first and touches the
/// store only if every step passed, so a rejected request never leaves a
/// partial change behind.
pub struct OrderResource<S> {
    store: S,
    ids: Box<dyn IdSupplier>,
    read: Chain,
    create: Chain,
    update: Chain,
    delete: Chain,
}

impl<S> OrderResource<S>
where
    S: OrderStore + 'static,
{
    pub fn new(store: S, ids: impl IdSupplier + 'static) -> Self {
        Self::with_ids(store, Box::new(ids))
    }

    pub fn with_ids(store: S, ids: Box<dyn IdSupplier>) -> Self {
        Self {
            store,
            ids,
            read: chains::read(),
            create: chains::create(),
            update: chains::update(),
            delete: chains::delete(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every order, unfiltered, in insertion order.
    pub fn list(&self) -> Vec<Order> {
        self.store.all()
    }

    pub fn read(&self, id: &OrderId) -> Result<Order, OrderError> {
        let mut cx = Exchange::new(Some(id.clone()), OrderDraft::default());
        self.read.run(&self.store, &mut cx)?;
        cx.take_found()
    }

    /// Validates `draft` and appends a new order with a fresh id.
    ///
    /// A draft without a status creates a `pending` order. A status that is
    /// present must be one of the four known values; this check runs after
    /// the quantity step and goes beyond the four required create checks.
    pub fn create(&mut self, draft: OrderDraft) -> Result<Order, OrderError> {
        let mut cx = Exchange::new(None, draft);
        self.create.run(&self.store, &mut cx)?;

        let id = self.fresh_id()?;
        let draft = &cx.draft;
        let order = Order {
            id,
            deliver_to: draft.text(Field::DeliverTo)?,
            mobile_number: draft.text(Field::MobileNumber)?,
            status: draft.status_if_present()?.unwrap_or(OrderStatus::Pending),
            dishes: draft.dishes()?,
        };

        info!(id = %order.id, dishes = order.dishes.len(), "order created");
        self.store.insert(order.clone());
        Ok(order)
    }

    /// Replaces `status` and `deliverTo` of an existing order.
    ///
    /// `mobileNumber` and `dishes` must be present and valid but are not
    /// written back; the stored values are kept. A `delivered` order is
    /// rejected whatever the draft asks for.
    pub fn update(&mut self, id: &OrderId, draft: OrderDraft) -> Result<Order, OrderError> {
        let mut cx = Exchange::new(Some(id.clone()), draft);
        self.update.run(&self.store, &mut cx)?;

        let status = cx.draft.status()?;
        let deliver_to = cx.draft.text(Field::DeliverTo)?;
        let order = self.store.get_mut(id).ok_or_else(|| OrderError::NotFound(id.clone()))?;
        debug!(%id, from = %order.status, to = %status, "order status change");
        order.status = status;
        order.deliver_to = deliver_to;

        info!(%id, %status, "order updated");
        Ok(order.clone())
    }

    /// Removes a `pending` order.
    pub fn delete(&mut self, id: &OrderId) -> Result<(), OrderError> {
        let mut cx = Exchange::new(Some(id.clone()), OrderDraft::default());
        self.delete.run(&self.store, &mut cx)?;

        self.store.remove(id).ok_or_else(|| OrderError::NotFound(id.clone()))?;
        info!(%id, "order deleted");
        Ok(())
    }

    /// Draws ids until one is not already taken, at most [`MAX_ID_DRAWS`] times.
    fn fresh_id(&self) -> Result<OrderId, OrderError> {
        for _ in 0..MAX_ID_DRAWS {
            let id = self.ids.next_id();
            if !self.store.contains(&id) {
                return Ok(id);
            }
            debug!(%id, "id supplier returned an id in use, drawing again");
        }
        warn!(attempts = MAX_ID_DRAWS, "id supplier exhausted");
        Err(OrderError::IdsExhausted { attempts: MAX_ID_DRAWS })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::model::Dish;
    use crate::orders::store::{MemoryStore, SequentialIds};
    use serde_json::{Value, json};

    fn draft(data: Value) -> OrderDraft {
        serde_json::from_value(data).unwrap()
    }

    fn valid(status: &str) -> OrderDraft {
        draft(json!({
            "deliverTo": "123 Main",
            "mobileNumber": "555-1212",
            "status": status,
            "dishes": [{ "quantity": 2, "name": "Falafel" }]
        }))
    }

    fn stored(id: &str, status: OrderStatus) -> Order {
        Order {
            id: id.into(),
            deliver_to: "308 Negra Arroyo Lane".into(),
            mobile_number: "(505) 143-3369".into(),
            status,
            dishes: vec![Dish::new(1)],
        }
    }

    fn resource(orders: Vec<Order>) -> OrderResource<MemoryStore> {
        OrderResource::new(MemoryStore::with_orders(orders), SequentialIds::default())
    }

    #[test]
    fn create_appends_with_fresh_id() {
        let mut orders = resource(vec![stored("1", OrderStatus::Pending)]);

        let created = orders.create(valid("pending")).unwrap();

        // "1" is taken by the seed, so the supplier is asked again.
        assert_eq!(created.id, OrderId::from("2"));
        assert_eq!(created.status, OrderStatus::Pending);
        assert_eq!(created.dishes[0].quantity, 2);
        assert_eq!(orders.list().last(), Some(&created));
        assert_eq!(orders.list().len(), 2);
    }

    #[test]
    fn create_without_status_is_pending() {
        let mut orders = resource(vec![]);
        let created = orders
            .create(draft(json!({ "deliverTo": "a", "mobileNumber": "b", "dishes": [{ "quantity": 1 }] })))
            .unwrap();
        assert_eq!(created.status, OrderStatus::Pending);
    }

    #[test]
    fn create_rejects_first_problem_without_mutating() {
        let mut orders = resource(vec![]);

        let cases = [
            (json!({ "mobileNumber": "b", "dishes": [] }), OrderError::MissingField(Field::DeliverTo)),
            (json!({ "deliverTo": "a", "dishes": [] }), OrderError::MissingField(Field::MobileNumber)),
            (json!({ "deliverTo": "a", "mobileNumber": "b", "dishes": [] }), OrderError::InvalidDishes),
            (
                json!({ "deliverTo": "a", "mobileNumber": "b", "dishes": [{ "quantity": 1 }, { "quantity": -1 }] }),
                OrderError::InvalidQuantity { index: 1 },
            ),
            (
                json!({ "deliverTo": "a", "mobileNumber": "b", "status": "lost", "dishes": [{ "quantity": 1 }] }),
                OrderError::InvalidStatus,
            ),
        ];

        for (data, expected) in cases {
            assert_eq!(orders.create(draft(data)), Err(expected));
        }
        assert!(orders.list().is_empty());
    }

    #[test]
    fn create_gives_up_when_supplier_only_returns_taken_ids() {
        let mut orders = OrderResource::new(
            MemoryStore::with_orders(vec![stored("1", OrderStatus::Pending)]),
            || OrderId::from("1"),
        );

        assert_eq!(
            orders.create(valid("pending")),
            Err(OrderError::IdsExhausted { attempts: MAX_ID_DRAWS }),
        );
        assert_eq!(orders.list().len(), 1);
    }

    #[test]
    fn read_returns_exact_order_or_not_found() {
        let order = stored("abc", OrderStatus::Preparing);
        let orders = resource(vec![order.clone()]);

        assert_eq!(orders.read(&"abc".into()), Ok(order));
        assert_eq!(orders.read(&"nope".into()), Err(OrderError::NotFound("nope".into())));
    }

    #[test]
    fn update_writes_status_and_address_only() {
        let mut orders = resource(vec![stored("1", OrderStatus::Pending)]);

        let mut d = valid("Out-For-Delivery");
        d.mobile_number = json!("999-0000");
        d.dishes = json!([{ "quantity": 9 }]);
        let updated = orders.update(&"1".into(), d).unwrap();

        assert_eq!(updated.status, OrderStatus::OutForDelivery);
        assert_eq!(updated.deliver_to, "123 Main");
        assert_eq!(updated.mobile_number, "(505) 143-3369");
        assert_eq!(updated.dishes, vec![Dish::new(1)]);
        assert_eq!(orders.read(&"1".into()), Ok(updated));
    }

    #[test]
    fn update_allows_backward_transitions() {
        let mut orders = resource(vec![stored("1", OrderStatus::Preparing)]);
        let updated = orders.update(&"1".into(), valid("pending")).unwrap();
        assert_eq!(updated.status, OrderStatus::Pending);
    }

    #[test]
    fn delivered_orders_are_immutable() {
        let before = stored("1", OrderStatus::Delivered);
        let mut orders = resource(vec![before.clone()]);

        for status in ["delivered", "pending", "preparing"] {
            assert_eq!(orders.update(&"1".into(), valid(status)), Err(OrderError::ImmutableOrder));
        }
        assert_eq!(orders.read(&"1".into()), Ok(before));
    }

    #[test]
    fn id_mismatch_wins_over_other_validation() {
        let mut orders = resource(vec![stored("1", OrderStatus::Delivered)]);
        let d = draft(json!({ "id": "2" }));
        assert_eq!(
            orders.update(&"1".into(), d),
            Err(OrderError::IdMismatch { body: "2".into(), route: "1".into() }),
        );
    }

    #[test]
    fn update_rejects_first_problem_without_mutating() {
        let before = stored("1", OrderStatus::Pending);
        let mut orders = resource(vec![before.clone()]);

        let cases = [
            (
                json!({ "status": "preparing", "mobileNumber": "b", "dishes": [{ "quantity": 1 }] }),
                OrderError::MissingField(Field::DeliverTo),
            ),
            (
                json!({ "status": "preparing", "deliverTo": "a", "dishes": [{ "quantity": 1 }] }),
                OrderError::MissingField(Field::MobileNumber),
            ),
            (
                json!({ "status": "preparing", "deliverTo": "a", "mobileNumber": "b" }),
                OrderError::InvalidDishes,
            ),
            (
                json!({ "status": "preparing", "deliverTo": "a", "mobileNumber": "b", "dishes": [] }),
                OrderError::InvalidDishes,
            ),
            (
                json!({ "status": "preparing", "deliverTo": "a", "mobileNumber": "b", "dishes": [{ "quantity": 1 }, { "quantity": 0 }] }),
                OrderError::InvalidQuantity { index: 1 },
            ),
            (
                json!({ "status": "bogus", "deliverTo": "a", "mobileNumber": "b", "dishes": [{ "quantity": "2" }] }),
                OrderError::InvalidQuantity { index: 0 },
            ),
        ];

        for (data, expected) in cases {
            assert_eq!(orders.update(&"1".into(), draft(data)), Err(expected));
            assert_eq!(orders.read(&"1".into()), Ok(before.clone()));
        }
    }

    #[test]
    fn update_validates_status_value_last() {
        let mut orders = resource(vec![stored("1", OrderStatus::Pending)]);
        assert_eq!(orders.update(&"1".into(), valid("bogus")), Err(OrderError::InvalidStatus));
        assert_eq!(
            orders.update(&"1".into(), draft(json!({ "deliverTo": "a" }))),
            Err(OrderError::MissingField(Field::Status)),
        );
        assert_eq!(orders.update(&"2".into(), valid("pending")), Err(OrderError::NotFound("2".into())));
    }

    #[test]
    fn delete_only_pending_orders() {
        let mut orders = resource(vec![
            stored("1", OrderStatus::Pending),
            stored("2", OrderStatus::Preparing),
        ]);

        assert_eq!(orders.delete(&"2".into()), Err(OrderError::NotPending));
        assert_eq!(orders.list().len(), 2);

        assert_eq!(orders.delete(&"1".into()), Ok(()));
        assert_eq!(orders.read(&"1".into()), Err(OrderError::NotFound("1".into())));
        assert_eq!(orders.delete(&"1".into()), Err(OrderError::NotFound("1".into())));
        assert_eq!(orders.list().len(), 1);
    }

    #[test]
    fn list_is_stable_without_mutation() {
        let orders = resource(vec![stored("1", OrderStatus::Pending), stored("2", OrderStatus::Delivered)]);
        assert_eq!(orders.list(), orders.list());
    }
}
