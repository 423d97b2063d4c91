//! `/orders` HTTP handlers.
//!
//! | Method | Path | Operation |
//! |---|---|---|
//! | GET | `/orders` | list |
//! | POST | `/orders` | create |
//! | GET | `/orders/{orderId}` | read |
//! | PUT | `/orders/{orderId}` | update |
//! | DELETE | `/orders/{orderId}` | delete |
//!
//! Every handler locks the shared resource once and does all of its work,
//! chain and terminal step, under that lock. Nothing is awaited while the
//! lock is held.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{Method, Request, Response, Router, Status, health};

use super::draft::{DraftEnvelope, OrderDraft};
use super::error::OrderError;
use super::model::OrderId;
use super::resource::OrderResource;
use super::store::OrderStore;

/// Router state: the order resource behind a single lock.
pub type SharedOrders<S> = Mutex<OrderResource<S>>;

/// Builds the full route table, health probes included.
pub fn router<S>(resource: OrderResource<S>) -> Router<SharedOrders<S>>
where
    S: OrderStore + 'static,
{
    Router::with_state(Mutex::new(resource))
        .on(Method::Get,    "/orders",           list::<S>)
        .on(Method::Post,   "/orders",           create::<S>)
        .on(Method::Get,    "/orders/{orderId}", read::<S>)
        .on(Method::Put,    "/orders/{orderId}", update::<S>)
        .on(Method::Delete, "/orders/{orderId}", delete::<S>)
        .on(Method::Get,    "/healthz",          health::liveness::<SharedOrders<S>>)
        .on(Method::Get,    "/readyz",           health::readiness::<SharedOrders<S>>)
}

// GET /orders
async fn list<S: OrderStore + 'static>(_req: Request, orders: Arc<SharedOrders<S>>) -> Response {
    let all = lock(&orders).list();
    Response::data(Status::Ok, &all)
}

// POST /orders → 201
async fn create<S: OrderStore + 'static>(req: Request, orders: Arc<SharedOrders<S>>) -> Response {
    let result = draft(&req).and_then(|d| lock(&orders).create(d));
    respond(result, Status::Created)
}

// GET /orders/{orderId}
async fn read<S: OrderStore + 'static>(req: Request, orders: Arc<SharedOrders<S>>) -> Response {
    let id = order_id(&req);
    respond(lock(&orders).read(&id), Status::Ok)
}

// PUT /orders/{orderId}
async fn update<S: OrderStore + 'static>(req: Request, orders: Arc<SharedOrders<S>>) -> Response {
    let id = order_id(&req);
    let result = draft(&req).and_then(|d| lock(&orders).update(&id, d));
    respond(result, Status::Ok)
}

// DELETE /orders/{orderId} → 204
async fn delete<S: OrderStore + 'static>(req: Request, orders: Arc<SharedOrders<S>>) -> Response {
    let id = order_id(&req);
    match lock(&orders).delete(&id) {
        Ok(()) => Response::status(Status::NoContent),
        Err(e) => rejection(e),
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Recovers a poisoned lock. Mutations run only after their chain passed and
/// never span an await.
fn lock<S>(orders: &SharedOrders<S>) -> MutexGuard<'_, OrderResource<S>> {
    orders.lock().unwrap_or_else(PoisonError::into_inner)
}

fn order_id(req: &Request) -> OrderId {
    OrderId::new(req.param("orderId").unwrap_or_default())
}

/// The `data` object of the body. An empty body is an empty draft.
fn draft(req: &Request) -> Result<OrderDraft, OrderError> {
    req.json::<DraftEnvelope>()
        .map(|envelope| envelope.unwrap_or_default().data)
        .map_err(|e| OrderError::MalformedBody(e.to_string()))
}

fn respond<T: serde::Serialize>(result: Result<T, OrderError>, success: Status) -> Response {
    match result {
        Ok(value) => Response::data(success, &value),
        Err(e) => rejection(e),
    }
}

fn rejection(e: OrderError) -> Response {
    Response::error(e.status(), e.to_string())
}
