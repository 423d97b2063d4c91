//! The order resource: model, validation chains, store seams and routes.

mod chains;
mod draft;
mod error;
mod model;
mod resource;
mod store;

pub mod routes;
pub mod seed;

pub use chains::{Chain, DynStore, Exchange};
pub use draft::{DraftEnvelope, OrderDraft};
pub use error::{Field, OrderError};
pub use model::{Dish, Order, OrderId, OrderStatus};
pub use resource::OrderResource;
pub use routes::{SharedOrders, router};
pub use store::{IdSupplier, MemoryStore, OrderStore, RandomIds, SequentialIds};
