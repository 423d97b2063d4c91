//! Order and dish records as they are stored and served.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{Field, OrderError};

/// Opaque order identifier. Compared by exact string equality everywhere.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self { Self::new(s) }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self { Self(s) }
}

/// Where an order is in its delivery.
///
/// Any transition is allowed except out of [`Delivered`](OrderStatus::Delivered).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        Self::Pending,
        Self::Preparing,
        Self::OutForDelivery,
        Self::Delivered,
    ];

    /// Lowercase wire form, e.g. `"out-for-delivery"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending        => "pending",
            Self::Preparing      => "preparing",
            Self::OutForDelivery => "out-for-delivery",
            Self::Delivered      => "delivered",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Self::Delivered
    }
}

/// Case-insensitive: `"Out-For-Delivery"` parses as [`OrderStatus::OutForDelivery`].
impl FromStr for OrderStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line item. Only `quantity` is interpreted; every other field is kept as
/// sent and served back unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub quantity: u64,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Dish {
    pub fn new(quantity: u64) -> Self {
        Self { quantity, details: Map::new() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub deliver_to: String,
    pub mobile_number: String,
    pub status: OrderStatus,
    pub dishes: Vec<Dish>,
}

impl Order {
    /// Checks a stored record against the rules `create` enforces on input:
    /// non-empty text fields, at least one dish, positive quantities.
    pub fn validate(&self) -> Result<(), OrderError> {
        if self.deliver_to.is_empty() {
            return Err(OrderError::MissingField(Field::DeliverTo));
        }
        if self.mobile_number.is_empty() {
            return Err(OrderError::MissingField(Field::MobileNumber));
        }
        if self.dishes.is_empty() {
            return Err(OrderError::InvalidDishes);
        }
        match self.dishes.iter().position(|d| d.quantity == 0) {
            Some(index) => Err(OrderError::InvalidQuantity { index }),
            None => Ok(()),
        }
    }
}
