//! Error types for order operations.

use std::fmt;

use thiserror::Error;

use crate::status::Status;
use super::model::OrderId;

/// A request field that must be present and non-empty.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Field {
    DeliverTo,
    MobileNumber,
    Status,
}

impl Field {
    /// Wire name of the field, as it appears in the request body.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DeliverTo    => "deliverTo",
            Self::MobileNumber => "mobileNumber",
            Self::Status       => "status",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an order operation was rejected. Every variant maps to one HTTP
/// status via [`OrderError::status`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// A required text field is absent, empty, or not a string.
    #[error("Order must include a {0}")]
    MissingField(Field),

    /// `dishes` is absent, not an array, or empty.
    #[error("Order must include at least one dish")]
    InvalidDishes,

    /// The dish at `index` has no positive integer quantity.
    #[error("Dish {index} must have a quantity that is an integer greater than 0")]
    InvalidQuantity { index: usize },

    #[error("Order must have a status of pending, preparing, out-for-delivery, delivered")]
    InvalidStatus,

    /// The body carries an `id` that differs from the one in the route.
    #[error("Order id does not match route id. Order: {body}, Route: {route}")]
    IdMismatch { body: String, route: OrderId },

    #[error("Order does not exist. Order, Route: {0}.")]
    NotFound(OrderId),

    #[error("A delivered order cannot be changed")]
    ImmutableOrder,

    #[error("Order status is not pending")]
    NotPending,

    #[error("Request body is not valid JSON: {0}")]
    MalformedBody(String),

    /// The id supplier kept returning ids that are already stored.
    #[error("Could not assign an unused order id after {attempts} attempts")]
    IdsExhausted { attempts: usize },
}

impl OrderError {
    pub fn status(&self) -> Status {
        match self {
            Self::NotFound(_) => Status::NotFound,
            Self::IdsExhausted { .. } => Status::InternalServerError,
            _ => Status::BadRequest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        assert_eq!(
            OrderError::MissingField(Field::MobileNumber).to_string(),
            "Order must include a mobileNumber",
        );
        assert_eq!(
            OrderError::InvalidQuantity { index: 2 }.to_string(),
            "Dish 2 must have a quantity that is an integer greater than 0",
        );
        assert_eq!(
            OrderError::IdMismatch { body: "9".into(), route: "3".into() }.to_string(),
            "Order id does not match route id. Order: 9, Route: 3",
        );
        assert_eq!(
            OrderError::NotFound("abc".into()).to_string(),
            "Order does not exist. Order, Route: abc.",
        );
    }

    #[test]
    fn only_not_found_is_404() {
        assert_eq!(OrderError::NotFound("x".into()).status(), Status::NotFound);
        assert_eq!(OrderError::IdsExhausted { attempts: 3 }.status(), Status::InternalServerError);
        assert_eq!(OrderError::NotPending.status(), Status::BadRequest);
        assert_eq!(OrderError::ImmutableOrder.status(), Status::BadRequest);
        assert_eq!(OrderError::InvalidDishes.status(), Status::BadRequest);
    }
}
