//! Unvalidated order payloads.
//!
//! Request bodies arrive as `{"data": {...}}` with whatever the client chose
//! to send. [`OrderDraft`] keeps every field as a raw JSON value so the
//! validation chains can report *which* field is wrong instead of failing the
//! whole body at deserialization time. The accessors here are the only place
//! that turns raw values into typed ones.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::{Field, OrderError};
use super::model::{Dish, OrderId, OrderStatus};

/// Largest integer a JSON number can carry without losing precision.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

/// The `{"data": ...}` request envelope.
#[derive(Debug, Default, Deserialize)]
pub struct DraftEnvelope {
    #[serde(default)]
    pub data: OrderDraft,
}

/// Order fields exactly as the client sent them. Absent fields are `null`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderDraft {
    pub id: Value,
    pub deliver_to: Value,
    pub mobile_number: Value,
    pub status: Value,
    pub dishes: Value,
}

impl OrderDraft {
    /// A required, non-empty string field.
    pub fn text(&self, field: Field) -> Result<String, OrderError> {
        let value = match field {
            Field::DeliverTo => &self.deliver_to,
            Field::MobileNumber => &self.mobile_number,
            Field::Status => &self.status,
        };
        match value {
            Value::String(s) if !s.is_empty() => Ok(s.clone()),
            _ => Err(OrderError::MissingField(field)),
        }
    }

    /// The requested status, matched case-insensitively.
    pub fn status(&self) -> Result<OrderStatus, OrderError> {
        self.status.as_str()
            .and_then(|s| s.parse().ok())
            .ok_or(OrderError::InvalidStatus)
    }

    /// Like [`status`](Self::status), but an absent or empty status is `None`.
    pub fn status_if_present(&self) -> Result<Option<OrderStatus>, OrderError> {
        if is_truthy(&self.status) { self.status().map(Some) } else { Ok(None) }
    }

    /// The raw dish list, which must be a non-empty array.
    pub fn dish_list(&self) -> Result<&[Value], OrderError> {
        match &self.dishes {
            Value::Array(items) if !items.is_empty() => Ok(items),
            _ => Err(OrderError::InvalidDishes),
        }
    }

    /// Every dish, typed. Fails on the first dish without a positive integer
    /// quantity, reporting its index.
    pub fn dishes(&self) -> Result<Vec<Dish>, OrderError> {
        self.dish_list()?
            .iter()
            .enumerate()
            .map(|(index, item)| dish(index, item))
            .collect()
    }

    /// A body `id` is optional, but when present it must equal the route id.
    pub fn check_id(&self, route: &OrderId) -> Result<(), OrderError> {
        if !is_truthy(&self.id) {
            return Ok(());
        }
        match &self.id {
            Value::String(s) if s == route.as_str() => Ok(()),
            Value::String(s) => Err(mismatch(s.clone(), route)),
            other => Err(mismatch(other.to_string(), route)),
        }
    }
}

fn mismatch(body: String, route: &OrderId) -> OrderError {
    OrderError::IdMismatch { body, route: route.clone() }
}

fn dish(index: usize, item: &Value) -> Result<Dish, OrderError> {
    let invalid = || OrderError::InvalidQuantity { index };
    let Value::Object(fields) = item else {
        return Err(invalid());
    };
    let quantity = fields.get("quantity")
        .and_then(positive_integer)
        .ok_or_else(invalid)?;

    let details: Map<String, Value> = fields.iter()
        .filter(|(k, _)| k.as_str() != "quantity")
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    Ok(Dish { quantity, details })
}

/// `2` and `2.0` are positive integers; `0`, `-1`, `2.5` and `"2"` are not.
fn positive_integer(value: &Value) -> Option<u64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(u) = n.as_u64() {
        return (u > 0).then_some(u);
    }
    let f = n.as_f64()?;
    (f > 0.0 && f.fract() == 0.0 && f <= MAX_EXACT_INTEGER).then_some(f as u64)
}

/// JSON falsiness: `null`, `false`, `0`, and `""`.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(data: Value) -> OrderDraft {
        serde_json::from_value(data).unwrap()
    }

    #[test]
    fn missing_fields_default_to_null() {
        let d = draft(json!({ "deliverTo": "123 Main" }));
        assert_eq!(d.text(Field::DeliverTo).unwrap(), "123 Main");
        assert_eq!(d.text(Field::MobileNumber), Err(OrderError::MissingField(Field::MobileNumber)));
        assert!(d.dishes.is_null());
    }

    #[test]
    fn empty_or_non_string_text_is_missing() {
        let d = draft(json!({ "deliverTo": "", "mobileNumber": 5551212 }));
        assert_eq!(d.text(Field::DeliverTo), Err(OrderError::MissingField(Field::DeliverTo)));
        assert_eq!(d.text(Field::MobileNumber), Err(OrderError::MissingField(Field::MobileNumber)));
    }

    #[test]
    fn dishes_must_be_a_non_empty_array() {
        assert_eq!(draft(json!({})).dish_list().unwrap_err(), OrderError::InvalidDishes);
        assert_eq!(draft(json!({ "dishes": [] })).dish_list().unwrap_err(), OrderError::InvalidDishes);
        assert_eq!(draft(json!({ "dishes": "pizza" })).dish_list().unwrap_err(), OrderError::InvalidDishes);
    }

    #[test]
    fn reports_first_bad_quantity_index() {
        for bad in [json!(0), json!(-2), json!(1.5), json!("2"), Value::Null] {
            let d = draft(json!({ "dishes": [{ "quantity": 1 }, { "quantity": bad }, { "quantity": 0 }] }));
            assert_eq!(d.dishes(), Err(OrderError::InvalidQuantity { index: 1 }), "quantity {bad}");
        }
        let d = draft(json!({ "dishes": [{ "name": "no quantity" }] }));
        assert_eq!(d.dishes(), Err(OrderError::InvalidQuantity { index: 0 }));
        let d = draft(json!({ "dishes": [3] }));
        assert_eq!(d.dishes(), Err(OrderError::InvalidQuantity { index: 0 }));
    }

    #[test]
    fn whole_floats_count_as_integers_and_details_pass_through() {
        let d = draft(json!({ "dishes": [{ "quantity": 2.0, "name": "Dolcelatte", "price": 19 }] }));
        let dishes = d.dishes().unwrap();
        assert_eq!(dishes[0].quantity, 2);
        assert_eq!(dishes[0].details["name"], "Dolcelatte");
        assert!(!dishes[0].details.contains_key("quantity"));
    }

    #[test]
    fn body_id_must_match_route_when_truthy() {
        let route = OrderId::from("abc");
        assert!(draft(json!({})).check_id(&route).is_ok());
        assert!(draft(json!({ "id": "" })).check_id(&route).is_ok());
        assert!(draft(json!({ "id": null })).check_id(&route).is_ok());
        assert!(draft(json!({ "id": "abc" })).check_id(&route).is_ok());
        assert_eq!(
            draft(json!({ "id": "xyz" })).check_id(&route),
            Err(OrderError::IdMismatch { body: "xyz".into(), route: route.clone() }),
        );
        assert_eq!(
            draft(json!({ "id": 42 })).check_id(&route),
            Err(OrderError::IdMismatch { body: "42".into(), route }),
        );
    }

    #[test]
    fn status_is_case_insensitive_and_optional_when_absent() {
        assert_eq!(draft(json!({ "status": "Delivered" })).status(), Ok(OrderStatus::Delivered));
        assert_eq!(draft(json!({ "status": "invalid" })).status(), Err(OrderError::InvalidStatus));
        assert_eq!(draft(json!({ "status": 3 })).status(), Err(OrderError::InvalidStatus));
        assert_eq!(draft(json!({})).status_if_present(), Ok(None));
        assert_eq!(draft(json!({ "status": "" })).status_if_present(), Ok(None));
        assert_eq!(draft(json!({ "status": "nope" })).status_if_present(), Err(OrderError::InvalidStatus));
    }
}
