use std::fmt;

use serde::{Deserialize, Serialize};

use crate::checkout::{CheckoutForm, PaymentMethod};

/// Body of `POST v1/order/place-order`.
///
/// `full_name` is collected by the form but not part of the wire contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub cart_id: String,
    pub payment_method: PaymentMethod,
    pub street: String,
    pub city: String,
    pub zip_code: String,
    pub phone_number: String,
    pub notes: String,
}

impl PlaceOrderRequest {
    #[must_use]
    pub fn from_form(cart_id: &str, form: &CheckoutForm) -> Self {
        Self {
            cart_id: cart_id.to_owned(),
            payment_method: form.payment_method,
            street: form.street.trim().to_owned(),
            city: form.city.trim().to_owned(),
            zip_code: form.zip_code.trim().to_owned(),
            phone_number: form.phone_number.trim().to_owned(),
            notes: form.notes.clone(),
        }
    }
}

/// Server-owned order lifecycle, displayed read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Other(String),
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "processing" | "pending" => OrderStatus::Processing,
            "shipped" | "in transit" => OrderStatus::Shipped,
            "delivered" => OrderStatus::Delivered,
            "cancelled" | "canceled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(raw),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.to_string()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Processing => f.write_str("processing"),
            OrderStatus::Shipped => f.write_str("shipped"),
            OrderStatus::Delivered => f.write_str("delivered"),
            OrderStatus::Cancelled => f.write_str("cancelled"),
            OrderStatus::Other(raw) => f.write_str(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_api_field_names() {
        let form = CheckoutForm {
            full_name: "Ahmad Khan".to_string(),
            phone_number: " +92 300 1234567 ".to_string(),
            street: "123 Farming Lane".to_string(),
            city: "Lahore".to_string(),
            zip_code: "54000".to_string(),
            notes: "Leave at gate".to_string(),
            payment_method: PaymentMethod::Jazzcash,
        };
        let body = serde_json::to_value(PlaceOrderRequest::from_form("cart-1", &form)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "cartId": "cart-1",
                "paymentMethod": "jazzcash",
                "street": "123 Farming Lane",
                "city": "Lahore",
                "zipCode": "54000",
                "phoneNumber": "+92 300 1234567",
                "notes": "Leave at gate"
            })
        );
    }

    #[test]
    fn status_parses_known_and_unknown_values() {
        let delivered: OrderStatus = serde_json::from_str("\"Delivered\"").unwrap();
        assert_eq!(delivered, OrderStatus::Delivered);
        let odd: OrderStatus = serde_json::from_str("\"returned\"").unwrap();
        assert_eq!(odd, OrderStatus::Other("returned".to_string()));
        assert_eq!(odd.to_string(), "returned");
    }
}
