//! Cart aggregate and its line items.

use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::ValidationError;

/// Checks a requested line quantity before anything is sent to the server.
///
/// # Errors
///
/// [`ValidationError::QuantityBelowMinimum`] for anything under 1,
/// [`ValidationError::QuantityTooLarge`] if it does not fit the wire type.
pub fn validate_quantity(quantity: i64) -> Result<u32, ValidationError> {
    if quantity < 1 {
        return Err(ValidationError::QuantityBelowMinimum { quantity });
    }
    u32::try_from(quantity).map_err(|_| ValidationError::QuantityTooLarge { quantity })
}

/// One product line in the cart.
///
/// The API identifies the line by the product it refers to, so `product_id`
/// is both the line key and the id sent back on update/remove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "_id", alias = "productId")]
    pub product_id: String,
    #[serde(default)]
    pub name: String,
    /// Unit price in rupees.
    pub price: Decimal,
    #[serde(deserialize_with = "lenient_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub image: Option<String>,
}

impl CartItem {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Reads any integer count. Counts below 1 come through as 0 so that
/// [`Cart::new`] drops the line rather than the whole cart failing to decode.
fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    if raw < 1 {
        return Ok(0);
    }
    u32::try_from(raw).map_err(|_| de::Error::custom(format!("quantity {raw} is out of range")))
}

/// The buyer's cart as last reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    /// Server-assigned id; `None` until the first item is added and again
    /// after the cart is cleared or checked out.
    pub cart_id: Option<String>,
    items: Vec<CartItem>,
}

impl Cart {
    /// Builds a cart from server data, dropping any line whose quantity is
    /// below 1.
    #[must_use]
    pub fn new(cart_id: Option<String>, items: Vec<CartItem>) -> Self {
        let items = items.into_iter().filter(|i| i.quantity >= 1).collect();
        Self { cart_id, items }
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines, not units.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Σ(price × quantity) over the current lines. Computed on every call.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: i64, quantity: u32) -> CartItem {
        CartItem {
            product_id: id.to_string(),
            name: format!("product {id}"),
            price: Decimal::from(price),
            quantity,
            image: None,
        }
    }

    #[test]
    fn subtotal_sums_price_times_quantity() {
        let cart = Cart::new(
            Some("c1".to_string()),
            vec![item("a", 45, 2), item("b", 120, 1)],
        );
        assert_eq!(cart.subtotal(), Decimal::from(210));
    }

    #[test]
    fn empty_cart_has_zero_subtotal() {
        let cart = Cart::default();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
        assert!(cart.cart_id.is_none());
    }

    #[test]
    fn zero_quantity_lines_are_dropped() {
        let cart = Cart::new(None, vec![item("a", 10, 0), item("b", 5, 3)]);
        assert_eq!(cart.item_count(), 1);
        assert!(cart.item("a").is_none());
        assert_eq!(cart.subtotal(), Decimal::from(15));
    }

    #[test]
    fn fractional_prices_keep_precision() {
        let cart = Cart::new(
            None,
            vec![CartItem {
                price: Decimal::new(1299, 2),
                ..item("a", 0, 3)
            }],
        );
        assert_eq!(cart.subtotal(), Decimal::new(3897, 2));
    }

    #[test]
    fn quantity_must_be_positive() {
        assert_eq!(validate_quantity(1), Ok(1));
        assert_eq!(
            validate_quantity(0),
            Err(ValidationError::QuantityBelowMinimum { quantity: 0 })
        );
        assert_eq!(
            validate_quantity(-3),
            Err(ValidationError::QuantityBelowMinimum { quantity: -3 })
        );
        assert!(matches!(
            validate_quantity(i64::MAX),
            Err(ValidationError::QuantityTooLarge { .. })
        ));
    }

    #[test]
    fn deserializes_api_line_shape() {
        let json = serde_json::json!({
            "_id": "665f1c",
            "name": "Basmati Rice",
            "price": 110,
            "quantity": 2,
            "image": "https://cdn.example/rice.jpg"
        });
        let line: CartItem = serde_json::from_value(json).expect("valid cart line");
        assert_eq!(line.product_id, "665f1c");
        assert_eq!(line.price, Decimal::from(110));
        assert_eq!(line.line_total(), Decimal::from(220));
        assert_eq!(line.image.as_deref(), Some("https://cdn.example/rice.jpg"));
    }

    #[test]
    fn negative_quantity_line_is_dropped_not_fatal() {
        let lines: Vec<CartItem> = serde_json::from_value(serde_json::json!([
            { "_id": "a", "name": "Rice", "price": 45, "quantity": 2 },
            { "_id": "b", "name": "Eggs", "price": 120, "quantity": -1 }
        ]))
        .expect("negative quantity still decodes");
        assert_eq!(lines[1].quantity, 0);

        let cart = Cart::new(Some("c1".to_string()), lines);
        assert_eq!(cart.item_count(), 1);
        assert!(cart.item("b").is_none());
        assert_eq!(cart.subtotal(), Decimal::from(90));
    }
}
