//! Wire envelopes for API requests and responses.
//!
//! Response fields are defaulted wherever the API has been seen to omit
//! them, so a bare `{}` acknowledgement decodes cleanly.

use agrofarm_core::{Cart, CartItem, OrderStatus, Product, Role, UserProfile};
use serde::{Deserialize, Serialize};

/// `GET cart/my-cart`. `cart` is `null` or absent when the buyer has none.
#[derive(Debug, Default, Deserialize)]
pub struct CartEnvelope {
    #[serde(default)]
    pub cart: Option<CartPayload>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CartPayload {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub products: Vec<CartItem>,
}

impl From<CartEnvelope> for Cart {
    fn from(envelope: CartEnvelope) -> Self {
        match envelope.cart {
            Some(payload) => Cart::new(payload.id, payload.products),
            None => Cart::default(),
        }
    }
}

/// Plain acknowledgement carrying an optional human-readable message.
#[derive(Debug, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// `GET products/all` and the farmer listings. Entries stay raw JSON so one
/// malformed product can be skipped without losing the rest.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<serde_json::Value>,
}

impl ProductsResponse {
    /// Decodes every well-formed entry, logging and skipping the rest.
    #[must_use]
    pub fn into_products(self, context: &str) -> Vec<Product> {
        self.products
            .into_iter()
            .filter_map(|raw| match serde_json::from_value::<Product>(raw) {
                Ok(product) => Some(product),
                Err(err) => {
                    tracing::warn!(context, error = %err, "skipping malformed product");
                    None
                }
            })
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub farmer: Option<FarmerAccount>,
}

/// A farmer account as returned by `GET farmers/me`, `PUT farmers/update`
/// and (sometimes) embedded in the login response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FarmerAccount {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(rename = "imgURL", default)]
    pub img_url: Option<String>,
}

impl FarmerAccount {
    /// Builds the session profile. `fallback_email` fills in a missing email,
    /// and the email stands in for a missing name.
    #[must_use]
    pub fn into_profile(self, fallback_email: &str, role: Role) -> UserProfile {
        let email = self
            .email
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| fallback_email.to_owned());
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| email.clone());
        UserProfile {
            name,
            email,
            avatar_url: self.img_url.filter(|u| !u.trim().is_empty()),
            role,
        }
    }
}

impl LoginResponse {
    /// Profile from the login echo alone. Prefer `GET farmers/me` when it is
    /// reachable; this is the fallback.
    #[must_use]
    pub fn into_profile(self, login_email: &str, role: Role) -> UserProfile {
        self.farmer
            .unwrap_or_default()
            .into_profile(login_email, role)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaceOrderResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub order: Option<PlacedOrder>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlacedOrder {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddToCartBody<'a> {
    pub product_id: &'a str,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateQuantityBody<'a> {
    pub cart_id: &'a str,
    pub product_id: &'a str,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartIdBody<'a> {
    pub cart_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductIdBody<'a> {
    pub product_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct VerifyOtpBody<'a> {
    pub email: &'a str,
    pub otp: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct EmailBody<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ForgotPasswordBody<'a> {
    pub email: &'a str,
    pub phone: &'a str,
}
