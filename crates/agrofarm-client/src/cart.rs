//! Cart endpoints.

use agrofarm_core::Cart;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{
    AddToCartBody, CartEnvelope, CartIdBody, MessageResponse, UpdateQuantityBody,
};

impl ApiClient {
    /// Fetches the signed-in buyer's cart. A buyer with no cart gets an empty
    /// [`Cart`] with no id.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Network`] on transport failure.
    /// - [`ApiError::Server`] on a non-2xx status.
    /// - [`ApiError::Deserialize`] if the body is not a cart envelope.
    pub async fn fetch_cart(&self) -> Result<Cart, ApiError> {
        let url = self.endpoint(&["cart", "my-cart"]);
        let envelope: CartEnvelope = self
            .execute(self.http().get(url), "GET cart/my-cart")
            .await?;
        Ok(Cart::from(envelope))
    }

    /// Adds `quantity` units of a product. The server creates the cart on the
    /// first add.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::fetch_cart`].
    pub async fn add_to_cart(
        &self,
        product_id: &str,
        quantity: u32,
    ) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(&["cart", "add"]);
        let body = AddToCartBody {
            product_id,
            quantity,
        };
        self.execute(self.http().post(url).json(&body), "POST cart/add")
            .await
    }

    /// Sets the quantity of one line.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::fetch_cart`].
    pub async fn update_quantity(
        &self,
        cart_id: &str,
        product_id: &str,
        quantity: u32,
    ) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(&["cart", "update"]);
        let body = UpdateQuantityBody {
            cart_id,
            product_id,
            quantity,
        };
        self.execute(self.http().put(url).json(&body), "PUT cart/update")
            .await
    }

    /// Deletes one line from the cart.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::fetch_cart`].
    pub async fn remove_item(
        &self,
        cart_id: &str,
        product_id: &str,
    ) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(&["cart", "item", product_id]);
        let body = CartIdBody { cart_id };
        self.execute(self.http().delete(url).json(&body), "DELETE cart/item")
            .await
    }

    /// Deletes the whole cart.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::fetch_cart`].
    pub async fn clear_cart(&self, cart_id: &str) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(&["cart", "clear", cart_id]);
        self.execute(self.http().delete(url), "DELETE cart/clear")
            .await
    }
}
