//! Cart store: fetch/sync, quantity edits, remove and clear.
//!
//! Mutations are pessimistic. Local state only changes by re-fetching the
//! whole cart after the server has confirmed the mutation, and that re-fetch
//! is issued strictly after the mutation's response arrives. A rejected
//! mutation leaves local state exactly as it was.

use agrofarm_client::ApiClient;
use agrofarm_core::{validate_quantity, Cart, PromoCode, Totals, ValidationError};
use rust_decimal::Decimal;

use crate::error::CartError;
use crate::notice::Notices;

/// Progress of the most recent cart fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// The fetch failed; the message is shown as a page-level banner with a
    /// retry action.
    Failed(String),
}

#[derive(Debug)]
pub struct CartStore {
    client: ApiClient,
    cart: Cart,
    state: LoadState,
    promo: Option<PromoCode>,
    notices: Notices,
}

impl CartStore {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            cart: Cart::default(),
            state: LoadState::Idle,
            promo: None,
            notices: Notices::default(),
        }
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn cart_id(&self) -> Option<&str> {
        self.cart.cart_id.as_deref()
    }

    #[must_use]
    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    #[must_use]
    pub fn error_banner(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.cart.subtotal()
    }

    /// Totals for the currently loaded items, recomputed on every call.
    #[must_use]
    pub fn totals(&self) -> Totals {
        Totals::compute(self.cart.subtotal(), self.promo)
    }

    #[must_use]
    pub fn promo(&self) -> Option<PromoCode> {
        self.promo
    }

    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    pub fn drain_notices(&mut self) -> Vec<crate::Notice> {
        self.notices.drain()
    }

    /// Loads the cart from the server, replacing local contents.
    ///
    /// Moves through `Loading` to exactly one of `Loaded` or `Failed`.
    /// Failures set the banner rather than a notice.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Api`] if the fetch fails.
    pub async fn fetch_cart(&mut self) -> Result<(), CartError> {
        self.state = LoadState::Loading;
        match self.client.fetch_cart().await {
            Ok(cart) => {
                tracing::debug!(
                    cart_id = cart.cart_id.as_deref().unwrap_or("<none>"),
                    items = cart.item_count(),
                    "cart loaded"
                );
                self.cart = cart;
                self.state = LoadState::Loaded;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "cart fetch failed");
                self.state = LoadState::Failed(err.user_message().to_owned());
                Err(err.into())
            }
        }
    }

    /// Manual retry after a failed fetch. There is no automatic retry.
    ///
    /// # Errors
    ///
    /// See [`CartStore::fetch_cart`].
    pub async fn retry(&mut self) -> Result<(), CartError> {
        self.fetch_cart().await
    }

    /// Adds a product; the server creates the cart if there is none yet.
    ///
    /// # Errors
    ///
    /// [`ValidationError::QuantityBelowMinimum`] without a network call, or
    /// the API failure from the add or the follow-up fetch.
    pub async fn add_to_cart(&mut self, product_id: &str, quantity: i64) -> Result<(), CartError> {
        let quantity = match validate_quantity(quantity) {
            Ok(q) => q,
            Err(err) => return self.fail(err.into()),
        };
        match self.client.add_to_cart(product_id, quantity).await {
            Ok(response) => {
                tracing::info!(product_id, quantity, "added to cart");
                self.notices.success(
                    response
                        .message
                        .unwrap_or_else(|| "Product added to cart successfully".to_string()),
                );
            }
            Err(err) => return self.fail(err.into()),
        }
        self.fetch_cart().await
    }

    /// Sets a line's quantity on the server, then re-fetches the cart.
    ///
    /// # Errors
    ///
    /// Client-side, with no request sent: quantity below 1, no cart, or a
    /// product that is not in the cart. Otherwise the server's rejection,
    /// after which local state is unchanged.
    pub async fn update_quantity(
        &mut self,
        product_id: &str,
        quantity: i64,
    ) -> Result<(), CartError> {
        let quantity = match validate_quantity(quantity) {
            Ok(q) => q,
            Err(err) => return self.fail(err.into()),
        };
        let cart_id = match self.require_line(product_id) {
            Ok(id) => id,
            Err(err) => return self.fail(err.into()),
        };

        if let Err(err) = self
            .client
            .update_quantity(&cart_id, product_id, quantity)
            .await
        {
            return self.fail(err.into());
        }
        tracing::info!(product_id, quantity, "cart quantity updated");
        self.fetch_cart().await
    }

    /// Raises a line's quantity by one.
    ///
    /// # Errors
    ///
    /// See [`CartStore::update_quantity`].
    pub async fn increment(&mut self, product_id: &str) -> Result<(), CartError> {
        let current = self.current_quantity(product_id);
        self.update_quantity(product_id, current + 1).await
    }

    /// Lowers a line's quantity by one. At quantity 1 the line is removed
    /// instead, so no line is ever left at zero.
    ///
    /// # Errors
    ///
    /// See [`CartStore::update_quantity`] and [`CartStore::remove_item`].
    pub async fn decrement(&mut self, product_id: &str) -> Result<(), CartError> {
        match self.current_quantity(product_id) {
            0 => self.fail(ValidationError::UnknownItem(product_id.to_owned()).into()),
            1 => self.remove_item(product_id).await,
            current => self.update_quantity(product_id, current - 1).await,
        }
    }

    /// Deletes one line on the server, then re-fetches the cart.
    ///
    /// # Errors
    ///
    /// [`ValidationError::NoCart`] or [`ValidationError::UnknownItem`] without
    /// a network call; otherwise the API failure.
    pub async fn remove_item(&mut self, product_id: &str) -> Result<(), CartError> {
        let cart_id = match self.require_line(product_id) {
            Ok(id) => id,
            Err(err) => return self.fail(err.into()),
        };
        match self.client.remove_item(&cart_id, product_id).await {
            Ok(response) => {
                tracing::info!(product_id, "cart line removed");
                if let Some(message) = response.message {
                    self.notices.success(message);
                }
            }
            Err(err) => return self.fail(err.into()),
        }
        self.fetch_cart().await
    }

    /// Deletes the whole cart on the server, forgets the cart id, then
    /// re-fetches (which yields an empty cart).
    ///
    /// # Errors
    ///
    /// [`ValidationError::NoCart`] without a network call; otherwise the API
    /// failure.
    pub async fn clear_cart(&mut self) -> Result<(), CartError> {
        let Some(cart_id) = self.cart.cart_id.clone() else {
            return self.fail(ValidationError::NoCart.into());
        };
        match self.client.clear_cart(&cart_id).await {
            Ok(response) => {
                tracing::info!(cart_id = %cart_id, "cart cleared");
                self.notices.success(
                    response
                        .message
                        .unwrap_or_else(|| "Cart is cleared successfully.".to_string()),
                );
                self.reset_local();
            }
            Err(err) => return self.fail(err.into()),
        }
        self.fetch_cart().await
    }

    /// Applies a promo code to the totals.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidPromoCode`]; any previously applied code is
    /// dropped.
    pub fn apply_promo(&mut self, code: &str) -> Result<Totals, CartError> {
        match PromoCode::parse(code) {
            Ok(promo) => {
                self.promo = Some(promo);
                let totals = self.totals();
                self.notices
                    .success(format!("Promo code {} applied", promo.code()));
                Ok(totals)
            }
            Err(err) => {
                self.promo = None;
                self.fail(err.into())
            }
        }
    }

    /// Forgets the cart after the server deleted it (clear or checkout).
    pub(crate) fn reset_local(&mut self) {
        self.cart = Cart::default();
        self.promo = None;
    }

    fn current_quantity(&self, product_id: &str) -> i64 {
        self.cart
            .item(product_id)
            .map_or(0, |item| i64::from(item.quantity))
    }

    /// The cart id, provided the cart has one and contains `product_id`.
    fn require_line(&self, product_id: &str) -> Result<String, ValidationError> {
        let cart_id = self.cart.cart_id.clone().ok_or(ValidationError::NoCart)?;
        if self.cart.item(product_id).is_none() {
            return Err(ValidationError::UnknownItem(product_id.to_owned()));
        }
        Ok(cart_id)
    }

    /// Reports `err` to the user and hands it back to the caller.
    fn fail<T>(&mut self, err: CartError) -> Result<T, CartError> {
        if err.is_client_side() {
            tracing::debug!(error = %err, "cart action rejected before sending");
        } else {
            tracing::warn!(error = %err, "cart action failed");
        }
        self.notices.error(err.user_message());
        Err(err)
    }
}
