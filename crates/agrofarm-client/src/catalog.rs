//! Product catalog and wishlist endpoints.

use agrofarm_core::Product;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::{MessageResponse, ProductIdBody, ProductsResponse};

impl ApiClient {
    /// Lists every product on the marketplace. Filtering happens client-side.
    /// Entries that do not decode are logged and skipped.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Network`] on transport failure.
    /// - [`ApiError::Server`] on a non-2xx status.
    /// - [`ApiError::Deserialize`] if the body is not a product list.
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.product_list(&["products", "all"], "GET products/all")
            .await
    }

    /// Products other farmers offer to the signed-in farmer.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::list_products`].
    pub async fn list_farmer_products(&self) -> Result<Vec<Product>, ApiError> {
        self.product_list(
            &["products", "productForFarmer"],
            "GET products/productForFarmer",
        )
        .await
    }

    /// Products listed by one farmer.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::list_products`].
    pub async fn list_products_by_farmer(&self, farmer_id: &str) -> Result<Vec<Product>, ApiError> {
        self.product_list(&["farmers", "farmer", farmer_id], "GET farmers/farmer/:id")
            .await
    }

    async fn product_list(&self, segments: &[&str], context: &str) -> Result<Vec<Product>, ApiError> {
        let url = self.endpoint(segments);
        let response: ProductsResponse = self.execute(self.http().get(url), context).await?;
        Ok(response.into_products(context))
    }

    /// # Errors
    ///
    /// See [`ApiClient::list_products`].
    pub async fn add_to_wishlist(&self, product_id: &str) -> Result<MessageResponse, ApiError> {
        let url = self.endpoint(&["wishlist", "add"]);
        self.execute(
            self.http().post(url).json(&ProductIdBody { product_id }),
            "POST wishlist/add",
        )
        .await
    }
}
