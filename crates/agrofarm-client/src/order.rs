use agrofarm_core::PlaceOrderRequest;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::types::PlaceOrderResponse;

impl ApiClient {
    /// Places an order for the referenced cart. No idempotency key is sent,
    /// so callers must not issue this twice for one checkout.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Network`] on transport failure.
    /// - [`ApiError::Server`] when the server rejects the order; the
    ///   message (e.g. `"Out of stock"`) is carried verbatim.
    /// - [`ApiError::Deserialize`] on an unexpected body.
    pub async fn place_order(
        &self,
        request: &PlaceOrderRequest,
    ) -> Result<PlaceOrderResponse, ApiError> {
        let url = self.endpoint(&["v1", "order", "place-order"]);
        self.execute(
            self.http().post(url).json(request),
            "POST v1/order/place-order",
        )
        .await
    }
}
