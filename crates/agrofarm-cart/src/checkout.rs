//! Checkout form state machine and order confirmation.
//!
//! ```text
//! Closed --open--> Open --submit--> Submitting --ok--> Closed
//!                   ^  \                  |
//!                   |   `--cancel--> Closed
//!                   `-----rejected--------'
//! ```
//!
//! While `Submitting`, further submits are refused. If the in-flight submit
//! future is dropped (the caller navigated away), the machine falls back to
//! `Open` with the form intact instead of staying stuck in `Submitting`.

use std::mem;

use agrofarm_client::PlacedOrder;
use agrofarm_core::{
    CheckoutField, CheckoutForm, FieldErrors, PaymentMethod, PlaceOrderRequest, ValidationError,
};

use crate::error::CartError;
use crate::store::CartStore;

const CANCELLED_MESSAGE: &str = "request cancelled before the order was confirmed";
const ORDER_PLACED_MESSAGE: &str = "Order placed successfully!";

/// Where the front-end should go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    OrderHistory,
}

impl Route {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Route::OrderHistory => "/buyer/myorders",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub message: String,
    pub order: Option<PlacedOrder>,
    pub redirect: Route,
}

/// An open checkout modal: the form plus whatever errors it is showing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenForm {
    pub form: CheckoutForm,
    pub field_errors: FieldErrors,
    /// Inline error from the last failed submission.
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CheckoutState {
    #[default]
    Closed,
    Open(OpenForm),
    Submitting(CheckoutForm),
}

#[derive(Debug, Default)]
pub struct CheckoutFlow {
    state: CheckoutState,
}

impl CheckoutFlow {
    #[must_use]
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self.state, CheckoutState::Open(_))
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self.state, CheckoutState::Submitting(_))
    }

    #[must_use]
    pub fn form(&self) -> Option<&CheckoutForm> {
        match &self.state {
            CheckoutState::Open(open) => Some(&open.form),
            CheckoutState::Submitting(form) => Some(form),
            CheckoutState::Closed => None,
        }
    }

    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match &self.state {
            CheckoutState::Open(open) => Some(&open.field_errors),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            CheckoutState::Open(open) => open.error.as_deref(),
            _ => None,
        }
    }

    /// "Proceed to Checkout". Only available with a non-empty cart. Opening
    /// an already open form keeps what was typed.
    ///
    /// # Errors
    ///
    /// [`ValidationError::EmptyCart`] or [`ValidationError::SubmissionInFlight`].
    pub fn open(&mut self, store: &CartStore) -> Result<(), CartError> {
        match self.state {
            CheckoutState::Open(_) => Ok(()),
            CheckoutState::Submitting(_) => Err(ValidationError::SubmissionInFlight.into()),
            CheckoutState::Closed if store.cart().is_empty() => {
                Err(ValidationError::EmptyCart.into())
            }
            CheckoutState::Closed => {
                self.state = CheckoutState::Open(OpenForm::default());
                Ok(())
            }
        }
    }

    /// Direct access to the fields while the form is open and editable.
    pub fn form_mut(&mut self) -> Option<&mut CheckoutForm> {
        self.open_form_mut().ok().map(|open| &mut open.form)
    }

    /// # Errors
    ///
    /// [`ValidationError::CheckoutNotOpen`] unless the form is open.
    pub fn set_field(&mut self, field: CheckoutField, value: &str) -> Result<(), CartError> {
        self.open_form_mut()?.form.set(field, value);
        Ok(())
    }

    /// # Errors
    ///
    /// [`ValidationError::CheckoutNotOpen`] unless the form is open.
    pub fn set_payment_method(&mut self, method: PaymentMethod) -> Result<(), CartError> {
        self.open_form_mut()?.form.payment_method = method;
        Ok(())
    }

    /// Closes the form and discards every field. No request is made.
    /// Returns whether anything was open.
    pub fn cancel(&mut self) -> bool {
        !matches!(
            mem::replace(&mut self.state, CheckoutState::Closed),
            CheckoutState::Closed
        )
    }

    /// Places the order for the store's cart.
    ///
    /// The cart id and the required fields are checked first; either failure
    /// leaves the form open and sends nothing. A server rejection also leaves
    /// the form open and populated, with the server's message inline. On
    /// success the local cart is emptied and re-fetched, the form closes, and
    /// the caller is pointed at the order history.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::CheckoutNotOpen`] / [`ValidationError::SubmissionInFlight`]
    ///   if the form is not in a submittable state.
    /// - [`ValidationError::NoCart`] or [`ValidationError::Fields`] before any request.
    /// - [`CartError::Api`] if the server rejects the order.
    pub async fn submit(&mut self, store: &mut CartStore) -> Result<OrderConfirmation, CartError> {
        let open = match mem::take(&mut self.state) {
            CheckoutState::Open(open) => open,
            CheckoutState::Submitting(form) => {
                self.state = CheckoutState::Submitting(form);
                return Err(ValidationError::SubmissionInFlight.into());
            }
            CheckoutState::Closed => return Err(ValidationError::CheckoutNotOpen.into()),
        };
        let form = open.form;

        let Some(cart_id) = store.cart_id().map(str::to_owned) else {
            let err = CartError::from(ValidationError::NoCart);
            store.notices_mut().error(err.user_message());
            self.state = CheckoutState::Open(OpenForm {
                form,
                field_errors: FieldErrors::default(),
                error: Some(err.user_message()),
            });
            return Err(err);
        };

        if let Err(field_errors) = form.validate() {
            tracing::debug!(missing = %field_errors, "checkout form incomplete");
            self.state = CheckoutState::Open(OpenForm {
                form,
                field_errors: field_errors.clone(),
                error: None,
            });
            return Err(ValidationError::Fields(field_errors).into());
        }

        let request = PlaceOrderRequest::from_form(&cart_id, &form);
        let in_flight = InFlight::begin(&mut self.state, form);
        let result = store.client().place_order(&request).await;
        let form = in_flight.finish();

        match result {
            Ok(response) => {
                tracing::info!(cart_id = %cart_id, payment = %request.payment_method, "order placed");
                self.state = CheckoutState::Closed;
                store.reset_local();
                store.notices_mut().success(ORDER_PLACED_MESSAGE);
                if let Err(err) = store.fetch_cart().await {
                    tracing::warn!(error = %err, "cart refresh after order failed");
                }
                Ok(OrderConfirmation {
                    message: response
                        .message
                        .unwrap_or_else(|| ORDER_PLACED_MESSAGE.to_string()),
                    order: response.order,
                    redirect: Route::OrderHistory,
                })
            }
            Err(err) => {
                tracing::warn!(error = %err, "order rejected");
                let message = err.user_message().to_owned();
                store.notices_mut().error(message.clone());
                self.state = CheckoutState::Open(OpenForm {
                    form,
                    field_errors: FieldErrors::default(),
                    error: Some(message),
                });
                Err(err.into())
            }
        }
    }

    fn open_form_mut(&mut self) -> Result<&mut OpenForm, ValidationError> {
        match &mut self.state {
            CheckoutState::Open(open) => Ok(open),
            _ => Err(ValidationError::CheckoutNotOpen),
        }
    }
}

/// Holds the machine in `Submitting` for the duration of the request. If
/// dropped without [`InFlight::finish`], reopens the form with a
/// cancellation notice.
struct InFlight<'a> {
    state: &'a mut CheckoutState,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn begin(state: &'a mut CheckoutState, form: CheckoutForm) -> Self {
        *state = CheckoutState::Submitting(form);
        Self { state, armed: true }
    }

    fn finish(mut self) -> CheckoutForm {
        self.armed = false;
        take_form(self.state)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            let form = take_form(self.state);
            *self.state = CheckoutState::Open(OpenForm {
                form,
                field_errors: FieldErrors::default(),
                error: Some(CANCELLED_MESSAGE.to_string()),
            });
        }
    }
}

fn take_form(state: &mut CheckoutState) -> CheckoutForm {
    match mem::take(state) {
        CheckoutState::Submitting(form) | CheckoutState::Open(OpenForm { form, .. }) => form,
        CheckoutState::Closed => CheckoutForm::default(),
    }
}

#[cfg(test)]
mod tests {
    use agrofarm_client::ApiClient;

    use super::*;

    fn offline_store() -> CartStore {
        // Nothing in these tests reaches the network.
        let client = ApiClient::with_base_url("http://127.0.0.1:9", 1).expect("valid client");
        CartStore::new(client)
    }

    #[test]
    fn cannot_open_with_empty_cart() {
        let store = offline_store();
        let mut flow = CheckoutFlow::default();
        let err = flow.open(&store).unwrap_err();
        assert!(matches!(
            err,
            CartError::Validation(ValidationError::EmptyCart)
        ));
        assert_eq!(flow.state(), &CheckoutState::Closed);
    }

    #[test]
    fn editing_requires_open_form() {
        let mut flow = CheckoutFlow::default();
        assert!(flow.set_field(CheckoutField::City, "Lahore").is_err());
        assert!(flow.set_payment_method(PaymentMethod::Jazzcash).is_err());
    }

    #[test]
    fn cancel_discards_fields() {
        let mut flow = CheckoutFlow {
            state: CheckoutState::Open(OpenForm::default()),
        };
        flow.set_field(CheckoutField::Street, "123 Farming Lane")
            .unwrap();
        flow.form_mut().unwrap().notes = "leave at gate".to_string();
        assert_eq!(flow.form().unwrap().notes, "leave at gate");
        assert!(flow.cancel());
        assert!(flow.form_mut().is_none());
        assert!(flow.form().is_none());
        assert!(!flow.cancel());
    }

    #[tokio::test]
    async fn submit_when_closed_is_rejected() {
        let mut store = offline_store();
        let mut flow = CheckoutFlow::default();
        let err = flow.submit(&mut store).await.unwrap_err();
        assert!(matches!(
            err,
            CartError::Validation(ValidationError::CheckoutNotOpen)
        ));
    }

    #[tokio::test]
    async fn second_submit_while_in_flight_is_refused() {
        let mut store = offline_store();
        let form = CheckoutForm {
            city: "Multan".to_string(),
            ..CheckoutForm::default()
        };
        let mut flow = CheckoutFlow {
            state: CheckoutState::Submitting(form.clone()),
        };
        let err = flow.submit(&mut store).await.unwrap_err();
        assert!(matches!(
            err,
            CartError::Validation(ValidationError::SubmissionInFlight)
        ));
        assert_eq!(flow.state(), &CheckoutState::Submitting(form));
    }

    #[tokio::test]
    async fn submit_without_cart_id_stays_open_with_error() {
        let mut store = offline_store();
        let mut flow = CheckoutFlow {
            state: CheckoutState::Open(OpenForm::default()),
        };
        flow.set_field(CheckoutField::FullName, "Ahmad Khan").unwrap();

        let err = flow.submit(&mut store).await.unwrap_err();
        assert!(matches!(err, CartError::Validation(ValidationError::NoCart)));
        assert!(flow.is_open());
        assert_eq!(flow.form().unwrap().full_name, "Ahmad Khan");
        assert!(flow.error().is_some());
        assert_eq!(store.drain_notices().len(), 1);
    }

    #[test]
    fn dropped_in_flight_guard_reopens_form() {
        let mut state = CheckoutState::Closed;
        let form = CheckoutForm {
            street: "123 Farming Lane".to_string(),
            ..CheckoutForm::default()
        };
        {
            let _guard = InFlight::begin(&mut state, form);
        }
        match state {
            CheckoutState::Open(open) => {
                assert_eq!(open.form.street, "123 Farming Lane");
                assert_eq!(open.error.as_deref(), Some(CANCELLED_MESSAGE));
            }
            other => panic!("expected Open, got {other:?}"),
        }
    }

    #[test]
    fn finished_guard_hands_back_form() {
        let mut state = CheckoutState::Closed;
        let form = CheckoutForm {
            city: "Lahore".to_string(),
            ..CheckoutForm::default()
        };
        let guard = InFlight::begin(&mut state, form);
        let form = guard.finish();
        assert_eq!(form.city, "Lahore");
        assert_eq!(state, CheckoutState::Closed);
    }

    #[test]
    fn order_history_route() {
        assert_eq!(Route::OrderHistory.path(), "/buyer/myorders");
    }
}
