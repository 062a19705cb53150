//! Domain types, validation and configuration shared by every AgroFarm crate.
//!
//! Nothing in here performs I/O beyond reading environment variables; the
//! HTTP side lives in `agrofarm-client` and the stateful components in
//! `agrofarm-cart`.

pub mod app_config;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod order;
pub mod pricing;
pub mod products;
pub mod session;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use auth::{Credentials, PasswordChange, PasswordReset, ProfileUpdate, SignupForm};
pub use cart::{validate_quantity, Cart, CartItem};
pub use checkout::{CheckoutField, CheckoutForm, FieldError, FieldErrors, PaymentMethod};
pub use config::{load_app_config, load_app_config_from_env};
pub use order::{OrderStatus, PlaceOrderRequest};
pub use pricing::{format_rupees, PromoCode, Totals};
pub use products::{filter_products, Category, Product};
pub use session::{Role, Session, UserProfile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// A client-side precondition failed before any request was sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No cart found. Please add items to your cart first.")]
    NoCart,

    #[error("quantity must be at least 1 (got {quantity})")]
    QuantityBelowMinimum { quantity: i64 },

    #[error("quantity {quantity} is too large")]
    QuantityTooLarge { quantity: i64 },

    #[error("your cart is empty")]
    EmptyCart,

    #[error("please fill in the required fields: {0}")]
    Fields(FieldErrors),

    #[error("Invalid promo code: {0}")]
    InvalidPromoCode(String),

    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("All fields are required for signup")]
    MissingSignupFields,

    #[error("Currently, only Farmer authentication is supported (requested {0})")]
    UnsupportedRole(Role),

    #[error("All password fields are required")]
    MissingPasswordFields,

    #[error("New passwords do not match")]
    PasswordMismatch,

    #[error("checkout is not open")]
    CheckoutNotOpen,

    #[error("an order is already being placed")]
    SubmissionInFlight,

    #[error("item {0} is not in your cart")]
    UnknownItem(String),
}
