//! Stateful cart and checkout components.
//!
//! [`CartStore`] is the single source of truth for cart contents and is
//! re-synchronised from the server after every mutation. [`CheckoutFlow`]
//! owns the checkout form and drives order placement against a store.
//! Every failure is turned into a [`Notice`] for the user and returned as a
//! [`CartError`]; none of them are fatal.

pub mod checkout;
pub mod error;
pub mod notice;
pub mod store;

pub use checkout::{CheckoutFlow, CheckoutState, OpenForm, OrderConfirmation, Route};
pub use error::CartError;
pub use notice::{Notice, NoticeLevel, Notices};
pub use store::{CartStore, LoadState};
