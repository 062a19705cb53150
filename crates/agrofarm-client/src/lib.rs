//! HTTP client for the AgroFarm marketplace REST API.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod client;
pub mod error;
pub mod order;
pub mod types;

pub use client::ApiClient;
pub use error::{ApiError, GENERIC_FAILURE_MESSAGE};
pub use types::{
    FarmerAccount, LoginResponse, MessageResponse, PlaceOrderResponse, PlacedOrder,
};
