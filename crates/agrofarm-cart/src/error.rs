use agrofarm_client::ApiError;
use agrofarm_core::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartError {
    /// A precondition failed; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl CartError {
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CartError::Validation(err) => err.to_string(),
            CartError::Api(err) => err.user_message().to_owned(),
        }
    }

    /// `true` when the error was raised before any network call.
    #[must_use]
    pub fn is_client_side(&self) -> bool {
        matches!(self, CartError::Validation(_))
    }
}
