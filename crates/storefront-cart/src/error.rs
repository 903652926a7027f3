//! Cart store error types.

use storefront_cache::CacheError;
use storefront_commerce::CommerceError;
use storefront_data::FetchError;
use thiserror::Error;

/// Errors returned by [`crate::CartStore`].
#[derive(Error, Debug)]
pub enum CartError {
    /// Domain rule violated; the cart is unchanged.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// A backend collaborator failed.
    #[error("Collaborator error: {0}")]
    Collaborator(#[from] FetchError),

    /// Explicit storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] CacheError),
}

impl CartError {
    pub fn is_submission_in_progress(&self) -> bool {
        matches!(self, CartError::Commerce(CommerceError::SubmissionInProgress))
    }

    pub fn is_checkout_incomplete(&self) -> bool {
        matches!(self, CartError::Commerce(CommerceError::CheckoutIncomplete(_)))
    }
}
