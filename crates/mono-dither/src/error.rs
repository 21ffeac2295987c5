//! Error type for the mono-dither public API.

use thiserror::Error;

/// Errors returned by [`dither`](crate::dither) and
/// [`DitherConfig::validate`](crate::DitherConfig::validate).
///
/// Dithering is total over well-formed input, so the only failure is a
/// violated precondition on the caller's side.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DitherError {
    /// Buffer length, dimensions or cutoff do not satisfy the contract.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl DitherError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        DitherError::InvalidInput(msg.into())
    }
}
