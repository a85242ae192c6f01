//! Error types for conversion operations.

use thiserror::Error;

/// Errors surfaced to the user by a rate fetch or conversion.
///
/// Every variant is recoverable: the converter stays in its previous
/// state (with `loading` cleared) and the caller decides how to show the
/// message. Non-numeric amounts are not an error at all; `convert`
/// renders them as `"0"`.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Transport-level failure: DNS, connect, timeout, interrupted body.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered, but with a failure status or an
    /// undecodable body.
    #[error("rate provider error: {0}")]
    Provider(String),

    /// The returned rate table has no usable factor for the target code.
    #[error("no conversion rate from {from} to {to}")]
    RateUnavailable { from: String, to: String },
}
