//! Error types for order building.

use chain::ChainError;
use thiserror::Error;

/// Result type alias for order operations.
pub type OrderResult<T> = Result<T, OrderError>;

/// Errors that can occur while building or quoting an order.
#[derive(Error, Debug, Clone)]
pub enum OrderError {
    /// The fee-quoting collaborator failed.
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// An amount-times-price product overflowed 256 bits.
    #[error("Quote value overflow: {0} base units at price {1}")]
    ValueOverflow(common::U256, common::U256),
}
