//! Error types for position aggregation.

use catalog::CatalogError;
use chain::ChainError;
use common::Address;
use thiserror::Error;

/// Result type alias for position operations.
pub type PositionResult<T> = Result<T, PositionError>;

/// Errors that can occur while aggregating or redeeming positions.
///
/// A failing read fails the enclosing aggregation, single or list; there is
/// no partial position and no silently dropped entry.
#[derive(Error, Debug, Clone)]
pub enum PositionError {
    /// The chain boundary failed.
    #[error(transparent)]
    Chain(#[from] ChainError),

    /// The catalog could not supply the pair's option series.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Redeem was requested for a series that has not expired.
    #[error("Option series {0} has not expired")]
    NotExpired(Address),
}
