//! Error types for the catalog crate.

use chain::ChainError;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while building or querying the catalog.
///
/// A failing metadata or fee lookup fails the whole build; there is no
/// partial catalog.
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    /// The chain boundary failed.
    #[error(transparent)]
    Chain(#[from] ChainError),
}
