//! # Catalog Crate
//!
//! Discovery and caching of every option series the factory ever created.
//!
//! ## Key Components
//!
//! - **Domain Types**: [`OptionSeries`], [`OptionKind`], [`Pair`], [`PairId`]
//! - **Catalog**: [`OptionCatalog`] - an explicit, caller-owned cache with
//!   load-once semantics and explicit `refresh`/`invalidate`
//!
//! The catalog scans the factory's creation events from the configured
//! genesis block to the latest block exactly once, resolves token metadata
//! and protocol fees for everything it found in one parallel fan-out, and
//! then answers every query from the cached snapshot.

pub mod catalog;
pub mod error;
pub mod types;

pub use catalog::OptionCatalog;
pub use error::{CatalogError, CatalogResult};
pub use types::{OptionKind, OptionSeries, Pair, PairId};
