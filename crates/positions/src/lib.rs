//! # Positions Crate
//!
//! Per-account position aggregation over the option catalog.
//!
//! ## Key Components
//!
//! - **Record**: [`Position`] - the seven account reads of one series plus
//!   the derived open-position amount
//! - **Aggregator**: [`PositionAggregator`] - issues the reads concurrently,
//!   joins them all-or-nothing, and builds the written / exercisable
//!   listings
//! - **Derivation**: [`derive::open_position_amount`] - the one formula that
//!   turns read fields into net long exposure
//!
//! A failing read fails its enclosing operation everywhere, listings
//! included; nothing is dropped silently.

pub mod aggregator;
pub mod derive;
pub mod error;
pub mod types;

pub use aggregator::{total_collateral, PositionAggregator};
pub use error::{PositionError, PositionResult};
pub use types::Position;
