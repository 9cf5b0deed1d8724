//! Common types and utilities for Optionbook
//!
//! This crate provides the shared domain primitives used across all
//! Optionbook crates.
//!
//! # Modules
//!
//! - [`types`] - Shared domain types (Side, OrderType, TokenInfo)
//! - [`units`] - Fixed-point token-amount arithmetic and formatting
//!
//! Chain identifiers and amounts are re-exported from `alloy-primitives`:
//! every amount in this workspace is a `U256` in token base units, every
//! asset identity an `Address`.

pub mod types;
pub mod units;

pub use alloy_primitives::{Address, B256, U256};
pub use types::{OrderType, Side, TokenInfo};
pub use units::{format_units, pow10, quote_value};
