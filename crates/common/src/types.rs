//! Shared domain types
//!
//! The fundamental vocabulary of the order and position pipeline: which side
//! of the book an order sits on, how it executes, and what is known about an
//! ERC20 asset once its metadata has been resolved.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy the base asset
    Buy,
    /// Sell the base asset
    Sell,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    /// Returns true if this is a buy
    pub fn is_buy(&self) -> bool {
        matches!(self, Side::Buy)
    }

    /// Returns true if this is a sell
    pub fn is_sell(&self) -> bool {
        matches!(self, Side::Sell)
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Market order - fill immediately against the live opposing book
    Market,
    /// Limit order - rest at the specified price
    Limit,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderType::Market => write!(f, "market"),
            OrderType::Limit => write!(f, "limit"),
        }
    }
}

/// Resolved ERC20 metadata for an asset.
///
/// Produced once per address by the chain boundary and attached to every
/// option series that references the asset. `decimals` scales base units to
/// whole tokens; `display_decimals` is how many fractional digits renderers
/// show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Contract address of the token.
    pub address: Address,
    /// Display symbol (e.g., "WETH", "USDC").
    pub symbol: String,
    /// Base-unit scaling exponent.
    pub decimals: u8,
    /// Fractional digits used when rendering amounts.
    pub display_decimals: u8,
}

impl TokenInfo {
    /// Create a new token info record.
    pub fn new(
        address: Address,
        symbol: impl Into<String>,
        decimals: u8,
        display_decimals: u8,
    ) -> Self {
        Self {
            address,
            symbol: symbol.into(),
            decimals,
            display_decimals,
        }
    }
}

impl std::fmt::Display for TokenInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
