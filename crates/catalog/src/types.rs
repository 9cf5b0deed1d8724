//! Core domain types for the option catalog.
//!
//! - `OptionSeries`: one deployed option token and everything resolved about
//!   it at discovery time
//! - `OptionKind`: call or put
//! - `Pair`: an underlying/strike symbol pairing that groups series
//! - `PairId`: the pair's identity string

use chrono::Utc;
use common::{Address, TokenInfo, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of option: call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Call option - right to buy the underlying at the strike.
    Call,
    /// Put option - right to sell the underlying at the strike.
    Put,
}

impl OptionKind {
    /// Get the short code for the kind.
    pub fn code(&self) -> &'static str {
        match self {
            OptionKind::Call => "C",
            OptionKind::Put => "P",
        }
    }

    /// True when `is_call` describes this kind.
    pub fn matches(&self, is_call: bool) -> bool {
        match self {
            OptionKind::Call => is_call,
            OptionKind::Put => !is_call,
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Call => write!(f, "Call"),
            OptionKind::Put => write!(f, "Put"),
        }
    }
}

/// Identity of a pair: `"{underlying_symbol}_{strike_symbol}"`.
///
/// Identity is the symbol pairing alone. Two assets sharing a display symbol
/// collapse into one pair; the catalog keeps the first-seen addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairId(String);

impl PairId {
    /// Build a pair id from the two display symbols.
    pub fn from_symbols(underlying: &str, strike: &str) -> Self {
        Self(format!("{}_{}", underlying, strike))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One deployed option token, as discovered from a factory creation event
/// and enriched with resolved metadata. Immutable once discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSeries {
    /// Address of the option token contract.
    pub address: Address,
    /// Underlying asset address.
    pub underlying: Address,
    /// Strike asset address.
    pub strike_asset: Address,
    /// Expiry timestamp, unix seconds.
    pub expiry: u64,
    /// Call when true, put otherwise.
    pub is_call: bool,
    /// Metadata of the option token itself.
    pub token_info: TokenInfo,
    /// Metadata of the underlying asset.
    pub underlying_info: TokenInfo,
    /// Metadata of the strike asset.
    pub strike_info: TokenInfo,
    /// Protocol fee charged by this series.
    pub protocol_fee: U256,
}

impl OptionSeries {
    /// Kind of this series.
    pub fn kind(&self) -> OptionKind {
        if self.is_call {
            OptionKind::Call
        } else {
            OptionKind::Put
        }
    }

    /// Identity of the pair this series belongs to.
    pub fn pair_id(&self) -> PairId {
        PairId::from_symbols(&self.underlying_info.symbol, &self.strike_info.symbol)
    }

    /// Expiry in unix milliseconds.
    pub fn expiry_millis(&self) -> i64 {
        (self.expiry as i64) * 1000
    }

    /// True when the series is still live at `now_millis`. The cutoff is
    /// strict: a series expiring exactly now is no longer live.
    pub fn is_live_at(&self, now_millis: i64) -> bool {
        self.expiry_millis() > now_millis
    }

    /// True when the series has expired.
    pub fn is_expired(&self) -> bool {
        !self.is_live_at(Utc::now().timestamp_millis())
    }

    /// True when this series trades under `pair` (symbol comparison, the
    /// same identity rule as [`PairId`]).
    pub fn in_pair(&self, pair: &Pair) -> bool {
        self.underlying_info.symbol == pair.underlying_info.symbol
            && self.strike_info.symbol == pair.strike_info.symbol
    }
}

impl fmt::Display for OptionSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} @ {}",
            self.token_info.symbol,
            self.kind().code(),
            self.expiry
        )
    }
}

/// An underlying/strike grouping of option series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    /// Identity string, `"{underlying_symbol}_{strike_symbol}"`.
    pub id: PairId,
    /// Underlying asset address (first seen for this symbol pairing).
    pub underlying: Address,
    /// Underlying asset metadata.
    pub underlying_info: TokenInfo,
    /// Strike asset address (first seen for this symbol pairing).
    pub strike_asset: Address,
    /// Strike asset metadata.
    pub strike_info: TokenInfo,
}

impl Pair {
    /// Build the pair a series belongs to.
    pub fn of(series: &OptionSeries) -> Self {
        Self {
            id: series.pair_id(),
            underlying: series.underlying,
            underlying_info: series.underlying_info.clone(),
            strike_asset: series.strike_asset,
            strike_info: series.strike_info.clone(),
        }
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
