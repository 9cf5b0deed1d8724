//! # Orders Crate
//!
//! Building and costing orders against the relayer's book.
//!
//! ## Key Components
//!
//! - **Types**: [`CounterOrder`], [`Fill`], [`FillPlan`], [`MarketQuote`],
//!   [`LimitQuote`]
//! - **Builder**: [`build_market_fill`] walks the opposing book greedily
//!   from best price outward; [`quote_market_order`] and
//!   [`quote_limit_order`] attach costs and fees
//! - **Display**: string rendering of costs and fees, including the
//!   unfillable placeholder and null-fee-asset suppression
//!
//! All amounts are fixed-point base units; prices are quote base units per
//! whole base token.

pub mod builder;
pub mod display;
pub mod error;
pub mod types;

pub use builder::{build_market_fill, limit_cost, quote_limit_order, quote_market_order};
pub use display::{cost_string, fee_string, market_cost_string};
pub use error::{OrderError, OrderResult};
pub use types::{CounterOrder, Fill, FillPlan, LimitQuote, MarketQuote};
