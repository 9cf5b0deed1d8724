//! Order-book and fill-plan types.

use common::{Address, B256, U256};
use serde::{Deserialize, Serialize};

/// A resting counter-order on the opposing side of the book, as the relayer
/// reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterOrder {
    /// Order hash assigned by the relayer.
    pub order_id: B256,
    /// Price in quote base units per whole base token.
    pub price: U256,
    /// Unfilled base-token amount, base units.
    pub available: U256,
    /// Taker fee charged when this order is consumed. Not prorated: a
    /// partial fill still pays the order's full taker fee.
    pub taker_fee: U256,
    /// Asset the taker fee is denominated in. `None` is the null-asset
    /// marker: no fee token.
    pub taker_fee_asset: Option<Address>,
}

/// One consumed counter-order and the amount taken from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    /// The consumed order.
    pub order: CounterOrder,
    /// Base-token amount taken, base units. At most `order.available`.
    pub amount: U256,
}

/// The fill plan for a market order: the counter-orders to consume, best
/// price outward, and whether the book could satisfy the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillPlan {
    /// Fills in consumption order.
    pub fills: Vec<Fill>,
    /// The requested base-token amount.
    pub requested: U256,
    /// The amount the plan actually covers. Equals `requested` when
    /// `fillable`, the book's total liquidity otherwise.
    pub filled: U256,
    /// False when the book ran dry before the request was satisfied.
    pub fillable: bool,
}

impl FillPlan {
    /// Number of counter-orders the plan consumes.
    pub fn order_count(&self) -> usize {
        self.fills.len()
    }
}

/// A fully costed market order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketQuote {
    /// The plan the cost and fee are computed from.
    pub plan: FillPlan,
    /// Quote-token cost of the planned fills, base units.
    pub cost: U256,
    /// Sum of the consumed orders' taker fees.
    pub taker_fee: U256,
    /// Fee asset of the first consumed order that declares one. Assumed
    /// homogeneous across the filled set; a mixed book is not detected.
    pub taker_fee_asset: Option<Address>,
}

/// A fully costed limit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitQuote {
    /// Quote-token cost of the full amount at the limit price, base units.
    pub cost: U256,
    /// Maker/taker fees quoted by the collaborator.
    pub fees: chain::OrderFeeQuote,
}
