//! Building and costing market and limit orders.

use crate::error::{OrderError, OrderResult};
use crate::types::{CounterOrder, Fill, FillPlan, LimitQuote, MarketQuote};
use chain::{FeeQuoteRequest, FeeQuoter};
use chrono::Utc;
use common::{quote_value, Side, U256};
use tracing::debug;

/// Quote-token cost of `amount` base units at `price`.
///
/// `price` is quote base units per whole base token, so the product is
/// scaled down by the base token's decimals.
pub fn limit_cost(amount: U256, price: U256, base_decimals: u8) -> OrderResult<U256> {
    quote_value(amount, price, base_decimals).ok_or(OrderError::ValueOverflow(amount, price))
}

/// Cost a limit order and fetch its maker/taker fees from the quoting
/// collaborator. The fee quote is parameterized by the order's amount,
/// price, side, and an expiration `horizon_secs` from now.
pub async fn quote_limit_order<F: FeeQuoter>(
    quoter: &F,
    amount: U256,
    price: U256,
    side: Side,
    base_decimals: u8,
    horizon_secs: u64,
) -> OrderResult<LimitQuote> {
    let now_unix = Utc::now().timestamp().max(0) as u64;
    quote_limit_order_at(quoter, amount, price, side, base_decimals, horizon_secs, now_unix).await
}

/// [`quote_limit_order`] with an explicit current time.
pub async fn quote_limit_order_at<F: FeeQuoter>(
    quoter: &F,
    amount: U256,
    price: U256,
    side: Side,
    base_decimals: u8,
    horizon_secs: u64,
    now_unix: u64,
) -> OrderResult<LimitQuote> {
    let cost = limit_cost(amount, price, base_decimals)?;
    let fees = quoter
        .order_fees(&FeeQuoteRequest {
            amount,
            price,
            expiration_unix: now_unix + horizon_secs,
            side,
        })
        .await?;
    Ok(LimitQuote { cost, fees })
}

/// Greedily plan fills for a market order against the opposing book.
///
/// `book` is the opposing side's resting orders: sell orders when buying,
/// buy orders when selling. Fills walk from best price outward (cheapest
/// asks first for a buy, highest bids first for a sell; ties keep the
/// book's own order) until the requested amount is exhausted or the book
/// runs dry. An unfillable plan covers exactly the available liquidity.
pub fn build_market_fill(amount: U256, book: &[CounterOrder], side: Side) -> FillPlan {
    let mut orders: Vec<CounterOrder> = book.to_vec();
    match side {
        Side::Buy => orders.sort_by(|a, b| a.price.cmp(&b.price)),
        Side::Sell => orders.sort_by(|a, b| b.price.cmp(&a.price)),
    }

    let mut remaining = amount;
    let mut fills = Vec::new();
    for order in orders {
        if remaining.is_zero() {
            break;
        }
        let take = remaining.min(order.available);
        if take.is_zero() {
            continue;
        }
        remaining -= take;
        fills.push(Fill {
            order,
            amount: take,
        });
    }

    FillPlan {
        fillable: remaining.is_zero(),
        filled: amount - remaining,
        requested: amount,
        fills,
    }
}

/// Plan and cost a market order.
///
/// The aggregate taker fee is the sum of every consumed order's individual
/// taker fee; the fee asset comes from the first consumed order that
/// declares one.
pub fn quote_market_order(
    amount: U256,
    book: &[CounterOrder],
    side: Side,
    base_decimals: u8,
) -> OrderResult<MarketQuote> {
    let plan = build_market_fill(amount, book, side);
    debug!(
        %side,
        orders = plan.order_count(),
        fillable = plan.fillable,
        "planned market fills"
    );

    let mut cost = U256::ZERO;
    let mut taker_fee = U256::ZERO;
    for fill in &plan.fills {
        let value = quote_value(fill.amount, fill.order.price, base_decimals)
            .and_then(|v| cost.checked_add(v))
            .ok_or(OrderError::ValueOverflow(fill.amount, fill.order.price))?;
        cost = value;
        taker_fee = taker_fee.saturating_add(fill.order.taker_fee);
    }
    let taker_fee_asset = plan.fills.iter().find_map(|f| f.order.taker_fee_asset);

    Ok(MarketQuote {
        plan,
        cost,
        taker_fee,
        taker_fee_asset,
    })
}
