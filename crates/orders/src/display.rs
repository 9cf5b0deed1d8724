//! Rendering of cost and fee amounts for display.

use crate::types::MarketQuote;
use common::{format_units, TokenInfo, U256};

/// Placeholder shown when a market order cannot be fully filled.
const UNFILLABLE: &str = "---";

/// Render a quote-token cost, e.g. `"200.00 USDC"`.
pub fn cost_string(cost: U256, quote_token: &TokenInfo) -> String {
    format!(
        "{} {}",
        format_units(cost, quote_token.decimals, quote_token.display_decimals),
        quote_token.symbol
    )
}

/// Render a market order's cost, or `"---"` when the book could not satisfy
/// the requested amount.
pub fn market_cost_string(quote: &MarketQuote, quote_token: &TokenInfo) -> String {
    if !quote.plan.fillable {
        return UNFILLABLE.to_string();
    }
    cost_string(quote.cost, quote_token)
}

/// Render a fee amount in its fee token. A `None` fee token is the
/// null-asset marker: the fee renders as `"0.00"` with no symbol.
pub fn fee_string(fee: U256, fee_token: Option<&TokenInfo>) -> String {
    match fee_token {
        Some(token) => format!(
            "{} {}",
            format_units(fee, token.decimals, token.display_decimals),
            token.symbol
        ),
        None => "0.00".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::quote_market_order;
    use crate::types::CounterOrder;
    use alloy_primitives::address;
    use common::{pow10, Address, Side, B256};

    const USDC: Address = address!("0000000000000000000000000000000000000003");

    fn usdc() -> TokenInfo {
        TokenInfo::new(USDC, "USDC", 6, 2)
    }

    fn ask(price_quote_units: u64, available_whole: u64) -> CounterOrder {
        CounterOrder {
            order_id: B256::repeat_byte(1),
            price: U256::from(price_quote_units) * pow10(6),
            available: U256::from(available_whole) * pow10(18),
            taker_fee: U256::ZERO,
            taker_fee_asset: None,
        }
    }

    #[test]
    fn test_fillable_market_cost_renders_amount_and_symbol() {
        let quote =
            quote_market_order(U256::from(2u8) * pow10(18), &[ask(100, 5)], Side::Buy, 18).unwrap();
        assert_eq!(market_cost_string(&quote, &usdc()), "200.00 USDC");
    }

    #[test]
    fn test_unfillable_market_cost_renders_placeholder() {
        let quote =
            quote_market_order(U256::from(9u8) * pow10(18), &[ask(100, 5)], Side::Buy, 18).unwrap();
        assert_eq!(market_cost_string(&quote, &usdc()), "---");
    }

    #[test]
    fn test_fee_string_suppresses_symbol_for_null_asset() {
        assert_eq!(fee_string(U256::from(123u8), None), "0.00");
        assert_eq!(
            fee_string(U256::from(1_500_000u64), Some(&usdc())),
            "1.50 USDC"
        );
    }
}
