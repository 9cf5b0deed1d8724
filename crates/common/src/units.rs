//! Fixed-point token-amount arithmetic
//!
//! All on-chain amounts are integers scaled by the owning token's decimals.
//! These helpers convert between base units and display units and price a
//! base-token amount in quote-token base units.

use alloy_primitives::U256;

/// `10^exp` as a `U256`.
pub fn pow10(exp: u8) -> U256 {
    U256::from(10u8).pow(U256::from(exp))
}

/// Value of `amount` base units of the base token, priced in quote base
/// units, where `price` is quote base units per whole base token.
///
/// `amount * price / 10^base_decimals`. Returns `None` when the intermediate
/// product overflows 256 bits.
pub fn quote_value(amount: U256, price: U256, base_decimals: u8) -> Option<U256> {
    amount.checked_mul(price).map(|p| p / pow10(base_decimals))
}

/// Render a base-unit amount as a decimal string with `display_decimals`
/// fractional digits. Extra precision is truncated, missing precision is
/// zero-padded.
pub fn format_units(amount: U256, decimals: u8, display_decimals: u8) -> String {
    let scale = pow10(decimals);
    let whole = amount / scale;
    let frac = amount % scale;
    if display_decimals == 0 {
        return whole.to_string();
    }
    let mut digits = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    if (display_decimals as usize) <= digits.len() {
        digits.truncate(display_decimals as usize);
    } else {
        let pad = display_decimals as usize - digits.len();
        digits.push_str(&"0".repeat(pad));
    }
    format!("{whole}.{digits}")
}
