//! Derivation of the open-position amount.

use common::U256;

/// Net long exposure of an account in one option series: the option tokens
/// held in the wallet beyond those minted against the account's own
/// collateral. Saturates at zero, so a pure writer (tokens minted and sold)
/// derives to zero and never shows up as an exercise candidate.
pub fn open_position_amount(balance: U256, current_collateralized_tokens: U256) -> U256 {
    balance.saturating_sub(current_collateralized_tokens)
}
