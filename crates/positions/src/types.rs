//! The position record.

use catalog::OptionSeries;
use common::U256;
use serde::{Deserialize, Serialize};

/// A per-(series, account) snapshot of the account's exposure.
///
/// All seven read fields are captured in one parallel fan-out, so the record
/// is internally consistent at a single point in time. `open_position` is
/// derived from the read fields by [`derive::open_position_amount`], never
/// read independently. Superseded by the next refresh; never persisted.
///
/// [`derive::open_position_amount`]: crate::derive::open_position_amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// The option series this position is held in.
    pub series: OptionSeries,
    /// Collateral currently locked by the account.
    pub current_collateral: U256,
    /// Portion of the collateral still exposed to assignment.
    pub assignable_collateral: U256,
    /// Portion of the collateral no longer exposed to assignment.
    pub unassignable_collateral: U256,
    /// Option tokens minted against the account's collateral.
    pub current_collateralized_tokens: U256,
    /// Minted tokens exposed to assignment.
    pub assignable_tokens: U256,
    /// Minted tokens shielded from assignment.
    pub unassignable_tokens: U256,
    /// Option tokens held in the account's wallet.
    pub balance: U256,
    /// Derived net long exposure, see [`derive`](crate::derive).
    pub open_position: U256,
}

impl Position {
    /// True when the account has written collateral locked in this series.
    pub fn is_written(&self) -> bool {
        self.current_collateral > U256::ZERO
    }

    /// True when the account holds exercisable exposure in this series.
    pub fn is_exercisable(&self) -> bool {
        self.open_position > U256::ZERO
    }
}
