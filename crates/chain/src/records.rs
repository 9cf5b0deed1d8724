//! Event records and the boundary validation that turns raw provider output
//! into typed records.
//!
//! Providers hand back whatever they decoded from a log. Validation happens
//! here, once, so the pipeline downstream never sees a zero address or an
//! impossible expiry.

use crate::error::{ChainError, ChainResult};
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Block range of a historical event scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRange {
    /// First block of the scan, inclusive.
    pub from: u64,
    /// Last block of the scan, inclusive. `None` means the latest block at
    /// query time.
    pub to: Option<u64>,
}

impl BlockRange {
    /// Scan from `from` to the latest block.
    pub fn to_latest(from: u64) -> Self {
        Self { from, to: None }
    }

    /// True when `block` falls inside the range.
    pub fn contains(&self, block: u64) -> bool {
        block >= self.from && self.to.map_or(true, |to| block <= to)
    }
}

/// A factory creation event as decoded from a log, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOptionCreated {
    /// Address of the newly deployed option token.
    pub option: Address,
    /// Underlying asset address.
    pub underlying: Address,
    /// Strike asset address.
    pub strike_asset: Address,
    /// Expiry timestamp, unix seconds.
    pub expiry: u64,
    /// Call when true, put otherwise.
    pub is_call: bool,
}

impl RawOptionCreated {
    /// Validate the raw record into its typed form.
    pub fn validate(self) -> ChainResult<OptionCreated> {
        if self.option == Address::ZERO {
            return Err(ChainError::invalid_record("option address is zero"));
        }
        if self.underlying == Address::ZERO {
            return Err(ChainError::invalid_record(format!(
                "underlying address is zero for option {}",
                self.option
            )));
        }
        if self.strike_asset == Address::ZERO {
            return Err(ChainError::invalid_record(format!(
                "strike asset address is zero for option {}",
                self.option
            )));
        }
        if self.expiry == 0 {
            return Err(ChainError::invalid_record(format!(
                "expiry is zero for option {}",
                self.option
            )));
        }
        Ok(OptionCreated {
            option: self.option,
            underlying: self.underlying,
            strike_asset: self.strike_asset,
            expiry: self.expiry,
            is_call: self.is_call,
        })
    }
}

/// A validated factory creation event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionCreated {
    pub option: Address,
    pub underlying: Address,
    pub strike_asset: Address,
    pub expiry: u64,
    pub is_call: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    fn raw() -> RawOptionCreated {
        RawOptionCreated {
            option: address!("0000000000000000000000000000000000000010"),
            underlying: address!("0000000000000000000000000000000000000011"),
            strike_asset: address!("0000000000000000000000000000000000000012"),
            expiry: 1_700_000_000,
            is_call: true,
        }
    }

    #[test]
    fn test_block_range() {
        let open = BlockRange::to_latest(100);
        assert!(open.contains(100));
        assert!(open.contains(u64::MAX));
        assert!(!open.contains(99));

        let bounded = BlockRange { from: 5, to: Some(10) };
        assert!(bounded.contains(10));
        assert!(!bounded.contains(11));
    }

    #[test]
    fn test_validate_accepts_well_formed_record() {
        let rec = raw().validate().unwrap();
        assert_eq!(rec.expiry, 1_700_000_000);
        assert!(rec.is_call);
    }

    #[test]
    fn test_validate_rejects_zero_fields() {
        let mut r = raw();
        r.underlying = Address::ZERO;
        assert!(matches!(r.validate(), Err(ChainError::InvalidRecord(_))));

        let mut r = raw();
        r.expiry = 0;
        assert!(matches!(r.validate(), Err(ChainError::InvalidRecord(_))));

        let mut r = raw();
        r.option = Address::ZERO;
        assert!(r.validate().is_err());
    }
}
