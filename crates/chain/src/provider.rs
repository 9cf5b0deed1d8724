//! Provider traits.
//!
//! These traits are the entire surface the pipeline sees of the chain.
//! Implementations execute read calls against deployed contracts, scan
//! historical logs, and submit the one write this system performs (redeem).
//! Every method returns a future; concurrency and joining policy belong to
//! the caller.

use crate::error::ChainResult;
use crate::records::{BlockRange, RawOptionCreated};
use async_trait::async_trait;
use common::{Address, Side, TokenInfo, B256, U256};
use serde::{Deserialize, Serialize};

/// Access to the option factory's historical creation events.
#[async_trait]
pub trait OptionFactoryProvider: Send + Sync {
    /// Every creation event the factory emitted inside `range`, in log
    /// order. The catalog scans `genesis..latest` exactly once.
    async fn option_created(&self, range: BlockRange) -> ChainResult<Vec<RawOptionCreated>>;
}

/// ERC20 metadata lookups.
#[async_trait]
pub trait TokenInfoProvider: Send + Sync {
    /// Symbol and decimals for a token contract.
    async fn token_info(&self, token: Address) -> ChainResult<TokenInfo>;
}

/// Read and write calls against a deployed option token.
///
/// The seven account reads are issued together by the position aggregator
/// and joined all-or-nothing; each is its own call here so a provider can
/// batch or multiplex as it sees fit.
#[async_trait]
pub trait OptionTokenProvider: Send + Sync {
    /// Collateral currently locked by `account` for this option.
    async fn current_collateral(&self, option: Address, account: Address) -> ChainResult<U256>;

    /// Portion of the collateral that can still be assigned.
    async fn assignable_collateral(&self, option: Address, account: Address) -> ChainResult<U256>;

    /// Portion of the collateral that can no longer be assigned.
    async fn unassignable_collateral(&self, option: Address, account: Address)
        -> ChainResult<U256>;

    /// Option tokens minted against `account`'s collateral.
    async fn current_collateralized_tokens(
        &self,
        option: Address,
        account: Address,
    ) -> ChainResult<U256>;

    /// Minted tokens exposed to assignment.
    async fn assignable_tokens(&self, option: Address, account: Address) -> ChainResult<U256>;

    /// Minted tokens shielded from assignment.
    async fn unassignable_tokens(&self, option: Address, account: Address) -> ChainResult<U256>;

    /// ERC20 balance of `account` in `token` units.
    async fn balance_of(&self, token: Address, account: Address) -> ChainResult<U256>;

    /// Protocol fee charged by this option, in its fee precision.
    async fn protocol_fee(&self, option: Address) -> ChainResult<U256>;

    /// Redeem `account`'s unassigned collateral after expiry. Returns the
    /// submitted transaction hash.
    async fn redeem(&self, option: Address, account: Address) -> ChainResult<B256>;
}

/// Parameters of a maker/taker fee quote for a limit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuoteRequest {
    /// Base-token amount, base units.
    pub amount: U256,
    /// Price in quote base units per whole base token.
    pub price: U256,
    /// Order expiration, unix seconds.
    pub expiration_unix: u64,
    /// Side of the order being placed.
    pub side: Side,
}

/// A maker/taker fee quote.
///
/// `None` fee assets are the null-asset marker: no fee is charged in any
/// token and renderers suppress the symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFeeQuote {
    pub maker_fee: U256,
    pub maker_fee_asset: Option<Address>,
    pub taker_fee: U256,
    pub taker_fee_asset: Option<Address>,
}

/// Fee-quoting collaborator consulted at order-construction time.
#[async_trait]
pub trait FeeQuoter: Send + Sync {
    /// Quote maker and taker fees for the described order.
    async fn order_fees(&self, request: &FeeQuoteRequest) -> ChainResult<OrderFeeQuote>;
}
