//! In-memory implementation of the provider traits.
//!
//! This is the development and test double: seed it with tokens, creation
//! events, and per-account reads, then hand it to the catalog and
//! aggregator. Per-address fault injection lets tests exercise the
//! fail-fast policies without a network.

use crate::error::{ChainError, ChainResult};
use crate::provider::{
    FeeQuoteRequest, FeeQuoter, OptionFactoryProvider, OptionTokenProvider, OrderFeeQuote,
    TokenInfoProvider,
};
use crate::records::{BlockRange, RawOptionCreated};
use async_trait::async_trait;
use common::{Address, TokenInfo, B256, U256};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};

/// The seven account-scoped reads of one option, as seeded into the fixture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountReads {
    pub current_collateral: U256,
    pub assignable_collateral: U256,
    pub unassignable_collateral: U256,
    pub current_collateralized_tokens: U256,
    pub assignable_tokens: U256,
    pub unassignable_tokens: U256,
    pub balance: U256,
}

/// In-memory chain provider.
///
/// Events are assigned consecutive block numbers in insertion order, so
/// range scans behave like a real log query.
#[derive(Default)]
pub struct InMemoryChain {
    tokens: RwLock<HashMap<Address, TokenInfo>>,
    token_info_calls: RwLock<HashMap<Address, u64>>,
    events: RwLock<Vec<(u64, RawOptionCreated)>>,
    event_scans: RwLock<u64>,
    protocol_fees: RwLock<HashMap<Address, U256>>,
    accounts: RwLock<HashMap<(Address, Address), AccountReads>>,
    failing: RwLock<HashSet<Address>>,
    fee_quote: RwLock<Option<OrderFeeQuote>>,
    redeemed: RwLock<Vec<(Address, Address)>>,
}

impl InMemoryChain {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed ERC20 metadata for a token address.
    pub fn add_token(&self, info: TokenInfo) {
        self.tokens.write().insert(info.address, info);
    }

    /// Seed a creation event and the option's protocol fee. The event's
    /// block number is the current event count.
    pub fn add_option(&self, event: RawOptionCreated, protocol_fee: U256) {
        let mut events = self.events.write();
        let block = events.len() as u64;
        self.protocol_fees.write().insert(event.option, protocol_fee);
        events.push((block, event));
    }

    /// Seed the account reads for an (option, account) pair.
    pub fn set_account_reads(&self, option: Address, account: Address, reads: AccountReads) {
        self.accounts.write().insert((option, account), reads);
    }

    /// Make every read touching `address` (option or token) fail.
    pub fn fail_address(&self, address: Address) {
        self.failing.write().insert(address);
    }

    /// Seed the quote returned by the fee-quoting collaborator.
    pub fn set_fee_quote(&self, quote: OrderFeeQuote) {
        *self.fee_quote.write() = Some(quote);
    }

    /// How many historical event scans were issued.
    pub fn event_scan_count(&self) -> u64 {
        *self.event_scans.read()
    }

    /// How many times `token_info` was called for an address.
    pub fn token_info_call_count(&self, token: Address) -> u64 {
        self.token_info_calls.read().get(&token).copied().unwrap_or(0)
    }

    /// Redeem calls submitted so far, in order.
    pub fn redeemed(&self) -> Vec<(Address, Address)> {
        self.redeemed.read().clone()
    }

    fn check_healthy(&self, address: Address) -> ChainResult<()> {
        if self.failing.read().contains(&address) {
            return Err(ChainError::provider(format!(
                "injected failure for {}",
                address
            )));
        }
        Ok(())
    }

    fn account_reads(&self, option: Address, account: Address) -> ChainResult<AccountReads> {
        self.check_healthy(option)?;
        Ok(self
            .accounts
            .read()
            .get(&(option, account))
            .copied()
            .unwrap_or_default())
    }
}

#[async_trait]
impl OptionFactoryProvider for InMemoryChain {
    async fn option_created(&self, range: BlockRange) -> ChainResult<Vec<RawOptionCreated>> {
        *self.event_scans.write() += 1;
        Ok(self
            .events
            .read()
            .iter()
            .filter(|(block, _)| range.contains(*block))
            .map(|(_, event)| event.clone())
            .collect())
    }
}

#[async_trait]
impl TokenInfoProvider for InMemoryChain {
    async fn token_info(&self, token: Address) -> ChainResult<TokenInfo> {
        *self.token_info_calls.write().entry(token).or_insert(0) += 1;
        self.check_healthy(token)?;
        self.tokens
            .read()
            .get(&token)
            .cloned()
            .ok_or_else(|| ChainError::not_found(format!("token {}", token)))
    }
}

#[async_trait]
impl OptionTokenProvider for InMemoryChain {
    async fn current_collateral(&self, option: Address, account: Address) -> ChainResult<U256> {
        Ok(self.account_reads(option, account)?.current_collateral)
    }

    async fn assignable_collateral(&self, option: Address, account: Address) -> ChainResult<U256> {
        Ok(self.account_reads(option, account)?.assignable_collateral)
    }

    async fn unassignable_collateral(
        &self,
        option: Address,
        account: Address,
    ) -> ChainResult<U256> {
        Ok(self.account_reads(option, account)?.unassignable_collateral)
    }

    async fn current_collateralized_tokens(
        &self,
        option: Address,
        account: Address,
    ) -> ChainResult<U256> {
        Ok(self
            .account_reads(option, account)?
            .current_collateralized_tokens)
    }

    async fn assignable_tokens(&self, option: Address, account: Address) -> ChainResult<U256> {
        Ok(self.account_reads(option, account)?.assignable_tokens)
    }

    async fn unassignable_tokens(&self, option: Address, account: Address) -> ChainResult<U256> {
        Ok(self.account_reads(option, account)?.unassignable_tokens)
    }

    async fn balance_of(&self, token: Address, account: Address) -> ChainResult<U256> {
        Ok(self.account_reads(token, account)?.balance)
    }

    async fn protocol_fee(&self, option: Address) -> ChainResult<U256> {
        self.check_healthy(option)?;
        self.protocol_fees
            .read()
            .get(&option)
            .copied()
            .ok_or_else(|| ChainError::not_found(format!("protocol fee for {}", option)))
    }

    async fn redeem(&self, option: Address, account: Address) -> ChainResult<B256> {
        self.check_healthy(option)?;
        let mut redeemed = self.redeemed.write();
        redeemed.push((option, account));
        Ok(B256::from(U256::from(redeemed.len())))
    }
}

#[async_trait]
impl FeeQuoter for InMemoryChain {
    async fn order_fees(&self, _request: &FeeQuoteRequest) -> ChainResult<OrderFeeQuote> {
        self.fee_quote
            .read()
            .clone()
            .ok_or_else(|| ChainError::provider("no fee quote seeded"))
    }
}
