//! The position aggregator: parallel account reads joined all-or-nothing.

use crate::derive::open_position_amount;
use crate::error::{PositionError, PositionResult};
use crate::types::Position;
use catalog::{OptionCatalog, OptionSeries, Pair};
use chain::{OptionFactoryProvider, OptionTokenProvider, TokenInfoProvider};
use common::{Address, B256, U256};
use futures::future::try_join_all;
use observability::PipelineMetrics;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Aggregates per-account positions over the catalog's option series.
///
/// Every aggregation is a snapshot assembled from seven concurrent reads; a
/// failing read fails the enclosing operation, whether that is one position
/// or a whole listing. The caller retries by re-invoking the operation.
pub struct PositionAggregator<P> {
    chain: Arc<P>,
    catalog: Arc<OptionCatalog<P>>,
    metrics: PipelineMetrics,
}

impl<P> PositionAggregator<P>
where
    P: OptionFactoryProvider + TokenInfoProvider + OptionTokenProvider,
{
    /// Create an aggregator over the given chain boundary and catalog.
    pub fn new(chain: Arc<P>, catalog: Arc<OptionCatalog<P>>) -> Self {
        Self {
            chain,
            catalog,
            metrics: PipelineMetrics::new("positions"),
        }
    }

    /// Snapshot `account`'s position in one series.
    ///
    /// The seven reads are issued together and joined all-or-nothing; the
    /// open-position amount is derived from the assembled fields.
    pub async fn position(
        &self,
        series: &OptionSeries,
        account: Address,
    ) -> PositionResult<Position> {
        self.metrics.record_reads(7);
        let (
            current_collateral,
            assignable_collateral,
            unassignable_collateral,
            current_collateralized_tokens,
            unassignable_tokens,
            assignable_tokens,
            balance,
        ) = tokio::try_join!(
            self.chain.current_collateral(series.address, account),
            self.chain.assignable_collateral(series.address, account),
            self.chain.unassignable_collateral(series.address, account),
            self.chain.current_collateralized_tokens(series.address, account),
            self.chain.unassignable_tokens(series.address, account),
            self.chain.assignable_tokens(series.address, account),
            self.chain.balance_of(series.address, account),
        )?;

        Ok(Position {
            open_position: open_position_amount(balance, current_collateralized_tokens),
            series: series.clone(),
            current_collateral,
            assignable_collateral,
            unassignable_collateral,
            current_collateralized_tokens,
            assignable_tokens,
            unassignable_tokens,
            balance,
        })
    }

    /// Positions the account has written in `pair`: one aggregation per
    /// series, expired included (written collateral survives expiry until
    /// redeemed), retaining those with collateral locked.
    pub async fn written_positions(
        &self,
        pair: &Pair,
        account: Address,
    ) -> PositionResult<Vec<Position>> {
        let options = self.catalog.list_options(pair, None, false).await?;
        let positions = self.aggregate_all(&options, account).await?;
        Ok(positions.into_iter().filter(Position::is_written).collect())
    }

    /// Positions the account can exercise in `pair`: non-expired series
    /// only, retaining those with net long exposure, puts before calls.
    pub async fn exercisable_positions(
        &self,
        pair: &Pair,
        account: Address,
    ) -> PositionResult<Vec<Position>> {
        let options = self.catalog.list_options(pair, None, true).await?;
        let mut positions: Vec<Position> = self
            .aggregate_all(&options, account)
            .await?
            .into_iter()
            .filter(Position::is_exercisable)
            .collect();
        positions.sort_by_key(|p| p.series.is_call);
        Ok(positions)
    }

    /// Aggregate every series in input order, failing the whole listing on
    /// the first failing read.
    async fn aggregate_all(
        &self,
        options: &[OptionSeries],
        account: Address,
    ) -> PositionResult<Vec<Position>> {
        let started = Instant::now();
        debug!(series = options.len(), %account, "aggregating positions");
        match try_join_all(options.iter().map(|s| self.position(s, account))).await {
            Ok(positions) => {
                self.metrics.record_load(started.elapsed(), positions.len());
                Ok(positions)
            }
            Err(err) => {
                self.metrics.record_failure();
                Err(err)
            }
        }
    }

    /// Redeem the account's unassigned collateral from an expired series.
    /// Returns the submitted transaction hash; refused while the series is
    /// still live.
    pub async fn redeem(&self, series: &OptionSeries, account: Address) -> PositionResult<B256> {
        if !series.is_expired() {
            return Err(PositionError::NotExpired(series.address));
        }
        let tx = self.chain.redeem(series.address, account).await?;
        info!(series = %series.address, %account, %tx, "redeem submitted");
        Ok(tx)
    }
}

/// Sum of the collateral fields across a listing, for display totals.
pub fn total_collateral(positions: &[Position]) -> U256 {
    positions
        .iter()
        .fold(U256::ZERO, |acc, p| acc.saturating_add(p.current_collateral))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use chain::{AccountReads, InMemoryChain, RawOptionCreated};
    use common::TokenInfo;

    const WETH: Address = address!("0000000000000000000000000000000000000001");
    const USDC: Address = address!("0000000000000000000000000000000000000003");
    const OPT_PUT_LIVE: Address = address!("0000000000000000000000000000000000000010");
    const OPT_CALL_LIVE: Address = address!("0000000000000000000000000000000000000011");
    const OPT_CALL_EXPIRED: Address = address!("0000000000000000000000000000000000000012");
    const ACCOUNT: Address = address!("00000000000000000000000000000000000000aa");

    const LIVE_EXPIRY: u64 = 4_102_444_800; // 2100-01-01
    const PAST_EXPIRY: u64 = 1_577_836_800; // 2020-01-01

    fn seeded_chain() -> Arc<InMemoryChain> {
        let chain = Arc::new(InMemoryChain::new());
        chain.add_token(TokenInfo::new(WETH, "WETH", 18, 4));
        chain.add_token(TokenInfo::new(USDC, "USDC", 6, 2));

        let seed = |option: Address, expiry: u64, is_call: bool, sym: &str| {
            chain.add_token(TokenInfo::new(option, sym, 18, 4));
            chain.add_option(
                RawOptionCreated {
                    option,
                    underlying: WETH,
                    strike_asset: USDC,
                    expiry,
                    is_call,
                },
                U256::from(30u8),
            );
        };
        seed(OPT_PUT_LIVE, LIVE_EXPIRY, false, "WETHP1");
        seed(OPT_CALL_LIVE, LIVE_EXPIRY, true, "WETHC1");
        seed(OPT_CALL_EXPIRED, PAST_EXPIRY, true, "WETHC0");
        chain
    }

    fn pipeline(
        chain: Arc<InMemoryChain>,
    ) -> (
        Arc<OptionCatalog<InMemoryChain>>,
        PositionAggregator<InMemoryChain>,
    ) {
        let catalog = Arc::new(OptionCatalog::new(chain.clone(), 0));
        let aggregator = PositionAggregator::new(chain, catalog.clone());
        (catalog, aggregator)
    }

    async fn weth_pair(catalog: &OptionCatalog<InMemoryChain>) -> Pair {
        catalog.list_pairs().await.unwrap().remove(0)
    }

    fn reads(collateral: u64, minted: u64, balance: u64) -> AccountReads {
        AccountReads {
            current_collateral: U256::from(collateral),
            assignable_collateral: U256::from(collateral / 2),
            unassignable_collateral: U256::from(collateral - collateral / 2),
            current_collateralized_tokens: U256::from(minted),
            assignable_tokens: U256::from(minted / 2),
            unassignable_tokens: U256::from(minted - minted / 2),
            balance: U256::from(balance),
        }
    }

    #[tokio::test]
    async fn test_position_joins_seven_reads() {
        let chain = seeded_chain();
        chain.set_account_reads(OPT_PUT_LIVE, ACCOUNT, reads(1000, 10, 13));
        let (catalog, aggregator) = pipeline(chain);

        let series = catalog.options().await.unwrap()[0].clone();
        let position = aggregator.position(&series, ACCOUNT).await.unwrap();

        assert_eq!(position.current_collateral, U256::from(1000u64));
        assert_eq!(position.assignable_collateral, U256::from(500u64));
        assert_eq!(position.unassignable_collateral, U256::from(500u64));
        assert_eq!(position.current_collateralized_tokens, U256::from(10u64));
        assert_eq!(position.balance, U256::from(13u64));
        // Derived, never read: 13 held - 10 minted.
        assert_eq!(position.open_position, U256::from(3u64));
    }

    #[tokio::test]
    async fn test_open_position_saturates_for_pure_writer() {
        let chain = seeded_chain();
        chain.set_account_reads(OPT_PUT_LIVE, ACCOUNT, reads(1000, 10, 0));
        let (catalog, aggregator) = pipeline(chain);

        let series = catalog.options().await.unwrap()[0].clone();
        let position = aggregator.position(&series, ACCOUNT).await.unwrap();
        assert_eq!(position.open_position, U256::ZERO);
        assert!(position.is_written());
        assert!(!position.is_exercisable());
    }

    #[tokio::test]
    async fn test_failing_read_fails_single_position() {
        let chain = seeded_chain();
        let (catalog, aggregator) = pipeline(chain.clone());
        let series = catalog.options().await.unwrap()[0].clone();

        chain.fail_address(series.address);
        assert!(aggregator.position(&series, ACCOUNT).await.is_err());
    }

    #[tokio::test]
    async fn test_written_positions_include_expired_series() {
        let chain = seeded_chain();
        // Collateral locked in an expired series and a live one; the live
        // call has no collateral and must drop out.
        chain.set_account_reads(OPT_CALL_EXPIRED, ACCOUNT, reads(500, 5, 0));
        chain.set_account_reads(OPT_PUT_LIVE, ACCOUNT, reads(800, 8, 0));
        let (catalog, aggregator) = pipeline(chain);
        let pair = weth_pair(&catalog).await;

        let written = aggregator.written_positions(&pair, ACCOUNT).await.unwrap();
        let addrs: Vec<Address> = written.iter().map(|p| p.series.address).collect();
        assert_eq!(addrs, vec![OPT_PUT_LIVE, OPT_CALL_EXPIRED]);
        assert_eq!(total_collateral(&written), U256::from(1300u64));
    }

    #[tokio::test]
    async fn test_exercisable_positions_filter_and_sort() {
        let chain = seeded_chain();
        // Net long in the live call and the live put; the expired call also
        // has balance but must be excluded by the expiry filter.
        chain.set_account_reads(OPT_CALL_LIVE, ACCOUNT, reads(0, 0, 7));
        chain.set_account_reads(OPT_PUT_LIVE, ACCOUNT, reads(0, 0, 2));
        chain.set_account_reads(OPT_CALL_EXPIRED, ACCOUNT, reads(0, 0, 9));
        let (catalog, aggregator) = pipeline(chain);
        let pair = weth_pair(&catalog).await;

        let exercisable = aggregator
            .exercisable_positions(&pair, ACCOUNT)
            .await
            .unwrap();
        let addrs: Vec<Address> = exercisable.iter().map(|p| p.series.address).collect();
        // Puts before calls, discovery order within.
        assert_eq!(addrs, vec![OPT_PUT_LIVE, OPT_CALL_LIVE]);
    }

    #[tokio::test]
    async fn test_failing_series_fails_whole_listing() {
        let chain = seeded_chain();
        chain.set_account_reads(OPT_PUT_LIVE, ACCOUNT, reads(800, 8, 0));
        chain.fail_address(OPT_CALL_LIVE);
        let (catalog, aggregator) = pipeline(chain);
        let pair = weth_pair(&catalog).await;

        // One poisoned series surfaces as an error instead of silently
        // dropping its contribution.
        assert!(aggregator.written_positions(&pair, ACCOUNT).await.is_err());
    }

    #[tokio::test]
    async fn test_redeem_refused_before_expiry() {
        let chain = seeded_chain();
        let (catalog, aggregator) = pipeline(chain.clone());
        let options = catalog.options().await.unwrap();
        let live = options.iter().find(|s| s.address == OPT_PUT_LIVE).unwrap();
        let expired = options
            .iter()
            .find(|s| s.address == OPT_CALL_EXPIRED)
            .unwrap();

        assert!(matches!(
            aggregator.redeem(live, ACCOUNT).await,
            Err(PositionError::NotExpired(_))
        ));

        let tx = aggregator.redeem(expired, ACCOUNT).await.unwrap();
        assert_ne!(tx, B256::ZERO);
        assert_eq!(chain.redeemed(), vec![(OPT_CALL_EXPIRED, ACCOUNT)]);
    }
}
