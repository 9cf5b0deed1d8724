//! The option catalog: load-once discovery with an explicit cache.

use crate::error::CatalogResult;
use crate::types::{OptionKind, OptionSeries, Pair, PairId};
use chain::{
    BlockRange, ChainError, ChainResult, OptionCreated, OptionFactoryProvider,
    OptionTokenProvider, RawOptionCreated, TokenInfoProvider, TokenInfoResolver,
};
use chrono::Utc;
use common::Address;
use config::ChainConfig;
use futures::future::try_join_all;
use observability::PipelineMetrics;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Caller-owned catalog of every option series the factory ever created.
///
/// The first call to [`options`](Self::options) scans creation events from
/// the configured genesis block to the latest block and resolves metadata
/// and protocol fees for everything found; later calls return the cached
/// snapshot. Concurrent first calls wait behind the in-flight build instead
/// of issuing a duplicate scan. `refresh` rebuilds on demand; nothing else
/// ever invalidates the cache, so an option created after the build is
/// invisible until the caller refreshes.
pub struct OptionCatalog<P> {
    chain: Arc<P>,
    tokens: TokenInfoResolver<P>,
    from_block: u64,
    cache: Mutex<Option<Arc<Vec<OptionSeries>>>>,
    metrics: PipelineMetrics,
}

impl<P> OptionCatalog<P>
where
    P: OptionFactoryProvider + TokenInfoProvider + OptionTokenProvider,
{
    /// Create a catalog scanning from `from_block`.
    pub fn new(chain: Arc<P>, from_block: u64) -> Self {
        Self {
            tokens: TokenInfoResolver::new(chain.clone()),
            chain,
            from_block,
            cache: Mutex::new(None),
            metrics: PipelineMetrics::new("catalog"),
        }
    }

    /// Create a catalog from the chain section of the app config.
    pub fn from_config(chain: Arc<P>, config: &ChainConfig) -> Self {
        Self::new(chain, config.genesis_block)
    }

    /// The full catalog, building it on first use.
    pub async fn options(&self) -> CatalogResult<Arc<Vec<OptionSeries>>> {
        let mut slot = self.cache.lock().await;
        if let Some(snapshot) = slot.as_ref() {
            return Ok(snapshot.clone());
        }
        let snapshot = Arc::new(self.build().await?);
        *slot = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Drop the cache and rebuild immediately.
    pub async fn refresh(&self) -> CatalogResult<Arc<Vec<OptionSeries>>> {
        let mut slot = self.cache.lock().await;
        let snapshot = Arc::new(self.build().await?);
        *slot = Some(snapshot.clone());
        Ok(snapshot)
    }

    /// Drop the cache; the next query rebuilds.
    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
    }

    async fn build(&self) -> CatalogResult<Vec<OptionSeries>> {
        let started = Instant::now();
        match self.build_inner().await {
            Ok(series) => {
                self.metrics.record_load(started.elapsed(), series.len());
                info!(options = series.len(), "catalog built");
                Ok(series)
            }
            Err(err) => {
                self.metrics.record_failure();
                Err(err)
            }
        }
    }

    async fn build_inner(&self) -> CatalogResult<Vec<OptionSeries>> {
        let raw = self
            .chain
            .option_created(BlockRange::to_latest(self.from_block))
            .await?;
        debug!(events = raw.len(), from_block = self.from_block, "scanned creation events");

        let events: Vec<OptionCreated> = raw
            .into_iter()
            .map(RawOptionCreated::validate)
            .collect::<ChainResult<_>>()?;

        // One metadata lookup per distinct address, one fee read per option,
        // all in flight together.
        let mut addresses: Vec<Address> = Vec::new();
        for event in &events {
            for address in [event.option, event.underlying, event.strike_asset] {
                if !addresses.contains(&address) {
                    addresses.push(address);
                }
            }
        }
        self.metrics
            .record_reads(addresses.len() as u64 + events.len() as u64);

        let infos = self.tokens.resolve_many(&addresses).await?;
        let fees = try_join_all(events.iter().map(|e| self.chain.protocol_fee(e.option))).await?;

        let lookup = |address: Address| -> ChainResult<common::TokenInfo> {
            infos
                .get(&address)
                .cloned()
                .ok_or_else(|| ChainError::not_found(format!("metadata for {}", address)))
        };

        let mut series = Vec::with_capacity(events.len());
        for (event, fee) in events.into_iter().zip(fees) {
            series.push(OptionSeries {
                token_info: lookup(event.option)?,
                underlying_info: lookup(event.underlying)?,
                strike_info: lookup(event.strike_asset)?,
                address: event.option,
                underlying: event.underlying,
                strike_asset: event.strike_asset,
                expiry: event.expiry,
                is_call: event.is_call,
                protocol_fee: fee,
            });
        }
        Ok(series)
    }

    /// Deduplicated pairs, keyed by symbol pairing, in first-seen order.
    pub async fn list_pairs(&self) -> CatalogResult<Vec<Pair>> {
        let options = self.options().await?;
        let mut seen: HashSet<PairId> = HashSet::new();
        let mut pairs = Vec::new();
        for series in options.iter() {
            if seen.insert(series.pair_id()) {
                pairs.push(Pair::of(series));
            }
        }
        Ok(pairs)
    }

    /// Series of a pair, optionally restricted by kind and expiry, stable
    /// sorted so puts come first and calls last, discovery order within.
    pub async fn list_options(
        &self,
        pair: &Pair,
        kind: Option<OptionKind>,
        exclude_expired: bool,
    ) -> CatalogResult<Vec<OptionSeries>> {
        self.list_options_at(pair, kind, exclude_expired, Utc::now().timestamp_millis())
            .await
    }

    /// [`list_options`](Self::list_options) with an explicit query time.
    pub async fn list_options_at(
        &self,
        pair: &Pair,
        kind: Option<OptionKind>,
        exclude_expired: bool,
        now_millis: i64,
    ) -> CatalogResult<Vec<OptionSeries>> {
        let options = self.options().await?;
        let mut filtered: Vec<OptionSeries> = options
            .iter()
            .filter(|s| s.in_pair(pair))
            .filter(|s| kind.map_or(true, |k| k.matches(s.is_call)))
            .filter(|s| !exclude_expired || s.is_live_at(now_millis))
            .cloned()
            .collect();
        filtered.sort_by_key(|s| s.is_call);
        Ok(filtered)
    }

    /// Pair identity of the series deployed at `address`, if the catalog
    /// knows it. The set is small enough that a linear scan beats keeping an
    /// index.
    pub async fn pair_id_from_address(&self, address: Address) -> CatalogResult<Option<PairId>> {
        let options = self.options().await?;
        Ok(options
            .iter()
            .find(|s| s.address == address)
            .map(|s| s.pair_id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use chain::InMemoryChain;
    use common::{TokenInfo, U256};

    const WETH: Address = address!("0000000000000000000000000000000000000001");
    const WBTC: Address = address!("0000000000000000000000000000000000000002");
    const USDC: Address = address!("0000000000000000000000000000000000000003");
    const OPT_PUT_LIVE: Address = address!("0000000000000000000000000000000000000010");
    const OPT_CALL_LIVE: Address = address!("0000000000000000000000000000000000000011");
    const OPT_CALL_EXPIRED: Address = address!("0000000000000000000000000000000000000012");
    const OPT_BTC_PUT: Address = address!("0000000000000000000000000000000000000013");

    const LIVE_EXPIRY: u64 = 4_102_444_800; // 2100-01-01
    const PAST_EXPIRY: u64 = 1_577_836_800; // 2020-01-01

    fn seeded_chain() -> Arc<InMemoryChain> {
        let chain = Arc::new(InMemoryChain::new());
        chain.add_token(TokenInfo::new(WETH, "WETH", 18, 4));
        chain.add_token(TokenInfo::new(WBTC, "WBTC", 8, 4));
        chain.add_token(TokenInfo::new(USDC, "USDC", 6, 2));

        let seed = |option: Address, underlying: Address, expiry: u64, is_call: bool, sym: &str| {
            chain.add_token(TokenInfo::new(option, sym, 18, 4));
            chain.add_option(
                chain::RawOptionCreated {
                    option,
                    underlying,
                    strike_asset: USDC,
                    expiry,
                    is_call,
                },
                U256::from(30u8),
            );
        };
        seed(OPT_PUT_LIVE, WETH, LIVE_EXPIRY, false, "WETHP1");
        seed(OPT_CALL_LIVE, WETH, LIVE_EXPIRY, true, "WETHC1");
        seed(OPT_CALL_EXPIRED, WETH, PAST_EXPIRY, true, "WETHC0");
        seed(OPT_BTC_PUT, WBTC, LIVE_EXPIRY, false, "WBTCP1");
        chain
    }

    async fn weth_pair(catalog: &OptionCatalog<InMemoryChain>) -> Pair {
        catalog
            .list_pairs()
            .await
            .unwrap()
            .into_iter()
            .find(|p| p.id.as_str() == "WETH_USDC")
            .unwrap()
    }

    #[tokio::test]
    async fn test_catalog_builds_once() {
        let chain = seeded_chain();
        let catalog = OptionCatalog::new(chain.clone(), 0);

        let first = catalog.options().await.unwrap();
        assert_eq!(first.len(), 4);
        assert_eq!(chain.event_scan_count(), 1);

        let second = catalog.options().await.unwrap();
        assert_eq!(second.len(), 4);
        assert_eq!(chain.event_scan_count(), 1);
        // Metadata lookups were deduplicated across the build.
        assert_eq!(chain.token_info_call_count(USDC), 1);
    }

    #[tokio::test]
    async fn test_refresh_and_invalidate_rebuild() {
        let chain = seeded_chain();
        let catalog = OptionCatalog::new(chain.clone(), 0);

        catalog.options().await.unwrap();
        catalog.refresh().await.unwrap();
        assert_eq!(chain.event_scan_count(), 2);

        catalog.invalidate().await;
        catalog.options().await.unwrap();
        assert_eq!(chain.event_scan_count(), 3);
    }

    #[tokio::test]
    async fn test_list_pairs_dedupes_in_discovery_order() {
        let chain = seeded_chain();
        let catalog = OptionCatalog::new(chain, 0);

        let pairs = catalog.list_pairs().await.unwrap();
        let ids: Vec<&str> = pairs.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["WETH_USDC", "WBTC_USDC"]);
    }

    #[tokio::test]
    async fn test_list_options_filters_and_sorts() {
        let chain = seeded_chain();
        let catalog = OptionCatalog::new(chain, 0);
        let pair = weth_pair(&catalog).await;

        // No filters: all three WETH series, puts first, discovery order
        // within each group.
        let all = catalog.list_options(&pair, None, false).await.unwrap();
        let addrs: Vec<Address> = all.iter().map(|s| s.address).collect();
        assert_eq!(addrs, vec![OPT_PUT_LIVE, OPT_CALL_LIVE, OPT_CALL_EXPIRED]);

        // Kind filter.
        let puts = catalog
            .list_options(&pair, Some(OptionKind::Put), false)
            .await
            .unwrap();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].address, OPT_PUT_LIVE);

        // Expiry filter drops the 2020 series.
        let live = catalog.list_options(&pair, None, true).await.unwrap();
        let addrs: Vec<Address> = live.iter().map(|s| s.address).collect();
        assert_eq!(addrs, vec![OPT_PUT_LIVE, OPT_CALL_LIVE]);
    }

    #[tokio::test]
    async fn test_expiry_cutoff_is_exclusive() {
        let chain = seeded_chain();
        let catalog = OptionCatalog::new(chain, 0);
        let pair = weth_pair(&catalog).await;

        let at_cutoff = (LIVE_EXPIRY as i64) * 1000;
        let live = catalog
            .list_options_at(&pair, None, true, at_cutoff)
            .await
            .unwrap();
        assert!(live.is_empty());

        let just_before = catalog
            .list_options_at(&pair, None, true, at_cutoff - 1)
            .await
            .unwrap();
        assert_eq!(live.len() + just_before.len(), 2);
    }

    #[tokio::test]
    async fn test_pair_id_from_address() {
        let chain = seeded_chain();
        let catalog = OptionCatalog::new(chain, 0);

        let id = catalog.pair_id_from_address(OPT_BTC_PUT).await.unwrap();
        assert_eq!(id.unwrap().as_str(), "WBTC_USDC");

        let missing = catalog
            .pair_id_from_address(address!("00000000000000000000000000000000000000ff"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_failed_lookup_fails_whole_build() {
        let chain = seeded_chain();
        chain.fail_address(OPT_CALL_LIVE);
        let catalog = OptionCatalog::new(chain.clone(), 0);

        assert!(catalog.options().await.is_err());

        // The cache stayed empty, so a later call retries the build.
        assert_eq!(chain.event_scan_count(), 1);
        assert!(catalog.options().await.is_err());
        assert_eq!(chain.event_scan_count(), 2);
    }

    #[tokio::test]
    async fn test_genesis_block_bounds_the_scan() {
        let chain = seeded_chain();
        let catalog = OptionCatalog::new(chain, 2);

        // Events seeded at blocks 0 and 1 fall outside the scan.
        let options = catalog.options().await.unwrap();
        assert_eq!(options.len(), 2);
    }
}
