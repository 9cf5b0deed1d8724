//! Memoizing ERC20 metadata resolver.

use crate::error::ChainResult;
use crate::provider::TokenInfoProvider;
use common::{Address, TokenInfo};
use futures::future::try_join_all;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Wraps a [`TokenInfoProvider`] and memoizes results per address.
///
/// Token metadata is immutable on chain, so a resolved address is never
/// fetched again for the life of the resolver. Fresh address sets are
/// deduplicated and fetched in parallel.
pub struct TokenInfoResolver<P> {
    provider: Arc<P>,
    cache: RwLock<HashMap<Address, TokenInfo>>,
}

impl<P: TokenInfoProvider> TokenInfoResolver<P> {
    /// Create a resolver over the given provider.
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve a single address, hitting the provider only on a cache miss.
    pub async fn resolve(&self, token: Address) -> ChainResult<TokenInfo> {
        if let Some(info) = self.cache.read().get(&token) {
            return Ok(info.clone());
        }
        let info = self.provider.token_info(token).await?;
        self.cache.write().insert(token, info.clone());
        Ok(info)
    }

    /// Resolve a set of addresses, deduplicating and fetching every cache
    /// miss in parallel. Fails as a whole if any lookup fails.
    pub async fn resolve_many(
        &self,
        tokens: &[Address],
    ) -> ChainResult<HashMap<Address, TokenInfo>> {
        let mut resolved = HashMap::new();
        let mut missing: Vec<Address> = Vec::new();
        {
            let cache = self.cache.read();
            for &token in tokens {
                if resolved.contains_key(&token) || missing.contains(&token) {
                    continue;
                }
                match cache.get(&token) {
                    Some(info) => {
                        resolved.insert(token, info.clone());
                    }
                    None => missing.push(token),
                }
            }
        }

        if missing.is_empty() {
            return Ok(resolved);
        }

        debug!(count = missing.len(), "resolving token metadata");
        let fetched =
            try_join_all(missing.iter().map(|&token| self.provider.token_info(token))).await?;

        let mut cache = self.cache.write();
        for (token, info) in missing.into_iter().zip(fetched) {
            cache.insert(token, info.clone());
            resolved.insert(token, info);
        }
        Ok(resolved)
    }

    /// Number of addresses currently memoized.
    pub fn cached_len(&self) -> usize {
        self.cache.read().len()
    }
}
