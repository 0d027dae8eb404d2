use alloy_provider::{network::AnyNetwork, RootProvider};
use erc20_events_client::{TokenRegistry, DEFAULT_BLOCK_WINDOW};
use url::Url;

use crate::{ChainClient, EventsFetcher, ProviderChainClient, RetryPolicy};

/// Default number of concurrent lookups.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// A builder for [`EventsFetcher`].
#[derive(Debug)]
pub struct EventsFetcherBuilder<C> {
    client: C,
    registry: TokenRegistry,
    window: u64,
    retry_policy: RetryPolicy,
    concurrency: usize,
}

impl<C> EventsFetcherBuilder<C> {
    /// Sets the monitored tokens.
    pub fn with_registry(mut self, registry: TokenRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Sets the number of blocks scanned below the tip.
    pub fn with_window(mut self, window: u64) -> Self {
        self.window = window;
        self
    }

    /// Sets the policy applied to log, block and balance lookups.
    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Sets the maximum number of in-flight lookups. Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Sets the client used to query the chain.
    pub fn client<C2: ChainClient>(self, client: C2) -> EventsFetcherBuilder<C2> {
        EventsFetcherBuilder {
            client,
            registry: self.registry,
            window: self.window,
            retry_policy: self.retry_policy,
            concurrency: self.concurrency,
        }
    }
}

impl EventsFetcherBuilder<()> {
    /// Sets the Ethereum HTTP RPC endpoint that will be used.
    pub fn rpc_url(
        self,
        rpc_url: Url,
    ) -> EventsFetcherBuilder<ProviderChainClient<RootProvider<AnyNetwork>>> {
        self.client(ProviderChainClient::new_http(rpc_url))
    }
}

impl<C: ChainClient> EventsFetcherBuilder<C> {
    /// Builds an [`EventsFetcher`].
    pub fn build(self) -> EventsFetcher<C> {
        EventsFetcher {
            client: self.client,
            registry: self.registry,
            window: self.window,
            retry_policy: self.retry_policy,
            concurrency: self.concurrency,
        }
    }
}

impl Default for EventsFetcherBuilder<()> {
    fn default() -> Self {
        Self {
            client: (),
            registry: TokenRegistry::default(),
            window: DEFAULT_BLOCK_WINDOW,
            retry_policy: RetryPolicy::default(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}
