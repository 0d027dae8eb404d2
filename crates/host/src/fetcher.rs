use std::collections::{BTreeSet, HashMap};

use alloy_rpc_types::Log as RpcLog;
use erc20_events_client::{
    events::{assemble, decode_logs, timestamp_heights},
    ActiveAccount, BlockRange, EventRecord, LogKind, Token, TokenBalance, TokenRegistry,
};
use futures::{future, stream, StreamExt};
use tracing::{debug, error, info, warn};

use crate::{
    retry, ChainClient, EventsError, EventsFetcherBuilder, EventsState, LogQuery, RetryPolicy,
};

/// Retrieves the recent token activity of an account.
///
/// Each call to [`EventsFetcher::fetch_events`] is an independent cycle: nothing is cached
/// between calls, and callers are expected not to run overlapping cycles for one account.
#[derive(Debug)]
pub struct EventsFetcher<C> {
    /// The client used to query the chain.
    pub client: C,
    /// The monitored tokens.
    pub registry: TokenRegistry,
    /// Number of blocks scanned below the tip.
    pub window: u64,
    /// The policy applied to log, block and balance lookups.
    pub retry_policy: RetryPolicy,
    /// Maximum number of in-flight lookups.
    pub concurrency: usize,
}

impl EventsFetcher<()> {
    pub fn builder() -> EventsFetcherBuilder<()> {
        EventsFetcherBuilder::default()
    }
}

impl<C: ChainClient> EventsFetcher<C> {
    /// Runs one cycle and maps its outcome for the display layer.
    pub async fn query(&self, account: &ActiveAccount) -> EventsState {
        EventsState::from_result(self.fetch_events(account).await)
    }

    /// Returns the Transfer, Approval and Mint events of `account` in the last
    /// [`window`](Self::window) blocks, newest first.
    ///
    /// Only a failure to read the chain tip is an error. Log or block lookups that keep
    /// failing are logged and contribute no events or no timestamps, respectively.
    pub async fn fetch_events(
        &self,
        account: &ActiveAccount,
    ) -> Result<Vec<EventRecord>, EventsError> {
        let Some(account) = account.tracked() else {
            debug!("No connected account, skipping");
            return Ok(vec![]);
        };

        debug!(%account, "Resolving block range");
        let tip = self.client.get_block_number().await.map_err(EventsError::ChainTip)?;
        let range = BlockRange::ending_at(tip, self.window);

        debug!(from = range.from, to = range.to, "Fetching logs");
        let queries = self
            .registry
            .tokens()
            .flat_map(|token| LogKind::ALL.into_iter().map(move |kind| (token, kind)));

        let records = stream::iter(queries)
            .map(|(token, kind)| async move {
                let logs = self.fetch_logs(token, kind, range).await;
                decode_logs(token, kind, account, &logs)
            })
            .buffer_unordered(self.concurrency)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();

        let heights = timestamp_heights(&records);
        debug!(events = records.len(), blocks = heights.len(), "Enriching timestamps");
        let timestamps = self.fetch_timestamps(heights).await;

        let events = assemble(records, &timestamps);
        info!(%account, from = range.from, to = range.to, events = events.len(), "Fetched events");

        Ok(events)
    }

    /// Checks that the connected node serves the chain the registry tokens are deployed on.
    ///
    /// Registries without a chain id accept any chain.
    pub async fn verify_chain(&self) -> Result<(), EventsError> {
        let Some(expected) = self.registry.chain_id() else {
            return Ok(());
        };

        let actual = self.client.get_chain_id().await.map_err(EventsError::ChainId)?;
        if actual != expected {
            warn!(expected, actual, "Connected to the wrong network");
            return Err(EventsError::WrongChain { expected, actual });
        }

        Ok(())
    }

    /// Returns the balance of `account` in every registry token, in registry order.
    ///
    /// Balances that keep failing to load are logged and reported as unknown.
    pub async fn fetch_balances(&self, account: &ActiveAccount) -> Vec<TokenBalance> {
        let Some(account) = account.tracked() else {
            return vec![];
        };

        stream::iter(self.registry.tokens())
            .map(|token| async move {
                let result =
                    retry(&self.retry_policy, || self.client.get_balance(token.address, account))
                        .await;

                let value = match result {
                    Ok(value) => Some(value),
                    Err(err) => {
                        error!(
                            token = %token.symbol,
                            %account,
                            attempts = self.retry_policy.max_attempts,
                            error = %err,
                            "Failed to fetch balance"
                        );
                        None
                    }
                };

                TokenBalance::new(token, value)
            })
            .buffered(self.concurrency)
            .collect()
            .await
    }

    /// Fetches the `kind` logs of `token` within `range`.
    ///
    /// Returns no logs once the retry policy is exhausted.
    pub async fn fetch_logs(
        &self,
        token: &Token,
        kind: LogKind,
        range: BlockRange,
    ) -> Vec<RpcLog> {
        let query = LogQuery { address: token.address, kind, range };

        match retry(&self.retry_policy, || self.client.get_logs(&query)).await {
            Ok(logs) => logs,
            Err(err) => {
                error!(
                    token = %token.symbol,
                    address = %token.address,
                    %kind,
                    attempts = self.retry_policy.max_attempts,
                    error = %err,
                    "Failed to fetch logs, continuing without them"
                );
                vec![]
            }
        }
    }

    /// Looks up the timestamp of every block in `heights`, once each.
    ///
    /// Blocks whose lookup keeps failing are missing from the returned map.
    pub async fn fetch_timestamps(&self, heights: BTreeSet<u64>) -> HashMap<u64, u64> {
        stream::iter(heights)
            .map(|height| async move {
                match retry(&self.retry_policy, || self.client.get_block_timestamp(height)).await {
                    Ok(timestamp) => Some((height, timestamp)),
                    Err(err) => {
                        error!(
                            block = height,
                            attempts = self.retry_policy.max_attempts,
                            error = %err,
                            "Failed to fetch block timestamp"
                        );
                        None
                    }
                }
            })
            .buffer_unordered(self.concurrency)
            .filter_map(future::ready)
            .collect()
            .await
    }
}
