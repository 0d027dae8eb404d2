use alloy_eips::BlockNumberOrTag;
use alloy_primitives::{Address, U256};
use alloy_provider::{
    network::{AnyNetwork, Network, TransactionBuilder},
    Provider, RootProvider,
};
use alloy_rpc_types::{BlockTransactionsKind, Filter, Log as RpcLog};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use erc20_events_client::{events::IERC20, BlockRange, LogKind};
use url::Url;

use crate::HostError;

/// A request for the `kind` logs emitted by `address` within `range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogQuery {
    pub address: Address,
    pub kind: LogKind,
    pub range: BlockRange,
}

impl LogQuery {
    pub fn filter(&self) -> Filter {
        Filter::new()
            .address(self.address)
            .event_signature(self.kind.signature())
            .from_block(self.range.from)
            .to_block(self.range.to)
    }
}

/// The chain data needed to reconstruct token activity.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Returns the height of the chain tip.
    async fn get_block_number(&self) -> Result<u64, HostError>;

    /// Returns the logs matching `query`.
    async fn get_logs(&self, query: &LogQuery) -> Result<Vec<RpcLog>, HostError>;

    /// Returns the timestamp of the block at `number`, in seconds.
    async fn get_block_timestamp(&self, number: u64) -> Result<u64, HostError>;

    /// Returns the id of the connected chain.
    async fn get_chain_id(&self) -> Result<u64, HostError>;

    /// Returns the `token` balance of `account` at the chain tip.
    async fn get_balance(&self, token: Address, account: Address) -> Result<U256, HostError>;
}

/// A [`ChainClient`] backed by an alloy [`Provider`].
#[derive(Debug, Clone)]
pub struct ProviderChainClient<P> {
    provider: P,
}

impl<P> ProviderChainClient<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl ProviderChainClient<RootProvider<AnyNetwork>> {
    /// Connects to an Ethereum HTTP RPC endpoint.
    pub fn new_http(rpc_url: Url) -> Self {
        Self::new(RootProvider::new_http(rpc_url))
    }
}

#[async_trait]
impl<P: Provider<AnyNetwork>> ChainClient for ProviderChainClient<P> {
    async fn get_block_number(&self) -> Result<u64, HostError> {
        Ok(self.provider.get_block_number().await?)
    }

    async fn get_logs(&self, query: &LogQuery) -> Result<Vec<RpcLog>, HostError> {
        let filter = query.filter();

        Ok(self.provider.get_logs(&filter).await?)
    }

    async fn get_block_timestamp(&self, number: u64) -> Result<u64, HostError> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(number), BlockTransactionsKind::Hashes)
            .await?
            .ok_or(HostError::BlockNotFound(number))?;

        Ok(block.header.timestamp)
    }

    async fn get_chain_id(&self) -> Result<u64, HostError> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn get_balance(&self, token: Address, account: Address) -> Result<U256, HostError> {
        let call = IERC20::balanceOfCall { account };
        let tx = <AnyNetwork as Network>::TransactionRequest::default()
            .with_to(token)
            .with_input(call.abi_encode());

        let output = self.provider.call(&tx).await?;
        let balance = IERC20::balanceOfCall::abi_decode_returns(&output, true)?;

        Ok(balance._0)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;
    use alloy_rpc_types::FilteredParams;

    use super::*;

    #[test]
    fn filter_targets_token_and_event() {
        let token = address!("1D70D57ccD2798323232B2dD027B3aBcA5C00091");
        let query = LogQuery {
            address: token,
            kind: LogKind::Approval,
            range: BlockRange { from: 10, to: 510 },
        };

        let filter = query.filter();
        let params = FilteredParams::new(Some(filter.clone()));

        assert_eq!(filter.get_from_block(), Some(10));
        assert_eq!(filter.get_to_block(), Some(510));
        assert!(params.filter_address(&token));
        assert!(!params.filter_address(&Address::ZERO));
        assert!(params.filter_topics(&[LogKind::Approval.signature()]));
        assert!(!params.filter_topics(&[LogKind::Transfer.signature()]));
    }
}
