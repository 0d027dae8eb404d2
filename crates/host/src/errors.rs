use alloy_transport::TransportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("Block not found: {0}")]
    BlockNotFound(u64),
    #[error("ABI decoding error: {0}")]
    AbiDecode(#[from] alloy_sol_types::Error),
}

/// An error that aborts a whole retrieval cycle, or rejects the connected network.
#[derive(Error, Debug)]
pub enum EventsError {
    #[error("Failed to fetch the chain tip: {0}")]
    ChainTip(#[source] HostError),
    #[error("Failed to fetch the chain id: {0}")]
    ChainId(#[source] HostError),
    #[error("Connected to chain {actual}, the tokens are deployed on chain {expected}")]
    WrongChain { expected: u64, actual: u64 },
}
