use std::fmt;

use alloy_primitives::{Address, TxHash, B256, U256};
use alloy_sol_types::{sol, SolEvent};
use serde::{Deserialize, Serialize};

sol! {
    /// The subset of the ERC20 interface read by this crate.
    interface IERC20 {
        event Transfer(address indexed from, address indexed to, uint256 value);
        event Approval(address indexed owner, address indexed spender, uint256 value);

        function balanceOf(address account) external view returns (uint256);
    }
}

/// The kind of log requested from the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogKind {
    Transfer,
    Approval,
}

impl LogKind {
    pub const ALL: [LogKind; 2] = [LogKind::Transfer, LogKind::Approval];

    /// The topic0 of the event.
    pub fn signature(&self) -> B256 {
        match self {
            Self::Transfer => IERC20::Transfer::SIGNATURE_HASH,
            Self::Approval => IERC20::Approval::SIGNATURE_HASH,
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transfer => f.pad("Transfer"),
            Self::Approval => f.pad("Approval"),
        }
    }
}

/// The kind of an [`EventRecord`].
///
/// `Mint` is a `Transfer` log whose source is the zero address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Transfer,
    Approval,
    Mint,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transfer => f.pad("Transfer"),
            Self::Approval => f.pad("Approval"),
            Self::Mint => f.pad("Mint"),
        }
    }
}

/// A decoded token event involving the tracked account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub kind: EventKind,
    /// Symbol of the emitting token.
    pub token: String,
    /// The amount scaled by the token decimals.
    pub amount: String,
    /// The raw amount.
    pub value: U256,
    /// Source of a transfer, owner of an approval.
    pub from: Address,
    /// Destination of a transfer, spender of an approval.
    pub to: Address,
    pub transaction_hash: TxHash,
    /// Zero when the node did not report it.
    pub block_number: u64,
    pub log_index: Option<u64>,
    /// Unix timestamp of the block, in seconds.
    pub timestamp: Option<u64>,
}
