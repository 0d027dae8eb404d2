use serde::{Deserialize, Serialize};

/// Number of blocks scanned below the chain tip, small enough to stay within common RPC
/// `eth_getLogs` limits.
pub const DEFAULT_BLOCK_WINDOW: u64 = 500;

/// An inclusive range of block heights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRange {
    pub from: u64,
    pub to: u64,
}

impl BlockRange {
    /// The `window` blocks ending at `tip`, floored at genesis.
    pub fn ending_at(tip: u64, window: u64) -> Self {
        Self { from: tip.saturating_sub(window), to: tip }
    }
}
