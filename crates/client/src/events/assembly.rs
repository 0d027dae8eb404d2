use std::collections::{BTreeSet, HashMap, HashSet};

use super::EventRecord;

/// Returns the distinct block heights whose timestamp should be looked up.
///
/// Height zero marks a log without a block number and is never included.
pub fn timestamp_heights(records: &[EventRecord]) -> BTreeSet<u64> {
    records.iter().map(|r| r.block_number).filter(|height| *height != 0).collect()
}

/// Merges the records of one cycle.
///
/// Records sharing a transaction hash and log index are kept once, timestamps are attached
/// by block height, and the result is ordered newest first: by block height, then by log
/// index, both descending.
pub fn assemble(records: Vec<EventRecord>, timestamps: &HashMap<u64, u64>) -> Vec<EventRecord> {
    let mut seen = HashSet::new();

    let mut records = records
        .into_iter()
        .filter(|r| r.log_index.is_none() || seen.insert((r.transaction_hash, r.log_index)))
        .map(|mut r| {
            r.timestamp = timestamps.get(&r.block_number).copied();
            r
        })
        .collect::<Vec<_>>();

    records.sort_by(|a, b| {
        b.block_number.cmp(&a.block_number).then_with(|| b.log_index.cmp(&a.log_index))
    });

    records
}
