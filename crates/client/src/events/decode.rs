use alloy_primitives::{Address, U256};
use alloy_rpc_types::Log as RpcLog;
use alloy_sol_types::SolEvent;

use super::{EventKind, EventRecord, LogKind, IERC20};
use crate::{format_amount, Token};

/// Decodes the `kind` logs emitted by `token`, keeping those relevant to `account`.
///
/// Transfers are kept when `account` is the source or the destination, and reported as
/// [`EventKind::Mint`] when the source is the zero address. Approvals are kept when `account`
/// is the owner, including zero-value revocations. Logs that do not decode as `kind`, or that
/// carry no transaction hash, are skipped.
pub fn decode_logs(
    token: &Token,
    kind: LogKind,
    account: Address,
    logs: &[RpcLog],
) -> Vec<EventRecord> {
    logs.iter().filter_map(|log| decode_log(token, kind, account, log)).collect()
}

fn decode_log(
    token: &Token,
    kind: LogKind,
    account: Address,
    log: &RpcLog,
) -> Option<EventRecord> {
    let (kind, from, to, value) = match kind {
        LogKind::Transfer => {
            let event = IERC20::Transfer::decode_log_data(&log.inner.data, true).ok()?;
            if event.from != account && event.to != account {
                return None;
            }

            let kind =
                if event.from == Address::ZERO { EventKind::Mint } else { EventKind::Transfer };
            (kind, event.from, event.to, event.value)
        }
        LogKind::Approval => {
            let event = IERC20::Approval::decode_log_data(&log.inner.data, true).ok()?;
            if event.owner != account {
                return None;
            }

            (EventKind::Approval, event.owner, event.spender, event.value)
        }
    };

    record(token, kind, from, to, value, log)
}

fn record(
    token: &Token,
    kind: EventKind,
    from: Address,
    to: Address,
    value: U256,
    log: &RpcLog,
) -> Option<EventRecord> {
    Some(EventRecord {
        kind,
        token: token.symbol.clone(),
        amount: format_amount(value, token.decimals),
        value,
        from,
        to,
        transaction_hash: log.transaction_hash?,
        block_number: log.block_number.unwrap_or_default(),
        log_index: log.log_index,
        timestamp: None,
    })
}
