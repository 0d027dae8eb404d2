use alloy_primitives::{Address, TxHash};
use chrono::DateTime;
use erc20_events_client::{format_display_amount, EventRecord, TokenBalance, TokenRegistry};

/// Fractional digits shown for amounts.
const DISPLAY_PRECISION: u8 = 4;

/// Renders `events` as a text table, one event per line.
pub(crate) fn render_table(
    events: &[EventRecord],
    registry: &TokenRegistry,
    explorer_url: &str,
) -> String {
    if events.is_empty() {
        return "No events found\n".to_string();
    }

    let mut out = format!(
        "{:<10} {:<27} {:<8} {:<6} {:>20} {:<13} {:<13} {}\n",
        "BLOCK", "TIME (UTC)", "KIND", "TOKEN", "AMOUNT", "FROM", "TO", "TRANSACTION"
    );

    for event in events {
        let amount = registry
            .by_symbol(&event.token)
            .map(|token| format_display_amount(event.value, token.decimals, DISPLAY_PRECISION))
            .unwrap_or_else(|| event.amount.clone());

        out.push_str(&format!(
            "{:<10} {:<27} {:<8} {:<6} {:>20} {:<13} {:<13} {}\n",
            event.block_number,
            format_timestamp(event.timestamp),
            event.kind,
            event.token,
            amount,
            short_address(event.from),
            short_address(event.to),
            transaction_url(explorer_url, event.transaction_hash),
        ));
    }

    out
}

/// Renders one `SYMBOL amount` line per balance, `N/A` when it could not be read.
pub(crate) fn render_balances(balances: &[TokenBalance]) -> String {
    balances
        .iter()
        .map(|balance| {
            let amount = balance
                .value
                .map(|value| format_display_amount(value, balance.decimals, DISPLAY_PRECISION))
                .unwrap_or_else(|| "N/A".to_string());
            format!("{:<6} {amount}\n", balance.token)
        })
        .collect()
}

/// Formats a unix timestamp as `Jan 1, 2024, 12:00:00 PM`.
pub(crate) fn format_timestamp(timestamp: Option<u64>) -> String {
    timestamp
        .and_then(|ts| i64::try_from(ts).ok())
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.format("%b %-d, %Y, %I:%M:%S %p").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Shortens an address to `0x1234...abcd`.
pub(crate) fn short_address(address: Address) -> String {
    let full = address.to_string();
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

pub(crate) fn transaction_url(explorer_url: &str, hash: TxHash) -> String {
    format!("{}/tx/{hash}", explorer_url.trim_end_matches('/'))
}
