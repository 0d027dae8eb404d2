use clap::Parser;
use erc20_events_client::TokenBalance;
use erc20_events_host::{EventsFetcher, EventsState};
use serde::Serialize;

mod config;
mod display;

use config::{init_tracing, Args};

/// The JSON output of one run.
#[derive(Debug, Serialize)]
struct Report<'a> {
    balances: &'a [TokenBalance],
    #[serde(flatten)]
    state: &'a EventsState,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.debug)?;

    let registry = args.registry()?;
    let fetcher = EventsFetcher::builder()
        .rpc_url(args.rpc_url.clone())
        .with_registry(registry.clone())
        .with_window(args.window)
        .with_retry_policy(args.retry_policy())
        .with_concurrency(args.concurrency)
        .build();

    fetcher.verify_chain().await?;

    let account = args.account();
    if account.tracked().is_none() {
        tracing::warn!("No account provided, set --account or ACCOUNT");
    }

    let (balances, state) =
        tokio::join!(fetcher.fetch_balances(&account), fetcher.query(&account));

    if args.json {
        let report = Report { balances: &balances, state: &state };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if state.error.is_none() {
        print!("{}", display::render_balances(&balances));
        if !balances.is_empty() {
            println!();
        }
        print!("{}", display::render_table(&state.events, &registry, &args.explorer_url));
    }

    if let Some(error) = state.error {
        eyre::bail!(error);
    }

    Ok(())
}
