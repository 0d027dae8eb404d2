use std::{path::PathBuf, time::Duration};

use alloy_primitives::Address;
use clap::Parser;
use erc20_events_client::{ActiveAccount, TokenRegistry, DEFAULT_BLOCK_WINDOW};
use erc20_events_host::{Backoff, RetryPolicy, DEFAULT_CONCURRENCY};
use eyre::WrapErr;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Prints the recent Transfer, Approval and Mint events of an account.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub(crate) struct Args {
    /// Ethereum JSON-RPC endpoint.
    #[clap(long, env = "ETH_SEPOLIA_RPC_URL")]
    pub(crate) rpc_url: Url,
    /// The tracked account. Nothing is fetched without one.
    #[clap(long, env)]
    pub(crate) account: Option<Address>,
    /// Number of blocks scanned below the chain tip.
    #[clap(long, default_value_t = DEFAULT_BLOCK_WINDOW)]
    pub(crate) window: u64,
    /// Attempts per log or block lookup.
    #[clap(long, default_value_t = 3)]
    pub(crate) max_attempts: u32,
    /// Delay after the first failed attempt, in milliseconds.
    #[clap(long, default_value_t = 1_000)]
    pub(crate) backoff_ms: u64,
    /// Double the delay after each failure instead of growing it linearly.
    #[clap(long)]
    pub(crate) exponential_backoff: bool,
    /// Upper bound of the exponential delay, in milliseconds.
    #[clap(long, default_value_t = 30_000)]
    pub(crate) max_backoff_ms: u64,
    /// Maximum number of in-flight lookups.
    #[clap(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub(crate) concurrency: usize,
    /// JSON file listing the monitored tokens. Defaults to the Sepolia DAI and USDC tokens.
    #[clap(long)]
    pub(crate) tokens: Option<PathBuf>,
    /// Chain the `--tokens` are deployed on. The node must serve it.
    #[clap(long, requires = "tokens")]
    pub(crate) chain_id: Option<u64>,
    /// Block explorer used to link transactions.
    #[clap(long, default_value = "https://sepolia.etherscan.io")]
    pub(crate) explorer_url: String,
    /// Print the result as JSON.
    #[clap(long)]
    pub(crate) json: bool,
    /// Enable debug logs.
    #[clap(long)]
    pub(crate) debug: bool,
}

impl Args {
    pub(crate) fn account(&self) -> ActiveAccount {
        self.account.map(ActiveAccount::connected).unwrap_or_default()
    }

    pub(crate) fn registry(&self) -> eyre::Result<TokenRegistry> {
        let Some(path) = &self.tokens else {
            return Ok(TokenRegistry::sepolia());
        };

        let json = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;

        let registry = TokenRegistry::from_json(&json)?;

        Ok(match self.chain_id {
            Some(chain_id) => registry.with_chain_id(chain_id),
            None => registry,
        })
    }

    pub(crate) fn retry_policy(&self) -> RetryPolicy {
        let delay = Duration::from_millis(self.backoff_ms);
        let backoff = if self.exponential_backoff {
            Backoff::Exponential { base: delay, max: Duration::from_millis(self.max_backoff_ms) }
        } else {
            Backoff::Linear { step: delay }
        };

        RetryPolicy::new(self.max_attempts, backoff)
    }
}

pub(crate) fn init_tracing(debug: bool) -> eyre::Result<()> {
    let mut env_filter = EnvFilter::new("erc20_events=info,erc20_events_host=info");

    if debug {
        env_filter = env_filter
            .add_directive("erc20_events=debug".parse()?)
            .add_directive("erc20_events_host=debug".parse()?);
    }

    if let Ok(rust_log) = std::env::var("RUST_LOG") {
        for directive in rust_log.split(',').filter(|s| !s.is_empty()) {
            match directive.parse() {
                Ok(directive) => env_filter = env_filter.add_directive(directive),
                Err(err) => eprintln!("Ignoring directive `{directive}`: {err}"),
            }
        }
    }

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    if std::env::var("ENABLE_JSON_LOGS").is_ok() {
        subscriber.json().init();
    } else {
        subscriber.compact().init();
    }

    Ok(())
}
