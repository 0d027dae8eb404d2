mod client;
pub use client::{ChainClient, LogQuery, ProviderChainClient};

mod errors;
pub use errors::{EventsError, HostError};

mod fetcher;
pub use fetcher::EventsFetcher;

mod fetcher_builder;
pub use fetcher_builder::{EventsFetcherBuilder, DEFAULT_CONCURRENCY};

mod retry;
pub use retry::{retry, Backoff, RetryPolicy};

mod state;
pub use state::{EventsState, FETCH_EVENTS_FAILED};
