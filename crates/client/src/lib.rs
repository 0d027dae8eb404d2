//! Pure building blocks for reconstructing the ERC20 activity of an account: the token
//! registry, the scanned block range, log decoding, the final assembly of a cycle and token
//! balances.

mod amount;
pub use amount::{format_amount, format_display_amount};

mod account;
pub use account::ActiveAccount;

mod balance;
pub use balance::TokenBalance;

mod errors;
pub use errors::RegistryError;

pub mod events;
pub use events::{EventKind, EventRecord, LogKind};

mod range;
pub use range::{BlockRange, DEFAULT_BLOCK_WINDOW};

mod registry;
pub use registry::{
    Token, TokenRegistry, MAX_DECIMALS, SEPOLIA_CHAIN_ID, SEPOLIA_DAI, SEPOLIA_USDC,
};
