use alloy_primitives::Address;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Registry parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Duplicate token symbol: {0}")]
    DuplicateSymbol(String),
    #[error("Duplicate token address: {0}")]
    DuplicateAddress(Address),
    #[error("Token {symbol} has {decimals} decimals, at most {max} are supported")]
    UnsupportedDecimals { symbol: String, decimals: u8, max: u8 },
}
