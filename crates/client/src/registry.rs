use std::collections::HashSet;

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};

use crate::RegistryError;

/// Address of the DAI test token on Sepolia.
pub const SEPOLIA_DAI: Address = address!("1D70D57ccD2798323232B2dD027B3aBcA5C00091");

/// Address of the USDC test token on Sepolia.
pub const SEPOLIA_USDC: Address = address!("C891481A0AaC630F4D89744ccD2C7D2C4215FD47");

/// Chain id of the Sepolia testnet.
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// Largest decimal count whose scaling factor fits in a `U256`.
pub const MAX_DECIMALS: u8 = 77;

/// A monitored ERC20 contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The display symbol, unique within a registry.
    pub symbol: String,
    /// The address of the token contract.
    pub address: Address,
    /// Number of decimals used to scale raw amounts.
    pub decimals: u8,
}

impl Token {
    pub fn new(symbol: impl Into<String>, address: Address, decimals: u8) -> Self {
        Self { symbol: symbol.into(), address, decimals }
    }
}

/// A static, read-only set of tokens, optionally bound to the chain they are deployed on.
///
/// Symbols and contract addresses are unique. Iteration follows insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRegistry {
    tokens: Vec<Token>,
    chain_id: Option<u64>,
}

impl TokenRegistry {
    /// Builds a registry, rejecting duplicated symbols or addresses and decimal counts above
    /// [`MAX_DECIMALS`].
    pub fn new(tokens: Vec<Token>) -> Result<Self, RegistryError> {
        let mut symbols = HashSet::new();
        let mut addresses = HashSet::new();

        for token in &tokens {
            if !symbols.insert(token.symbol.as_str()) {
                return Err(RegistryError::DuplicateSymbol(token.symbol.clone()));
            }
            if !addresses.insert(token.address) {
                return Err(RegistryError::DuplicateAddress(token.address));
            }
            if token.decimals > MAX_DECIMALS {
                return Err(RegistryError::UnsupportedDecimals {
                    symbol: token.symbol.clone(),
                    decimals: token.decimals,
                    max: MAX_DECIMALS,
                });
            }
        }

        Ok(Self { tokens, chain_id: None })
    }

    /// The DAI / USDC pair deployed on Sepolia.
    pub fn sepolia() -> Self {
        Self {
            tokens: vec![Token::new("DAI", SEPOLIA_DAI, 18), Token::new("USDC", SEPOLIA_USDC, 6)],
            chain_id: Some(SEPOLIA_CHAIN_ID),
        }
    }

    /// Binds the registry to `chain_id`.
    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    /// The chain the tokens are deployed on, if known.
    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    /// Parses a JSON array of `{ "symbol", "address", "decimals" }` objects.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let tokens: Vec<Token> = serde_json::from_str(json)?;
        Self::new(tokens)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    pub fn by_symbol(&self, symbol: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.symbol == symbol)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::sepolia()
    }
}
