use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::{format_amount, Token};

/// The balance of the tracked account in one registry token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub token: String,
    pub decimals: u8,
    /// The raw balance, `None` when it could not be read.
    pub value: Option<U256>,
    /// The balance scaled by the token decimals.
    pub amount: Option<String>,
}

impl TokenBalance {
    pub fn new(token: &Token, value: Option<U256>) -> Self {
        Self {
            token: token.symbol.clone(),
            decimals: token.decimals,
            value,
            amount: value.map(|value| format_amount(value, token.decimals)),
        }
    }
}
