use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// The account whose activity is tracked, as reported by the wallet layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveAccount {
    pub address: Option<Address>,
    pub connected: bool,
}

impl ActiveAccount {
    pub fn connected(address: Address) -> Self {
        Self { address: Some(address), connected: true }
    }

    pub fn disconnected() -> Self {
        Self::default()
    }

    /// The address to track, if any.
    pub fn tracked(&self) -> Option<Address> {
        self.address.filter(|_| self.connected)
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    #[test]
    fn only_connected_accounts_are_tracked() {
        let addr = address!("00000000000000000000000000000000000000aa");

        assert_eq!(ActiveAccount::connected(addr).tracked(), Some(addr));
        assert_eq!(ActiveAccount::disconnected().tracked(), None);
        assert_eq!(ActiveAccount { address: Some(addr), connected: false }.tracked(), None);
        assert_eq!(ActiveAccount { address: None, connected: true }.tracked(), None);
    }
}
