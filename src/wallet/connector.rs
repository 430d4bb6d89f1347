// src/wallet/connector.rs
//! Wallet connection for the DID wizard.
//!
//! Supplies the controller identifier the document builder needs. Two paths
//! exist:
//! - A real account address handed over by the user's wallet
//! - A demo address generated from random bytes when no wallet is present
//!
//! No private keys are created or held here. The demo address is just 20
//! random bytes; it does not correspond to any key pair.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length in bytes of an Ethereum-style account address.
pub const ADDRESS_LEN: usize = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// Address is not `0x` followed by 40 hex digits
    #[error("invalid account address '{0}': expected 0x followed by 40 hex digits")]
    InvalidAddress(String),
}

/// A connected wallet account.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WalletAccount {
    /// `0x`-prefixed account address, hex digits in the case the wallet supplied
    pub address: String,

    /// `true` when the address was generated rather than supplied by a wallet
    pub demo: bool,
}

impl WalletAccount {
    /// Abbreviated form for display: first 8 characters, `...`, last 6.
    ///
    /// # Example
    /// ```
    /// use did_wizard::wallet::connector::WalletConnector;
    /// let account = WalletConnector::connect("0x52908400098527886E0F7030069857D2E4169EE7").unwrap();
    /// assert_eq!(account.short_address(), "0x529084...169EE7");
    /// ```
    pub fn short_address(&self) -> String {
        shorten(&self.address)
    }
}

/// Shortens any identifier the way account addresses are displayed.
///
/// Identifiers of 14 characters or fewer are returned unchanged.
pub fn shorten(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 14 {
        return value.to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 6..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Entry point for obtaining a [`WalletAccount`].
pub struct WalletConnector;

impl WalletConnector {
    /// Accepts an address supplied by an external wallet.
    ///
    /// # Arguments
    /// * `address` - `0x`-prefixed hex address, surrounding whitespace ignored.
    ///   Mixed-case (EIP-55 checksum) digits are kept as given; only a `0X`
    ///   prefix is rewritten to `0x`.
    ///
    /// # Errors
    /// `WalletError::InvalidAddress` if the value is not 20 hex-encoded bytes.
    pub fn connect(address: &str) -> Result<WalletAccount, WalletError> {
        let trimmed = address.trim();
        let invalid = || WalletError::InvalidAddress(address.to_string());

        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(invalid)?;
        let bytes = hex::decode(digits).map_err(|_| invalid())?;
        if bytes.len() != ADDRESS_LEN {
            return Err(invalid());
        }

        let account = WalletAccount {
            address: format!("0x{}", digits),
            demo: false,
        };
        log::info!("Wallet connected: {}", account.short_address());
        Ok(account)
    }

    /// Generates a demo account from `rng`.
    ///
    /// # Arguments
    /// * `rng` - Randomness source. Pass a seeded RNG for reproducible addresses.
    pub fn connect_demo<R: RngCore + ?Sized>(rng: &mut R) -> WalletAccount {
        let mut bytes = [0u8; ADDRESS_LEN];
        rng.fill_bytes(&mut bytes);

        let account = WalletAccount {
            address: format!("0x{}", hex::encode(bytes)),
            demo: true,
        };
        log::info!("Demo wallet connected: {}", account.short_address());
        account
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_connect_trims_and_fixes_prefix() {
        let account =
            WalletConnector::connect(" 0X52908400098527886e0f7030069857d2e4169ee7 ").unwrap();
        assert_eq!(account.address, "0x52908400098527886e0f7030069857d2e4169ee7");
        assert!(!account.demo);
    }

    #[test]
    fn test_connect_preserves_checksum_case() {
        let checksummed = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
        let account = WalletConnector::connect(checksummed).unwrap();
        assert_eq!(account.address, checksummed);
        assert_eq!(account.short_address(), "0x5aAeb6...1BeAed");
    }

    #[test]
    fn test_connect_rejects_malformed_addresses() {
        for address in [
            "",
            "52908400098527886e0f7030069857d2e4169ee7",
            "0x1234",
            "0xzz908400098527886e0f7030069857d2e4169ee7",
            "0x52908400098527886e0f7030069857d2e4169ee700",
        ] {
            assert_eq!(
                WalletConnector::connect(address),
                Err(WalletError::InvalidAddress(address.to_string()))
            );
        }
    }

    #[test]
    fn test_demo_address_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let account = WalletConnector::connect_demo(&mut rng);
        assert!(account.demo);
        assert_eq!(account.address.len(), 42);
        assert!(account.address.starts_with("0x"));
        assert!(WalletConnector::connect(&account.address).is_ok());
    }

    #[test]
    fn test_demo_address_reproducible_with_seeded_rng() {
        let first = WalletConnector::connect_demo(&mut StdRng::seed_from_u64(42));
        let second = WalletConnector::connect_demo(&mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_shorten() {
        assert_eq!(
            shorten("0x52908400098527886e0f7030069857d2e4169ee7"),
            "0x529084...169ee7"
        );
        assert_eq!(shorten("0xabc"), "0xabc");
    }
}
