//! Wallet identity and balance state
//!
//! [`WalletState`] is what the wallet collaborator reports about the user:
//! whether a wallet is connected, which account it exposes, and how many
//! staking tokens that account can still stake.

use {
    super::amount::TokenAmount,
    crate::errors::{Error, Result},
    serde::{Deserialize, Serialize},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        hash::{Hash, Hasher},
        str::FromStr,
    },
};

/// A `0x`-prefixed, 20-byte hex account or contract address.
///
/// Keeps the spelling it was parsed from for display. Equality and hashing
/// ignore hex case, so a checksummed address matches its lowercase form.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for Address {}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
    }
}

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `0xf39F...2266`
    pub fn short(&self) -> String {
        format!("{}...{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s
            .strip_prefix("0x")
            .ok_or_else(|| Error::InvalidAddress(format!("'{}' is missing the 0x prefix", s)))?;
        if hex.len() != 40 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidAddress(format!("'{}' is not 20 hex bytes", s)));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for Address {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Address({})", self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletState {
    pub address: Option<Address>,
    pub connected: bool,
    pub available_balance: TokenAmount,
}

impl WalletState {
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn connected(address: Address, available_balance: TokenAmount) -> Self {
        Self {
            address: Some(address),
            connected: true,
            available_balance,
        }
    }

    /// Connected with a known account.
    pub fn is_connected(&self) -> bool {
        self.connected && self.address.is_some()
    }
}
