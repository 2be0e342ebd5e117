//! Fixed-point token quantities
//!
//! Amounts are held as base units in an unsigned 256-bit integer, the same
//! width the token contract uses for balances, with [`TOKEN_DECIMALS`]
//! fractional digits. Parsing and formatting never go through floating point.

use {
    crate::errors::{Error, Result},
    primitive_types::{U256, U512},
    serde::{Deserialize, Serialize},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// Fractional digits of the staking and reward tokens.
pub const TOKEN_DECIMALS: u32 = 18;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenAmount(U256);

impl TokenAmount {
    pub const ZERO: Self = Self(U256([0; 4]));

    pub fn from_base_units(units: impl Into<U256>) -> Self {
        Self(units.into())
    }

    /// Whole tokens, e.g. `from_tokens(100)` is `100 * 10^18` base units.
    pub fn from_tokens(tokens: u64) -> Self {
        Self(U256::from(tokens) * one_token())
    }

    pub fn base_units(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// `self * numerator / denominator`, floored. The product is taken at 512
    /// bits, so `None` only when the quotient does not fit or the denominator
    /// is zero.
    pub fn checked_mul_div(self, numerator: U256, denominator: U256) -> Option<Self> {
        if denominator.is_zero() {
            return None;
        }
        let quotient = self.0.full_mul(numerator) / U512::from(denominator);
        U256::try_from(quotient).ok().map(Self)
    }

    /// Formats with exactly `decimals` fractional digits, truncating (never
    /// rounding up) anything beyond them.
    pub fn format_floor(&self, decimals: u32) -> String {
        let decimals = decimals.min(TOKEN_DECIMALS) as usize;
        let (whole, fraction) = self.split();
        if decimals == 0 {
            return whole.to_string();
        }
        format!("{}.{}", whole, &fraction[..decimals])
    }

    fn split(&self) -> (U256, String) {
        let unit = one_token();
        let whole = self.0 / unit;
        let fraction = format!("{:0>width$}", (self.0 % unit).to_string(), width = TOKEN_DECIMALS as usize);
        (whole, fraction)
    }
}

fn one_token() -> U256 {
    U256::exp10(TOKEN_DECIMALS as usize)
}

impl From<U256> for TokenAmount {
    fn from(units: U256) -> Self {
        Self(units)
    }
}

/// Full precision with trailing zeros dropped: `100`, `0.5`, `1.000000000000000001`.
impl Display for TokenAmount {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let (whole, fraction) = self.split();
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            write!(f, "{}", whole)
        } else {
            write!(f, "{}.{}", whole, fraction)
        }
    }
}

impl FromStr for TokenAmount {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let input = input.trim();
        let (whole, fraction) = input.split_once('.').unwrap_or((input, ""));

        if whole.is_empty() && fraction.is_empty() {
            return Err(Error::InvalidAmount(format!("'{}' is not a number", input)));
        }
        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(whole) || !is_digits(fraction) {
            return Err(Error::InvalidAmount(format!("'{}' is not a decimal number", input)));
        }
        if fraction.len() > TOKEN_DECIMALS as usize {
            return Err(Error::InvalidAmount(format!(
                "'{}' has more than {} decimal places",
                input, TOKEN_DECIMALS
            )));
        }

        let overflow = || Error::InvalidAmount(format!("'{}' is too large", input));
        let whole_units = if whole.is_empty() {
            U256::zero()
        } else {
            U256::from_dec_str(whole).map_err(|_| overflow())?
        };
        let fraction_units = if fraction.is_empty() {
            U256::zero()
        } else {
            U256::from_dec_str(fraction).map_err(|_| overflow())?
                * U256::exp10(TOKEN_DECIMALS as usize - fraction.len())
        };

        whole_units
            .checked_mul(one_token())
            .and_then(|units| units.checked_add(fraction_units))
            .map(Self)
            .ok_or_else(overflow)
    }
}
