//! MOB amount arithmetic.
//!
//! The wallet API deals in picoMOB (1 MOB = 10^12 pMOB), transmitted as
//! decimal strings. Users type MOB. This module converts between the two
//! without going through floating point.

use std::fmt;
use std::str::FromStr;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// picoMOB per MOB.
pub const PMOB_PER_MOB: u64 = 1_000_000_000_000;

/// Number of fractional digits in a MOB amount.
pub const MOB_DECIMALS: u32 = 12;

/// Flat network transaction fee: 0.01 MOB.
pub const TRANSACTION_FEE: Amount = Amount(10_000_000_000);

/// An amount of MOB, stored as picoMOB.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct Amount(pub u64);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseAmountError {
    #[error("empty amount")]
    Empty,
    #[error("negative amounts are not allowed")]
    Negative,
    #[error("invalid amount: {0:?}")]
    Invalid(String),
    #[error("MOB amounts have at most {MOB_DECIMALS} decimal places")]
    TooPrecise,
    #[error("amount is too large")]
    Overflow,
}

impl Amount {
    pub fn as_pmob(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    /// Parse a pMOB value from the API's quoted-decimal-integer form.
    pub fn from_pmob_str(s: &str) -> Result<Self, ParseAmountError> {
        s.parse::<u64>()
            .map(Amount)
            .map_err(|_| ParseAmountError::Invalid(s.to_owned()))
    }
}

impl FromStr for Amount {
    type Err = ParseAmountError;

    /// Parse a user-entered decimal MOB string, e.g. "1", "0.25", ".5".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseAmountError::Empty);
        }
        if s.starts_with('-') {
            return Err(ParseAmountError::Negative);
        }
        let s = s.strip_prefix('+').unwrap_or(s);

        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(ParseAmountError::Invalid(s.to_owned()));
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ParseAmountError::Invalid(s.to_owned()));
        }
        if frac.len() > MOB_DECIMALS as usize {
            // Trailing zeros beyond 12 places are still representable.
            let (keep, rest) = frac.split_at(MOB_DECIMALS as usize);
            if rest.bytes().any(|b| b != b'0') {
                return Err(ParseAmountError::TooPrecise);
            }
            return parse_parts(whole, keep);
        }
        parse_parts(whole, frac)
    }
}

fn parse_parts(whole: &str, frac: &str) -> Result<Amount, ParseAmountError> {
    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| ParseAmountError::Overflow)?
    };

    // Scale the fractional digits up to 12 places.
    let mut frac_pmob: u64 = 0;
    if !frac.is_empty() {
        frac_pmob = frac.parse().map_err(|_| ParseAmountError::Overflow)?;
        frac_pmob *= 10u64.pow(MOB_DECIMALS - frac.len() as u32);
    }

    whole
        .checked_mul(PMOB_PER_MOB)
        .and_then(|w| w.checked_add(frac_pmob))
        .map(Amount)
        .ok_or(ParseAmountError::Overflow)
}

impl fmt::Display for Amount {
    /// Format as MOB with at least four decimal places, keeping further
    /// digits only when they are non-zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / PMOB_PER_MOB;
        let frac = self.0 % PMOB_PER_MOB;
        let mut digits = format!("{frac:012}");
        while digits.len() > 4 && digits.ends_with('0') {
            digits.pop();
        }
        write!(f, "{whole}.{digits}")
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Amount::from_pmob_str(&s).map_err(de::Error::custom)
    }
}
