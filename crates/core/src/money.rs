//! Fixed-point price value.
//!
//! Prices are kept as integer micro-units so parsing, comparison and equality
//! never involve floating point. Only the JSON boundary converts to a number.

use core::str::FromStr;
use serde::{Serialize, Serializer};

use crate::error::DomainError;

/// Number of fractional digits a [`Price`] can represent.
pub const PRICE_SCALE: u32 = 6;

const MICROS_PER_UNIT: u64 = 10u64.pow(PRICE_SCALE);

/// Non-negative decimal price with six fractional digits.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Price {
    micros: u64,
}

impl Price {
    pub const ZERO: Price = Price { micros: 0 };

    pub fn from_micros(micros: u64) -> Self {
        Self { micros }
    }

    /// Price from a whole amount plus hundredths, e.g. `from_cents(999)` is `9.99`.
    pub fn from_cents(cents: u64) -> Self {
        Self {
            micros: cents.saturating_mul(MICROS_PER_UNIT / 100),
        }
    }

    pub fn micros(&self) -> u64 {
        self.micros
    }

    /// Lossy conversion used at the JSON boundary.
    pub fn to_f64(&self) -> f64 {
        self.micros as f64 / MICROS_PER_UNIT as f64
    }
}

impl FromStr for Price {
    type Err = DomainError;

    /// Parses an invariant-culture decimal: digits, optional `.` fraction,
    /// optional leading `+`. No exponent, no grouping separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.starts_with('-') {
            return Err(DomainError::validation(format!(
                "price must be non-negative, got '{raw}'"
            )));
        }
        let unsigned = raw.strip_prefix('+').unwrap_or(raw);

        let (whole, frac) = match unsigned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (unsigned, ""),
        };

        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !is_digits(whole) || !is_digits(frac) {
            return Err(DomainError::validation(format!("invalid price '{raw}'")));
        }

        // Digits past the supported scale round half-to-even into the last micro.
        let (kept, dropped) = frac.split_at(frac.len().min(PRICE_SCALE as usize));

        let overflow = || DomainError::validation(format!("price '{raw}' is out of range"));

        let whole_units: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };

        let mut frac_micros: u64 = 0;
        for (i, b) in kept.bytes().enumerate() {
            let digit = u64::from(b - b'0');
            frac_micros += digit * 10u64.pow(PRICE_SCALE - 1 - i as u32);
        }

        let truncated = whole_units
            .checked_mul(MICROS_PER_UNIT)
            .and_then(|m| m.checked_add(frac_micros))
            .ok_or_else(overflow)?;

        let micros = if rounds_up(dropped, truncated) {
            truncated.checked_add(1).ok_or_else(overflow)?
        } else {
            truncated
        };

        Ok(Self { micros })
    }
}

/// Banker's rounding decision for the digits cut off below one micro.
fn rounds_up(dropped: &str, truncated: u64) -> bool {
    let mut digits = dropped.bytes();
    match digits.next() {
        Some(b'6'..=b'9') => true,
        Some(b'5') => digits.any(|b| b != b'0') || truncated % 2 == 1,
        _ => false,
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let whole = self.micros / MICROS_PER_UNIT;
        let frac = self.micros % MICROS_PER_UNIT;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{frac:0width$}", width = PRICE_SCALE as usize);
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_invariant_decimals() {
        assert_eq!("9.99".parse::<Price>().unwrap(), Price::from_cents(999));
        assert_eq!("0.50".parse::<Price>().unwrap(), Price::from_cents(50));
        assert_eq!("+12".parse::<Price>().unwrap(), Price::from_cents(1200));
        assert_eq!(".5".parse::<Price>().unwrap(), Price::from_cents(50));
        assert_eq!("5.".parse::<Price>().unwrap(), Price::from_cents(500));
        assert_eq!("1.2500000".parse::<Price>().unwrap(), Price::from_cents(125));
    }

    #[test]
    fn rejects_negative_and_malformed() {
        for raw in ["-1", "", ".", "1,5", "1e3", "abc", "1.2.3", "1.0000001x"] {
            match raw.parse::<Price>() {
                Err(DomainError::Validation(_)) => {}
                other => panic!("expected Validation for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn extra_fractional_digits_round_half_to_even() {
        let micros = |raw: &str| raw.parse::<Price>().unwrap().micros();
        assert_eq!(micros("9.9999999"), 10_000_000);
        assert_eq!(micros("0.0000001"), 0);
        assert_eq!(micros("0.0000004999"), 0);
        assert_eq!(micros("0.0000005"), 0);
        assert_eq!(micros("0.0000015"), 2);
        assert_eq!(micros("0.00000050001"), 1);
        assert_eq!(micros("1.2345678"), 1_234_568);
    }

    #[test]
    fn rejects_overflow() {
        assert!("99999999999999999999".parse::<Price>().is_err());
    }

    #[test]
    fn displays_without_trailing_zeros() {
        assert_eq!(Price::from_cents(999).to_string(), "9.99");
        assert_eq!(Price::from_cents(50).to_string(), "0.5");
        assert_eq!(Price::from_cents(1000).to_string(), "10");
    }

    #[test]
    fn serializes_as_json_number() {
        let json = serde_json::to_value(Price::from_cents(999)).unwrap();
        assert_eq!(json, serde_json::json!(9.99));
    }

    proptest! {
        /// Property: any cents amount formatted with two decimals parses back exactly.
        #[test]
        fn two_decimal_prices_parse_exactly(cents in 0u64..10_000_000_000u64) {
            let raw = format!("{}.{:02}", cents / 100, cents % 100);
            prop_assert_eq!(raw.parse::<Price>().unwrap(), Price::from_cents(cents));
        }
    }
}
