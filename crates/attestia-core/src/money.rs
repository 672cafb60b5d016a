//! Fixed-point decimal money arithmetic (C1).
//!
//! A `Money` value is a signed integer (`amount x 10^decimals`) carried
//! internally as `i128` — wide enough for any currency/decimals combination
//! this kernel is exercised against (attestation and reconciliation amounts,
//! not raw token-wei precision). No floating point is used anywhere.

use crate::error::AttestiaError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: String,
    pub currency: String,
    pub decimals: u32,
}

impl Money {
    pub fn new(
        scaled: i128,
        currency: impl Into<String>,
        decimals: u32,
    ) -> Result<Self, AttestiaError> {
        let currency = currency.into();
        if currency.is_empty() {
            return Err(AttestiaError::InvalidInput("currency must not be empty".into()));
        }
        Ok(Self {
            amount: format_amount(scaled, decimals),
            currency,
            decimals,
        })
    }

    pub fn from_str(
        amount: &str,
        currency: impl Into<String>,
        decimals: u32,
    ) -> Result<Self, AttestiaError> {
        let scaled = parse_amount(amount, decimals)?;
        Self::new(scaled, currency, decimals)
    }

    /// Scaled integer value: `amount * 10^decimals`.
    pub fn scaled(&self) -> Result<i128, AttestiaError> {
        parse_amount(&self.amount, self.decimals)
    }

    fn require_compatible(&self, other: &Money) -> Result<(), AttestiaError> {
        if self.currency != other.currency || self.decimals != other.decimals {
            return Err(AttestiaError::InvalidInput(format!(
                "currency mismatch: {}/{} vs {}/{}",
                self.currency, self.decimals, other.currency, other.decimals
            )));
        }
        Ok(())
    }

    pub fn add(&self, other: &Money) -> Result<Money, AttestiaError> {
        self.require_compatible(other)?;
        let sum = self.scaled()? + other.scaled()?;
        Money::new(sum, self.currency.clone(), self.decimals)
    }

    pub fn sub(&self, other: &Money) -> Result<Money, AttestiaError> {
        self.require_compatible(other)?;
        let diff = self.scaled()? - other.scaled()?;
        Money::new(diff, self.currency.clone(), self.decimals)
    }

    pub fn is_zero(&self) -> Result<bool, AttestiaError> {
        Ok(self.scaled()? == 0)
    }

    pub fn is_positive(&self) -> Result<bool, AttestiaError> {
        Ok(self.scaled()? > 0)
    }

    pub fn is_negative(&self) -> Result<bool, AttestiaError> {
        Ok(self.scaled()? < 0)
    }

    pub fn abs(&self) -> Result<Money, AttestiaError> {
        let v = self.scaled()?.abs();
        Money::new(v, self.currency.clone(), self.decimals)
    }

    pub fn cmp_value(&self, other: &Money) -> Result<Ordering, AttestiaError> {
        self.require_compatible(other)?;
        Ok(self.scaled()?.cmp(&other.scaled()?))
    }

    /// Validates a `Money` per the ledger's entry-level rule: non-empty
    /// amount, non-empty currency, well-formed amount string, strictly
    /// positive value. Used by C4 before accepting a `LedgerEntry`.
    pub fn validate_positive(&self) -> Result<(), AttestiaError> {
        if self.amount.is_empty() {
            return Err(AttestiaError::InvalidInput("amount must not be empty".into()));
        }
        if self.currency.is_empty() {
            return Err(AttestiaError::InvalidInput("currency must not be empty".into()));
        }
        let scaled = parse_amount(&self.amount, self.decimals)?;
        if scaled <= 0 {
            return Err(AttestiaError::InvalidInput(
                "amount must be strictly positive".into(),
            ));
        }
        Ok(())
    }
}

/// Parses a decimal string into its scaled integer representation.
///
/// Accepts `^-?[0-9]+(\.[0-9]{0,decimals})?$`; rejects empty strings,
/// leading/trailing whitespace, a leading `+`, multiple dots, and excess
/// fractional digits.
pub fn parse_amount(s: &str, decimals: u32) -> Result<i128, AttestiaError> {
    if s.is_empty() {
        return Err(AttestiaError::InvalidInput("amount is empty".into()));
    }
    if s.trim() != s {
        return Err(AttestiaError::InvalidInput("amount has surrounding whitespace".into()));
    }

    let (negative, rest) = match s.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, s),
    };
    if rest.starts_with('+') {
        return Err(AttestiaError::InvalidInput("leading '+' not allowed".into()));
    }

    let mut parts = rest.splitn(2, '.');
    let int_part = parts.next().unwrap_or("");
    let frac_part = parts.next();

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AttestiaError::InvalidInput(format!("invalid integer part: {s}")));
    }
    if rest.matches('.').count() > 1 {
        return Err(AttestiaError::InvalidInput("multiple decimal points".into()));
    }

    let frac_digits = match frac_part {
        None => String::new(),
        Some(f) => {
            if f.len() > decimals as usize {
                return Err(AttestiaError::InvalidInput(format!(
                    "too many fractional digits: max {decimals}"
                )));
            }
            if !f.bytes().all(|b| b.is_ascii_digit()) {
                return Err(AttestiaError::InvalidInput(format!("invalid fractional part: {s}")));
            }
            f.to_string()
        }
    };

    let padded = format!("{frac_digits:0<width$}", width = decimals as usize);
    let digits = format!("{int_part}{padded}");
    let mut value: i128 = digits
        .parse()
        .map_err(|_| AttestiaError::InvalidInput(format!("amount out of range: {s}")))?;
    if negative {
        value = -value;
    }
    Ok(value)
}

/// Formats a scaled integer into its canonical decimal string: a decimal
/// point is present iff `decimals > 0`, with exactly `decimals` fractional
/// digits and a leading `-` for negative values.
pub fn format_amount(scaled: i128, decimals: u32) -> String {
    let negative = scaled < 0;
    let magnitude = scaled.unsigned_abs();
    let digits = magnitude.to_string();
    let decimals = decimals as usize;

    let (int_part, frac_part) = if decimals == 0 {
        (digits, String::new())
    } else if digits.len() <= decimals {
        let padded = format!("{digits:0>width$}", width = decimals);
        ("0".to_string(), padded)
    } else {
        let split_at = digits.len() - decimals;
        (digits[..split_at].to_string(), digits[split_at..].to_string())
    };

    let sign = if negative && (int_part != "0" || frac_part.bytes().any(|b| b != b'0')) {
        "-"
    } else {
        ""
    };

    if decimals == 0 {
        format!("{sign}{int_part}")
    } else {
        format!("{sign}{int_part}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_format_roundtrip() {
        for d in [0u32, 2, 6, 18] {
            for n in [0i128, 1, -1, 123_456, -123_456] {
                let s = format_amount(n, d);
                assert_eq!(parse_amount(&s, d).unwrap(), n, "d={d} n={n} s={s}");
            }
        }
    }

    #[test]
    fn format_then_parse_is_identity_on_wellformed_strings() {
        assert_eq!(format_amount(parse_amount("100.50", 2).unwrap(), 2), "100.50");
        assert_eq!(format_amount(parse_amount("0.00", 2).unwrap(), 2), "0.00");
        assert_eq!(format_amount(parse_amount("-5", 0).unwrap(), 0), "-5");
    }

    #[test]
    fn rejects_malformed_strings() {
        assert!(parse_amount("", 2).is_err());
        assert!(parse_amount(" 1.00", 2).is_err());
        assert!(parse_amount("+1.00", 2).is_err());
        assert!(parse_amount("1.0.0", 2).is_err());
        assert!(parse_amount("1.000", 2).is_err());
        assert!(parse_amount("abc", 2).is_err());
    }

    #[test]
    fn add_requires_same_currency_and_decimals() {
        let a = Money::from_str("1.00", "USDC", 2).unwrap();
        let b = Money::from_str("1.00", "USDT", 2).unwrap();
        assert!(a.add(&b).is_err());
    }

    #[test]
    fn add_is_commutative_and_associative_with_zero_identity() {
        let a = Money::from_str("10.00", "USDC", 2).unwrap();
        let b = Money::from_str("-3.00", "USDC", 2).unwrap();
        let c = Money::from_str("0.50", "USDC", 2).unwrap();
        let zero = Money::from_str("0.00", "USDC", 2).unwrap();

        assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
        assert_eq!(
            a.add(&b).unwrap().add(&c).unwrap(),
            a.add(&b.add(&c).unwrap()).unwrap()
        );
        assert_eq!(a.add(&zero).unwrap(), a);
        assert!(a.sub(&a).unwrap().is_zero().unwrap());
    }

    #[test]
    fn validate_positive_rejects_zero_and_negative() {
        let zero = Money::from_str("0.00", "USDC", 2).unwrap();
        let neg = Money::from_str("-1.00", "USDC", 2).unwrap();
        let pos = Money::from_str("1.00", "USDC", 2).unwrap();
        assert!(zero.validate_positive().is_err());
        assert!(neg.validate_positive().is_err());
        assert!(pos.validate_positive().is_ok());
    }
}
