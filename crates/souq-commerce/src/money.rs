//! Money type for representing monetary values.
//!
//! Uses minor-unit integer representation to avoid floating-point
//! precision issues that plague monetary calculations. Floats only appear
//! at the JSON boundary, where the persisted cart stores plain numbers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Syrian pound, the storefront's home currency.
    #[default]
    SYP,
    USD,
    EUR,
    GBP,
    TRY,
    AED,
    SAR,
}

impl Currency {
    /// Get the currency code (e.g., "SYP").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::SYP => "SYP",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::TRY => "TRY",
            Currency::AED => "AED",
            Currency::SAR => "SAR",
        }
    }

    /// Get the currency symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::SYP => "\u{0644}.\u{0633}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::TRY => "\u{20ba}",
            Currency::AED => "AED",
            Currency::SAR => "SAR",
        }
    }

    /// Whether the symbol is written after the amount.
    pub fn symbol_after(&self) -> bool {
        matches!(self, Currency::SYP | Currency::AED | Currency::SAR)
    }

    /// Number of decimal places amounts are stored with.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Number of fractional digits shown to shoppers.
    pub fn display_places(&self) -> u32 {
        match self {
            Currency::SYP => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "SYP" => Some(Currency::SYP),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "TRY" => Some(Currency::TRY),
            "AED" => Some(Currency::AED),
            "SAR" => Some(Currency::SAR),
            _ => None,
        }
    }

    fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., piastres
/// for SYP, cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from whole major units.
    pub fn from_major(amount: i64, currency: Currency) -> Self {
        Self::new(amount.saturating_mul(currency.minor_per_major()), currency)
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use souq_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::USD);
    /// assert_eq!(price.amount_minor, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let scaled = (amount * currency.minor_per_major() as f64).round();
        Self::new(scaled as i64, currency)
    }

    /// Parse a price as it arrives from the backend or a filter input.
    ///
    /// Everything except ASCII digits and the first `.` is stripped, so
    /// `"86,000.00"` and `"86000 ل.س"` both parse. Extra precision is
    /// rounded half-up. Returns `None` when no digit is present or the value
    /// does not fit.
    ///
    /// ```
    /// use souq_commerce::money::{Money, Currency};
    /// let price = Money::parse_lenient("86,000.00", Currency::SYP).unwrap();
    /// assert_eq!(price, Money::from_major(86_000, Currency::SYP));
    /// assert!(Money::parse_lenient("call us", Currency::SYP).is_none());
    /// ```
    pub fn parse_lenient(text: &str, currency: Currency) -> Option<Self> {
        let mut whole = String::new();
        let mut fraction = String::new();
        let mut seen_dot = false;

        for c in text.chars() {
            if c.is_ascii_digit() {
                if seen_dot {
                    fraction.push(c);
                } else {
                    whole.push(c);
                }
            } else if c == '.' {
                seen_dot = true;
            }
        }

        if whole.is_empty() && fraction.is_empty() {
            return None;
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().ok()?
        };

        let places = currency.decimal_places() as usize;
        let mut digits = fraction.chars().map(|c| i64::from(c as u8 - b'0'));
        let mut minor: i64 = 0;
        for _ in 0..places {
            minor = minor * 10 + digits.next().unwrap_or(0);
        }
        if digits.next().is_some_and(|d| d >= 5) {
            minor += 1;
        }

        let amount = whole
            .checked_mul(currency.minor_per_major())?
            .checked_add(minor)?;
        Some(Self::new(amount, currency))
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_minor > 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_minor as f64 / self.currency.minor_per_major() as f64
    }

    /// Format as a display string (e.g., "86,000 ل.س" or "$49.99").
    pub fn display(&self) -> String {
        let amount = self.display_amount();
        if self.currency.symbol_after() {
            format!("{} {}", amount, self.currency.symbol())
        } else {
            format!("{}{}", self.currency.symbol(), amount)
        }
    }

    /// Format the amount with thousands separators and no symbol.
    pub fn display_amount(&self) -> String {
        let shown = self.currency.display_places();
        let hidden = self.currency.decimal_places().saturating_sub(shown);
        let divisor = 10_i64.pow(hidden);

        // Round half away from zero to the shown precision.
        let magnitude = self.amount_minor.unsigned_abs();
        let divisor_u = divisor.unsigned_abs();
        let rounded = (magnitude + divisor_u / 2) / divisor_u;

        let shown_scale = 10_u64.pow(shown);
        let whole = group_thousands(rounded / shown_scale);
        let sign = if self.is_negative() && rounded > 0 { "-" } else { "" };

        if shown == 0 {
            format!("{sign}{whole}")
        } else {
            let frac = rounded % shown_scale;
            format!("{sign}{whole}.{frac:0width$}", width = shown as usize)
        }
    }

    /// Try to add another Money value, returning None if currencies don't
    /// match or the result overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_minor.checked_add(other.amount_minor)?,
            self.currency,
        ))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        Some(Money::new(
            self.amount_minor.checked_sub(other.amount_minor)?,
            self.currency,
        ))
    }

    /// Multiply by a scalar, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        Some(Money::new(
            self.amount_minor.checked_mul(factor)?,
            self.currency,
        ))
    }

    /// Sum an iterator of Money values.
    ///
    /// Returns None on currency mismatch or overflow.
    pub fn try_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_minor() {
        let m = Money::new(4999, Currency::USD);
        assert_eq!(m.amount_minor, 4999);
        assert_eq!(m.currency, Currency::USD);
    }

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::USD);
        assert_eq!(m.amount_minor, 4999);

        let m = Money::from_decimal(86000.0, Currency::SYP);
        assert_eq!(m, Money::from_major(86_000, Currency::SYP));
    }

    #[test]
    fn test_money_to_decimal() {
        let m = Money::new(4999, Currency::USD);
        assert!((m.to_decimal() - 49.99).abs() < 0.001);
    }

    #[test]
    fn test_parse_lenient() {
        let syp = Currency::SYP;
        assert_eq!(Money::parse_lenient("100", syp), Some(Money::from_major(100, syp)));
        assert_eq!(
            Money::parse_lenient("86,000.00", syp),
            Some(Money::from_major(86_000, syp))
        );
        assert_eq!(
            Money::parse_lenient("  12.5 \u{0644}.\u{0633}", syp),
            Some(Money::new(1250, syp))
        );
        assert_eq!(Money::parse_lenient(".75", syp), Some(Money::new(75, syp)));
        assert_eq!(Money::parse_lenient("1.005", syp), Some(Money::new(101, syp)));
        assert_eq!(Money::parse_lenient("1.004", syp), Some(Money::new(100, syp)));
    }

    #[test]
    fn test_parse_lenient_rejects_digitless() {
        assert_eq!(Money::parse_lenient("", Currency::SYP), None);
        assert_eq!(Money::parse_lenient("abc", Currency::SYP), None);
        assert_eq!(Money::parse_lenient(".", Currency::SYP), None);
    }

    #[test]
    fn test_parse_lenient_overflow() {
        assert_eq!(Money::parse_lenient("99999999999999999999999", Currency::SYP), None);
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(4999, Currency::USD);
        assert_eq!(m.display(), "$49.99");

        let m = Money::from_major(86_000, Currency::SYP);
        assert_eq!(m.display(), "86,000 \u{0644}.\u{0633}");

        let m = Money::new(1_234_567_89, Currency::EUR);
        assert_eq!(m.display_amount(), "1,234,567.89");
    }

    #[test]
    fn test_display_rounds_hidden_places() {
        assert_eq!(Money::new(150, Currency::SYP).display_amount(), "2");
        assert_eq!(Money::new(149, Currency::SYP).display_amount(), "1");
        assert_eq!(Money::new(-150, Currency::SYP).display_amount(), "-2");
    }

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000, Currency::USD);
        let b = Money::new(500, Currency::USD);
        assert_eq!(a.try_add(&b).unwrap().amount_minor, 1500);
    }

    #[test]
    fn test_money_subtraction() {
        let a = Money::new(1000, Currency::USD);
        let b = Money::new(300, Currency::USD);
        assert_eq!(a.try_subtract(&b).unwrap().amount_minor, 700);
    }

    #[test]
    fn test_money_multiply() {
        let m = Money::new(1000, Currency::USD);
        assert_eq!(m.try_multiply(2).unwrap().amount_minor, 2000);
        assert!(Money::new(i64::MAX, Currency::USD).try_multiply(2).is_none());
    }

    #[test]
    fn test_money_currency_mismatch() {
        let usd = Money::new(1000, Currency::USD);
        let eur = Money::new(1000, Currency::EUR);
        assert!(usd.try_add(&eur).is_none());
    }

    #[test]
    fn test_try_sum() {
        let values = [Money::new(100, Currency::SYP), Money::new(250, Currency::SYP)];
        assert_eq!(
            Money::try_sum(values.iter(), Currency::SYP),
            Some(Money::new(350, Currency::SYP))
        );
        assert_eq!(
            Money::try_sum(std::iter::empty(), Currency::SYP),
            Some(Money::zero(Currency::SYP))
        );
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("SYP"), Some(Currency::SYP));
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
