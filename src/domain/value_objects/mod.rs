//! Value Objects for the storefront

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Product identity. Millisecond timestamps for products created in the admin panel.
pub type ProductId = i64;

/// Integer price extracted from a display string such as `"1 200 ₽"`.
///
/// Whitespace and the ruble sign are stripped, then the leading integer is
/// read; anything unreadable prices at zero.
pub fn parse_display_price(display: &str) -> i64 {
    let cleaned: String = display.chars().filter(|c| !c.is_whitespace() && *c != '₽').collect();
    leading_integer(&cleaned).unwrap_or(0)
}

/// Only the ASCII digits of `raw`, in order.
pub fn digits_only(raw: &str) -> String { raw.chars().filter(char::is_ascii_digit).collect() }

fn leading_integer(s: &str) -> Option<i64> {
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() { return None; }
    digits.parse::<i64>().ok().map(|n| sign * n)
}

/// Ruble amount with Russian digit grouping, e.g. `20 000` (NBSP separated).
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * 2 + 1);
    if amount < 0 { out.push('-'); }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 { out.push('\u{a0}'); }
        out.push(c);
    }
    out
}

/// Phone number as typed by the customer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Phone(String);

impl Phone {
    pub const MIN_DIGITS: usize = 10;
    pub const MAX_DIGITS: usize = 15;

    pub fn new(raw: impl Into<String>) -> Self { Self(raw.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
    pub fn normalized(&self) -> String { digits_only(&self.0) }
    pub fn is_valid(&self) -> bool {
        (Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&self.normalized().len())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self { Self::Light => Self::Dark, Self::Dark => Self::Light }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self { Self::Light => f.write_str("light"), Self::Dark => f.write_str("dark") }
    }
}

/// Persisted numbers may be strings, floats or garbage; garbage reads as absent.
fn lenient_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

pub fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_number(&value).map(|n| n.trunc() as i64))
}

/// Negative counts are as unreadable as non-numeric ones.
pub fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_number(&value).and_then(|n| u32::try_from(n.trunc() as i64).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_display_price() {
        assert_eq!(parse_display_price("1200 ₽"), 1200);
        assert_eq!(parse_display_price("12 500₽"), 12500);
        assert_eq!(parse_display_price("3400 руб"), 3400);
        assert_eq!(parse_display_price("договорная"), 0);
        assert_eq!(parse_display_price(""), 0);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(950), "950");
        assert_eq!(format_amount(1000), "1\u{a0}000");
        assert_eq!(format_amount(1234567), "1\u{a0}234\u{a0}567");
        assert_eq!(format_amount(-19000), "-19\u{a0}000");
    }

    #[test]
    fn test_phone() {
        assert!(Phone::new("+7 (999) 123-45-67").is_valid());
        assert_eq!(Phone::new("+7 (999) 123-45-67").normalized(), "79991234567");
        assert!(!Phone::new("123-45-67").is_valid());
        assert!(!Phone::new("1234567890123456").is_valid());
        assert!(!Phone::new("").is_valid());
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::default().toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
    }
}
