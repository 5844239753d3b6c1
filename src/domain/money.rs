//! Money amounts stored as integer minor units and their display format.

use std::fmt::{Display, Formatter};

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::domain::types::{CurrencyCode, TypeConstraintError};

/// Amount in minor units (cents) together with its currency.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Money {
    pub cents: i64,
    pub currency: CurrencyCode,
}

impl Money {
    #[must_use]
    pub fn new(cents: i64, currency: CurrencyCode) -> Self {
        Self { cents, currency }
    }

    /// Formatted amount, e.g. `$1,234.50`.
    pub fn display(&self) -> String {
        format_currency(self.cents, self.currency.as_str())
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// Templates receive the raw amount, the currency and the formatted string.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Money", 3)?;
        state.serialize_field("cents", &self.cents)?;
        state.serialize_field("currency", self.currency.as_str())?;
        state.serialize_field("display", &self.display())?;
        state.end()
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        _ => None,
    }
}

/// Formats minor units with thousands separators and two decimals.
///
/// Known currencies get a symbol prefix, anything else is suffixed with its
/// code: `format_currency(123450, "CHF") == "1,234.50 CHF"`.
pub fn format_currency(cents: i64, code: &str) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let whole = (abs / 100).to_string();
    let fraction = abs % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match currency_symbol(code) {
        Some(symbol) => format!("{sign}{symbol}{grouped}.{fraction:02}"),
        None => format!("{sign}{grouped}.{fraction:02} {code}"),
    }
}

/// Parses user input such as `1234.5`, `1,234.50` or `$ 99` into cents.
pub fn parse_amount(value: &str) -> Result<i64, TypeConstraintError> {
    let cleaned: String = value
        .trim()
        .trim_start_matches(['$', '€', '£'])
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    let (whole, fraction) = match cleaned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (cleaned.as_str(), ""),
    };

    if whole.is_empty()
        || fraction.len() > 2
        || !whole.chars().all(|c| c.is_ascii_digit())
        || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(TypeConstraintError::InvalidAmount);
    }

    let whole: i64 = whole.parse().map_err(|_| TypeConstraintError::InvalidAmount)?;
    let fraction: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| TypeConstraintError::InvalidAmount)? * 10,
        _ => fraction.parse().map_err(|_| TypeConstraintError::InvalidAmount)?,
    };

    whole
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(fraction))
        .ok_or(TypeConstraintError::InvalidAmount)
}
