//! # Money Display
//!
//! Turns calculated `f64` amounts into currency strings for the
//! presentation layer. This is the ONLY place amounts are rounded.
//!
//! ## Formatting Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  format_currency(amount, code)                                          │
//! │       │                                                                 │
//! │       ├── code in KNOWN_CURRENCIES and amount finite                    │
//! │       │        │                                                        │
//! │       │        ▼                                                        │
//! │       │   "<sign><symbol><grouped digits>"                              │
//! │       │    INR  1234567.891  →  "₹12,34,567.89"   (lakh grouping)       │
//! │       │    USD  -1234.5      →  "-$1,234.50"                            │
//! │       │    JPY  1234.5       →  "¥1,234"          (no minor unit)       │
//! │       │                                                                 │
//! │       └── anything else (unknown code, NaN, ±∞)                         │
//! │                │                                                        │
//! │                ▼                                                        │
//! │           "<amount fixed to 2 decimals> <code>"                         │
//! │            XYZ  1234.5       →  "1234.50 XYZ"                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quote_core::money::format_currency;
//!
//! assert_eq!(format_currency(212.4, "INR"), "₹212.40");
//! assert_eq!(format_currency(212.4, "XYZ"), "212.40 XYZ");
//! ```

/// How the integer part of an amount is grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// `1,234,567`
    Thousands,
    /// `12,34,567` (lakh / crore)
    Indian,
}

/// Display rules for one ISO 4217 currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    /// Upper-case ISO code.
    pub code: &'static str,
    /// Symbol placed before the digits.
    pub symbol: &'static str,
    /// Minor-unit digits shown after the decimal point.
    pub decimals: usize,
    pub grouping: Grouping,
}

/// Currencies with locale-style formatting. Everything else falls back.
pub const KNOWN_CURRENCIES: &[CurrencyFormat] = &[
    CurrencyFormat { code: "INR", symbol: "₹", decimals: 2, grouping: Grouping::Indian },
    CurrencyFormat { code: "USD", symbol: "$", decimals: 2, grouping: Grouping::Thousands },
    CurrencyFormat { code: "EUR", symbol: "€", decimals: 2, grouping: Grouping::Thousands },
    CurrencyFormat { code: "GBP", symbol: "£", decimals: 2, grouping: Grouping::Thousands },
    CurrencyFormat { code: "JPY", symbol: "¥", decimals: 0, grouping: Grouping::Thousands },
    CurrencyFormat { code: "AUD", symbol: "A$", decimals: 2, grouping: Grouping::Thousands },
    CurrencyFormat { code: "CAD", symbol: "CA$", decimals: 2, grouping: Grouping::Thousands },
    CurrencyFormat { code: "SGD", symbol: "S$", decimals: 2, grouping: Grouping::Thousands },
    CurrencyFormat { code: "AED", symbol: "AED ", decimals: 2, grouping: Grouping::Thousands },
    CurrencyFormat { code: "CHF", symbol: "CHF ", decimals: 2, grouping: Grouping::Thousands },
];

/// Looks up display rules for a currency code (case-insensitive).
pub fn currency_format(code: &str) -> Option<&'static CurrencyFormat> {
    let code = code.trim();
    KNOWN_CURRENCIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code))
}

/// Formats an amount for display in the given currency.
///
/// Uses [`KNOWN_CURRENCIES`] when the code is recognised and the amount is
/// finite, otherwise [`fallback_format`].
pub fn format_currency(amount: f64, currency_code: &str) -> String {
    match currency_format(currency_code) {
        Some(format) if amount.is_finite() => format.format(amount),
        _ => fallback_format(amount, currency_code),
    }
}

/// The deterministic fallback: `"<amount to 2 decimals> <code>"`.
///
/// The code is echoed exactly as given.
pub fn fallback_format(amount: f64, currency_code: &str) -> String {
    format!("{:.2} {}", amount, currency_code)
}

impl CurrencyFormat {
    /// Renders `amount` with this currency's symbol, precision and grouping.
    pub fn format(&self, amount: f64) -> String {
        let fixed = format!("{:.*}", self.decimals, amount.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (fixed.as_str(), None),
        };

        // "-0.00" is noise: only show a sign if a non-zero digit survived rounding
        let is_negative = amount < 0.0 && fixed.bytes().any(|b| matches!(b, b'1'..=b'9'));

        let grouped = match self.grouping {
            Grouping::Thousands => group_thousands(int_part),
            Grouping::Indian => group_indian(int_part),
        };

        let mut out = String::with_capacity(grouped.len() + self.symbol.len() + 4);
        if is_negative {
            out.push('-');
        }
        out.push_str(self.symbol);
        out.push_str(&grouped);
        if let Some(frac) = frac_part {
            out.push('.');
            out.push_str(frac);
        }
        out
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let head_len = head.len();
    let mut out = String::with_capacity(digits.len() + head_len / 2 + 1);
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head_len - i) % 2 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(tail);
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
