//! Display formatting for amounts and dates (ko-KR conventions).
//!
//! The query engine only yields integers and ISO strings; views run them
//! through here before handing them to the console.

use chrono::{Datelike, NaiveDate};

use crate::query::{month_key, parse_iso_date};

/// Currency rendering: symbol, grouping separator, no fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: &'static str,
    pub separator: char,
}

/// Korean won.
pub const KRW: CurrencyFormat = CurrencyFormat {
    symbol: "₩",
    separator: ',',
};

impl CurrencyFormat {
    pub fn format(&self, amount: u64) -> String {
        format!("{}{}", self.symbol, group_thousands(amount, self.separator))
    }
}

pub fn format_currency(amount: u64) -> String {
    KRW.format(amount)
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// `2024년 6월 15일`
pub fn format_long_date(date: NaiveDate) -> String {
    format!("{}년 {}월 {}일", date.year(), date.month(), date.day())
}

/// Long form of an ISO date string; `None` when it does not parse.
pub fn format_iso_date(raw: &str) -> Option<String> {
    parse_iso_date(raw).map(format_long_date)
}

/// `2024-06` → `2024년 6월`
pub fn format_month_label(raw: &str) -> Option<String> {
    let key = month_key(raw)?;
    let year: i32 = key[..4].parse().ok()?;
    let month: u32 = key[5..7].parse().ok()?;
    (1..=12)
        .contains(&month)
        .then(|| format!("{}년 {}월", year, month))
}
