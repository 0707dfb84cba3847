//! Presentation-boundary formatting. Engine values stay plain `f64` until they reach here.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::YearMonth;

/// ISO 4217 currency code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("GBP")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum NegativeStyle {
    #[default]
    Sign,
    Parentheses,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormatOptions {
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub negative_style: NegativeStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            grouping_separator: ',',
            negative_style: NegativeStyle::Sign,
        }
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "AUD" => "A$".into(),
        _ => format!("{} ", code),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_number(value: f64, precision: u8, options: &FormatOptions) -> String {
    let body = format!("{:.*}", precision as usize, value.abs());
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body.as_str(), None),
    };
    let mut out = group_digits(int_part, options.grouping_separator);
    if let Some(frac) = frac_part {
        out.push(options.decimal_separator);
        out.push_str(frac);
    }
    out
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// Renders `amount` with symbol, grouping and the currency's minor units.
pub fn format_amount(amount: f64, code: &CurrencyCode, options: &FormatOptions) -> String {
    let precision = minor_units_for(code.as_str());
    let body = format!(
        "{}{}",
        symbol_for(code.as_str()),
        format_number(amount, precision, options)
    );
    // Anything that rounds to zero is shown unsigned.
    let rounds_to_zero = format!("{:.*}", precision as usize, amount.abs())
        .chars()
        .all(|c| c == '0' || c == '.');
    if amount < 0.0 && !rounds_to_zero {
        match options.negative_style {
            NegativeStyle::Sign => format!("-{}", body),
            NegativeStyle::Parentheses => format!("({})", body),
        }
    } else {
        body
    }
}

/// `05 Jan 2024`
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        month_label(date.month()),
        date.year()
    )
}

/// `January 2024`
pub fn format_month(month: YearMonth) -> String {
    format!("{} {}", month_name(month.month()), month.year())
}

fn month_label(month: u32) -> &'static str {
    month_name(month).get(..3).unwrap_or("")
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}
