//! Display formatting for the trading grid
//!
//! Percentages render with two decimals and an explicit `+` when
//! non-negative. Monetary values render currency-prefixed with two decimals
//! and locale separators.

use crate::config::DisplayConfig;
use crate::core::types::TradingPair;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number formatting conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Locale {
    EsEs,
    EnUs,
}

impl Locale {
    fn thousands_separator(&self) -> char {
        match self {
            Locale::EsEs => '.',
            Locale::EnUs => ',',
        }
    }

    fn decimal_separator(&self) -> char {
        match self {
            Locale::EsEs => ',',
            Locale::EnUs => '.',
        }
    }

    /// Integer digits required before grouping kicks in. Spanish leaves
    /// four-digit amounts ungrouped.
    fn min_grouping_digits(&self) -> usize {
        match self {
            Locale::EsEs => 5,
            Locale::EnUs => 4,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Locale::EsEs => "es-ES",
            Locale::EnUs => "en-US",
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::EsEs
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "es-es" | "es" => Ok(Locale::EsEs),
            "en-us" | "en" => Ok(Locale::EnUs),
            other => Err(format!("unsupported locale: {}", other)),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag().to_string()
    }
}

/// `2.6123` -> `+2.61%`, `-1.5` -> `-1.50%`
pub fn format_change_percent(change: f64) -> String {
    let sign = if change >= 0.0 { "+" } else { "" };
    format!("{}{:.2}%", sign, change)
}

/// Currency-prefixed amount with two decimals, e.g. `€25.766,20` for es-ES
pub fn format_money(amount: f64, locale: Locale, currency: &str) -> String {
    format!("{}{}", currency, format_decimal(amount, locale))
}

/// Two-decimal number with locale separators and no currency
pub fn format_decimal(amount: f64, locale: Locale) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let grouped = if int_part.len() >= locale.min_grouping_digits() {
        group_digits(int_part, locale.thousands_separator())
    } else {
        int_part.to_string()
    };

    let negative = amount < 0.0 && fixed.bytes().any(|b| b != b'0' && b != b'.');
    format!(
        "{}{}{}{}",
        if negative { "-" } else { "" },
        grouped,
        locale.decimal_separator(),
        frac_part
    )
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let lead = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Style keyed to the sign of the change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeTone {
    Positive,
    Negative,
}

impl ChangeTone {
    pub fn css_class(&self) -> &'static str {
        match self {
            ChangeTone::Positive => "positive",
            ChangeTone::Negative => "negative",
        }
    }
}

/// Rendered content of one grid card
#[derive(Debug, Clone, PartialEq)]
pub struct TradingCard {
    pub pair: String,
    pub change_text: String,
    pub change_tone: ChangeTone,
    pub direction: String,
    pub direction_class: String,
    pub leverage: String,
    pub value_text: String,
}

impl TradingCard {
    pub fn from_pair(pair: &TradingPair, config: &DisplayConfig) -> Self {
        let change_tone = if pair.change_percent >= 0.0 {
            ChangeTone::Positive
        } else {
            ChangeTone::Negative
        };

        Self {
            pair: pair.pair.clone(),
            change_text: format_change_percent(pair.change_percent),
            change_tone,
            direction: pair.direction.label().to_string(),
            direction_class: pair.direction.css_class().to_string(),
            leverage: pair.leverage.label().to_string(),
            value_text: format_money(pair.value, config.locale, &config.currency_symbol),
        }
    }
}

/// One card per pair, in pair order
pub fn render_cards(pairs: &[TradingPair], config: &DisplayConfig) -> Vec<TradingCard> {
    pairs.iter().map(|p| TradingCard::from_pair(p, config)).collect()
}

/// Plain-text table for terminal output
pub fn render_grid_text(cards: &[TradingCard]) -> String {
    let mut out = format!(
        "{:<10} {:>9} {:<6} {:>5} {:>16}\n",
        "PAIR", "CHANGE", "DIR", "LEV", "VALUE"
    );
    for card in cards {
        out.push_str(&format!(
            "{:<10} {:>9} {:<6} {:>5} {:>16}\n",
            card.pair, card.change_text, card.direction, card.leverage, card.value_text
        ));
    }
    out
}
