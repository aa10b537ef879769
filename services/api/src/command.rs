//! Chat command grammar.
//!
//! ```text
//! /expense <amount> <description...> [category]
//! /income  <amount> <description...> [category]
//! ```
//!
//! Tokens are separated by single spaces. With more than three tokens the last
//! one is always the category, so `/income 100 Freelance Work` records
//! "Freelance" under "Work". A two-word description therefore needs an
//! explicit category to survive intact.

use postgres_models::{TransactionKind, DEFAULT_CATEGORY};

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCommand {
    pub kind: TransactionKind,
    pub amount: f64,
    pub description: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("expected `/expense` or `/income` followed by an amount and a description")]
    Format,

    #[error("amount must be a positive number, got {0:?}")]
    Value(String),
}

pub fn parse(text: &str) -> Result<ParsedCommand, CommandError> {
    let parts: Vec<&str> = text.trim().split(' ').collect();

    let kind = match parts[0].to_lowercase().as_str() {
        "/expense" => TransactionKind::Expense,
        "/income" => TransactionKind::Income,
        _ => return Err(CommandError::Format),
    };
    if parts.len() < 3 {
        return Err(CommandError::Format);
    }

    let amount = parse_amount(parts[1]).ok_or_else(|| CommandError::Value(parts[1].to_string()))?;

    let (description, category) = match parts[2..].split_last() {
        Some((category, words)) if !words.is_empty() => (words.join(" "), category.to_string()),
        _ => (parts[2].to_string(), DEFAULT_CATEGORY.to_string()),
    };

    Ok(ParsedCommand {
        kind,
        amount,
        description,
        category,
    })
}

/// Parses a user-typed amount. The first `,` is read as the decimal
/// separator and only the leading decimal number counts, so `10reais` is 10
/// and `1,000,50` is 1. Returns `None` unless the value is finite and
/// strictly positive.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let normalized = raw.replacen(',', ".", 1);
    decimal_prefix(normalized.trim_start())
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount > 0.0)
}

/// Longest prefix of `s` shaped like `[+-]digits[.digits][e[+-]digits]`.
/// Empty when `s` does not start with a number.
fn decimal_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if has_digits || frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    &s[..end]
}
