// src/backend/utils/money.rs
//
// Amounts are kept as the text the user typed ("1 250,00 $", "$1,250.00", "1250").
// Every aggregation goes through `parse_amount`; nothing else interprets amount strings.

use serde::{Deserialize, Deserializer};

use crate::models::common::Locale;

/// Parses a currency-formatted string into a number.
///
/// Rules:
/// - everything except digits, `,`, `.` and a leading `-` is dropped (currency symbols, spaces, NBSP, letters);
/// - when both `,` and `.` appear, the right-most one is the decimal separator and the other groups thousands;
/// - a single `,` or a single `.` is a decimal separator; a repeated one groups thousands;
/// - anything left unparseable is zero.
pub fn parse_amount(raw: &str) -> f64 {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();
    let negative = kept.starts_with('-');
    let body: String = kept.chars().filter(|c| *c != '-').collect();

    let decimal_separator = match (body.rfind(','), body.rfind('.')) {
        (Some(comma), Some(dot)) => Some(if comma > dot { ',' } else { '.' }),
        (Some(_), None) if body.matches(',').count() == 1 => Some(','),
        (None, Some(_)) if body.matches('.').count() == 1 => Some('.'),
        _ => None,
    };

    let digits_only = |s: &str| s.chars().filter(char::is_ascii_digit).collect::<String>();
    let normalized = match decimal_separator.and_then(|sep| body.rfind(sep)) {
        Some(idx) => {
            let (int_part, rest) = body.split_at(idx);
            let int_digits = digits_only(int_part);
            let frac_digits = digits_only(rest.get(1..).unwrap_or(""));
            if int_digits.is_empty() && frac_digits.is_empty() {
                return 0.0;
            }
            format!("{}.{}", if int_digits.is_empty() { "0" } else { &int_digits }, frac_digits)
        }
        None => digits_only(&body),
    };

    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            if negative {
                -value
            } else {
                value
            }
        }
        _ => 0.0,
    }
}

/// Sums amount strings, treating unparseable entries as zero.
pub fn sum_amounts<'a, I>(amounts: I) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    amounts.into_iter().map(parse_amount).sum()
}

/// Rounds to whole cents.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats an amount for display: `1 250,00 $` in French, `$1,250.00` in English.
pub fn format_amount(value: f64, locale: Locale) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    let whole = cents / 100;
    let fraction = cents % 100;

    match locale {
        Locale::FrCa => format!("{sign}{},{fraction:02} $", group_thousands(whole, ' ')),
        Locale::EnCa => format!("{sign}${}.{fraction:02}", group_thousands(whole, ',')),
    }
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// Serde helper for amount fields: accepts a JSON string, a JSON number or null and keeps it as text.
pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<RawAmount>::deserialize(deserializer)? {
        Some(RawAmount::Text(text)) => text,
        Some(RawAmount::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_quebec_formatted_amounts() {
        assert_eq!(parse_amount("1 250,00 $"), 1250.0);
        assert_eq!(parse_amount("1\u{a0}250,50\u{a0}$"), 1250.5);
        assert_eq!(parse_amount("12,5"), 12.5);
        assert_eq!(parse_amount("1.250.000"), 1_250_000.0);
    }

    #[test]
    fn parses_english_formatted_amounts() {
        assert_eq!(parse_amount("$1,250.00"), 1250.0);
        assert_eq!(parse_amount("1,250,000"), 1_250_000.0);
        assert_eq!(parse_amount("CAD 99.99"), 99.99);
    }

    #[test]
    fn unparseable_is_zero() {
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount(",."), 0.0);
        assert_eq!(parse_amount("$"), 0.0);
    }

    #[test]
    fn keeps_leading_minus() {
        assert_eq!(parse_amount("-45,10 $"), -45.1);
    }

    #[test]
    fn sums_mixed_entries() {
        assert_eq!(sum_amounts(["1 250,00 $", "abc"]), 1250.0);
        assert_eq!(sum_amounts(["100", "$50.25", ""]), 150.25);
    }

    #[test]
    fn formats_per_locale() {
        assert_eq!(format_amount(1250.0, Locale::FrCa), "1 250,00 $");
        assert_eq!(format_amount(1250.0, Locale::EnCa), "$1,250.00");
        assert_eq!(format_amount(-3.5, Locale::EnCa), "-$3.50");
        assert_eq!(format_amount(1_234_567.891, Locale::FrCa), "1 234 567,89 $");
        assert_eq!(format_amount(f64::NAN, Locale::FrCa), "0,00 $");
    }

    #[test]
    fn amount_fields_accept_numbers_and_null() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default, deserialize_with = "deserialize_amount")]
            amount: String,
        }

        let row: Row = serde_json::from_str(r#"{"amount": 5000}"#).unwrap();
        assert_eq!(row.amount, "5000");
        let row: Row = serde_json::from_str(r#"{"amount": 12.5}"#).unwrap();
        assert_eq!(row.amount, "12.5");
        let row: Row = serde_json::from_str(r#"{"amount": null}"#).unwrap();
        assert_eq!(row.amount, "");
        let row: Row = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(row.amount, "");
        assert!(serde_json::from_str::<Row>(r#"{"amount": [1]}"#).is_err());
    }

    proptest! {
        #[test]
        fn formatted_amounts_parse_back(cents in 0u64..10_000_000_000) {
            let value = cents as f64 / 100.0;
            for locale in [Locale::FrCa, Locale::EnCa] {
                let parsed = parse_amount(&format_amount(value, locale));
                prop_assert!((parsed - value).abs() < 0.005, "{} -> {}", value, parsed);
            }
        }

        #[test]
        fn parse_never_yields_non_finite(raw in ".*") {
            prop_assert!(parse_amount(&raw).is_finite());
        }
    }
}
