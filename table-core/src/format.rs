//! FILENAME: table-core/src/format.rs
//! PURPOSE: The format registry - maps a format tag to display rendering.
//! CONTEXT: Every field in a view scheme declares one of the tags below.
//! The same tag later selects the comparison semantics at sort time, so
//! the registry is the single place where "what kind of data is this
//! column" is decided.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::value::FieldValue;

/// Identifier selecting a value's display and comparison semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatTag {
    String,
    Number,
    Price,
    Date,
}

impl FormatTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatTag::String => "string",
            FormatTag::Number => "number",
            FormatTag::Price => "price",
            FormatTag::Date => "date",
        }
    }
}

impl FromStr for FormatTag {
    type Err = EngineError;

    /// Registry lookup by tag name. An unrecognized tag is a
    /// configuration error and fails fast instead of silently
    /// falling through.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(FormatTag::String),
            "number" => Ok(FormatTag::Number),
            "price" => Ok(FormatTag::Price),
            "date" => Ok(FormatTag::Date),
            other => Err(EngineError::UnknownFormat(other.to_string())),
        }
    }
}

/// Where the currency symbol goes relative to the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrencyPosition {
    Before,
    After,
}

/// Locale settings for number and price rendering.
/// Date rendering is fixed (day/month/year hour:minute) and does not
/// consult the locale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Locale {
    pub group_separator: char,
    pub decimal_separator: char,
    /// Includes its own spacing, e.g. " ₽" as a suffix or "$" as a prefix.
    pub currency_symbol: String,
    pub currency_position: CurrencyPosition,
}

/// Predefined locales for common use cases.
pub mod presets {
    use super::*;

    /// Russian: no-break-space grouping, comma decimals, ruble suffix.
    pub fn ru() -> Locale {
        Locale {
            group_separator: '\u{a0}',
            decimal_separator: ',',
            currency_symbol: " \u{20bd}".to_string(),
            currency_position: CurrencyPosition::After,
        }
    }

    pub fn en_us() -> Locale {
        Locale {
            group_separator: ',',
            decimal_separator: '.',
            currency_symbol: "$".to_string(),
            currency_position: CurrencyPosition::Before,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        presets::ru()
    }
}

/// Renders a raw field value as a display string according to the tag.
pub fn render(tag: FormatTag, value: &FieldValue, locale: &Locale) -> Result<String, EngineError> {
    match tag {
        FormatTag::String => Ok(value.as_text()),
        FormatTag::Number => Ok(format_grouped(require_number(value)?, locale)),
        FormatTag::Price => {
            let amount = format_grouped(require_number(value)?, locale);
            Ok(match locale.currency_position {
                CurrencyPosition::Before => format!("{}{}", locale.currency_symbol, amount),
                CurrencyPosition::After => format!("{}{}", amount, locale.currency_symbol),
            })
        }
        FormatTag::Date => {
            let timestamp = parse_timestamp(value)?;
            Ok(timestamp.format("%d/%m/%Y %H:%M").to_string())
        }
    }
}

fn require_number(value: &FieldValue) -> Result<f64, EngineError> {
    value.as_number().ok_or_else(|| EngineError::Parse {
        value: value.as_text(),
        expected: "number",
    })
}

/// Formats a number with locale separators. Integral values render
/// without a fractional part; otherwise up to three fraction digits
/// with trailing zeros trimmed.
fn format_grouped(value: f64, locale: &Locale) -> String {
    let body = if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        format!("{:.3}", value)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    };

    let mut parts = body.splitn(2, '.');
    let integer_part = parts.next().unwrap_or("");
    let decimal_part = parts.next();

    let negative = integer_part.starts_with('-');
    let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::new();
    let len = digits.len();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(locale.group_separator);
        }
        result.push(c);
    }

    if negative {
        result = format!("-{}", result);
    }

    if let Some(decimal) = decimal_part {
        result.push(locale.decimal_separator);
        result.push_str(decimal);
    }

    result
}

/// Parses a date-tagged field value into a timestamp.
/// Accepts epoch milliseconds (numbers) and ISO-like strings; anything
/// else is an explicit `Parse` error rather than a silent placeholder.
pub fn parse_timestamp(value: &FieldValue) -> Result<NaiveDateTime, EngineError> {
    let parse_error = || EngineError::Parse {
        value: value.as_text(),
        expected: "timestamp",
    };

    match value {
        FieldValue::Number(ms) => DateTime::from_timestamp_millis(*ms as i64)
            .map(|d| d.naive_utc())
            .ok_or_else(parse_error),
        FieldValue::Text(s) => {
            let s = s.trim();
            if let Ok(with_offset) = DateTime::parse_from_rfc3339(s) {
                return Ok(with_offset.naive_utc());
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
                return Ok(naive);
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Ok(naive);
            }
            if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                return Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default());
            }
            Err(parse_error())
        }
        FieldValue::Empty | FieldValue::Boolean(_) => Err(parse_error()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_lookup() {
        assert_eq!("price".parse::<FormatTag>().unwrap(), FormatTag::Price);
        assert!(matches!(
            "percent".parse::<FormatTag>(),
            Err(EngineError::UnknownFormat(tag)) if tag == "percent"
        ));
    }

    #[test]
    fn test_render_string_is_identity() {
        let locale = presets::ru();
        let rendered = render(FormatTag::String, &FieldValue::text("АЗС №7"), &locale).unwrap();
        assert_eq!(rendered, "АЗС №7");
    }

    #[test]
    fn test_render_number_ru() {
        let locale = presets::ru();
        assert_eq!(
            render(FormatTag::Number, &FieldValue::Number(1234567.0), &locale).unwrap(),
            "1\u{a0}234\u{a0}567"
        );
        assert_eq!(
            render(FormatTag::Number, &FieldValue::Number(12.5), &locale).unwrap(),
            "12,5"
        );
    }

    #[test]
    fn test_render_number_en() {
        let locale = presets::en_us();
        assert_eq!(
            render(FormatTag::Number, &FieldValue::Number(1234.567), &locale).unwrap(),
            "1,234.567"
        );
        assert_eq!(
            render(FormatTag::Number, &FieldValue::Number(-1000.0), &locale).unwrap(),
            "-1,000"
        );
    }

    #[test]
    fn test_render_price() {
        let ru = presets::ru();
        assert_eq!(
            render(FormatTag::Price, &FieldValue::Number(2500.0), &ru).unwrap(),
            "2\u{a0}500 \u{20bd}"
        );
        let en = presets::en_us();
        assert_eq!(
            render(FormatTag::Price, &FieldValue::Number(19.99), &en).unwrap(),
            "$19.99"
        );
    }

    #[test]
    fn test_render_date() {
        let locale = presets::ru();
        let rendered = render(
            FormatTag::Date,
            &FieldValue::text("2021-12-10T08:15:00"),
            &locale,
        )
        .unwrap();
        assert_eq!(rendered, "10/12/2021 08:15");
    }

    #[test]
    fn test_render_date_from_epoch_millis() {
        let locale = presets::ru();
        // 2021-12-10 08:15:00 UTC
        let rendered = render(
            FormatTag::Date,
            &FieldValue::Number(1639124100000.0),
            &locale,
        )
        .unwrap();
        assert_eq!(rendered, "10/12/2021 08:15");
    }

    #[test]
    fn test_unparseable_date_is_explicit_error() {
        let locale = presets::ru();
        let result = render(FormatTag::Date, &FieldValue::text("tomorrow"), &locale);
        assert!(matches!(result, Err(EngineError::Parse { .. })));
    }

    #[test]
    fn test_non_numeric_price_is_explicit_error() {
        let locale = presets::ru();
        let result = render(FormatTag::Price, &FieldValue::text("free"), &locale);
        assert!(matches!(result, Err(EngineError::Parse { .. })));
    }

    #[test]
    fn test_date_only_string() {
        assert_eq!(
            parse_timestamp(&FieldValue::text("2022-01-31"))
                .unwrap()
                .format("%d/%m/%Y %H:%M")
                .to_string(),
            "31/01/2022 00:00"
        );
    }
}
