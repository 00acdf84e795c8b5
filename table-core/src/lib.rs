//! FILENAME: table-core/src/lib.rs
//! PURPOSE: Main library entry point for the shared table value layer.
//! CONTEXT: Re-exports field values, the format registry and the error
//! taxonomy for use by the other crates.

pub mod error;
pub mod format;
pub mod value;

// Re-export commonly used types at the crate root
pub use error::EngineError;
pub use format::{parse_timestamp, presets, render, CurrencyPosition, FormatTag, Locale};
pub use value::FieldValue;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_renders_a_transaction_row() {
        let locale = presets::ru();

        let name = render(FormatTag::String, &FieldValue::text("КАМАЗ-65115"), &locale).unwrap();
        let count = render(FormatTag::Number, &FieldValue::Number(177.0), &locale).unwrap();
        let cost = render(FormatTag::Price, &FieldValue::Number(8283.5), &locale).unwrap();

        assert_eq!(name, "КАМАЗ-65115");
        assert_eq!(count, "177");
        assert_eq!(cost, "8\u{a0}283,5 \u{20bd}");
    }

    #[test]
    fn field_value_serde_round_trip() {
        let value = FieldValue::Number(42.5);
        let json = serde_json::to_string(&value).unwrap();
        let back: FieldValue = serde_json::from_str(&json).unwrap();
        assert_eq!(value, back);
    }

    #[test]
    fn format_tag_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&FormatTag::Price).unwrap();
        assert_eq!(json, "\"price\"");
    }
}
