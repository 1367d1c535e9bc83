//! Value formatting driven by a column's format spec.
//!
//! A spec has the form `kind[:argument]`, e.g. `date:%d.%m.%Y` or `decimal:1`.
//! An empty spec passes the value through unchanged. `Null` is never formatted.

use std::sync::OnceLock;

use chrono::format::{Item, StrftimeItems};
use regex::Regex;
use thiserror::Error;

use crate::data::Value;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormatError {
    #[error("malformed format spec \"{0}\"")]
    InvalidSpec(String),
    #[error("unknown format kind \"{0}\"")]
    UnknownKind(String),
    #[error("invalid argument \"{argument}\" for format \"{kind}\"")]
    InvalidArgument { kind: String, argument: String },
    #[error("value \"{value}\" cannot be formatted as \"{kind}\"")]
    Mismatch { kind: String, value: String },
}

/// Upper bound on the fraction digits of `decimal` and `percent`.
const MAX_FRACTION_DIGITS: usize = 255;

fn spec_regex() -> &'static Regex {
    static SPEC: OnceLock<Regex> = OnceLock::new();
    SPEC.get_or_init(|| {
        Regex::new(r"^(?P<kind>[a-z_]+)(?::(?P<arg>.*))?$").expect("format spec regex is valid")
    })
}

/// Formats `value` according to `spec`.
///
/// # Supported kinds
///
/// | kind | argument | applies to |
/// |---|---|---|
/// | `text` | - | anything |
/// | `date` | strftime pattern (default `%Y-%m-%d`) | timestamps, date strings |
/// | `decimal` | fraction digits (default 2) | numbers, numeric strings |
/// | `percent` | fraction digits (default 0) | numbers, numeric strings |
/// | `join` | separator (default `, `) | lists |
/// | `bool` | `yes/no` labels (default `true/false`) | booleans |
/// | `upper`, `lower`, `trim` | - | anything, as text |
pub fn format_value(value: &Value, spec: &str) -> Result<Value, FormatError> {
    let spec = spec.trim();
    if spec.is_empty() || matches!(value, Value::Null) {
        return Ok(value.clone());
    }

    let captures = spec_regex()
        .captures(spec)
        .ok_or_else(|| FormatError::InvalidSpec(spec.to_string()))?;
    let kind = &captures["kind"];
    let argument = captures.name("arg").map(|m| m.as_str());

    let mismatch = || FormatError::Mismatch {
        kind: kind.to_string(),
        value: value.to_string(),
    };
    let invalid_argument = |argument: &str| FormatError::InvalidArgument {
        kind: kind.to_string(),
        argument: argument.to_string(),
    };

    let formatted = match kind {
        "text" => value.to_string(),
        "upper" => value.to_string().to_uppercase(),
        "lower" => value.to_string().to_lowercase(),
        "trim" => value.to_string().trim().to_string(),
        "date" => {
            let pattern = argument.unwrap_or("%Y-%m-%d");
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(invalid_argument(pattern));
            }
            let ts = value.as_timestamp().ok_or_else(mismatch)?;
            ts.format(pattern).to_string()
        }
        "decimal" | "percent" => {
            let default_digits = if kind == "decimal" { "2" } else { "0" };
            let digits_text = argument.unwrap_or(default_digits);
            let digits: usize = digits_text
                .trim()
                .parse()
                .ok()
                .filter(|d| *d <= MAX_FRACTION_DIGITS)
                .ok_or_else(|| invalid_argument(digits_text))?;
            let number = as_number(value).ok_or_else(mismatch)?;
            if kind == "decimal" {
                format!("{number:.digits$}")
            } else {
                format!("{:.digits$}%", number * 100.0)
            }
        }
        "join" => {
            let separator = argument.unwrap_or(", ");
            match value {
                Value::List(items) => items
                    .iter()
                    .map(Value::to_string)
                    .collect::<Vec<_>>()
                    .join(separator),
                other => other.to_string(),
            }
        }
        "bool" => {
            let labels = argument.unwrap_or("true/false");
            let (yes, no) = labels
                .split_once('/')
                .ok_or_else(|| invalid_argument(labels))?;
            match value {
                Value::Bool(true) => yes.to_string(),
                Value::Bool(false) => no.to_string(),
                _ => return Err(mismatch()),
            }
        }
        other => return Err(FormatError::UnknownKind(other.to_string())),
    };

    Ok(Value::String(formatted))
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Int(i) => Some(*i as f64),
        Value::Float(f) => Some(*f),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn text(s: &str) -> Value {
        Value::String(s.to_string())
    }

    #[test]
    fn test_empty_spec_passes_through() {
        assert_eq!(format_value(&Value::Int(4), ""), Ok(Value::Int(4)));
        assert_eq!(format_value(&Value::Null, "decimal:2"), Ok(Value::Null));
    }

    #[test]
    fn test_date() {
        let ts = NaiveDate::from_ymd_opt(2024, 2, 29)
            .and_then(|d| d.and_hms_opt(13, 5, 0))
            .unwrap();
        assert_eq!(
            format_value(&Value::Timestamp(ts), "date:%d.%m.%Y %H:%M"),
            Ok(text("29.02.2024 13:05"))
        );
        assert_eq!(
            format_value(&text("2024-02-29T13:05:00Z"), "date"),
            Ok(text("2024-02-29"))
        );
        assert!(matches!(
            format_value(&Value::Int(3), "date"),
            Err(FormatError::Mismatch { .. })
        ));
    }

    #[test]
    fn test_decimal_and_percent() {
        assert_eq!(format_value(&Value::Float(3.14159), "decimal:2"), Ok(text("3.14")));
        assert_eq!(format_value(&Value::Int(3), "decimal"), Ok(text("3.00")));
        assert_eq!(format_value(&text(" 0.5 "), "percent"), Ok(text("50%")));
        assert_eq!(format_value(&Value::Float(0.125), "percent:1"), Ok(text("12.5%")));
        assert!(matches!(
            format_value(&Value::Float(1.0), "decimal:x"),
            Err(FormatError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_fraction_digits_out_of_range() {
        assert_eq!(
            format_value(&Value::Float(1.0), "decimal:70000"),
            Err(FormatError::InvalidArgument {
                kind: "decimal".to_string(),
                argument: "70000".to_string(),
            })
        );
        assert!(matches!(
            format_value(&Value::Float(1.0), "percent:256"),
            Err(FormatError::InvalidArgument { .. })
        ));
        assert_eq!(
            format_value(&Value::Int(1), "decimal:3"),
            Ok(text("1.000"))
        );
    }

    #[test]
    fn test_join() {
        let list = Value::List(vec![text("a"), Value::Int(1), text("b")]);
        assert_eq!(format_value(&list, "join:|"), Ok(text("a|1|b")));
        assert_eq!(format_value(&list, "join"), Ok(text("a, 1, b")));
    }

    #[test]
    fn test_bool() {
        assert_eq!(format_value(&Value::Bool(true), "bool:yes/no"), Ok(text("yes")));
        assert_eq!(format_value(&Value::Bool(false), "bool"), Ok(text("false")));
        assert!(format_value(&Value::Bool(false), "bool:yes").is_err());
    }

    #[test]
    fn test_text_transforms() {
        assert_eq!(format_value(&text(" Ab "), "upper"), Ok(text(" AB ")));
        assert_eq!(format_value(&text(" Ab "), "lower"), Ok(text(" ab ")));
        assert_eq!(format_value(&text(" Ab "), "trim"), Ok(text("Ab")));
        assert_eq!(format_value(&Value::Int(9), "text"), Ok(text("9")));
    }

    #[test]
    fn test_unknown_and_malformed_specs() {
        assert_eq!(
            format_value(&text("a"), "currency"),
            Err(FormatError::UnknownKind("currency".to_string()))
        );
        assert_eq!(
            format_value(&text("a"), "Date:%Y"),
            Err(FormatError::InvalidSpec("Date:%Y".to_string()))
        );
    }
}
