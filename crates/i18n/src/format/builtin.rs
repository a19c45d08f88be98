//! Built-in formatters

use chrono::NaiveTime;
use vigil_validator::core::Value;

use super::{FormatContext, Formatter};
use crate::locale::Conventions;

/// Plain string conversion. The final fallback for every type.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyFormatter;

impl Formatter for AnyFormatter {
    fn format(&self, value: &Value, _cx: &FormatContext<'_>) -> String {
        value.to_string()
    }
}

/// Renders the variant name of an enum.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumFormatter;

impl Formatter for EnumFormatter {
    fn format(&self, value: &Value, _cx: &FormatContext<'_>) -> String {
        match value {
            Value::Enum(e) => e.variant().to_owned(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// NUMBERS
// ============================================================================

/// Locale digit grouping and decimal separator.
///
/// Floats use their shortest round-trip form, so `0.98765430` renders as
/// `0.9876543`. Decimals keep their scale: `0.00000` stays `0.00000`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberFormatter;

impl Formatter for NumberFormatter {
    fn format(&self, value: &Value, cx: &FormatContext<'_>) -> String {
        let conventions = cx.locale().conventions();
        match value {
            Value::Integer(i) => localize(&i.to_string(), conventions),
            Value::Float(f) if f.is_finite() => localize(&f.to_string(), conventions),
            Value::Decimal(d) => localize(&d.to_string(), conventions),
            other => other.to_string(),
        }
    }
}

/// Rewrites a plain `-1234.5` rendering with locale separators.
fn localize(plain: &str, conventions: &Conventions) -> String {
    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits, None),
    };

    let mut out = String::with_capacity(plain.len() + integer.len() / 3 * conventions.grouping.len());
    out.push_str(sign);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push_str(conventions.grouping);
        }
        out.push(digit);
    }
    if let Some(fraction) = fraction {
        out.push_str(conventions.decimal);
        out.push_str(fraction);
    }
    out
}

// ============================================================================
// TEMPORAL
// ============================================================================

/// Locale date and time patterns.
///
/// Local date-times always include the time; UTC timestamps include it only
/// when it is not midnight.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemporalFormatter;

impl Formatter for TemporalFormatter {
    fn format(&self, value: &Value, cx: &FormatContext<'_>) -> String {
        let Conventions { date, time, .. } = *cx.locale().conventions();
        match value {
            Value::Date(d) => d.format(date).to_string(),
            Value::Time(t) => t.format(time).to_string(),
            Value::DateTime(dt) => format!("{} {}", dt.format(date), dt.format(time)),
            Value::Timestamp(ts) if ts.time() == NaiveTime::MIN => ts.format(date).to_string(),
            Value::Timestamp(ts) => format!("{} {}", ts.format(date), ts.format(time)),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// SEQUENCES
// ============================================================================

/// Formats each element with its own resolved formatter, joined by `", "`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceFormatter;

impl Formatter for SequenceFormatter {
    fn format(&self, value: &Value, cx: &FormatContext<'_>) -> String {
        match value {
            Value::List(items) | Value::Array(items) => {
                items.iter().map(|item| cx.format(item)).collect::<Vec<_>>().join(", ")
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use vigil_validator::core::{EnumValue, ToValue};

    use crate::format::FormatterRegistry;
    use crate::locale::Locale;

    fn format(value: impl ToValue, tag: &str) -> String {
        FormatterRegistry::new().format(&value.to_value(), &Locale::parse(tag))
    }

    #[rstest]
    #[case(9876, "pt_BR", "9.876")]
    #[case(9876, "en_US", "9,876")]
    #[case(-1_234_567, "de_DE", "-1.234.567")]
    #[case(999, "pt_BR", "999")]
    #[case(1_000, "fr_FR", "1\u{202f}000")]
    #[case(0, "en", "0")]
    fn test_integers(#[case] n: i64, #[case] tag: &str, #[case] expected: &str) {
        assert_eq!(format(n, tag), expected);
    }

    #[rstest]
    #[case(0.987_654_30, "pt_BR", "0,9876543")]
    #[case(0.987_654_30, "en_US", "0.9876543")]
    #[case(1234.5, "pt_BR", "1.234,5")]
    #[case(-0.5, "en", "-0.5")]
    #[case(2.0, "en", "2")]
    fn test_floats(#[case] f: f64, #[case] tag: &str, #[case] expected: &str) {
        assert_eq!(format(f, tag), expected);
    }

    #[test]
    fn test_non_finite_floats() {
        assert_eq!(format(f64::NAN, "en"), "NaN");
        assert_eq!(format(f64::INFINITY, "pt_BR"), "inf");
    }

    #[rstest]
    #[case(Decimal::new(0, 1), "en", "0.0")]
    #[case(Decimal::new(0, 5), "pt_BR", "0,00000")]
    #[case(Decimal::new(0, 5), "en", "0.00000")]
    #[case(Decimal::new(123_456_789, 2), "de", "1.234.567,89")]
    fn test_decimals_keep_scale(#[case] d: Decimal, #[case] tag: &str, #[case] expected: &str) {
        assert_eq!(format(d, tag), expected);
    }

    #[test]
    fn test_temporal() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let noon = date.and_hms_opt(14, 5, 0).unwrap();

        assert_eq!(format(date, "pt_BR"), "09/03/2024");
        assert_eq!(format(date, "en_US"), "3/9/2024");
        assert_eq!(format(date, "de"), "09.03.2024");
        assert_eq!(format(noon, "pt_BR"), "09/03/2024 14:05:00");
        assert_eq!(format(noon.time(), "en_US"), "2:05:00 PM");
        assert_eq!(format(date.and_hms_opt(0, 0, 0).unwrap(), "de"), "09.03.2024 00:00:00");
    }

    #[test]
    fn test_timestamp_hides_midnight() {
        let midnight = Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap();
        let evening = Utc.with_ymd_and_hms(2024, 3, 9, 21, 30, 0).unwrap();
        assert_eq!(format(midnight, "pt_BR"), "09/03/2024");
        assert_eq!(format(evening, "pt_BR"), "09/03/2024 21:30:00");
    }

    #[test]
    fn test_sequences_format_each_element() {
        assert_eq!(format(vec![1_000, 2_500_000], "pt_BR"), "1.000, 2.500.000");
        assert_eq!(format([0.5, 1.25], "de"), "0,5, 1,25");
        let kinds = vec![EnumValue::new("Kinship", "CHILD"), EnumValue::new("Kinship", "SPOUSE")];
        assert_eq!(format(kinds, "en"), "CHILD, SPOUSE");
        assert_eq!(format(Vec::<i32>::new(), "en"), "");
    }
}
