//! Message interpolation
//!
//! Templates reference parameters as `{name}`. Each placeholder with a
//! matching parameter is replaced by the formatted parameter value; any
//! other brace sequence is copied through unchanged.

use indexmap::IndexMap;
use vigil_validator::core::{ConstraintViolation, Value};

use crate::bundle::MessageBundle;
use crate::error::I18nResult;
use crate::format::FormatterRegistry;
use crate::locale::Locale;

/// Named interpolation parameters, in insertion order.
pub type MessageParams = IndexMap<String, Value>;

/// Parameters for a violation's message: the implicit `value` (the
/// offending value, `Value::Null` when absent) followed by the constraint
/// parameters. A constraint parameter named `value` replaces the implicit one.
#[must_use]
pub fn violation_params(violation: &ConstraintViolation) -> MessageParams {
    let mut params = MessageParams::new();
    params.insert("value".to_owned(), violation.value().cloned().unwrap_or_default());
    for (name, value) in violation.constraint().params() {
        params.insert(name.to_owned(), value.clone());
    }
    params
}

/// Looks up `key` in `bundle` and renders it with `params` in the bundle's
/// locale.
///
/// # Errors
///
/// [`I18nError::MissingMessage`](crate::I18nError::MissingMessage) if the
/// bundle has no template for `key`.
pub fn interpolate(
    bundle: &MessageBundle,
    key: &str,
    params: &MessageParams,
    registry: &FormatterRegistry,
) -> I18nResult<String> {
    let template = bundle.get_message(key)?;
    Ok(render(template, params, registry, bundle.locale()))
}

/// Renders `template`, formatting each known parameter for `locale`.
///
/// # Examples
///
/// ```rust
/// use vigil_i18n::interpolate::{MessageParams, render};
/// use vigil_i18n::{FormatterRegistry, Locale};
/// use vigil_validator::core::Value;
///
/// let mut params = MessageParams::new();
/// params.insert("end".into(), Value::Integer(9876));
///
/// let registry = FormatterRegistry::new();
/// let text = render("at most {end} (not {other})", &params, &registry, &Locale::new("pt", "BR"));
/// assert_eq!(text, "at most 9.876 (not {other})");
/// ```
#[must_use]
pub fn render(template: &str, params: &MessageParams, registry: &FormatterRegistry, locale: &Locale) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find(['{', '}']).filter(|&i| after.as_bytes()[i] == b'}') else {
            out.push('{');
            rest = after;
            continue;
        };

        let name = &after[..close];
        match params.get(name) {
            Some(value) if !name.is_empty() => out.push_str(&registry.format(value, locale)),
            _ => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}
