//! Constraint descriptors
//!
//! A [`Constraint`] names the rule that failed and carries the parameters its
//! message template needs. It is pure data: predicates decide, constraints
//! describe.

use std::borrow::Cow;

use serde::Serialize;

use super::value::{ToValue, Value};

/// Suffix appended to a constraint name to form its default message key.
pub const MESSAGE_KEY_SUFFIX: &str = ".message";

/// A named validation rule plus its message-interpolation parameters.
///
/// # Examples
///
/// ```rust
/// use vigil_validator::core::{Constraint, Value};
///
/// let between = Constraint::new("vigil.constraints.Between")
///     .with_param("start", 1)
///     .with_param("end", 10);
///
/// assert_eq!(between.message_key(), "vigil.constraints.Between.message");
/// assert_eq!(between.short_name(), "Between");
/// assert_eq!(between.param("end"), Some(&Value::Integer(10)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraint {
    name: Cow<'static, str>,
    message_key: Cow<'static, str>,
    #[serde(serialize_with = "serialize_params")]
    params: Vec<(Cow<'static, str>, Value)>,
}

impl Constraint {
    /// Creates a constraint whose message key is `name` + [`MESSAGE_KEY_SUFFIX`].
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        let message_key = Cow::Owned(format!("{name}{MESSAGE_KEY_SUFFIX}"));
        Self {
            name,
            message_key,
            params: Vec::new(),
        }
    }

    /// Overrides the message key.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message_key(mut self, key: impl Into<Cow<'static, str>>) -> Self {
        self.message_key = key.into();
        self
    }

    /// Appends a parameter. Lookups by name return the first match.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, key: impl Into<Cow<'static, str>>, value: impl ToValue) -> Self {
        self.params.push((key.into(), value.to_value()));
        self
    }

    /// Fully qualified name of the rule.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last dotted segment of the name (`Between` for `vigil.constraints.Between`).
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    /// Parameters in declaration order.
    pub fn params(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.params.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// Looks up a parameter by name.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v)
    }
}

fn serialize_params<S>(params: &[(Cow<'static, str>, Value)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::SerializeMap;

    let mut map = serializer.serialize_map(Some(params.len()))?;
    for (k, v) in params {
        map.serialize_entry(k.as_ref(), v)?;
    }
    map.end()
}
