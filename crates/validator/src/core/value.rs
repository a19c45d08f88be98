//! Dynamic values carried by violations and constraint parameters
//!
//! Every offending value and every constraint parameter is captured as a
//! [`Value`] so it can outlive the validated object and be rendered later by
//! a locale-aware formatter. Each value knows its runtime [`TypeName`], which
//! is what formatter resolution dispatches on.

use std::borrow::Cow;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

// ============================================================================
// TYPE NAME
// ============================================================================

/// Identity of a runtime type, used as the key of the formatter registry.
///
/// Built-in value kinds use the constants below; user types (objects, enums)
/// carry whatever name they were declared with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TypeName(Cow<'static, str>);

impl TypeName {
    /// Root category. Never part of a supertype graph; used as the final fallback.
    pub const ANY: Self = Self::from_static("any");
    /// Type of [`Value::Null`].
    pub const NULL: Self = Self::from_static("null");
    pub const BOOL: Self = Self::from_static("bool");
    pub const INTEGER: Self = Self::from_static("integer");
    pub const FLOAT: Self = Self::from_static("float");
    pub const DECIMAL: Self = Self::from_static("decimal");
    pub const TEXT: Self = Self::from_static("string");
    pub const CHAR: Self = Self::from_static("char");
    pub const DATE: Self = Self::from_static("date");
    pub const TIME: Self = Self::from_static("time");
    pub const DATE_TIME: Self = Self::from_static("datetime");
    pub const TIMESTAMP: Self = Self::from_static("timestamp");
    pub const LIST: Self = Self::from_static("list");
    pub const ARRAY: Self = Self::from_static("array");

    /// Category shared by all numeric kinds.
    pub const NUMBER: Self = Self::from_static("number");
    /// Category shared by all date/time kinds.
    pub const TEMPORAL: Self = Self::from_static("temporal");
    /// Category implemented by sequence kinds.
    pub const ITERABLE: Self = Self::from_static("iterable");
    /// Category implicitly extended by enum types.
    pub const ENUM: Self = Self::from_static("enum");

    /// Creates a type name from a static string.
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates a type name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for TypeName {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

// ============================================================================
// VALUE
// ============================================================================

/// A captured value of any supported runtime type.
///
/// Equality and hashing are total: every NaN equals every other NaN and
/// `-0.0` equals `0.0`, so values can live inside hashed violation sets.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent value.
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    /// Arbitrary precision decimal; keeps the scale it was written with.
    Decimal(Decimal),
    Text(String),
    Char(char),
    Date(NaiveDate),
    Time(NaiveTime),
    /// Local date and time; always rendered with its time component.
    DateTime(NaiveDateTime),
    /// Instant in UTC; time component rendered only when not midnight.
    Timestamp(DateTime<Utc>),
    Enum(EnumValue),
    /// Growable sequence (`Vec`, slices, sets).
    List(Vec<Value>),
    /// Fixed-size array.
    Array(Vec<Value>),
    Object(Object),
}

impl Value {
    /// Returns the runtime type of this value.
    #[must_use]
    pub fn type_name(&self) -> TypeName {
        match self {
            Self::Null => TypeName::NULL,
            Self::Bool(_) => TypeName::BOOL,
            Self::Integer(_) => TypeName::INTEGER,
            Self::Float(_) => TypeName::FLOAT,
            Self::Decimal(_) => TypeName::DECIMAL,
            Self::Text(_) => TypeName::TEXT,
            Self::Char(_) => TypeName::CHAR,
            Self::Date(_) => TypeName::DATE,
            Self::Time(_) => TypeName::TIME,
            Self::DateTime(_) => TypeName::DATE_TIME,
            Self::Timestamp(_) => TypeName::TIMESTAMP,
            Self::Enum(e) => e.type_name.clone(),
            Self::List(_) => TypeName::LIST,
            Self::Array(_) => TypeName::ARRAY,
            Self::Object(o) => o.type_name.clone(),
        }
    }

    /// Returns true for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Creates a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Creates a list value from anything convertible.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToValue,
    {
        Self::List(items.into_iter().map(|item| item.to_value()).collect())
    }
}

fn canonical_bits(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => canonical_bits(*a) == canonical_bits(*b),
            // Decimal equality ignores scale; the rendered form does not.
            (Self::Decimal(a), Self::Decimal(b)) => a == b && a.scale() == b.scale(),
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Time(a), Self::Time(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Timestamp(a), Self::Timestamp(b)) => a == b,
            (Self::Enum(a), Self::Enum(b)) => a == b,
            (Self::List(a), Self::List(b)) | (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Null => {}
            Self::Bool(b) => b.hash(state),
            Self::Integer(i) => i.hash(state),
            Self::Float(f) => canonical_bits(*f).hash(state),
            Self::Decimal(d) => {
                d.hash(state);
                d.scale().hash(state);
            }
            Self::Text(s) => s.hash(state),
            Self::Char(c) => c.hash(state),
            Self::Date(d) => d.hash(state),
            Self::Time(t) => t.hash(state),
            Self::DateTime(dt) => dt.hash(state),
            Self::Timestamp(ts) => ts.hash(state),
            Self::Enum(e) => e.hash(state),
            Self::List(items) | Self::Array(items) => items.hash(state),
            Self::Object(o) => o.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Text(s) => f.write_str(s),
            Self::Char(c) => write!(f, "{c}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::Time(t) => write!(f, "{t}"),
            Self::DateTime(dt) => write!(f, "{dt}"),
            Self::Timestamp(ts) => write!(f, "{ts}"),
            Self::Enum(e) => f.write_str(&e.variant),
            Self::List(items) | Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Object(o) => write!(f, "{o}"),
        }
    }
}

// ============================================================================
// ENUM VALUE
// ============================================================================

/// A variant of a user enum, identified by its enum type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    type_name: TypeName,
    variant: Cow<'static, str>,
}

impl EnumValue {
    pub fn new(type_name: impl Into<TypeName>, variant: impl Into<Cow<'static, str>>) -> Self {
        Self {
            type_name: type_name.into(),
            variant: variant.into(),
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    #[must_use]
    pub fn variant(&self) -> &str {
        &self.variant
    }
}

impl Serialize for EnumValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.variant)
    }
}

// ============================================================================
// OBJECT
// ============================================================================

/// A user object captured as its type name plus ordered fields.
///
/// # Examples
///
/// ```rust
/// use vigil_validator::core::{Object, Value};
///
/// let address = Object::new("Address")
///     .with_field("city", "Lisbon")
///     .with_field("zip", 1000);
/// assert_eq!(Value::Object(address).to_string(), "Address(city=Lisbon, zip=1000)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Object {
    type_name: TypeName,
    fields: Vec<(Cow<'static, str>, Value)>,
}

impl Object {
    pub fn new(type_name: impl Into<TypeName>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, name: impl Into<Cow<'static, str>>, value: impl ToValue) -> Self {
        self.fields.push((name.into(), value.to_value()));
        self
    }

    #[must_use]
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v)
    }

    /// Returns the fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_ref(), v))
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_name)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str(")")
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name.as_ref(), value)?;
        }
        map.end()
    }
}

// ============================================================================
// CONVERSION
// ============================================================================

/// Conversion of host values into a captured [`Value`].
///
/// Implement this for domain types that should appear in violations or be
/// rendered by a custom formatter.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

macro_rules! integer_to_value {
    ($($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::Integer(i64::from(*self))
                }
            }
        )*
    };
}

integer_to_value!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! wide_integer_to_value {
    ($($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    i64::try_from(*self).map_or_else(|_| Value::Decimal(Decimal::from(*self)), Value::Integer)
                }
            }
        )*
    };
}

wide_integer_to_value!(u64, usize, isize);

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        // Via the shortest decimal form, so 0.1f32 stays 0.1 rather than 0.10000000149011612.
        Value::Float(self.to_string().parse().unwrap_or(f64::from(*self)))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl ToValue for Decimal {
    fn to_value(&self) -> Value {
        Value::Decimal(*self)
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_owned())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl ToValue for Cow<'_, str> {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl ToValue for char {
    fn to_value(&self) -> Value {
        Value::Char(*self)
    }
}

impl ToValue for NaiveDate {
    fn to_value(&self) -> Value {
        Value::Date(*self)
    }
}

impl ToValue for NaiveTime {
    fn to_value(&self) -> Value {
        Value::Time(*self)
    }
}

impl ToValue for NaiveDateTime {
    fn to_value(&self) -> Value {
        Value::DateTime(*self)
    }
}

impl ToValue for DateTime<Utc> {
    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }
}

impl ToValue for EnumValue {
    fn to_value(&self) -> Value {
        Value::Enum(self.clone())
    }
}

impl ToValue for Object {
    fn to_value(&self) -> Value {
        Value::Object(self.clone())
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for BTreeSet<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue, S> ToValue for HashSet<T, S> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::str::FromStr;

    fn hash_of(value: &Value) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_nan_and_signed_zero_are_equal() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_eq!(Value::Float(-0.0), Value::Float(0.0));
        assert_eq!(hash_of(&Value::Float(-0.0)), hash_of(&Value::Float(0.0)));
    }

    #[test]
    fn test_decimal_scale_is_part_of_identity() {
        let a = Value::Decimal(Decimal::from_str("0.0").unwrap());
        let b = Value::Decimal(Decimal::from_str("0.00000").unwrap());
        assert_ne!(a, b);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(42.to_value().type_name(), TypeName::INTEGER);
        assert_eq!(vec![1, 2].to_value().type_name(), TypeName::LIST);
        assert_eq!([1, 2].to_value().type_name(), TypeName::ARRAY);
        assert_eq!(
            EnumValue::new("Status", "ACTIVE").to_value().type_name(),
            TypeName::from("Status")
        );
        assert_eq!(None::<i32>.to_value(), Value::Null);
    }

    #[test]
    fn test_f32_keeps_short_form() {
        assert_eq!(0.1f32.to_value(), Value::Float(0.1));
    }

    #[test]
    fn test_wide_integer_overflow_becomes_decimal() {
        assert_eq!(u64::MAX.to_value(), Value::Decimal(Decimal::from(u64::MAX)));
        assert_eq!(7u64.to_value(), Value::Integer(7));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::list(["a", "b"]).to_string(), "[a, b]");
        assert_eq!(Value::Null.to_string(), "null");
    }

    #[test]
    fn test_serialize_object_as_map() {
        let value = Object::new("Address").with_field("city", "Lisbon").to_value();
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"city":"Lisbon"}"#);
    }
}
