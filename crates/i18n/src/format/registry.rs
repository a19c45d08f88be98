use std::collections::HashMap;
use std::fmt;

use tracing::debug;
use vigil_validator::core::{TypeName, Value};

use super::builtin::{AnyFormatter, EnumFormatter, NumberFormatter, SequenceFormatter, TemporalFormatter};
use super::{FormatContext, Formatter};
use crate::locale::Locale;
use crate::types::{TypeDecl, TypeGraph};

/// Formatters keyed by type, resolved through a [`TypeGraph`].
///
/// Lookup walks the ancestry of the requested type breadth-first. At every
/// step an override registered with [`set`](Self::set) is preferred over the
/// built-in formatter for the same type; the first hit wins. When nothing in
/// the ancestry has a formatter, the `any` formatter is used.
pub struct FormatterRegistry {
    types: TypeGraph,
    builtins: HashMap<TypeName, Box<dyn Formatter>>,
    overrides: HashMap<TypeName, Box<dyn Formatter>>,
    any: Box<dyn Formatter>,
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatterRegistry {
    /// A registry with the built-in type graph and formatters.
    #[must_use]
    pub fn new() -> Self {
        let mut builtins: HashMap<TypeName, Box<dyn Formatter>> = HashMap::new();
        builtins.insert(TypeName::ENUM, Box::new(EnumFormatter));
        builtins.insert(TypeName::NUMBER, Box::new(NumberFormatter));
        builtins.insert(TypeName::TEMPORAL, Box::new(TemporalFormatter));
        builtins.insert(TypeName::ITERABLE, Box::new(SequenceFormatter));
        builtins.insert(TypeName::ARRAY, Box::new(SequenceFormatter));

        Self {
            types: TypeGraph::new(),
            builtins,
            overrides: HashMap::new(),
            any: Box::new(AnyFormatter),
        }
    }

    #[must_use]
    pub fn types(&self) -> &TypeGraph {
        &self.types
    }

    /// Declares a user type so its supertypes take part in resolution.
    pub fn declare(&mut self, decl: TypeDecl) -> &mut Self {
        self.types.declare(decl);
        self
    }

    /// Registers `formatter` for `type_name`, shadowing any built-in for it.
    /// Returns the previous override.
    pub fn set(
        &mut self,
        type_name: impl Into<TypeName>,
        formatter: impl Formatter + 'static,
    ) -> Option<Box<dyn Formatter>> {
        let type_name = type_name.into();
        debug!(type_name = %type_name, "formatter overridden");
        self.overrides.insert(type_name, Box::new(formatter))
    }

    /// Removes the override for `type_name`. The built-in formatter for the
    /// type, if any, becomes visible again.
    pub fn remove(&mut self, type_name: &TypeName) -> Option<Box<dyn Formatter>> {
        let removed = self.overrides.remove(type_name);
        if removed.is_some() {
            debug!(type_name = %type_name, "formatter override removed");
        }
        removed
    }

    /// The formatter used for values of `type_name`.
    ///
    /// Enum types resolve through `enum` once declared with
    /// [`TypeDecl::enumeration`] or once one of their values was formatted.
    #[must_use]
    pub fn get(&self, type_name: &TypeName) -> &dyn Formatter {
        self.resolve(self.types.ancestry(type_name))
    }

    /// The formatter used for `value`, honouring the implicit `enum`
    /// supertype of undeclared enum types.
    #[must_use]
    pub fn get_for(&self, value: &Value) -> &dyn Formatter {
        self.resolve(self.types.ancestry_of(value))
    }

    /// Formats `value` for `locale`.
    #[must_use]
    pub fn format(&self, value: &Value, locale: &Locale) -> String {
        let cx = FormatContext::new(locale, self);
        self.get_for(value).format(value, &cx)
    }

    fn resolve(&self, ancestry: Vec<TypeName>) -> &dyn Formatter {
        ancestry
            .iter()
            .find_map(|ty| self.registered(ty))
            .or_else(|| self.overrides.get(&TypeName::ANY).map(Box::as_ref))
            .unwrap_or(self.any.as_ref())
    }

    fn registered(&self, type_name: &TypeName) -> Option<&dyn Formatter> {
        self.overrides
            .get(type_name)
            .or_else(|| self.builtins.get(type_name))
            .map(Box::as_ref)
    }
}

impl fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut overrides: Vec<_> = self.overrides.keys().map(TypeName::as_str).collect();
        overrides.sort_unstable();
        f.debug_struct("FormatterRegistry")
            .field("types", &self.types)
            .field("overrides", &overrides)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vigil_validator::core::{EnumValue, Object};

    fn en() -> Locale {
        Locale::new("en", "US")
    }

    fn tagged(tag: &'static str) -> impl Formatter {
        move |value: &Value, _: &FormatContext<'_>| format!("{tag}:{value}")
    }

    #[test]
    fn test_exact_registration_wins() {
        let mut registry = FormatterRegistry::new();
        registry.set(TypeName::INTEGER, tagged("int"));
        assert_eq!(registry.format(&Value::Integer(1000), &en()), "int:1000");
        assert_eq!(registry.format(&Value::Float(1000.5), &en()), "1,000.5");
    }

    #[test]
    fn test_override_on_category_beats_builtin() {
        let mut registry = FormatterRegistry::new();
        registry.set(TypeName::NUMBER, tagged("num"));
        assert_eq!(registry.format(&Value::Integer(7), &en()), "num:7");
    }

    #[test]
    fn test_remove_reverts_to_builtin() {
        let mut registry = FormatterRegistry::new();
        let original = registry.format(&Value::Integer(9876), &en());

        registry.set(TypeName::NUMBER, tagged("num"));
        assert!(registry.remove(&TypeName::NUMBER).is_some());
        assert!(registry.remove(&TypeName::NUMBER).is_none());

        assert_eq!(registry.format(&Value::Integer(9876), &en()), original);
    }

    #[test]
    fn test_user_types_resolve_through_declared_ancestry() {
        let mut registry = FormatterRegistry::new();
        registry
            .declare(TypeDecl::class("Manager").extends("Employee").implements(["Named"]))
            .declare(TypeDecl::class("Employee").implements(["Named"]));
        registry.set("Named", |value: &Value, _: &FormatContext<'_>| match value {
            Value::Object(o) => o.field("name").map(ToString::to_string).unwrap_or_default(),
            other => other.to_string(),
        });

        let manager = Value::Object(Object::new("Manager").with_field("name", "Ana"));
        assert_eq!(registry.format(&manager, &en()), "Ana");

        registry.set("Employee", tagged("emp"));
        assert_eq!(registry.format(&manager, &en()), "emp:Manager(name=Ana)");
    }

    #[test]
    fn test_unregistered_type_uses_any() {
        let registry = FormatterRegistry::new();
        let point = Value::Object(Object::new("Point").with_field("x", 1));
        assert_eq!(registry.format(&point, &en()), "Point(x=1)");
        assert_eq!(registry.format(&Value::Null, &en()), "null");
    }

    #[test]
    fn test_any_can_be_overridden() {
        let mut registry = FormatterRegistry::new();
        registry.set(TypeName::ANY, tagged("any"));
        assert_eq!(registry.format(&Value::text("x"), &en()), "any:x");
        assert_eq!(registry.format(&Value::Integer(1), &en()), "1");
    }

    #[test]
    fn test_enum_uses_variant_name() {
        let mut registry = FormatterRegistry::new();
        let value = Value::Enum(EnumValue::new("Kinship", "SPOUSE"));
        assert_eq!(registry.format(&value, &en()), "SPOUSE");

        registry.set(TypeName::ENUM, |value: &Value, _: &FormatContext<'_>| value.to_string().to_lowercase());
        assert_eq!(registry.format(&value, &en()), "spouse");
    }

    #[test]
    fn test_get_agrees_with_format_for_enums() {
        let mut registry = FormatterRegistry::new();
        registry.declare(TypeDecl::enumeration("Kinship"));
        registry.set(TypeName::ENUM, |value: &Value, _: &FormatContext<'_>| value.to_string().to_lowercase());

        let spouse = Value::Enum(EnumValue::new("Kinship", "SPOUSE"));
        let locale = en();
        let cx = FormatContext::new(&locale, &registry);
        assert_eq!(registry.get(&TypeName::from("Kinship")).format(&spouse, &cx), "spouse");
        assert_eq!(registry.format(&spouse, &en()), "spouse");
    }

    #[test]
    fn test_get_learns_undeclared_enum_types() {
        let mut registry = FormatterRegistry::new();
        registry.set(TypeName::ENUM, |value: &Value, _: &FormatContext<'_>| value.to_string().to_lowercase());
        let role = Value::Enum(EnumValue::new("Role", "ADMIN"));
        assert_eq!(registry.format(&role, &en()), "admin");

        let locale = en();
        let cx = FormatContext::new(&locale, &registry);
        assert_eq!(registry.get(&TypeName::from("Role")).format(&role, &cx), "admin");
    }
}
