//! Type graph for formatter dispatch
//!
//! Each type has at most one superclass and any number of interfaces, in
//! declaration order. [`TypeGraph::ancestry`] walks this graph breadth-first
//! so that closer supertypes always win over more distant ones, the
//! superclass wins over interfaces at the same depth, and interfaces win in
//! the order they were declared. Shared ancestors (diamonds) are visited
//! once.
//!
//! `any` is never part of the graph; the formatter registry falls back to it
//! after the walk is exhausted.
//!
//! Enum types extend `enum`. Declare them with [`TypeDecl::enumeration`];
//! an undeclared enum type is recorded the first time one of its values is
//! walked, after which name and value lookups agree.

use std::collections::{HashMap, HashSet, VecDeque};

use parking_lot::RwLock;
use vigil_validator::core::{TypeName, Value};

/// Supertypes declared for one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    name: TypeName,
    superclass: Option<TypeName>,
    interfaces: Vec<TypeName>,
}

impl TypeDecl {
    /// Starts a declaration with no supertypes.
    pub fn class(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            superclass: None,
            interfaces: Vec::new(),
        }
    }

    /// Declares an enum type, extending `enum`.
    pub fn enumeration(name: impl Into<TypeName>) -> Self {
        Self::class(name).extends(TypeName::ENUM)
    }

    /// Sets the superclass.
    #[must_use = "builder methods must be chained or built"]
    pub fn extends(mut self, superclass: impl Into<TypeName>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    /// Appends interfaces, keeping declaration order.
    #[must_use = "builder methods must be chained or built"]
    pub fn implements<I>(mut self, interfaces: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TypeName>,
    {
        self.interfaces.extend(interfaces.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn name(&self) -> &TypeName {
        &self.name
    }

    fn supertypes(&self) -> impl Iterator<Item = &TypeName> {
        self.superclass.iter().chain(&self.interfaces)
    }
}

/// Declared types and their supertypes.
#[derive(Debug)]
pub struct TypeGraph {
    decls: HashMap<TypeName, TypeDecl>,
    seen_enums: RwLock<HashSet<TypeName>>,
}

impl Clone for TypeGraph {
    fn clone(&self) -> Self {
        Self {
            decls: self.decls.clone(),
            seen_enums: RwLock::new(self.seen_enums.read().clone()),
        }
    }
}

impl Default for TypeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeGraph {
    /// A graph holding the built-in value categories.
    #[must_use]
    pub fn new() -> Self {
        let mut graph = Self::empty();
        for numeric in [TypeName::INTEGER, TypeName::FLOAT, TypeName::DECIMAL] {
            graph.declare(TypeDecl::class(numeric).extends(TypeName::NUMBER));
        }
        for temporal in [TypeName::DATE, TypeName::TIME, TypeName::DATE_TIME, TypeName::TIMESTAMP] {
            graph.declare(TypeDecl::class(temporal).extends(TypeName::TEMPORAL));
        }
        graph.declare(TypeDecl::class(TypeName::LIST).implements([TypeName::ITERABLE]));
        graph
    }

    /// A graph with no declarations at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            decls: HashMap::new(),
            seen_enums: RwLock::new(HashSet::new()),
        }
    }

    /// Declares (or redeclares) a type.
    pub fn declare(&mut self, decl: TypeDecl) -> &mut Self {
        self.decls.insert(decl.name.clone(), decl);
        self
    }

    #[must_use]
    pub fn get(&self, name: &TypeName) -> Option<&TypeDecl> {
        self.decls.get(name)
    }

    /// `name` followed by its supertypes in breadth-first order.
    #[must_use]
    pub fn ancestry(&self, name: &TypeName) -> Vec<TypeName> {
        let implicit = (!self.decls.contains_key(name) && self.seen_enums.read().contains(name))
            .then_some(TypeName::ENUM);
        self.walk(name, implicit)
    }

    /// Ancestry of a value's runtime type. Enum types that were never
    /// declared implicitly extend `enum`.
    #[must_use]
    pub fn ancestry_of(&self, value: &Value) -> Vec<TypeName> {
        let name = value.type_name();
        if matches!(value, Value::Enum(_)) && !self.decls.contains_key(&name) {
            if !self.seen_enums.read().contains(&name) {
                self.seen_enums.write().insert(name.clone());
            }
            return self.walk(&name, Some(TypeName::ENUM));
        }
        self.walk(&name, None)
    }

    fn walk(&self, start: &TypeName, implicit_parent: Option<TypeName>) -> Vec<TypeName> {
        let mut order = vec![start.clone()];
        let mut visited: HashSet<TypeName> = HashSet::from([start.clone()]);
        let mut queue: VecDeque<TypeName> = VecDeque::new();

        match implicit_parent {
            Some(parent) => queue.push_back(parent),
            None => queue.extend(self.parents(start)),
        }

        while let Some(current) = queue.pop_front() {
            if current == TypeName::ANY || !visited.insert(current.clone()) {
                continue;
            }
            queue.extend(self.parents(&current));
            order.push(current);
        }
        order
    }

    fn parents(&self, name: &TypeName) -> Vec<TypeName> {
        self.decls
            .get(name)
            .map(|decl| decl.supertypes().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vigil_validator::core::EnumValue;

    fn names(ancestry: &[TypeName]) -> Vec<&str> {
        ancestry.iter().map(TypeName::as_str).collect()
    }

    #[test]
    fn test_builtin_numeric_ancestry() {
        let graph = TypeGraph::new();
        assert_eq!(names(&graph.ancestry(&TypeName::INTEGER)), ["integer", "number"]);
        assert_eq!(names(&graph.ancestry(&TypeName::LIST)), ["list", "iterable"]);
        assert_eq!(names(&graph.ancestry(&TypeName::ARRAY)), ["array"]);
    }

    #[test]
    fn test_bfs_visits_by_depth_superclass_first() {
        //        Base   Named   Audited
        //         |       \     /
        //       Person   Tagged
        //           \     /
        //           Employee
        let mut graph = TypeGraph::new();
        graph
            .declare(TypeDecl::class("Employee").extends("Person").implements(["Tagged", "Audited"]))
            .declare(TypeDecl::class("Person").extends("Base").implements(["Named"]))
            .declare(TypeDecl::class("Tagged").implements(["Named"]));

        assert_eq!(
            names(&graph.ancestry(&TypeName::from("Employee"))),
            ["Employee", "Person", "Tagged", "Audited", "Base", "Named"]
        );
    }

    #[test]
    fn test_cycles_terminate() {
        let mut graph = TypeGraph::empty();
        graph
            .declare(TypeDecl::class("A").extends("B"))
            .declare(TypeDecl::class("B").extends("A"));
        assert_eq!(names(&graph.ancestry(&TypeName::from("A"))), ["A", "B"]);
    }

    #[test]
    fn test_any_is_never_an_ancestor() {
        let mut graph = TypeGraph::empty();
        graph.declare(TypeDecl::class("Money").extends(TypeName::ANY));
        assert_eq!(names(&graph.ancestry(&TypeName::from("Money"))), ["Money"]);
    }

    #[test]
    fn test_undeclared_enum_extends_enum() {
        let graph = TypeGraph::new();
        let value = Value::Enum(EnumValue::new("Kinship", "CHILD"));
        assert_eq!(names(&graph.ancestry_of(&value)), ["Kinship", "enum"]);

        let mut graph = TypeGraph::new();
        graph.declare(TypeDecl::class("Kinship").implements(["Labelled"]));
        assert_eq!(names(&graph.ancestry_of(&value)), ["Kinship", "Labelled"]);
    }

    #[test]
    fn test_enum_name_and_value_ancestry_agree() {
        let mut graph = TypeGraph::new();
        graph.declare(TypeDecl::enumeration("Role"));
        let role = Value::Enum(EnumValue::new("Role", "ADMIN"));
        assert_eq!(names(&graph.ancestry(&TypeName::from("Role"))), ["Role", "enum"]);
        assert_eq!(graph.ancestry(&TypeName::from("Role")), graph.ancestry_of(&role));

        let kinship = TypeName::from("Kinship");
        assert_eq!(names(&graph.ancestry(&kinship)), ["Kinship"]);
        let _ = graph.ancestry_of(&Value::Enum(EnumValue::new("Kinship", "CHILD")));
        assert_eq!(names(&graph.ancestry(&kinship)), ["Kinship", "enum"]);
        assert_eq!(names(&graph.clone().ancestry(&kinship)), ["Kinship", "enum"]);
    }
}
