//! Property path composition
//!
//! Paths use `.` between nested fields and `[i]` for indices:
//! `employee.dependents[2].name`. Child contexts record paths relative to
//! their own object; [`rebase`] rewrites them under the parent's path when
//! the child is merged.

/// Appends a field name to a path.
///
/// # Examples
///
/// ```rust
/// use vigil_validator::core::path;
///
/// assert_eq!(path::field("", "name"), "name");
/// assert_eq!(path::field("address", "city"), "address.city");
/// assert_eq!(path::field("address", ""), "address");
/// ```
#[must_use]
pub fn field(prefix: &str, name: &str) -> String {
    rebase(prefix, name)
}

/// Appends an index segment to a path.
///
/// ```rust
/// use vigil_validator::core::path;
///
/// assert_eq!(path::index("items", 2), "items[2]");
/// ```
#[must_use]
pub fn index(prefix: &str, index: usize) -> String {
    format!("{prefix}[{index}]")
}

/// Appends a key segment to a path (`map[key]`).
#[must_use]
pub fn key(prefix: &str, key: &str) -> String {
    format!("{prefix}[{key}]")
}

/// Rewrites a child-relative path under `parent`.
///
/// An empty child path refers to the parent itself; a child path starting
/// with an index segment attaches without a dot.
///
/// ```rust
/// use vigil_validator::core::path;
///
/// assert_eq!(path::rebase("items[2]", "name"), "items[2].name");
/// assert_eq!(path::rebase("items[2]", ""), "items[2]");
/// assert_eq!(path::rebase("matrix", "[1]"), "matrix[1]");
/// assert_eq!(path::rebase("", "name"), "name");
/// ```
#[must_use]
pub fn rebase(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_owned()
    } else if child.is_empty() {
        parent.to_owned()
    } else if child.starts_with('[') {
        format!("{parent}{child}")
    } else {
        format!("{parent}.{child}")
    }
}
