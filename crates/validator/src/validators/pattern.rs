//! Regular expression predicate

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::core::{Constraint, Property, ToValue};

use super::names;

impl<P: ?Sized + ToValue + AsRef<str>> Property<'_, '_, P> {
    /// Requires the whole text to match `regex`.
    ///
    /// The pattern is anchored at both ends regardless of how it was written.
    pub fn matches(&mut self, regex: &Regex) -> &mut Self {
        let constraint = Constraint::new(names::MATCHES).with_param("regex", regex.as_str());
        self.validate(constraint, |v| v.is_none_or(|v| full_match(regex, v.as_ref())))
    }
}

/// Whole-text match. The leftmost match is checked first; only when it does
/// not span the text is an anchored copy compiled, since leftmost-first
/// alternation (`a|ab` on `ab`) can stop short of a whole-text match.
fn full_match(regex: &Regex, text: &str) -> bool {
    match regex.find(text) {
        None => return false,
        Some(m) if m.start() == 0 && m.end() == text.len() => return true,
        Some(_) => {}
    }
    match RegexBuilder::new(&format!(r"\A(?:{})\z", regex.as_str())).build() {
        Ok(anchored) => anchored.is_match(text),
        Err(error) => {
            debug!(pattern = regex.as_str(), %error, "anchored pattern rejected, using leftmost match only");
            false
        }
    }
}
