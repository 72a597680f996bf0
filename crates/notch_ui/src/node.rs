//! Rendered element descriptions.

use std::collections::BTreeMap;

use crate::style::Style;

/// What a handle renders to: one element with attributes, classes and an
/// inline style.
///
/// Backends apply this to their own element type; tests inspect it directly.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleNode {
    /// `None` removes the element from the tab order.
    pub tab_index: Option<i32>,
    pub class_name: String,
    pub style: Style,
    pub role: &'static str,
    /// Passthrough and ARIA attributes.
    pub attributes: BTreeMap<String, String>,
}

impl HandleNode {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.class_name.split_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }
}

/// Join class names, skipping empty entries.
pub(crate) fn class_names<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_skip_empty() {
        assert_eq!(class_names([Some("a"), None, Some(""), Some("b")]), "a b");
        assert_eq!(class_names([None, None]), "");
    }
}
