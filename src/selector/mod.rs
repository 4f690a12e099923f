//! Selector Infrastructure
//!
//! The [`Selector`] value type, predicate rules for walking a document, and the
//! synthesis of selectors from candidate elements.

use std::fmt;

use dom_query::Selection;
use serde::{Deserialize, Serialize};

pub mod synthesis;
pub mod utils;

/// A structural CSS query string identifying a group of nodes.
///
/// Selectors are immutable and displayed verbatim. Syntax is not checked on
/// construction: a selector that fails to parse simply matches nothing when
/// applied through [`crate::dom::try_select`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selector(String);

impl Selector {
    /// Wrap a selector string.
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self(selector.into())
    }

    /// The selector text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the selector text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Length of the selector text in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the empty selector.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Number of compound selectors (steps between combinators).
    #[must_use]
    pub fn compound_count(&self) -> usize {
        utils::compounds(&self.0).len()
    }

    /// True when the selector names a class, id, child step or attribute.
    #[must_use]
    pub fn is_specific(&self) -> bool {
        utils::is_specific(&self.0)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Selector {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Selector {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Selector {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Query for all elements matching the rule, in document order.
///
/// # Example
///
/// ```rust
/// use job_selector::selector::{self, utils};
/// use job_selector::dom;
///
/// let doc = dom::parse(r#"<div><a href="/1">1</a><span>x</span><a href="/2">2</a></div>"#);
/// let root = doc.select("div");
///
/// let links = selector::query_all(&root, |sel| utils::is_tag(sel, "a"));
/// assert_eq!(links.len(), 2);
/// ```
#[must_use]
pub fn query_all<'a>(root: &Selection<'a>, rule: impl Fn(&Selection) -> bool) -> Vec<Selection<'a>> {
    descendants(root).into_iter().filter(|sel| rule(sel)).collect()
}

fn descendants<'a>(root: &Selection<'a>) -> Vec<Selection<'a>> {
    root.try_select("*")
        .map(|all| crate::dom::each(&all))
        .unwrap_or_default()
}
