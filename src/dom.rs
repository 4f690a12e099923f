//! DOM Operations Adapter
//!
//! The narrow document interface the engine relies on: tag name, attributes,
//! stripped text, parent chain and selector queries. Everything else in the
//! crate goes through these functions instead of touching `dom_query` directly,
//! so the parser can be swapped in one place.

// Re-export core types for external use
pub use dom_query::{Document, NodeId, NodeRef, Selection};

/// Tags whose text never counts as visible content.
const INVISIBLE_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

// === Attribute Operations ===

/// Get element ID attribute
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> Option<String> {
    sel.attr("id").map(|s| s.to_string())
}

/// Get element class attribute
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Get the element's class tokens in attribute order.
#[must_use]
pub fn classes(sel: &Selection) -> Vec<String> {
    class_name(sel)
        .map(|c| c.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Check if attribute exists
#[inline]
#[must_use]
pub fn has_attribute(sel: &Selection, name: &str) -> bool {
    sel.has_attr(name)
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes().first().and_then(node_tag)
}

/// Get a node's tag name (lowercase), `None` for non-elements.
#[must_use]
pub fn node_tag(node: &NodeRef) -> Option<String> {
    if !node.is_element() {
        return None;
    }
    node.node_name().map(|t| t.to_ascii_lowercase())
}

/// Identity of the first node in a selection.
#[inline]
#[must_use]
pub fn node_id(sel: &Selection) -> Option<NodeId> {
    sel.nodes().first().map(|n| n.id)
}

/// True when both selections start at the same node.
#[must_use]
pub fn same_node(a: &Selection, b: &Selection) -> bool {
    match (node_id(a), node_id(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

// === Text Content ===

/// Visible text with every text node trimmed and the pieces joined without
/// separators.
///
/// Script, style, noscript and template text is skipped. This is the text
/// form used everywhere titles are compared, so a selector re-applied to the
/// same document always yields byte-identical strings.
#[must_use]
pub fn stripped_text(sel: &Selection) -> String {
    let Some(root) = sel.nodes().first() else {
        return String::new();
    };

    let mut out = String::new();
    for node in root.descendants() {
        if !node.is_text() {
            continue;
        }
        let hidden = node
            .parent()
            .and_then(|p| node_tag(&p))
            .is_some_and(|t| INVISIBLE_TEXT_TAGS.contains(&t.as_str()));
        if hidden {
            continue;
        }
        let text = node.text();
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            out.push_str(trimmed);
        }
    }
    out
}

/// Character count of [`stripped_text`].
#[inline]
#[must_use]
pub fn stripped_len(sel: &Selection) -> usize {
    stripped_text(sel).chars().count()
}

// === Tree Navigation ===

/// Get parent element
#[inline]
#[must_use]
pub fn parent<'a>(sel: &Selection<'a>) -> Selection<'a> {
    sel.parent()
}

/// Element ancestors from nearest to furthest, up to `limit` of them.
///
/// The document node itself is never included.
#[must_use]
pub fn ancestors<'a>(sel: &Selection<'a>, limit: Option<usize>) -> Vec<Selection<'a>> {
    let mut out = Vec::new();
    let Some(node) = sel.nodes().first() else {
        return out;
    };

    let mut current = node.parent();
    while let Some(n) = current {
        if limit.is_some_and(|l| out.len() >= l) {
            break;
        }
        if n.is_element() {
            out.push(Selection::from(n));
        }
        current = n.parent();
    }
    out
}

/// Element children of the first node in a selection.
#[must_use]
pub fn element_children<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    sel.nodes()
        .first()
        .map(|n| n.element_children().into_iter().map(Selection::from).collect())
        .unwrap_or_default()
}

/// Split a selection into one selection per node, in document order.
#[must_use]
pub fn each<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    sel.nodes().iter().map(|n| Selection::from(*n)).collect()
}

// === Querying ===

/// Query all elements by CSS selector, tolerating malformed selectors.
///
/// Returns `None` both for selectors that fail to parse and for selectors
/// that match nothing; callers treat the two the same way.
#[inline]
#[must_use]
pub fn try_select<'a>(doc: &'a Document, selector: &str) -> Option<Selection<'a>> {
    doc.try_select(selector)
}

/// Query all descendants of a selection, tolerating malformed selectors.
#[inline]
#[must_use]
pub fn try_select_within<'a>(sel: &Selection<'a>, selector: &str) -> Option<Selection<'a>> {
    sel.try_select(selector)
}

/// Stripped texts of every element matched by `selector`, in document order.
///
/// Empty when the selector is malformed or matches nothing.
#[must_use]
pub fn select_texts(doc: &Document, selector: &str) -> Vec<String> {
    try_select(doc, selector)
        .map(|sel| each(&sel).iter().map(stripped_text).collect())
        .unwrap_or_default()
}

/// The document `<body>`, if the parser produced one.
#[must_use]
pub fn body(doc: &Document) -> Option<Selection<'_>> {
    doc.try_select("body")
}

/// True when the document has no content beyond the parser's skeleton.
///
/// HTML parsers always synthesize `<html><head><body>`, so "empty" means
/// no element children and no visible text in either section.
#[must_use]
pub fn is_empty_document(doc: &Document) -> bool {
    let has_head_children = doc
        .try_select("head")
        .is_some_and(|h| !element_children(&h).is_empty());
    let has_body_content = body(doc)
        .is_some_and(|b| !element_children(&b).is_empty() || !stripped_text(&b).is_empty());
    !has_head_children && !has_body_content
}
