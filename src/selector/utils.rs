//! Utility functions for selector rules and selector strings
//!
//! Element helpers (attribute access with empty-string defaults, tag checks)
//! used by discovery and synthesis, plus the selector-string helpers shared by
//! synthesis, validation and the shared cache: compound splitting, specificity
//! checks and compound-token matching.

use dom_query::Selection;

use crate::dom;
use crate::patterns::{CSS_IDENT, POSITIONAL_PSEUDO};

// === Element Attribute Helpers ===

/// Get element ID attribute (empty string if missing)
#[inline]
#[must_use]
pub fn id(sel: &Selection) -> String {
    dom::id(sel).unwrap_or_default()
}

/// Get element class attribute (empty string if missing)
#[inline]
#[must_use]
pub fn class(sel: &Selection) -> String {
    dom::class_name(sel).unwrap_or_default()
}

/// Get tag name (empty string if missing)
#[inline]
#[must_use]
pub fn tag(sel: &Selection) -> String {
    dom::tag_name(sel).unwrap_or_default()
}

/// Combine id and class for substring hint checks.
///
/// # Example
///
/// ```rust
/// use job_selector::selector::utils;
/// use job_selector::dom;
///
/// let doc = dom::parse(r#"<div id="main" class="job-list">text</div>"#);
/// let div = doc.select("div");
///
/// let combined = utils::id_class(&div);
/// assert!(combined.contains("main"));
/// assert!(combined.contains("job"));
/// ```
#[inline]
#[must_use]
pub fn id_class(sel: &Selection) -> String {
    format!("{} {}", id(sel), class(sel))
}

/// Class tokens usable in a selector, in attribute order.
///
/// Tokens that are not plain CSS identifiers (`md:flex`, `w-1/2`) are
/// dropped rather than escaped.
#[must_use]
pub fn safe_classes(sel: &Selection) -> Vec<String> {
    dom::classes(sel)
        .into_iter()
        .filter(|c| is_css_ident(c))
        .collect()
}

/// [`safe_classes`] sorted, for deterministic selectors.
#[must_use]
pub fn sorted_classes(sel: &Selection) -> Vec<String> {
    let mut classes = safe_classes(sel);
    classes.sort();
    classes
}

// === Element Type Checks ===

/// Check if element has a specific tag name
#[inline]
#[must_use]
pub fn is_tag(sel: &Selection, expected: &str) -> bool {
    tag(sel) == expected
}

// === Selector Strings ===

/// True for identifiers that can be written after `.` or `#` unescaped.
#[inline]
#[must_use]
pub fn is_css_ident(s: &str) -> bool {
    CSS_IDENT.is_match(s)
}

/// Byte spans of each compound selector, skipping combinators.
///
/// Whitespace and `>`, `+`, `~` separate compounds unless they sit inside
/// brackets, parentheses or quotes.
#[must_use]
pub fn compound_spans(selector: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for (i, c) in selector.char_indices() {
        let separator = quote.is_none()
            && depth == 0
            && (c.is_whitespace() || matches!(c, '>' | '+' | '~'));
        if separator {
            if let Some(s) = start.take() {
                spans.push((s, i));
            }
            continue;
        }

        start.get_or_insert(i);
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[' | '(') => depth += 1,
            (None, ']' | ')') => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    if let Some(s) = start {
        spans.push((s, selector.len()));
    }
    spans
}

/// Compound selectors of `selector`, in order.
///
/// # Example
///
/// ```rust
/// use job_selector::selector::utils;
///
/// assert_eq!(utils::compounds("ul.jobs > li a"), vec!["ul.jobs", "li", "a"]);
/// assert_eq!(utils::compounds(r#"a[title="x > y"]"#), vec![r#"a[title="x > y"]"#]);
/// ```
#[must_use]
pub fn compounds(selector: &str) -> Vec<&str> {
    compound_spans(selector)
        .into_iter()
        .map(|(s, e)| &selector[s..e])
        .collect()
}

/// True when the selector names a class, id, child step or attribute.
#[inline]
#[must_use]
pub fn is_specific(selector: &str) -> bool {
    selector.contains(['.', '#', '>', '['])
}

/// Gate for selectors reused from outside the current document.
///
/// Two or more compounds always pass. A single compound needs a class, an
/// id, a pseudo-class, or an attribute predicate other than `[href]`.
#[must_use]
pub fn is_specific_enough(selector: &str) -> bool {
    let parts = compounds(selector.trim());
    match parts.as_slice() {
        [] => false,
        [single] => {
            let part = single.to_lowercase();
            if part.contains(['.', '#']) {
                return true;
            }
            if part.contains('[') && part.contains(']') {
                return !part.ends_with("[href]");
            }
            part.contains(':')
        }
        _ => true,
    }
}

/// Remove `:nth-child(n)` and `:nth-of-type(n)` from one compound.
///
/// Only top-level pseudo-classes are removed; brackets, quotes and the
/// arguments of other pseudo-classes are left alone. A compound that
/// consisted of nothing else becomes `*`, so `div > :nth-child(3)` still
/// targets the children.
///
/// # Example
///
/// ```rust
/// use job_selector::selector::utils;
///
/// assert_eq!(utils::strip_positional("li.row:nth-child(2)"), "li.row");
/// assert_eq!(utils::strip_positional(":nth-of-type(4)"), "*");
/// assert_eq!(utils::strip_positional(r#"a[title=":nth-child(1)"]"#), r#"a[title=":nth-child(1)"]"#);
/// ```
#[must_use]
pub fn strip_positional(compound: &str) -> String {
    let mut out = String::with_capacity(compound.len());
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut rest = compound;

    while let Some(c) = rest.chars().next() {
        if quote.is_none() && depth == 0 && c == ':' {
            if let Some(m) = POSITIONAL_PSEUDO.find(rest).filter(|m| m.start() == 0) {
                rest = &rest[m.end()..];
                continue;
            }
        }
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[' | '(') => depth += 1,
            (None, ']' | ')') => depth = depth.saturating_sub(1),
            _ => {}
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    if out.is_empty() {
        "*".to_string()
    } else {
        out
    }
}

/// Strip positional pseudo-classes from the last compound only.
///
/// Synthesized selectors sometimes end in `:nth-child(n)` and would then
/// match a single posting instead of the whole group.
#[must_use]
pub fn clean_last_step(selector: &str) -> String {
    let Some(&(start, end)) = compound_spans(selector).last() else {
        return selector.trim().to_string();
    };
    let last = strip_positional(&selector[start..end]);
    let cleaned = format!("{}{}{}", &selector[..start], last, &selector[end..]);
    cleaned
        .trim()
        .trim_end_matches(|c: char| c.is_whitespace() || c == '>')
        .to_string()
}

// === Compound Tokens ===

/// The tag, id, class and attribute tokens of one compound selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    /// Lowercase tag name, `None` for `*` or no tag.
    pub tag: Option<String>,
    /// Id token without `#`.
    pub id: Option<String>,
    /// Class tokens without `.`.
    pub classes: Vec<String>,
    /// Attribute names from `[...]` predicates, lowercase.
    pub attributes: Vec<String>,
}

#[derive(Clone, Copy, PartialEq)]
enum Part {
    Tag,
    Class,
    Id,
    Attr,
    Pseudo,
}

impl Compound {
    /// Parse a single compound selector. Pseudo-classes are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use job_selector::selector::utils::Compound;
    ///
    /// let c = Compound::parse("div.footer.dark#bottom[role=contentinfo]");
    /// assert_eq!(c.tag.as_deref(), Some("div"));
    /// assert_eq!(c.id.as_deref(), Some("bottom"));
    /// assert_eq!(c.classes, vec!["footer", "dark"]);
    /// assert_eq!(c.attributes, vec!["role"]);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut compound = Self::default();
        let mut part = Part::Tag;
        let mut buf = String::new();
        let mut depth = 0usize;

        for c in text.chars() {
            if depth > 0 {
                match c {
                    '[' | '(' => depth += 1,
                    ']' | ')' => depth -= 1,
                    _ => {}
                }
                if part == Part::Attr && depth > 0 {
                    buf.push(c);
                }
                continue;
            }

            let next = match c {
                '.' => Part::Class,
                '#' => Part::Id,
                '[' => Part::Attr,
                ':' => Part::Pseudo,
                '(' => {
                    depth += 1;
                    continue;
                }
                _ => {
                    buf.push(c);
                    continue;
                }
            };
            compound.flush(part, &mut buf);
            part = next;
            if next == Part::Attr {
                depth = 1;
            }
        }
        compound.flush(part, &mut buf);
        compound
    }

    fn flush(&mut self, part: Part, buf: &mut String) {
        let token = std::mem::take(buf);
        let token = token.trim();
        if token.is_empty() {
            return;
        }
        match part {
            Part::Tag if token != "*" => self.tag = Some(token.to_ascii_lowercase()),
            Part::Class => self.classes.push(token.to_string()),
            Part::Id => self.id = Some(token.to_string()),
            Part::Attr => {
                let name = token
                    .split(['=', '~', '|', '^', '$', '*'])
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_ascii_lowercase();
                if !name.is_empty() {
                    self.attributes.push(name);
                }
            }
            _ => {}
        }
    }

    /// True when the compound carries no tokens at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attributes.is_empty()
    }

    /// True when every token of `self` also appears in `other`.
    ///
    /// An empty compound covers nothing.
    #[must_use]
    pub fn covers(&self, other: &Compound) -> bool {
        if self.is_empty() {
            return false;
        }
        let tag_ok = self.tag.is_none() || self.tag == other.tag;
        let id_ok = self.id.is_none() || self.id == other.id;
        tag_ok
            && id_ok
            && self.classes.iter().all(|c| other.classes.contains(c))
            && self.attributes.iter().all(|a| other.attributes.contains(a))
    }
}
