//! Selector stabilization for persistence.
//!
//! A selector found on one fetch has to keep working on the next. Browser
//! devtools and some frameworks emit fragments that change between page
//! loads (per-render UUID ids, positional indices that pin one instance of a
//! repeated group). Stabilization removes them.
//!
//! Both modes are idempotent: `stabilize(stabilize(s, c), c) == stabilize(s, c)`.

use crate::patterns::UUID_ID;
use crate::selector::utils::{compound_spans, strip_positional};
use crate::selector::Selector;

/// Collapse whitespace, write child combinators as ` > ` and trim dangling
/// combinators from both ends.
///
/// Quoted attribute values are copied verbatim, and inside brackets or
/// parentheses `>` is not a combinator.
///
/// # Example
///
/// ```rust
/// use job_selector::stabilize::normalize;
///
/// assert_eq!(normalize("  ul.jobs>li   a > "), "ul.jobs > li a");
/// assert_eq!(normalize(r#"a[title="x>y"]"#), r#"a[title="x>y"]"#);
/// ```
#[must_use]
pub fn normalize(selector: &str) -> String {
    let mut out = String::with_capacity(selector.len());
    let mut pending: Option<&str> = None;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for c in selector.chars() {
        if quote.is_none() {
            if c.is_whitespace() {
                if depth > 0 {
                    if !out.ends_with(' ') {
                        out.push(' ');
                    }
                } else {
                    pending.get_or_insert(" ");
                }
                continue;
            }
            if c == '>' && depth == 0 {
                pending = Some(" > ");
                continue;
            }
        }

        if let Some(combinator) = pending.take() {
            if !out.is_empty() {
                out.push_str(combinator);
            }
        }
        out.push(c);

        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[' | '(') => depth += 1,
            (None, ']' | ')') => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    out
}

/// One aggressive pass over a normalized selector: positional pseudo-classes
/// go from every compound, and a bare `#<uuid>` compound goes together with
/// the child combinator after it.
fn strip_unstable(selector: &str) -> String {
    let spans = compound_spans(selector);
    let mut parts: Vec<(&str, String)> = Vec::with_capacity(spans.len());
    let mut prev_end = 0;
    for &(start, end) in &spans {
        parts.push((&selector[prev_end..start], strip_positional(&selector[start..end])));
        prev_end = end;
    }

    let mut out = String::with_capacity(selector.len());
    let mut carried: Option<&str> = None;
    for (i, (separator, compound)) in parts.iter().enumerate() {
        let separator = carried.take().unwrap_or(*separator);
        let child_follows = parts
            .get(i + 1)
            .is_some_and(|(next, _)| next.contains('>'));
        if child_follows && UUID_ID.is_match(compound) {
            carried = Some(separator);
            continue;
        }
        out.push_str(separator);
        out.push_str(compound);
    }
    out
}

/// Rewrite `selector` so it survives re-fetching.
///
/// Conservative mode only normalizes spacing; UUID-shaped ids and positional
/// pseudo-classes are kept because the selector may still need them.
/// Aggressive mode also drops every top-level `:nth-child(n)` /
/// `:nth-of-type(n)` and every `#<uuid> >` segment, repeating until nothing
/// changes, so the result matches the whole repeated group. A step that was
/// only a positional pseudo-class becomes `*`.
///
/// Never fails; input without anything to rewrite comes back normalized.
///
/// # Example
///
/// ```rust
/// use job_selector::stabilize;
///
/// let s = "#a1b2c3d4-e5f6-47a8-89bc-0123456789ab > div:nth-child(3)";
/// assert_eq!(stabilize(s, false).as_str(), "div");
/// assert_eq!(stabilize(s, true).as_str(), s);
/// assert_eq!(stabilize("div > :nth-child(3)", false).as_str(), "div > *");
/// ```
#[must_use]
pub fn stabilize(selector: impl AsRef<str>, conservative: bool) -> Selector {
    let mut current = normalize(selector.as_ref());
    if conservative {
        return Selector::new(current);
    }

    // Every rewrite shortens the selector, so this terminates
    loop {
        let next = normalize(&strip_unstable(&current));
        if next == current {
            return Selector::new(current);
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UUID: &str = "a1b2c3d4-e5f6-47a8-89bc-0123456789ab";

    #[test]
    fn conservative_only_normalizes_spacing() {
        let s = format!("#{UUID}>ul   li:nth-child(2)");
        assert_eq!(stabilize(&s, true).as_str(), format!("#{UUID} > ul li:nth-child(2)"));
    }

    #[test]
    fn aggressive_strips_uuid_and_positions() {
        let s = format!("#{UUID} > div:nth-child(3)");
        assert_eq!(stabilize(&s, false).as_str(), "div");
    }

    #[test]
    fn aggressive_strips_nested_uuid_segments() {
        let s = format!("main #{UUID} > #{UUID} > ul > li:nth-of-type(4) a");
        assert_eq!(stabilize(&s, false).as_str(), "main ul > li a");
    }

    #[test]
    fn non_uuid_ids_are_kept() {
        assert_eq!(stabilize("#jobList > div.jobList_info", false).as_str(), "#jobList > div.jobList_info");
    }

    #[test]
    fn uuid_reached_only_after_pseudo_removal_is_stripped() {
        let s = format!("#{UUID}:nth-child(1) > span.title");
        let once = stabilize(&s, false);
        assert_eq!(once.as_str(), "span.title");
        assert_eq!(stabilize(once.as_str(), false), once);
    }

    #[test]
    fn positional_only_step_becomes_universal() {
        assert_eq!(stabilize("div > :nth-child(3)", false).as_str(), "div > *");
        assert_eq!(stabilize("ul.jobs > li > :nth-of-type(2) a", false).as_str(), "ul.jobs > li > * a");
    }

    #[test]
    fn pseudo_arguments_are_not_rewritten() {
        let s = format!("li:nth-child( #{UUID} > 1)");
        let once = stabilize(&s, false);
        assert_eq!(once.as_str(), s);
        assert_eq!(stabilize(once.as_str(), false), once);
    }

    #[test]
    fn quoted_values_are_left_verbatim() {
        assert_eq!(normalize(r#"a[title="x>y"]"#), r#"a[title="x>y"]"#);
        assert_eq!(normalize(r#"a[title='x  >  y'] >span"#), r#"a[title='x  >  y'] > span"#);
        assert_eq!(
            stabilize(r#"a[title=":nth-child(1)"]:nth-child(2)"#, false).as_str(),
            r#"a[title=":nth-child(1)"]"#
        );
    }

    #[test]
    fn idempotent_for_odd_inputs() {
        let inputs = [
            "",
            ">",
            " > > a",
            "div >  > a",
            "a:nth-child(odd)",
            "ul>li:nth-child( 3 )>a",
            "> #a1b2c3d4-e5f6-47a8-89bc-0123456789ab>p",
            "[data-x=\"a > b\"]",
            "div > :nth-child(3)",
            "li:nth-child( #a1b2c3d4-e5f6-47a8-89bc-0123456789ab > 1)",
            ":nth-:nth-child(1)child(2)",
        ];
        for input in inputs {
            for conservative in [true, false] {
                let once = stabilize(input, conservative);
                let twice = stabilize(once.as_str(), conservative);
                assert_eq!(once, twice, "not idempotent for {input:?} ({conservative})");
            }
        }
    }
}
