//! Selector synthesis from candidate elements.
//!
//! Given a container and the candidate elements under it, derive structural
//! selectors that re-select the same group: one step per candidate, frequency
//! aggregation, deeper compound selectors into text-bearing descendants, and
//! container-scoped path selectors for hinted job lists.
//!
//! Every function here tolerates elements without id, class or parent.

use std::collections::HashMap;

use dom_query::{Document, Selection};

use crate::dom;
use crate::patterns::COMPOUND_TAGS;
use crate::selector::utils;
use crate::selector::Selector;

/// Selectors with the number of candidates that produced them, most frequent
/// first and first-seen first among equals.
pub type SelectorCounts = Vec<(Selector, usize)>;

/// Aggregate selector strings into [`SelectorCounts`].
#[must_use]
pub fn tally<I>(items: I) -> SelectorCounts
where
    I: IntoIterator<Item = String>,
{
    let mut counts: SelectorCounts = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items {
        if let Some(&i) = index.get(&item) {
            counts[i].1 += 1;
        } else {
            index.insert(item.clone(), counts.len());
            counts.push((Selector::new(item), 1));
        }
    }

    // Stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// `tag#id`, falling back to an attribute predicate for ids that are not
/// plain identifiers.
fn id_step(tag: &str, id: &str) -> String {
    if utils::is_css_ident(id) {
        format!("{tag}#{id}")
    } else {
        format!("{tag}[id=\"{}\"]", id.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

/// `tag.c1.c2` with sorted safe classes, or the bare tag.
fn class_step(sel: &Selection) -> String {
    let tag = utils::tag(sel);
    let classes = utils::sorted_classes(sel);
    if classes.is_empty() {
        tag
    } else {
        format!("{tag}.{}", classes.join("."))
    }
}

/// Most specific single-step selector for `el` relative to `container`.
///
/// Preference order: `tag#id`, `tag.classes`, `parent.classes > tag` when the
/// parent is not the container, `tag[href][title]`, bare tag.
///
/// # Example
///
/// ```rust
/// use job_selector::dom;
/// use job_selector::selector::synthesis::step_selector;
///
/// let doc = dom::parse(r#"<div class="board"><div class="item"><a href="/1">x</a></div></div>"#);
/// let container = doc.select("div.board");
/// let link = doc.select("a");
/// assert_eq!(step_selector(&link, &container).as_str(), "div.item > a");
/// ```
#[must_use]
pub fn step_selector(el: &Selection, container: &Selection) -> Selector {
    let tag = utils::tag(el);

    let id = utils::id(el);
    if !id.trim().is_empty() {
        return Selector::new(id_step(&tag, id.trim()));
    }

    let classes = utils::sorted_classes(el);
    if !classes.is_empty() {
        return Selector::new(format!("{tag}.{}", classes.join(".")));
    }

    let parent = dom::parent(el);
    if parent.exists() && dom::tag_name(&parent).is_some() && !dom::same_node(&parent, container) {
        return Selector::new(format!("{} > {tag}", class_step(&parent)));
    }

    let mut attrs = String::new();
    if dom::has_attribute(el, "href") {
        attrs.push_str("[href]");
    }
    if dom::has_attribute(el, "title") {
        attrs.push_str("[title]");
    }
    Selector::new(format!("{tag}{attrs}"))
}

/// True when `container` is an ancestor of `el`.
#[must_use]
pub fn is_within(el: &Selection, container: &Selection) -> bool {
    dom::ancestors(el, None)
        .iter()
        .any(|a| dom::same_node(a, container))
}

/// Step selectors for every candidate under `container`, aggregated by
/// frequency.
#[must_use]
pub fn synthesize(container: &Selection, candidates: &[Selection]) -> SelectorCounts {
    tally(
        candidates
            .iter()
            .filter(|el| is_within(el, container))
            .map(|el| step_selector(el, container).into_string()),
    )
}

/// First specific selector in frequency order, else the most frequent.
#[must_use]
pub fn choose_child(counts: &SelectorCounts) -> Option<&Selector> {
    counts
        .iter()
        .find(|(sel, _)| sel.is_specific())
        .or_else(|| counts.first())
        .map(|(sel, _)| sel)
}

/// `container > child`, with the container written as `tag.classes`.
///
/// Anchors a child step such as `li > a` to the list it was found in.
#[must_use]
pub fn scope_to_container(container: &Selection, child: &Selector) -> Selector {
    Selector::new(format!("{} > {child}", class_step(container)))
}

/// Deeper candidates: class-bearing text elements under `container > child`,
/// written as `child desc.classes`.
#[must_use]
pub fn compound_selectors(doc: &Document, container: &Selection, child: &Selector) -> SelectorCounts {
    let scope = scope_to_container(container, child);
    let Some(matches) = dom::try_select(doc, scope.as_str()) else {
        return Vec::new();
    };

    let tags = COMPOUND_TAGS.join(", ");
    let mut found = Vec::new();
    for element in dom::each(&matches) {
        let Some(descendants) = dom::try_select_within(&element, &tags) else {
            continue;
        };
        for desc in dom::each(&descendants) {
            let classes = utils::safe_classes(&desc);
            if classes.is_empty() {
                continue;
            }
            found.push(format!("{child} {}.{}", utils::tag(&desc), classes.join(".")));
        }
    }
    tally(found)
}

/// Selector for a hinted container: `#id`, else `tag.classes`, else the tag.
#[must_use]
pub fn container_selector(container: &Selection) -> Selector {
    let id = utils::id(container);
    let id = id.trim();
    if !id.is_empty() && utils::is_css_ident(id) {
        return Selector::new(format!("#{id}"));
    }
    Selector::new(class_step(container))
}

/// Descendant path from `container` down to `el`, e.g. `li.row a`.
///
/// Links are written as a bare `a`; other steps keep their safe classes.
#[must_use]
pub fn path_pattern(el: &Selection, container: &Selection) -> Option<String> {
    let mut parts = Vec::new();
    let mut current = el.clone();

    while current.exists() && !dom::same_node(&current, container) {
        let tag = dom::tag_name(&current)?;
        if tag == "a" {
            parts.push(tag);
        } else {
            parts.push(class_step(&current));
        }
        current = dom::parent(&current);
    }

    if !current.exists() || parts.is_empty() {
        return None;
    }
    parts.reverse();
    Some(parts.join(" "))
}

/// Container-scoped selectors for the links of one hinted container.
///
/// Each distinct path pattern yields `container path`, most common first.
#[must_use]
pub fn scoped_selectors(container: &Selection, links: &[Selection]) -> SelectorCounts {
    let base = container_selector(container);
    tally(
        links
            .iter()
            .filter_map(|link| path_pattern(link, container))
            .map(|path| format!("{base} {path}")),
    )
}
