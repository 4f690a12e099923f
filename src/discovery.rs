//! Candidate discovery: where on the page do the posting titles live?
//!
//! Two read-only passes over the document:
//!
//! - **hinted containers**: elements whose id or class mentions a job list
//!   (`job`, `recruit`, `career`, ...) and the title-like links inside them
//! - **unscoped candidates**: title-like links anywhere outside navigation,
//!   headers and footers, falling back to text elements when links are scarce
//!
//! [`best_container`] then picks the ancestor that collects the most
//! posting-like weight from the combined candidates of [`find_candidates`].

use std::collections::{HashMap, HashSet};

use dom_query::{Document, NodeId, Selection};

use crate::classifier::TextClassifier;
use crate::dom;
use crate::patterns::CANDIDATE_TAGS;
use crate::selector::{self, utils};

/// Anchors count as links with or without an `href`.
const LINK_SELECTOR: &str = "a";

/// A text-bearing element provisionally considered a posting title.
#[derive(Debug, Clone)]
pub struct CandidateText<'a> {
    /// Stripped text of the element.
    pub text: String,
    /// The element itself.
    pub node: Selection<'a>,
    /// Ancestors as `tag.class#id`, nearest first.
    pub ancestry: Vec<String>,
}

impl<'a> CandidateText<'a> {
    fn new(node: Selection<'a>, text: String) -> Self {
        let ancestry = dom::ancestors(&node, None).iter().map(describe).collect();
        Self { text, node, ancestry }
    }
}

/// A hinted job-list container with its qualifying links.
#[derive(Debug, Clone)]
pub struct HintedContainer<'a> {
    /// Element whose id or class matched a container hint.
    pub container: Selection<'a>,
    /// Title-like links under the container, in document order.
    pub links: Vec<Selection<'a>>,
}

/// `tag.class1.class2#id` for diagnostics and ancestry snapshots.
#[must_use]
pub fn describe(sel: &Selection) -> String {
    let mut out = utils::tag(sel);
    for class in dom::classes(sel) {
        out.push('.');
        out.push_str(&class);
    }
    let id = utils::id(sel);
    if !id.is_empty() {
        out.push('#');
        out.push_str(&id);
    }
    out
}

/// True when the element's tag, class tokens or id is in `blacklist`.
fn is_blacklisted_element(sel: &Selection, blacklist: &[String]) -> bool {
    let tag = utils::tag(sel);
    let id = utils::id(sel);
    let classes = dom::classes(sel);
    blacklist
        .iter()
        .any(|b| *b == tag || (!id.is_empty() && *b == id) || classes.contains(b))
}

/// True when any ancestor of `sel` is blacklisted navigation or chrome.
#[must_use]
pub fn has_blacklisted_ancestor(sel: &Selection, blacklist: &[String]) -> bool {
    dom::ancestors(sel, None)
        .iter()
        .any(|a| is_blacklisted_element(a, blacklist))
}

fn matches_hint(sel: &Selection, hints: &[String]) -> bool {
    let id_class = utils::id_class(sel).to_lowercase();
    hints.iter().any(|h| id_class.contains(h.as_str()))
}

/// Pass (a): containers whose id or class hints at a job list.
///
/// Only containers with at least one qualifying link are returned. A link
/// qualifies when its stripped text is longer than `container_link_min_len`
/// and it passes the classifier.
#[must_use]
pub fn hinted_containers<'a>(doc: &'a Document, classifier: &TextClassifier) -> Vec<HintedContainer<'a>> {
    let hints = classifier.ruleset().container_hints();
    let min_len = classifier.options().container_link_min_len;
    let root = doc.select("html");

    selector::query_all(&root, |sel| matches_hint(sel, hints))
        .into_iter()
        .filter_map(|container| {
            let links: Vec<_> = dom::try_select_within(&container, LINK_SELECTOR)
                .map(|all| dom::each(&all))
                .unwrap_or_default()
                .into_iter()
                .filter(|link| {
                    let text = dom::stripped_text(link);
                    text.chars().count() > min_len && classifier.classify(&text)
                })
                .collect();
            (!links.is_empty()).then_some(HintedContainer { container, links })
        })
        .collect()
}

/// Pass (b): title-like elements outside blacklisted chrome.
///
/// Links are preferred: when at least two links qualify they are the whole
/// result. Otherwise text elements of the candidate tags are scanned too and
/// the links are appended after them.
#[must_use]
pub fn unscoped_candidates<'a>(doc: &'a Document, classifier: &TextClassifier) -> Vec<CandidateText<'a>> {
    let blacklist = classifier.ruleset().ancestor_blacklist();
    let min_len = classifier.options().fallback_link_min_len;

    let links: Vec<CandidateText<'a>> = dom::try_select(doc, LINK_SELECTOR)
        .map(|all| dom::each(&all))
        .unwrap_or_default()
        .into_iter()
        .filter(|link| !has_blacklisted_ancestor(link, blacklist))
        .filter_map(|link| {
            let text = dom::stripped_text(&link);
            (classifier.classify(&text) && text.chars().count() > min_len)
                .then(|| CandidateText::new(link, text))
        })
        .collect();

    if links.len() >= 2 {
        return links;
    }

    let mut candidates: Vec<CandidateText<'a>> = dom::try_select(doc, &CANDIDATE_TAGS.join(", "))
        .map(|all| dom::each(&all))
        .unwrap_or_default()
        .into_iter()
        .filter(|el| !has_blacklisted_ancestor(el, blacklist))
        .filter_map(|el| {
            let text = dom::stripped_text(&el);
            classifier.classify(&text).then(|| CandidateText::new(el, text))
        })
        .collect();
    candidates.extend(links);
    candidates
}

/// Both passes: hinted-container links first, then unscoped candidates not
/// already seen. This is the candidate set full synthesis works from.
#[must_use]
pub fn find_candidates<'a>(doc: &'a Document, classifier: &TextClassifier) -> Vec<CandidateText<'a>> {
    let mut seen: HashSet<NodeId> = HashSet::new();
    let mut out = Vec::new();

    let hinted = hinted_containers(doc, classifier)
        .into_iter()
        .flat_map(|h| h.links)
        .map(|link| {
            let text = dom::stripped_text(&link);
            CandidateText::new(link, text)
        });

    for candidate in hinted.chain(unscoped_candidates(doc, classifier)) {
        if let Some(id) = dom::node_id(&candidate.node) {
            if seen.insert(id) {
                out.push(candidate);
            }
        }
    }
    out
}

/// Ancestor with the highest summed posting weight.
///
/// Each candidate adds its [`TextClassifier::weight`] to its nearest
/// `ancestor_weight_depth` ancestors. Ties go to the ancestor seen first.
#[must_use]
pub fn best_container<'a>(candidates: &[CandidateText<'a>], classifier: &TextClassifier) -> Option<Selection<'a>> {
    let depth = classifier.options().ancestor_weight_depth;
    let mut scores: Vec<(Selection<'a>, f64)> = Vec::new();
    let mut index: HashMap<NodeId, usize> = HashMap::new();

    for candidate in candidates {
        let weight = classifier.weight(&candidate.text);
        for ancestor in dom::ancestors(&candidate.node, Some(depth)) {
            let Some(id) = dom::node_id(&ancestor) else {
                continue;
            };
            if let Some(&i) = index.get(&id) {
                scores[i].1 += weight;
            } else {
                index.insert(id, scores.len());
                scores.push((ancestor, weight));
            }
        }
    }

    let mut best: Option<(Selection<'a>, f64)> = None;
    for (sel, score) in scores {
        if best.as_ref().is_none_or(|(_, top)| score > *top) {
            best = Some((sel, score));
        }
    }
    best.map(|(sel, _)| sel)
}
