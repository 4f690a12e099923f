//! Selector scoring by recovered-text shape.
//!
//! Deep compound selectors tend to split into a title element and several
//! metadata elements (dates, locations, tags). Scoring prefers the one whose
//! texts are long enough to be titles and dense in job vocabulary:
//!
//! ```text
//! score = average_length(valid_texts) * keyword_ratio(valid_texts)
//! ```
//!
//! where `valid_texts` are recovered texts strictly between `score_min_len`
//! and `score_max_len` characters.

use dom_query::Document;
use serde::Serialize;

use crate::classifier::TextClassifier;
use crate::dom;
use crate::selector::synthesis::SelectorCounts;
use crate::selector::Selector;

/// A selector with the texts it recovers and how title-like they are.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSelector {
    /// The scored selector.
    pub selector: Selector,
    /// Recovered texts inside the scoring length window.
    pub titles: Vec<String>,
    /// Fraction of `titles` that pass the classifier.
    pub relevance_ratio: f64,
    /// Fraction of `titles` containing a job keyword (any case).
    pub keyword_ratio: f64,
    /// `average_length * keyword_ratio`.
    pub score: f64,
}

/// Score one selector that `hits` candidates produced.
///
/// Returns `None` when the selector was produced fewer than `min_score_hits`
/// times, fails to parse, or recovers fewer than two texts in the length
/// window.
///
/// # Example
///
/// ```rust
/// use job_selector::{dom, scoring, Selector, TextClassifier};
///
/// let doc = dom::parse(r#"
///     <ul><li><p class="t">Backend developer (Payments)</p></li>
///         <li><p class="t">Data engineer, Search</p></li></ul>"#);
/// let scored = scoring::score(&Selector::from("li p.t"), 2, &doc, &TextClassifier::default());
/// assert!(scored.is_some_and(|s| s.score > 0.0));
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn score(
    selector: &Selector,
    hits: usize,
    doc: &Document,
    classifier: &TextClassifier,
) -> Option<ScoredSelector> {
    let options = classifier.options();
    if hits < options.min_score_hits {
        return None;
    }

    let valid: Vec<String> = dom::select_texts(doc, selector.as_str())
        .into_iter()
        .filter(|t| {
            let len = t.chars().count();
            len > options.score_min_len && len < options.score_max_len
        })
        .collect();
    if valid.len() < 2 {
        return None;
    }

    let count = valid.len() as f64;
    let total_len: usize = valid.iter().map(|t| t.chars().count()).sum();
    let avg_len = total_len as f64 / count;
    let keyword_hits = valid.iter().filter(|t| classifier.keyword_hit(t)).count();
    let keyword_ratio = keyword_hits as f64 / count;
    let relevant = valid.iter().filter(|t| classifier.classify(t)).count();

    Some(ScoredSelector {
        selector: selector.clone(),
        relevance_ratio: relevant as f64 / count,
        keyword_ratio,
        score: avg_len * keyword_ratio,
        titles: valid,
    })
}

/// Highest-scoring selector among `candidates`.
///
/// Candidates are visited in synthesis order and only a strictly greater
/// score replaces the current best, so ties go to the more frequent one.
#[must_use]
pub fn rank(candidates: &SelectorCounts, doc: &Document, classifier: &TextClassifier) -> Option<ScoredSelector> {
    let mut best: Option<ScoredSelector> = None;
    for (selector, hits) in candidates {
        let Some(scored) = score(selector, *hits, doc, classifier) else {
            continue;
        };
        tracing::trace!(selector = %scored.selector, score = scored.score, "scored candidate");
        if best.as_ref().is_none_or(|b| scored.score > b.score) {
            best = Some(scored);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::synthesis::tally;

    const CARDS: &str = r#"
        <div class="list">
          <a href="/1"><p class="title">Backend developer (Payments)</p><p class="date">2025.01.31 18:00</p></a>
          <a href="/2"><p class="title">Frontend developer (Web)</p><p class="date">2025.02.01 09:00</p></a>
          <a href="/3"><p class="title">Data engineer, Search</p><p class="date">2025.02.02 10:00</p></a>
        </div>"#;

    #[test]
    fn title_selector_outscores_metadata() {
        let doc = dom::parse(CARDS);
        let classifier = TextClassifier::default();
        let candidates = tally(
            ["a p.date", "a p.date", "a p.date", "a p.title", "a p.title", "a p.title"].map(String::from),
        );
        let best = rank(&candidates, &doc, &classifier);
        assert_eq!(best.map(|b| b.selector), Some(Selector::from("a p.title")));
    }

    #[test]
    fn rare_selectors_are_not_scored() {
        let doc = dom::parse(CARDS);
        let classifier = TextClassifier::default();
        assert!(score(&Selector::from("a p.title"), 1, &doc, &classifier).is_none());
        assert!(score(&Selector::from("a p.title"), 2, &doc, &classifier).is_some());
    }

    #[test]
    fn needs_two_texts_in_window() {
        let doc = dom::parse(r#"<p class="x">Backend developer (Payments)</p><p class="x">short</p>"#);
        let classifier = TextClassifier::default();
        assert!(score(&Selector::from("p.x"), 5, &doc, &classifier).is_none());
    }

    #[test]
    fn broken_selectors_score_nothing() {
        let doc = dom::parse(CARDS);
        let classifier = TextClassifier::default();
        assert!(score(&Selector::from("p[["), 5, &doc, &classifier).is_none());
    }

    #[test]
    fn score_is_average_length_times_keyword_ratio() {
        let doc = dom::parse(
            r#"<p class="x">Backend developer</p><p class="x">Office gardening club</p>"#,
        );
        let classifier = TextClassifier::default();
        let scored = score(&Selector::from("p.x"), 2, &doc, &classifier);
        let scored = scored.unwrap_or_else(|| panic!("two texts in window"));
        // lengths 17 and 21, one keyword hit out of two
        assert!((scored.score - 19.0 * 0.5).abs() < 1e-9);
        assert!((scored.keyword_ratio - 0.5).abs() < 1e-9);
    }
}
