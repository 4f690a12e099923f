//! Selector validation against the document it will be used on.
//!
//! A selector is accepted when it re-selects at least one title-like text and
//! the fraction of title-like texts clears a floor that rises with the size
//! of the result set. Known boilerplate selectors and selectors too broad to
//! identify a list are rejected before the document is queried.

use dom_query::Document;
use serde::Serialize;

use crate::classifier::TextClassifier;
use crate::dom;
use crate::selector::utils::{self, Compound};
use crate::selector::Selector;
use crate::stabilize;

/// An accepted selector with the texts it recovers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Validated {
    /// The selector, exactly as validated.
    pub selector: Selector,
    /// Every recovered text longer than `validator_min_title_len`.
    pub titles: Vec<String>,
    /// The subset of `titles` that passes the classifier.
    pub job_titles: Vec<String>,
    /// `job_titles.len() / titles.len()`.
    pub relevance_ratio: f64,
}

/// Validates selectors with a shared classifier.
#[derive(Debug, Clone, Copy)]
pub struct SelectorValidator<'c> {
    classifier: &'c TextClassifier,
}

impl<'c> SelectorValidator<'c> {
    /// Create a validator over `classifier` and its ruleset.
    #[must_use]
    pub fn new(classifier: &'c TextClassifier) -> Self {
        Self { classifier }
    }

    /// Re-select `selector` on `doc` and decide whether it captures a posting
    /// list.
    ///
    /// Returns `None` for blacklisted or generic selectors, selectors that
    /// fail to parse or match nothing, and result sets without enough
    /// title-like texts. The returned `titles` are all recovered texts, not
    /// only the ones that pass the classifier.
    ///
    /// # Example
    ///
    /// ```rust
    /// use job_selector::{dom, Selector, SelectorValidator, TextClassifier};
    ///
    /// let doc = dom::parse(r#"<ul class="jobs">
    ///     <li><a href="/1">Backend developer (Payments)</a></li>
    ///     <li><a href="/2">Contact Us</a></li></ul>"#);
    /// let classifier = TextClassifier::default();
    /// let validated = SelectorValidator::new(&classifier)
    ///     .validate(&Selector::from("ul.jobs li a"), &doc)
    ///     .unwrap();
    /// assert_eq!(validated.titles.len(), 2);
    /// assert_eq!(validated.job_titles.len(), 1);
    /// ```
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn validate(&self, selector: &Selector, doc: &Document) -> Option<Validated> {
        if self.is_blacklisted(selector) || self.is_generic(selector) {
            tracing::debug!(%selector, "rejected boilerplate or generic selector");
            return None;
        }

        let options = self.classifier.options();
        let titles: Vec<String> = dom::select_texts(doc, selector.as_str())
            .into_iter()
            .filter(|t| t.chars().count() > options.validator_min_title_len)
            .collect();
        let job_titles: Vec<String> = titles
            .iter()
            .filter(|t| self.classifier.classify(t))
            .cloned()
            .collect();

        if job_titles.is_empty() {
            return None;
        }

        let relevance_ratio = job_titles.len() as f64 / titles.len() as f64;
        let floor = options.relevance_floor(titles.len());
        if relevance_ratio < floor {
            tracing::debug!(
                %selector,
                titles = titles.len(),
                relevance_ratio,
                floor,
                "relevance below tier floor"
            );
            return None;
        }

        Some(Validated {
            selector: selector.clone(),
            titles,
            job_titles,
            relevance_ratio,
        })
    }

    /// True when any compound of `selector` carries every token of a
    /// single-compound blacklist entry, or the selector contains a
    /// multi-compound entry verbatim.
    #[must_use]
    pub fn is_blacklisted(&self, selector: &Selector) -> bool {
        let normalized = stabilize::normalize(selector.as_str());
        let steps: Vec<Compound> = utils::compounds(&normalized)
            .into_iter()
            .map(Compound::parse)
            .collect();

        self.classifier
            .ruleset()
            .selector_blacklist()
            .iter()
            .any(|entry| {
                let entry = stabilize::normalize(entry);
                match utils::compounds(&entry).as_slice() {
                    [] => false,
                    [single] => {
                        let pattern = Compound::parse(single);
                        steps.iter().any(|step| pattern.covers(step))
                    }
                    _ => normalized.contains(entry.as_str()),
                }
            })
    }

    /// True for a bare tag or one of the known single-hop generic selectors.
    #[must_use]
    pub fn is_generic(&self, selector: &Selector) -> bool {
        let normalized = stabilize::normalize(selector.as_str());
        if normalized.is_empty() || utils::is_css_ident(&normalized) {
            return true;
        }
        self.classifier
            .ruleset()
            .generic_selectors()
            .iter()
            .any(|g| stabilize::normalize(g) == normalized)
    }
}
