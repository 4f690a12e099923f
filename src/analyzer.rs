//! Selector analysis pipeline.
//!
//! Stages run in order and the first accepted selector wins:
//!
//! 1. caller hints (usually the selector persisted from the last run)
//! 2. selectors verified on other documents during this run
//! 3. paths scoped to containers whose id or class names a job list
//! 4. full synthesis from title-like elements anywhere on the page
//!
//! Every candidate goes through [`SelectorValidator`] before it is accepted.

use std::collections::HashSet;
use std::sync::Arc;

use dom_query::{Document, Selection};

use crate::cache::SharedSelectorCache;
use crate::classifier::TextClassifier;
use crate::discovery;
use crate::dom;
use crate::encoding;
use crate::error::{Error, Result};
use crate::result::{Analysis, PageReport, SelectorSource};
use crate::scoring;
use crate::selector::synthesis::{self, SelectorCounts};
use crate::selector::utils::{clean_last_step, is_specific, is_specific_enough};
use crate::selector::Selector;
use crate::site_type::{self, SiteFetchPolicy};
use crate::validate::SelectorValidator;

/// Runs the selector pipeline with a shared classifier and optional cache.
///
/// Cheap to clone and safe to share across worker threads; each worker
/// parses its own document.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use job_selector::{Analyzer, SharedSelectorCache, TextClassifier};
///
/// let cache = Arc::new(SharedSelectorCache::default());
/// let analyzer = Analyzer::new(Arc::new(TextClassifier::default())).with_cache(cache);
///
/// let html = r#"<ul class="jobs">
///     <li><a href="/1">Backend developer (Payments)</a></li>
///     <li><a href="/2">Data engineer, Search</a></li>
/// </ul>"#;
/// let analysis = analyzer.analyze_html(html, &[])?.unwrap();
/// assert_eq!(analysis.selector.as_str(), "ul.jobs li a");
/// # Ok::<(), job_selector::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer {
    classifier: Arc<TextClassifier>,
    cache: Option<Arc<SharedSelectorCache>>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(Arc::new(TextClassifier::default()))
    }
}

impl Analyzer {
    /// Create an analyzer without a shared cache.
    #[must_use]
    pub fn new(classifier: Arc<TextClassifier>) -> Self {
        Self { classifier, cache: None }
    }

    /// Consult and feed `cache` on every analysis.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<SharedSelectorCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Consult a fresh cache seeded with the ruleset's known-good selectors.
    #[must_use]
    pub fn with_seeded_cache(self) -> Self {
        let cache = SharedSelectorCache::seeded(self.classifier.ruleset(), self.classifier.options());
        self.with_cache(Arc::new(cache))
    }

    /// The classifier used for every stage.
    #[must_use]
    pub fn classifier(&self) -> &TextClassifier {
        &self.classifier
    }

    /// The shared cache, if any.
    #[must_use]
    pub fn cache(&self) -> Option<&SharedSelectorCache> {
        self.cache.as_deref()
    }

    /// Find the selector that best captures the posting titles of `doc`.
    ///
    /// `Ok(None)` means no candidate passed validation, which is a normal
    /// outcome for many pages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDocument`] when `doc` has no content at all.
    pub fn find_best_selector(&self, doc: &Document, hints: &[Selector]) -> Result<Option<Analysis>> {
        if dom::is_empty_document(doc) {
            return Err(Error::InvalidDocument(
                "document has no content in head or body".to_string(),
            ));
        }

        let validator = SelectorValidator::new(&self.classifier);

        if let Some(analysis) = self.try_hints(doc, hints, validator) {
            return Ok(Some(analysis));
        }
        if let Some(analysis) = self.try_cache(doc, validator) {
            return Ok(Some(analysis));
        }

        let found = self
            .try_hinted_containers(doc, validator)
            .or_else(|| self.try_synthesis(doc, validator));

        match &found {
            Some(analysis) => {
                tracing::info!(
                    selector = %analysis.selector,
                    source = ?analysis.source,
                    titles = analysis.titles.len(),
                    relevance_ratio = analysis.relevance_ratio,
                    "selector accepted"
                );
                if let Some(cache) = &self.cache {
                    let added = cache.insert_verified(&analysis.selector);
                    tracing::debug!(added, "shared cache updated");
                }
            }
            None => tracing::info!("no selector passed validation"),
        }
        Ok(found)
    }

    fn try_hints(&self, doc: &Document, hints: &[Selector], validator: SelectorValidator<'_>) -> Option<Analysis> {
        for hint in hints {
            if !is_specific_enough(hint.as_str()) {
                tracing::debug!(%hint, "hint too broad, skipped");
                continue;
            }
            if let Some(validated) = validator.validate(hint, doc) {
                tracing::info!(%hint, "hint still valid");
                return Some(Analysis::from_validated(validated, SelectorSource::Hint));
            }
        }
        None
    }

    fn try_cache(&self, doc: &Document, validator: SelectorValidator<'_>) -> Option<Analysis> {
        let cache = self.cache.as_ref()?;
        for candidate in cache.candidates() {
            if let Some(validated) = validator.validate(&candidate, doc) {
                tracing::info!(selector = %candidate, "reused selector from shared cache");
                return Some(Analysis::from_validated(validated, SelectorSource::SharedCache));
            }
        }
        None
    }

    /// Container-scoped paths, ordered by how many title-like links each
    /// recovers across the whole document.
    fn try_hinted_containers(&self, doc: &Document, validator: SelectorValidator<'_>) -> Option<Analysis> {
        let min_len = self.classifier.options().container_link_min_len;
        let mut seen = HashSet::new();
        let mut ranked: Vec<(Selector, usize)> = Vec::new();

        for hinted in discovery::hinted_containers(doc, &self.classifier) {
            for (selector, _) in synthesis::scoped_selectors(&hinted.container, &hinted.links) {
                if !seen.insert(selector.clone()) {
                    continue;
                }
                let hits = dom::select_texts(doc, selector.as_str())
                    .iter()
                    .filter(|t| t.chars().count() > min_len && self.classifier.classify(t))
                    .count();
                if hits > 0 {
                    ranked.push((selector, hits));
                }
            }
        }
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        tracing::debug!(candidates = ranked.len(), "hinted container candidates");

        ranked.into_iter().find_map(|(selector, _)| {
            validator
                .validate(&selector, doc)
                .map(|v| Analysis::from_validated(v, SelectorSource::HintedContainer))
        })
    }

    /// Synthesis over every candidate: weighted container, repeated child
    /// step, deeper compound candidates, then scoring.
    fn try_synthesis(&self, doc: &Document, validator: SelectorValidator<'_>) -> Option<Analysis> {
        let candidates = discovery::find_candidates(doc, &self.classifier);
        if candidates.len() < 2 {
            tracing::debug!(candidates = candidates.len(), "too few candidates for synthesis");
            return None;
        }

        let container = discovery::best_container(&candidates, &self.classifier)?;
        let nodes: Vec<Selection> = candidates.iter().map(|c| c.node.clone()).collect();
        let counts = synthesis::synthesize(&container, &nodes);
        let child = synthesis::choose_child(&counts)?.clone();
        tracing::debug!(
            container = %discovery::describe(&container),
            %child,
            "chose repeated child step"
        );

        let compounds = synthesis::compound_selectors(doc, &container, &child);
        let final_selector = self.pick_compound(&compounds, doc).unwrap_or_else(|| child.clone());

        [final_selector, child].into_iter().find_map(|selector| {
            // A generic relative step is kept by anchoring it to its container
            let selector = if validator.is_generic(&selector) {
                synthesis::scope_to_container(&container, &selector)
            } else {
                selector
            };
            if !is_specific(selector.as_str()) {
                return None;
            }
            let cleaned = Selector::new(clean_last_step(selector.as_str()));
            validator
                .validate(&cleaned, doc)
                .map(|v| Analysis::from_validated(v, SelectorSource::Synthesized))
        })
    }

    fn pick_compound(&self, compounds: &SelectorCounts, doc: &Document) -> Option<Selector> {
        if compounds.is_empty() {
            return None;
        }
        scoring::rank(compounds, doc, &self.classifier)
            .map(|scored| scored.selector)
            .or_else(|| compounds.first().map(|(sel, _)| sel.clone()))
    }

    /// Parse `html` and run [`Analyzer::find_best_selector`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDocument`] for markup with no content.
    pub fn analyze_html(&self, html: &str, hints: &[Selector]) -> Result<Option<Analysis>> {
        self.find_best_selector(&dom::parse(html), hints)
    }

    /// Decode raw bytes (charset-aware), parse and analyze.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDocument`] for markup with no content.
    pub fn analyze_bytes(&self, html: &[u8], hints: &[Selector]) -> Result<Option<Analysis>> {
        self.find_best_selector(&encoding::parse_bytes(html), hints)
    }

    /// Selector analysis plus the fetch recommendation for one page.
    ///
    /// The accepted selector doubles as the known selector for rendering
    /// detection. With a `url`, host-specific probes run first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDocument`] when `doc` has no content at all.
    pub fn report(&self, doc: &Document, hints: &[Selector], url: Option<&str>) -> Result<PageReport> {
        let analysis = self.find_best_selector(doc, hints)?;
        let known = analysis.as_ref().map(|a| &a.selector);
        let options = self.classifier.options();
        let required = match url {
            Some(url) => site_type::detect_for_url(url, doc, known, options)?,
            None => site_type::is_rendering_required(doc, known, options)?,
        };
        Ok(PageReport {
            analysis,
            fetch_policy: SiteFetchPolicy::from_rendering_required(required),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD: &str = r#"
        <html><body>
          <header><a href="/">Home of engineering</a></header>
          <nav><a href="/about">About our engineers</a></nav>
          <div class="board">
            <div class="item"><a href="/1"><p class="subject">Backend developer (Payments)</p><span class="meta">Seoul</span></a></div>
            <div class="item"><a href="/2"><p class="subject">Frontend developer (Web)</p><span class="meta">Seoul</span></a></div>
            <div class="item"><a href="/3"><p class="subject">Data engineer, Search</p><span class="meta">Busan</span></a></div>
            <div class="item"><a href="/4"><p class="subject">Product designer, Growth</p><span class="meta">Remote</span></a></div>
          </div>
          <footer><a href="/privacy">Privacy for engineers</a></footer>
        </body></html>"#;

    #[test]
    fn synthesis_finds_compound_title_selector() {
        let analyzer = Analyzer::default();
        let analysis = analyzer.analyze_html(BOARD, &[]).ok().flatten();
        let analysis = analysis.unwrap_or_else(|| panic!("board should yield a selector"));
        assert_eq!(analysis.selector.as_str(), "div.item > a p.subject");
        assert_eq!(analysis.source, SelectorSource::Synthesized);
        assert_eq!(analysis.titles.len(), 4);
    }

    #[test]
    fn valid_hint_short_circuits() {
        let analyzer = Analyzer::default();
        let hint = Selector::from("div.board p.subject");
        let analysis = analyzer.analyze_html(BOARD, &[hint.clone()]).ok().flatten();
        assert_eq!(analysis.map(|a| (a.selector, a.source)), Some((hint, SelectorSource::Hint)));
    }

    #[test]
    fn broad_hint_is_ignored() {
        let analyzer = Analyzer::default();
        let analysis = analyzer.analyze_html(BOARD, &[Selector::from("a[href]")]).ok().flatten();
        assert_eq!(analysis.map(|a| a.source), Some(SelectorSource::Synthesized));
    }

    #[test]
    fn empty_document_is_an_error() {
        let analyzer = Analyzer::default();
        assert!(matches!(analyzer.analyze_html("", &[]), Err(Error::InvalidDocument(_))));
    }

    #[test]
    fn page_without_postings_yields_none() {
        let analyzer = Analyzer::default();
        let html = "<html><body><p>Welcome to our company.</p><p>We love coffee.</p></body></html>";
        assert!(matches!(analyzer.analyze_html(html, &[]), Ok(None)));
    }

    #[test]
    fn report_includes_fetch_policy() {
        let analyzer = Analyzer::default();
        let doc = dom::parse(BOARD);
        let report = analyzer.report(&doc, &[], None);
        assert_eq!(report.ok().map(|r| r.fetch_policy), Some(SiteFetchPolicy::Static));
    }
}
