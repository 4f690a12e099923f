//! # job-selector
//!
//! Heuristic job-posting title extraction for career pages.
//!
//! Given a parsed career page, this library finds the CSS selector that
//! re-selects the list of posting titles, so a monitor can fetch the page
//! again later and read the titles without repeating the analysis.
//!
//! ## Quick Start
//!
//! ```rust
//! use job_selector::{analyze_html, stabilize};
//!
//! let html = r#"<html><body><ul class="job-list">
//!     <li><a href="/1">Backend developer (Payments)</a></li>
//!     <li><a href="/2">Data engineer, Search</a></li>
//!     <li><a href="/3">Product designer, Growth</a></li>
//! </ul></body></html>"#;
//!
//! let analysis = analyze_html(html, &[])?.expect("a posting list");
//! println!("Selector: {}", analysis.selector);
//! println!("Titles: {:?}", analysis.titles);
//!
//! // Persist the stabilized form
//! let persisted = stabilize(analysis.selector.as_str(), false);
//! # assert_eq!(persisted.as_str(), "ul.job-list li a");
//! # Ok::<(), job_selector::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Title Classification**: Keyword, shape and exclusion rules for Korean
//!   and English posting titles
//! - **Selector Synthesis**: Container discovery, repeated-step synthesis and
//!   scoring of deeper compound selectors
//! - **Validation**: Relevance floors that tighten as result sets grow
//! - **Stabilization**: Strips per-render ids and positional indices before
//!   a selector is persisted
//! - **Site Type Detection**: Static vs. browser-rendered fetch policy
//! - **Shared Cache**: Selectors verified on one site are tried on the next

mod error;
mod options;
mod patterns;
mod result;

/// DOM operations adapter over dom_query.
pub mod dom;

/// Keyword and pattern tables for classification and selector filtering.
pub mod ruleset;

/// Job-posting title classification.
pub mod classifier;

/// Selector type, structural matching and synthesis.
pub mod selector;

/// Candidate discovery and container weighting.
pub mod discovery;

/// Scoring of compound selector candidates.
pub mod scoring;

/// Selector validation against the document.
pub mod validate;

/// Selector stabilization for persistence.
pub mod stabilize;

/// Static vs. browser-rendered site detection.
pub mod site_type;

/// Run-scoped cache of verified selectors.
pub mod cache;

/// The selector analysis pipeline.
pub mod analyzer;

/// Posting snapshots and run-to-run diffs.
pub mod diff;

/// Character encoding detection and transcoding.
pub mod encoding;

use std::sync::{Arc, LazyLock};

use dom_query::Document;

// Public API - re-exports
pub use analyzer::Analyzer;
pub use cache::SharedSelectorCache;
pub use classifier::TextClassifier;
pub use error::{Error, Result};
pub use options::{Options, RelevanceTier};
pub use result::{Analysis, PageReport, SelectorSource};
pub use ruleset::{ClassificationRuleset, ExclusionCategory, RulesetBuilder};
pub use scoring::ScoredSelector;
pub use selector::Selector;
pub use site_type::SiteFetchPolicy;
pub use stabilize::stabilize;
pub use validate::{SelectorValidator, Validated};

static DEFAULT_ANALYZER: LazyLock<Analyzer> =
    LazyLock::new(|| Analyzer::new(Arc::new(TextClassifier::default())));

/// Decide whether `text` is plausibly a job-posting title, using the
/// built-in ruleset.
///
/// # Example
///
/// ```rust
/// use job_selector::classify;
///
/// assert!(classify("[NEOPHARM] 2025년 연구개발팀 경력 채용"));
/// assert!(!classify("HD현대"));
/// ```
#[must_use]
pub fn classify(text: &str) -> bool {
    DEFAULT_ANALYZER.classifier().classify(text)
}

/// Find the selector that best captures the posting titles of `doc`, using
/// the built-in ruleset and no shared cache.
///
/// `hints` are tried first, in order. `Ok(None)` means nothing passed
/// validation.
///
/// # Example
///
/// ```rust
/// use job_selector::{dom, find_best_selector, Selector};
///
/// let doc = dom::parse(r#"<html><body><table class="bbs">
///     <tr><td><a href="/1">[R&D] 연구개발 경력 채용</a></td></tr>
///     <tr><td><a href="/2">2025년 신입 채용 공고</a></td></tr>
/// </table></body></html>"#);
/// let analysis = find_best_selector(&doc, &[])?.expect("a posting list");
/// assert_eq!(analysis.titles.len(), 2);
/// # Ok::<(), job_selector::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn find_best_selector(doc: &Document, hints: &[Selector]) -> Result<Option<Analysis>> {
    DEFAULT_ANALYZER.find_best_selector(doc, hints)
}

/// Decide whether `doc` needs a browser-rendered fetch with the default
/// thresholds. A `known_selector` that matches settles it as static.
#[allow(clippy::missing_errors_doc)]
pub fn is_rendering_required(doc: &Document, known_selector: Option<&Selector>) -> Result<bool> {
    site_type::is_rendering_required(doc, known_selector, &Options::default())
}

/// Parse `html` and analyze it with the built-in ruleset.
#[allow(clippy::missing_errors_doc)]
pub fn analyze_html(html: &str, hints: &[Selector]) -> Result<Option<Analysis>> {
    DEFAULT_ANALYZER.analyze_html(html, hints)
}

/// Decode raw bytes (EUC-KR aware), parse and analyze with the built-in
/// ruleset.
///
/// # Example
///
/// ```rust
/// use job_selector::analyze_bytes;
///
/// let html = b"<html><body><p>\xc8\xb8\xbb\xe7 \xbc\xd2\xb0\xb3</p></body></html>";
/// assert!(analyze_bytes(html, &[])?.is_none());
/// # Ok::<(), job_selector::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn analyze_bytes(html: &[u8], hints: &[Selector]) -> Result<Option<Analysis>> {
    DEFAULT_ANALYZER.analyze_bytes(html, hints)
}
