//! Static vs. browser-rendered site detection.
//!
//! The fetch layer first requests a page without a browser. If the response
//! is an application shell (a framework root, a pile of scripts, almost no
//! text) the posting list only exists after JavaScript runs, and the site is
//! recorded as needing a browser-rendered fetch from then on.

use dom_query::Document;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::dom;
use crate::error::{Error, Result};
use crate::options::Options;
use crate::patterns::SPA_FINGERPRINTS;
use crate::selector::Selector;

/// How the external fetcher should retrieve a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteFetchPolicy {
    /// Plain HTTP fetch returns the posting list.
    Static,
    /// The posting list only appears after client-side rendering.
    BrowserRendered,
}

impl SiteFetchPolicy {
    /// Map a rendering decision to a policy.
    #[must_use]
    pub fn from_rendering_required(required: bool) -> Self {
        if required {
            Self::BrowserRendered
        } else {
            Self::Static
        }
    }
}

/// Raw measurements behind a rendering decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpaSignals {
    /// Framework markers found in the lowercased markup.
    pub fingerprints: Vec<&'static str>,
    /// Characters of visible body text.
    pub body_text_len: usize,
    /// Number of `<script>` elements anywhere in the document.
    pub script_count: usize,
    /// Direct body children other than `<script>` and `<noscript>`.
    pub meaningful_children: usize,
}

impl SpaSignals {
    /// Measure `doc`.
    #[must_use]
    pub fn measure(doc: &Document) -> Self {
        let markup = doc.html().to_lowercase();
        let fingerprints = SPA_FINGERPRINTS
            .iter()
            .copied()
            .filter(|f| markup.contains(f))
            .collect();

        let body = dom::body(doc);
        let body_text_len = body.as_ref().map_or(0, dom::stripped_len);
        let meaningful_children = body.as_ref().map_or(0, |b| {
            dom::element_children(b)
                .iter()
                .filter(|c| !matches!(dom::tag_name(c).as_deref(), Some("script" | "noscript")))
                .count()
        });
        let script_count = dom::try_select(doc, "script").map_or(0, |s| s.length());

        Self {
            fingerprints,
            body_text_len,
            script_count,
            meaningful_children,
        }
    }

    /// Apply the tuned thresholds: any rule firing means client rendering.
    #[must_use]
    pub fn requires_rendering(&self, options: &Options) -> bool {
        let framework_shell =
            !self.fingerprints.is_empty() && self.body_text_len < options.spa_body_text_limit;
        let script_heavy = self.body_text_len < options.sparse_body_text_limit
            && self.script_count > options.sparse_script_count;
        let skeleton = self.meaningful_children <= options.skeleton_max_children
            && self.body_text_len < options.skeleton_body_text_limit;
        framework_shell || script_heavy || skeleton
    }
}

fn ensure_document(doc: &Document) -> Result<()> {
    if dom::is_empty_document(doc) {
        return Err(Error::InvalidDocument(
            "document has no content in head or body".to_string(),
        ));
    }
    Ok(())
}

/// Decide whether `doc` needs a browser-rendered fetch.
///
/// A `known_selector` that already matches something in `doc` settles the
/// question: the list is in the static markup. Otherwise the SPA heuristics
/// of [`SpaSignals::requires_rendering`] decide.
///
/// # Errors
///
/// Returns [`Error::InvalidDocument`] for a document with no content at all.
pub fn is_rendering_required(
    doc: &Document,
    known_selector: Option<&Selector>,
    options: &Options,
) -> Result<bool> {
    ensure_document(doc)?;

    if let Some(selector) = known_selector {
        if dom::try_select(doc, selector.as_str()).is_some() {
            tracing::debug!(%selector, "known selector present, static fetch suffices");
            return Ok(false);
        }
    }

    let signals = SpaSignals::measure(doc);
    let required = signals.requires_rendering(options);
    tracing::debug!(
        fingerprints = ?signals.fingerprints,
        body_text_len = signals.body_text_len,
        script_count = signals.script_count,
        meaningful_children = signals.meaningful_children,
        required,
        "measured rendering signals"
    );
    Ok(required)
}

/// [`is_rendering_required`] with host-specific probes applied first.
///
/// Hosted career-page platforms with a known static layout are decided by a
/// single structural probe instead of the generic heuristics. An unparsable
/// `url` just skips the probes.
///
/// # Errors
///
/// Returns [`Error::InvalidDocument`] for a document with no content at all.
pub fn detect_for_url(
    url: &str,
    doc: &Document,
    known_selector: Option<&Selector>,
    options: &Options,
) -> Result<bool> {
    ensure_document(doc)?;

    match Url::parse(url) {
        Ok(parsed) => {
            if let Some(required) = host_probe(&parsed, doc) {
                return Ok(required);
            }
        }
        Err(e) => tracing::debug!(url, error = %e, "unparsable url, skipping host probes"),
    }

    is_rendering_required(doc, known_selector, options)
}

fn host_probe(url: &Url, doc: &Document) -> Option<bool> {
    let host = url.host_str()?;
    if host == "greetinghr.com" || host.ends_with(".greetinghr.com") {
        let has_postings = dom::try_select(doc, r#"a[href^="/ko/o/"]"#).is_some();
        return Some(!has_postings);
    }
    None
}

/// [`is_rendering_required`] as a [`SiteFetchPolicy`].
///
/// # Errors
///
/// Returns [`Error::InvalidDocument`] for a document with no content at all.
pub fn detect_fetch_policy(
    doc: &Document,
    known_selector: Option<&Selector>,
    options: &Options,
) -> Result<SiteFetchPolicy> {
    is_rendering_required(doc, known_selector, options).map(SiteFetchPolicy::from_rendering_required)
}
