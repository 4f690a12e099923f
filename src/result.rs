//! Result types for selector analysis.
//!
//! This module defines the structured output of one analysis: the accepted
//! selector, the texts it recovers, and where the selector came from.

use serde::{Deserialize, Serialize};

use crate::selector::Selector;
use crate::site_type::SiteFetchPolicy;
use crate::validate::Validated;

/// Which stage of the pipeline produced the accepted selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorSource {
    /// A caller-supplied hint (usually the selector persisted last run).
    Hint,
    /// A selector verified on another document during this run.
    SharedCache,
    /// A path scoped to an element whose id or class names a job list.
    HintedContainer,
    /// Full synthesis from title-like elements anywhere on the page.
    Synthesized,
}

/// Result of selector analysis on one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    /// Accepted selector, unmodified. Stabilize it before persisting.
    pub selector: Selector,

    /// Every recovered text longer than the validator minimum.
    ///
    /// Acceptance is decided by the relevance ratio, so this may include
    /// texts that are not titles on their own.
    pub titles: Vec<String>,

    /// The subset of `titles` that passes the classifier.
    pub job_titles: Vec<String>,

    /// `job_titles.len() / titles.len()`.
    pub relevance_ratio: f64,

    /// Pipeline stage that produced `selector`.
    pub source: SelectorSource,
}

impl Analysis {
    /// Tag a validated selector with its source.
    #[must_use]
    pub fn from_validated(validated: Validated, source: SelectorSource) -> Self {
        Self {
            selector: validated.selector,
            titles: validated.titles,
            job_titles: validated.job_titles,
            relevance_ratio: validated.relevance_ratio,
            source,
        }
    }
}

/// [`Analysis`] plus the fetch recommendation, as reported for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageReport {
    /// Selector analysis, `None` when no selector was accepted.
    #[serde(flatten)]
    pub analysis: Option<Analysis>,

    /// Recommended fetch policy for the site.
    pub fetch_policy: SiteFetchPolicy,
}
