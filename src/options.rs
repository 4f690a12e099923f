//! Tunable thresholds for classification, scoring, validation and site detection.
//!
//! Every number here was tuned empirically against real career pages. They are
//! kept as plain public fields so the orchestration layer can override them
//! (or load them from its own configuration via serde) without re-deriving them.

use serde::{Deserialize, Serialize};

/// A relevance-ratio floor applied once a selector recovers more than
/// `above` titles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelevanceTier {
    /// Tier applies when the valid-title count is strictly greater than this.
    pub above: usize,
    /// Minimum fraction of valid titles that must pass the classifier.
    pub min_ratio: f64,
}

/// Configuration options for selector analysis.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for the tuned settings.
///
/// # Example
///
/// ```rust
/// use job_selector::Options;
///
/// let options = Options {
///     min_score_hits: 3,
///     ..Options::default()
/// };
/// assert_eq!(options.max_title_len, 150);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    // === Classification ===
    /// Shortest text (in characters) the classifier will consider.
    ///
    /// Default: `3`
    pub min_title_len: usize,

    /// Longest text (in characters) the classifier will consider.
    ///
    /// Default: `150`
    pub max_title_len: usize,

    /// Keyword-less texts up to this length pass if they are letters only.
    ///
    /// Default: `15`
    pub short_role_max_len: usize,

    // === Candidate discovery ===
    /// Links inside hinted containers must be strictly longer than this.
    ///
    /// Default: `10`
    pub container_link_min_len: usize,

    /// Links in the unscoped pass must be strictly longer than this.
    ///
    /// Default: `5`
    pub fallback_link_min_len: usize,

    /// How many ancestors of each candidate receive its weight.
    ///
    /// Default: `3`
    pub ancestor_weight_depth: usize,

    // === Scoring ===
    /// Texts must be strictly longer than this to count toward a score.
    ///
    /// Default: `10`
    pub score_min_len: usize,

    /// Texts must be strictly shorter than this to count toward a score.
    ///
    /// Default: `150`
    pub score_max_len: usize,

    /// Compound candidates seen fewer times than this are not scored.
    ///
    /// Default: `2`
    pub min_score_hits: usize,

    // === Validation ===
    /// Recovered texts must be strictly longer than this to be titles.
    ///
    /// Default: `5`
    pub validator_min_title_len: usize,

    /// Relevance floors, checked from the largest `above` down.
    ///
    /// Default: `>50 → 0.8`, `>20 → 0.6`, `>5 → 0.4`
    pub relevance_tiers: Vec<RelevanceTier>,

    /// Shared-cache selectors shorter than this are not reused across sites.
    ///
    /// Default: `20`
    pub min_shared_selector_len: usize,

    // === Site type detection ===
    /// Body text limit below which an SPA fingerprint means client rendering.
    ///
    /// Default: `500`
    pub spa_body_text_limit: usize,

    /// Body text limit for the "script-heavy, text-empty" rule.
    ///
    /// Default: `50`
    pub sparse_body_text_limit: usize,

    /// Script count that must be exceeded for the "script-heavy" rule.
    ///
    /// Default: `5`
    pub sparse_script_count: usize,

    /// Body text limit for the "skeleton body" rule.
    ///
    /// Default: `100`
    pub skeleton_body_text_limit: usize,

    /// Maximum non-script body children for the "skeleton body" rule.
    ///
    /// Default: `3`
    pub skeleton_max_children: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_title_len: 3,
            max_title_len: 150,
            short_role_max_len: 15,
            container_link_min_len: 10,
            fallback_link_min_len: 5,
            ancestor_weight_depth: 3,
            score_min_len: 10,
            score_max_len: 150,
            min_score_hits: 2,
            validator_min_title_len: 5,
            relevance_tiers: vec![
                RelevanceTier { above: 50, min_ratio: 0.8 },
                RelevanceTier { above: 20, min_ratio: 0.6 },
                RelevanceTier { above: 5, min_ratio: 0.4 },
            ],
            min_shared_selector_len: 20,
            spa_body_text_limit: 500,
            sparse_body_text_limit: 50,
            sparse_script_count: 5,
            skeleton_body_text_limit: 100,
            skeleton_max_children: 3,
        }
    }
}

impl Options {
    /// Relevance floor for a selector that recovered `valid_titles` titles.
    ///
    /// Returns `0.0` when no tier applies.
    #[must_use]
    pub fn relevance_floor(&self, valid_titles: usize) -> f64 {
        self.relevance_tiers
            .iter()
            .filter(|tier| valid_titles > tier.above)
            .max_by_key(|tier| tier.above)
            .map_or(0.0, |tier| tier.min_ratio)
    }
}
