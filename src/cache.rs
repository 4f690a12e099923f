//! Run-scoped cache of selectors verified on other documents.
//!
//! Many career pages are built on the same few platforms, so a selector that
//! worked for one company often works for the next. Workers consult the cache
//! before running full synthesis and insert what they discover. Entries are
//! opportunistic hints: a miss just falls back to synthesis.

use parking_lot::RwLock;

use crate::options::Options;
use crate::ruleset::ClassificationRuleset;
use crate::selector::utils::is_specific_enough;
use crate::selector::Selector;
use crate::stabilize::stabilize;

/// Concurrency-safe ordered set of verified selectors.
///
/// Shared across worker threads behind an `Arc`. Insertion is an atomic
/// insert-if-absent under a single write lock.
#[derive(Debug)]
pub struct SharedSelectorCache {
    entries: RwLock<Vec<Selector>>,
    min_len: usize,
}

impl Default for SharedSelectorCache {
    fn default() -> Self {
        Self::new(&Options::default())
    }
}

impl SharedSelectorCache {
    /// Create an empty cache that accepts selectors of at least
    /// `min_shared_selector_len` bytes.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            min_len: options.min_shared_selector_len,
        }
    }

    /// Create a cache pre-filled with known-good selectors.
    ///
    /// Seeds go through the same admission rules as inserted selectors.
    #[must_use]
    pub fn with_seeds<I, S>(options: &Options, seeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Selector>,
    {
        let cache = Self::new(options);
        for seed in seeds {
            cache.insert(seed.into());
        }
        cache
    }

    /// Create a cache pre-filled with the ruleset's seed selectors.
    #[must_use]
    pub fn seeded(ruleset: &ClassificationRuleset, options: &Options) -> Self {
        Self::with_seeds(options, ruleset.seed_selectors().iter().map(String::as_str))
    }

    /// True when `selector` is long and specific enough to reuse elsewhere.
    #[must_use]
    pub fn admits(&self, selector: &Selector) -> bool {
        selector.len() >= self.min_len && is_specific_enough(selector.as_str())
    }

    /// Insert `selector` if admissible and absent. Returns whether it was added.
    pub fn insert(&self, selector: Selector) -> bool {
        if !self.admits(&selector) {
            return false;
        }
        let mut entries = self.entries.write();
        if entries.contains(&selector) {
            return false;
        }
        entries.push(selector);
        true
    }

    /// Insert a freshly verified selector plus its aggressively stabilized
    /// variant, so sibling pages with different instance indices also match.
    ///
    /// Returns how many entries were added.
    pub fn insert_verified(&self, selector: &Selector) -> usize {
        let mut added = usize::from(self.insert(selector.clone()));
        let variant = stabilize(selector.as_str(), false);
        if !variant.is_empty() && variant != *selector {
            added += usize::from(self.insert(variant));
        }
        added
    }

    /// True when `selector` is cached.
    #[must_use]
    pub fn contains(&self, selector: &Selector) -> bool {
        self.entries.read().contains(selector)
    }

    /// Snapshot of the entries, cheapest to check first: fewest compounds,
    /// then shortest, then insertion order.
    #[must_use]
    pub fn candidates(&self) -> Vec<Selector> {
        let mut snapshot = self.entries.read().clone();
        snapshot.sort_by_key(|s| (s.compound_count(), s.len()));
        snapshot
    }

    /// Number of cached selectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
