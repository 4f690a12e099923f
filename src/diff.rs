//! Posting snapshots and run-to-run diffs.
//!
//! The monitor persists the titles it recovered per company and compares the
//! next run against them. A company whose previous postings all disappeared
//! while an entirely new set showed up is flagged: that pattern usually means
//! the selector latched onto a different list, not that every opening closed
//! at once.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Titles per company.
pub type Postings = BTreeMap<String, BTreeSet<String>>;

/// Titles recovered in one run, keyed by company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the titles were recovered.
    pub captured_at: DateTime<Utc>,
    /// Titles per company.
    pub postings: Postings,
}

/// A company whose previous postings were entirely replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnoverWarning {
    /// Company key as recorded in the snapshot.
    pub company: String,
    /// Number of postings in the previous snapshot.
    pub previous: usize,
    /// Number of postings now, all of them new.
    pub current: usize,
}

/// Outcome of comparing two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnapshotDiff {
    /// Titles not present in the previous snapshot, per company. Companies
    /// without new titles are omitted.
    pub new_postings: BTreeMap<String, Vec<String>>,
    /// Companies with full turnover.
    pub warnings: Vec<TurnoverWarning>,
}

impl SnapshotDiff {
    /// True when nothing new was found and nothing looks suspicious.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.new_postings.is_empty() && self.warnings.is_empty()
    }

    /// Total number of new titles across companies.
    #[must_use]
    pub fn new_count(&self) -> usize {
        self.new_postings.values().map(Vec::len).sum()
    }
}

impl Snapshot {
    /// Empty snapshot stamped with the current time.
    #[must_use]
    pub fn now() -> Self {
        Self {
            captured_at: Utc::now(),
            postings: Postings::new(),
        }
    }

    /// Record `titles` for `company`, merging with titles already recorded.
    pub fn record<I, S>(&mut self, company: impl Into<String>, titles: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.postings
            .entry(company.into())
            .or_default()
            .extend(titles.into_iter().map(Into::into));
    }

    /// Compare against the `previous` run.
    ///
    /// # Example
    ///
    /// ```rust
    /// use job_selector::diff::Snapshot;
    ///
    /// let mut previous = Snapshot::now();
    /// previous.record("acme", ["Backend developer"]);
    /// let mut current = Snapshot::now();
    /// current.record("acme", ["Backend developer", "Data engineer"]);
    ///
    /// let diff = current.diff(&previous);
    /// assert_eq!(diff.new_postings["acme"], vec!["Data engineer".to_string()]);
    /// assert!(diff.warnings.is_empty());
    /// ```
    #[must_use]
    pub fn diff(&self, previous: &Snapshot) -> SnapshotDiff {
        let new_postings = find_new_postings(&self.postings, &previous.postings);
        let warnings = suspicious_turnover(&self.postings, &previous.postings, &new_postings);
        for warning in &warnings {
            tracing::warn!(
                company = %warning.company,
                previous = warning.previous,
                current = warning.current,
                "all previous postings vanished, check the page by hand"
            );
        }
        SnapshotDiff { new_postings, warnings }
    }
}

/// Titles in `current` that `previous` did not have, per company.
///
/// A company absent from `previous` contributes all of its titles. Companies
/// with nothing new are left out.
#[must_use]
pub fn find_new_postings(current: &Postings, previous: &Postings) -> BTreeMap<String, Vec<String>> {
    let none = BTreeSet::new();
    current
        .iter()
        .filter_map(|(company, titles)| {
            let seen = previous.get(company).unwrap_or(&none);
            let fresh: Vec<String> = titles.difference(seen).cloned().collect();
            if fresh.is_empty() {
                return None;
            }
            tracing::info!(%company, count = fresh.len(), "new postings");
            Some((company.clone(), fresh))
        })
        .collect()
}

fn suspicious_turnover(
    current: &Postings,
    previous: &Postings,
    new_postings: &BTreeMap<String, Vec<String>>,
) -> Vec<TurnoverWarning> {
    new_postings
        .iter()
        .filter_map(|(company, fresh)| {
            let before = previous.get(company).map_or(0, BTreeSet::len);
            let now = current.get(company).map_or(0, BTreeSet::len);
            (before > 0 && fresh.len() == now).then(|| TurnoverWarning {
                company: company.clone(),
                previous: before,
                current: now,
            })
        })
        .collect()
}
