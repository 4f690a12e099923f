//! Job-posting title classification.
//!
//! [`TextClassifier`] decides whether a short text fragment is plausibly a
//! job-posting title. It is a pure function of the text and its injected
//! [`ClassificationRuleset`], so a single instance is shared across threads.

use std::sync::Arc;

use crate::options::Options;
use crate::ruleset::{ClassificationRuleset, ExclusionCategory};

/// Title classifier over an immutable ruleset.
#[derive(Debug, Clone)]
pub struct TextClassifier {
    ruleset: Arc<ClassificationRuleset>,
    options: Options,
}

impl Default for TextClassifier {
    fn default() -> Self {
        Self::new(Arc::new(ClassificationRuleset::default()), Options::default())
    }
}

impl TextClassifier {
    /// Create a classifier over `ruleset` with the thresholds in `options`.
    #[must_use]
    pub fn new(ruleset: Arc<ClassificationRuleset>, options: Options) -> Self {
        Self { ruleset, options }
    }

    /// The ruleset this classifier was built with.
    #[must_use]
    pub fn ruleset(&self) -> &ClassificationRuleset {
        &self.ruleset
    }

    /// The thresholds this classifier was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Decide whether `text` is plausibly a job-posting title.
    ///
    /// Gates run in a fixed order and the first failing gate decides:
    ///
    /// 1. length (in characters) within `min_title_len..=max_title_len`
    /// 2. not a bare company or legal-entity name
    /// 3. not a date, countdown, hash-tag or bare short word
    /// 4. not site chrome (menus, buttons, footers, filter chips)
    /// 5. contains a job keyword or has a function + role shape, or is a
    ///    short letters-only role name
    /// 6. not a bare team or department name
    ///
    /// Never fails; empty or malformed input is simply `false`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use job_selector::TextClassifier;
    ///
    /// let classifier = TextClassifier::default();
    /// assert!(classifier.classify("백엔드 개발자"));
    /// assert!(!classifier.classify("브랜드디자인팀"));
    /// assert!(!classifier.classify("D-8"));
    /// ```
    #[must_use]
    pub fn classify(&self, text: &str) -> bool {
        let len = text.chars().count();
        if len < self.options.min_title_len || len > self.options.max_title_len {
            return false;
        }

        let rules = &self.ruleset;
        for category in [
            ExclusionCategory::CompanyName,
            ExclusionCategory::DateOrTag,
            ExclusionCategory::UiChrome,
        ] {
            if rules.is_excluded(category, text) {
                return false;
            }
        }

        if !rules.has_keyword(text) && !rules.has_title_shape(text) && !self.is_short_role(text, len) {
            return false;
        }

        !rules.is_excluded(ExclusionCategory::TeamName, text)
    }

    fn is_short_role(&self, text: &str, len: usize) -> bool {
        len <= self.options.short_role_max_len && self.ruleset.is_short_role(text.trim())
    }

    /// True when `text` contains any job keyword, ignoring case.
    #[inline]
    #[must_use]
    pub fn keyword_hit(&self, text: &str) -> bool {
        self.ruleset.keyword_hit(text)
    }

    /// Posting-likelihood weight of `text`, used to score its ancestors.
    ///
    /// Starts at `1.0`; strong posting shapes, bracketed company prefixes,
    /// recruiting years and organisation units add to it, and a length in
    /// the typical title range adds more. Very short text is penalised.
    #[must_use]
    pub fn weight(&self, text: &str) -> f64 {
        let rules = &self.ruleset;
        let mut weight = 1.0;

        if rules.has_weighted_title(text) {
            weight += 3.0;
        }
        if rules.has_bracketed_prefix(text) {
            weight += 2.0;
        }
        if rules.has_year(text) {
            weight += 2.0;
        }
        if rules.has_org_unit(text) {
            weight += 1.0;
        }

        match text.chars().count() {
            15..=80 => weight += 2.0,
            10..=14 => weight += 1.0,
            0..=7 => weight -= 1.0,
            _ => {}
        }

        weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> TextClassifier {
        TextClassifier::default()
    }

    #[test]
    fn accepts_function_and_role() {
        assert!(classifier().classify("백엔드 개발자"));
        assert!(classifier().classify("[NEOPHARM] 연구개발 경력 채용"));
        assert!(classifier().classify("Backend developer (Payments)"));
    }

    #[test]
    fn rejects_bare_team_names_after_keyword_gate() {
        assert!(!classifier().classify("브랜드디자인팀"));
        assert!(!classifier().classify("플랫폼개발본부"));
        assert!(!classifier().classify("서비스운영부문"));
    }

    #[test]
    fn rejects_countdowns_and_dates() {
        assert!(!classifier().classify("D-8"));
        assert!(!classifier().classify("D-DAY"));
        assert!(!classifier().classify("2025.01.31 18:00 마감"));
        assert!(!classifier().classify("#개발 외 3"));
    }

    #[test]
    fn rejects_company_names_and_chrome() {
        assert!(!classifier().classify("카카오뱅크"));
        assert!(!classifier().classify("한화그룹"));
        assert!(!classifier().classify("Contact Us"));
        assert!(!classifier().classify("채용공고 바로가기"));
        assert!(!classifier().classify("개인정보 처리방침"));
    }

    #[test]
    fn short_role_exception() {
        assert!(classifier().classify("Barista"));
        assert!(classifier().classify("Store & Floor"));
        assert!(!classifier().classify("Barista 2"));
        assert!(!classifier().classify("Seasonal retail floor staff"));
    }

    #[test]
    fn length_boundaries() {
        let opts = Options::default();
        let base = "QA1";
        assert!(!classifier().classify("AI"));
        assert!(classifier().classify(base));
        // Three Hangul letters are a bare short word, not a length failure.
        assert!(!classifier().classify("개발자"));

        let at_max = format!("{base}{}", "a".repeat(opts.max_title_len - 3));
        assert_eq!(at_max.chars().count(), 150);
        assert!(classifier().classify(&at_max));

        let over_max = format!("{at_max}a");
        assert!(!classifier().classify(&over_max));
    }

    #[test]
    fn classify_is_deterministic() {
        let c = classifier();
        for text in ["백엔드 개발자", "D-8", "", "Contact Us"] {
            assert_eq!(c.classify(text), c.classify(text));
        }
    }

    #[test]
    fn weight_rewards_posting_shapes() {
        let c = classifier();
        let plain = c.weight("Barista");
        let posting = c.weight("[NEOPHARM] 2025년 연구개발팀 경력 채용");
        assert!(posting > plain);
        assert!((plain - 0.0).abs() < f64::EPSILON);
        // 1 + 3 (title) + 2 (bracket) + 2 (year) + 1 (unit) + 2 (length)
        assert!((posting - 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn custom_ruleset_is_injected() {
        let ruleset = ClassificationRuleset::builder()
            .keywords(["barista"])
            .build()
            .unwrap_or_default();
        let c = TextClassifier::new(Arc::new(ruleset), Options::default());
        assert!(c.classify("Senior barista, night shift"));
        assert!(!c.classify("Senior cashier, night shift"));
    }
}
