//! Classification ruleset: the immutable configuration behind title classification.
//!
//! A ruleset is built once (usually [`ClassificationRuleset::default`]) and
//! shared by `Arc` across every analysis in the process. Patterns are kept in
//! tagged categories rather than one monolithic regex so each category can be
//! tested and overridden on its own.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::patterns;

/// Version tag of the built-in ruleset. Bump when the default tables change.
pub const DEFAULT_RULESET_VERSION: &str = "2025.1";

/// Category of a rejection pattern, in the order the classifier checks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionCategory {
    /// Bare company, group or legal-entity names.
    CompanyName,
    /// Dates, countdowns, hash-tags, bare short words.
    DateOrTag,
    /// Menus, buttons, filters, footer and navigation labels.
    UiChrome,
    /// Bare team/department names; checked after the keyword gate.
    TeamName,
}

/// A compiled rejection pattern with its category.
#[derive(Debug, Clone)]
pub struct ExclusionPattern {
    /// Which classifier step this pattern belongs to.
    pub category: ExclusionCategory,
    /// Case-insensitive compiled pattern.
    pub regex: Regex,
}

/// Immutable keyword/pattern configuration for title classification and
/// selector filtering.
#[derive(Debug, Clone)]
pub struct ClassificationRuleset {
    version: String,
    keywords: Vec<String>,
    keyword_matcher: Regex,
    title_shape: Regex,
    short_role: Regex,
    exclusions: Vec<ExclusionPattern>,
    weight_titles: Vec<Regex>,
    weight_bracketed: Regex,
    weight_year: Regex,
    org_units: Vec<String>,
    container_hints: Vec<String>,
    ancestor_blacklist: Vec<String>,
    selector_blacklist: Vec<String>,
    generic_selectors: Vec<String>,
    seed_selectors: Vec<String>,
}

#[allow(clippy::expect_used)]
static DEFAULT_RULESET: LazyLock<ClassificationRuleset> = LazyLock::new(|| {
    RulesetBuilder::defaults()
        .build()
        .expect("built-in ruleset patterns compile")
});

impl Default for ClassificationRuleset {
    fn default() -> Self {
        DEFAULT_RULESET.clone()
    }
}

impl ClassificationRuleset {
    /// Start a builder pre-filled with the built-in tables.
    #[must_use]
    pub fn builder() -> RulesetBuilder {
        RulesetBuilder::defaults()
    }

    /// Version tag of this ruleset.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Job keywords, in configuration order.
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// True when `text` contains any keyword (case-sensitive substring).
    #[must_use]
    pub fn has_keyword(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }

    /// True when `text` contains any keyword, ignoring case.
    #[must_use]
    pub fn keyword_hit(&self, text: &str) -> bool {
        self.keyword_matcher.is_match(text)
    }

    /// True when `text` has a function + role shape.
    #[must_use]
    pub fn has_title_shape(&self, text: &str) -> bool {
        self.title_shape.is_match(text)
    }

    /// True when `text` is letters, `&` and whitespace only.
    #[must_use]
    pub fn is_short_role(&self, text: &str) -> bool {
        self.short_role.is_match(text)
    }

    /// True when any pattern of `category` matches `text`.
    #[must_use]
    pub fn is_excluded(&self, category: ExclusionCategory, text: &str) -> bool {
        self.exclusions
            .iter()
            .filter(|p| p.category == category)
            .any(|p| p.regex.is_match(text))
    }

    /// All exclusion patterns, in check order.
    #[must_use]
    pub fn exclusions(&self) -> &[ExclusionPattern] {
        &self.exclusions
    }

    /// True when `text` matches one of the strong posting shapes.
    #[must_use]
    pub fn has_weighted_title(&self, text: &str) -> bool {
        self.weight_titles.iter().any(|re| re.is_match(text))
    }

    /// True when `text` carries a bracketed company prefix.
    #[must_use]
    pub fn has_bracketed_prefix(&self, text: &str) -> bool {
        self.weight_bracketed.is_match(text)
    }

    /// True when `text` mentions a recruiting year.
    #[must_use]
    pub fn has_year(&self, text: &str) -> bool {
        self.weight_year.is_match(text)
    }

    /// True when `text` names an organisation unit.
    #[must_use]
    pub fn has_org_unit(&self, text: &str) -> bool {
        self.org_units.iter().any(|u| text.contains(u.as_str()))
    }

    /// Id/class fragments marking job list containers (lowercase).
    #[must_use]
    pub fn container_hints(&self) -> &[String] {
        &self.container_hints
    }

    /// Ancestor tags or class/id tokens that disqualify candidates.
    #[must_use]
    pub fn ancestor_blacklist(&self) -> &[String] {
        &self.ancestor_blacklist
    }

    /// Known boilerplate selectors.
    #[must_use]
    pub fn selector_blacklist(&self) -> &[String] {
        &self.selector_blacklist
    }

    /// Selectors too broad to accept.
    #[must_use]
    pub fn generic_selectors(&self) -> &[String] {
        &self.generic_selectors
    }

    /// Selectors to seed a shared cache with.
    #[must_use]
    pub fn seed_selectors(&self) -> &[String] {
        &self.seed_selectors
    }
}

/// Builder for custom rulesets; patterns compile in [`RulesetBuilder::build`].
///
/// # Example
///
/// ```rust
/// use job_selector::{ClassificationRuleset, ExclusionCategory};
///
/// let ruleset = ClassificationRuleset::builder()
///     .version("test")
///     .add_keyword("barista")
///     .add_exclusion(ExclusionCategory::UiChrome, r"^apply now$")
///     .build()?;
/// assert!(ruleset.has_keyword("Head barista"));
/// # Ok::<(), job_selector::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct RulesetBuilder {
    version: String,
    keywords: Vec<String>,
    title_shape: String,
    short_role: String,
    exclusions: Vec<(ExclusionCategory, String)>,
    weight_titles: Vec<String>,
    weight_bracketed: String,
    weight_year: String,
    org_units: Vec<String>,
    container_hints: Vec<String>,
    ancestor_blacklist: Vec<String>,
    selector_blacklist: Vec<String>,
    generic_selectors: Vec<String>,
    seed_selectors: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl RulesetBuilder {
    fn defaults() -> Self {
        let mut exclusions = Vec::new();
        for (category, sources) in [
            (ExclusionCategory::CompanyName, patterns::COMPANY_NAME_PATTERNS),
            (ExclusionCategory::DateOrTag, patterns::DATE_OR_TAG_PATTERNS),
            (ExclusionCategory::UiChrome, patterns::UI_CHROME_PATTERNS),
            (ExclusionCategory::TeamName, patterns::TEAM_NAME_PATTERNS),
        ] {
            exclusions.extend(sources.iter().map(|s| (category, (*s).to_string())));
        }

        Self {
            version: DEFAULT_RULESET_VERSION.to_string(),
            keywords: owned(patterns::JOB_KEYWORDS),
            title_shape: patterns::TITLE_SHAPE.to_string(),
            short_role: patterns::SHORT_ROLE.to_string(),
            exclusions,
            weight_titles: owned(patterns::WEIGHT_TITLE_PATTERNS),
            weight_bracketed: patterns::WEIGHT_BRACKETED.to_string(),
            weight_year: patterns::WEIGHT_YEAR.to_string(),
            org_units: owned(patterns::WEIGHT_ORG_UNITS),
            container_hints: owned(patterns::CONTAINER_HINTS),
            ancestor_blacklist: owned(patterns::ANCESTOR_BLACKLIST),
            selector_blacklist: owned(patterns::SELECTOR_BLACKLIST),
            generic_selectors: owned(patterns::GENERIC_SELECTORS),
            seed_selectors: owned(patterns::SEED_SELECTORS),
        }
    }

    /// Set the version tag.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Replace the keyword list.
    #[must_use]
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Append one keyword.
    #[must_use]
    pub fn add_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    /// Replace the title-shape pattern.
    #[must_use]
    pub fn title_shape(mut self, pattern: impl Into<String>) -> Self {
        self.title_shape = pattern.into();
        self
    }

    /// Append an exclusion pattern to `category`.
    #[must_use]
    pub fn add_exclusion(mut self, category: ExclusionCategory, pattern: impl Into<String>) -> Self {
        self.exclusions.push((category, pattern.into()));
        self
    }

    /// Drop every exclusion pattern of `category`.
    #[must_use]
    pub fn clear_exclusions(mut self, category: ExclusionCategory) -> Self {
        self.exclusions.retain(|(c, _)| *c != category);
        self
    }

    /// Replace the container hint fragments.
    #[must_use]
    pub fn container_hints<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.container_hints = hints.into_iter().map(|h| h.into().to_lowercase()).collect();
        self
    }

    /// Append a selector to the hard blacklist.
    #[must_use]
    pub fn add_blacklisted_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector_blacklist.push(selector.into());
        self
    }

    /// Replace the shared-cache seed selectors.
    #[must_use]
    pub fn seed_selectors<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.seed_selectors = selectors.into_iter().map(Into::into).collect();
        self
    }

    /// Compile every pattern and freeze the ruleset.
    pub fn build(self) -> Result<ClassificationRuleset> {
        let keywords: Vec<String> = self.keywords.into_iter().filter(|k| !k.is_empty()).collect();
        if keywords.is_empty() {
            return Err(Error::EmptyRuleset("keywords"));
        }

        let alternation = keywords
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let keyword_matcher = RegexBuilder::new(&alternation).case_insensitive(true).build()?;

        let mut exclusions = Vec::with_capacity(self.exclusions.len());
        for (category, source) in &self.exclusions {
            let regex = RegexBuilder::new(source).case_insensitive(true).build()?;
            exclusions.push(ExclusionPattern { category: *category, regex });
        }

        let weight_titles = self
            .weight_titles
            .iter()
            .map(|s| Regex::new(s))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(ClassificationRuleset {
            version: self.version,
            keywords,
            keyword_matcher,
            title_shape: Regex::new(&self.title_shape)?,
            short_role: Regex::new(&self.short_role)?,
            exclusions,
            weight_titles,
            weight_bracketed: Regex::new(&self.weight_bracketed)?,
            weight_year: Regex::new(&self.weight_year)?,
            org_units: self.org_units,
            container_hints: self.container_hints,
            ancestor_blacklist: self.ancestor_blacklist,
            selector_blacklist: self.selector_blacklist,
            generic_selectors: self.generic_selectors,
            seed_selectors: self.seed_selectors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ruleset_is_versioned() {
        let ruleset = ClassificationRuleset::default();
        assert_eq!(ruleset.version(), DEFAULT_RULESET_VERSION);
        assert!(!ruleset.keywords().is_empty());
    }

    #[test]
    fn keyword_gate_is_case_sensitive_but_scoring_is_not() {
        let ruleset = ClassificationRuleset::default();
        assert!(ruleset.has_keyword("Backend developer"));
        assert!(!ruleset.has_keyword("Backend Developer"));
        assert!(ruleset.keyword_hit("Backend Developer"));
    }

    #[test]
    fn categories_are_checked_independently() {
        let ruleset = ClassificationRuleset::default();
        assert!(ruleset.is_excluded(ExclusionCategory::DateOrTag, "D-8"));
        assert!(!ruleset.is_excluded(ExclusionCategory::UiChrome, "D-8"));
        assert!(ruleset.is_excluded(ExclusionCategory::CompanyName, "카카오뱅크"));
        assert!(ruleset.is_excluded(ExclusionCategory::TeamName, "브랜드디자인팀"));
        assert!(ruleset.is_excluded(ExclusionCategory::UiChrome, "채용공고 바로가기"));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let result = ClassificationRuleset::builder()
            .add_exclusion(ExclusionCategory::UiChrome, "(unclosed")
            .build();
        assert!(matches!(result, Err(Error::InvalidPattern(_))));
    }

    #[test]
    fn empty_keywords_are_rejected() {
        let result = ClassificationRuleset::builder()
            .keywords(Vec::<String>::new())
            .build();
        assert!(matches!(result, Err(Error::EmptyRuleset("keywords"))));
    }

    #[test]
    fn keywords_with_regex_metacharacters_are_escaped() {
        let ruleset = ClassificationRuleset::builder()
            .keywords(["C++", "R&D"])
            .build()
            .unwrap_or_default();
        assert!(ruleset.keyword_hit("c++ engineer"));
        assert!(!ruleset.keyword_hit("cc engineer"));
    }

    #[test]
    fn cleared_category_no_longer_rejects() {
        let ruleset = ClassificationRuleset::builder()
            .clear_exclusions(ExclusionCategory::DateOrTag)
            .build()
            .unwrap_or_default();
        assert!(!ruleset.is_excluded(ExclusionCategory::DateOrTag, "D-8"));
    }
}
