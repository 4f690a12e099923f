use std::sync::Arc;

use job_selector::{Analyzer, ClassificationRuleset, Options, RelevanceTier, TextClassifier};

#[test]
fn options_default_values_are_the_tuned_ones() {
    let options = Options::default();
    assert_eq!(options.min_title_len, 3);
    assert_eq!(options.max_title_len, 150);
    assert_eq!(options.container_link_min_len, 10);
    assert_eq!(options.score_min_len, 10);
    assert_eq!(options.score_max_len, 150);
    assert_eq!(options.validator_min_title_len, 5);
    assert_eq!(options.min_shared_selector_len, 20);
    assert_eq!(options.relevance_tiers.len(), 3);
}

#[test]
fn options_struct_update_syntax_overrides_selected_fields_only() {
    let options = Options {
        min_score_hits: 5,
        relevance_tiers: vec![RelevanceTier { above: 10, min_ratio: 0.5 }],
        ..Options::default()
    };

    assert_eq!(options.min_score_hits, 5);
    assert_eq!(options.max_title_len, 150);
    assert_eq!(options.relevance_floor(11), 0.5);
    assert_eq!(options.relevance_floor(10), 0.0);
}

#[test]
fn options_load_from_partial_json() {
    let options: Options = serde_json::from_str(
        r#"{"spa_body_text_limit": 800, "relevance_tiers": [{"above": 0, "min_ratio": 1.0}]}"#,
    )
    .expect("valid config");
    assert_eq!(options.spa_body_text_limit, 800);
    assert_eq!(options.relevance_floor(1), 1.0);
    assert_eq!(options.skeleton_max_children, 3);
}

#[test]
fn analyzer_uses_classifier_options() {
    let html = r#"<html><body><ul class="jobs">
        <li><a href="/1">Backend developer (Payments)</a></li>
        <li><a href="/2">Data engineer, Search</a></li>
        <li><a href="/3">Office gardening club</a></li>
    </ul></body></html>"#;

    let lenient = Analyzer::default();
    assert!(lenient.analyze_html(html, &[]).expect("valid document").is_some());

    let strict = Options {
        relevance_tiers: vec![RelevanceTier { above: 0, min_ratio: 1.0 }],
        ..Options::default()
    };
    let analyzer = Analyzer::new(Arc::new(TextClassifier::new(
        Arc::new(ClassificationRuleset::default()),
        strict,
    )));
    assert!(analyzer.analyze_html(html, &[]).expect("valid document").is_none());
}

#[test]
fn options_implements_debug_and_clone() {
    let options = Options::default();
    let debug_str = format!("{options:?}");
    assert!(debug_str.contains("Options"));
    assert!(debug_str.contains("relevance_tiers"));

    let cloned = options.clone();
    assert_eq!(cloned.relevance_tiers, options.relevance_tiers);
}
