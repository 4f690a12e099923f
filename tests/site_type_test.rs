use job_selector::site_type::{detect_fetch_policy, SpaSignals};
use job_selector::{dom, is_rendering_required, Analyzer, Error, Options, Selector, SiteFetchPolicy};

const NEXT_SHELL: &str = r#"<!DOCTYPE html>
<html><head><title>Careers</title></head>
<body>
  <div id="__next"></div>
  <script id="__NEXT_DATA__" type="application/json">{"buildId":"abc"}</script>
  <script src="/_next/static/chunks/main.js"></script>
</body></html>"#;

const STATIC_CAREERS: &str = r#"<!DOCTYPE html>
<html><head><title>Careers</title></head>
<body>
  <header><a href="/">Acme</a></header>
  <main>
    <h1>Join the Acme engineering team</h1>
    <ul class="jobs">
      <li><a href="/1">Backend developer (Payments)</a></li>
      <li><a href="/2">Data engineer, Search</a></li>
      <li><a href="/3">Product designer, Growth</a></li>
    </ul>
  </main>
  <footer><p>Acme Inc. 1 Market Street, Springfield. All rights reserved.</p></footer>
</body></html>"#;

#[test]
fn framework_shell_needs_a_browser() {
    let doc = dom::parse(NEXT_SHELL);
    assert_eq!(is_rendering_required(&doc, None).ok(), Some(true));
    let signals = SpaSignals::measure(&doc);
    assert!(signals.fingerprints.contains(&"__next"));
    assert_eq!(signals.script_count, 2);
}

#[test]
fn static_career_page_does_not() {
    let doc = dom::parse(STATIC_CAREERS);
    assert_eq!(is_rendering_required(&doc, None).ok(), Some(false));
    assert_eq!(
        detect_fetch_policy(&doc, None, &Options::default()).ok(),
        Some(SiteFetchPolicy::Static)
    );
}

#[test]
fn matching_known_selector_settles_static() {
    let html = r#"<html><body><div id="__next"><ul class="jobs"><li><a href="/1">Backend developer</a></li></ul></div></body></html>"#;
    let doc = dom::parse(html);
    assert_eq!(is_rendering_required(&doc, None).ok(), Some(true));
    let known = Selector::from("ul.jobs li a");
    assert_eq!(is_rendering_required(&doc, Some(&known)).ok(), Some(false));
}

#[test]
fn skeleton_body_needs_a_browser() {
    let doc = dom::parse(r#"<html><body><div id="app">Loading...</div></body></html>"#);
    assert_eq!(is_rendering_required(&doc, None).ok(), Some(true));
}

#[test]
fn empty_document_is_an_error() {
    let doc = dom::parse("");
    assert!(matches!(is_rendering_required(&doc, None), Err(Error::InvalidDocument(_))));
}

#[test]
fn thresholds_come_from_options() {
    let doc = dom::parse(STATIC_CAREERS);
    let strict = Options {
        skeleton_max_children: 10,
        skeleton_body_text_limit: 10_000,
        ..Options::default()
    };
    assert_eq!(
        detect_fetch_policy(&doc, None, &strict).ok(),
        Some(SiteFetchPolicy::BrowserRendered)
    );
}

#[test]
fn report_combines_selector_and_policy() {
    let doc = dom::parse(STATIC_CAREERS);
    let report = Analyzer::default()
        .report(&doc, &[], Some("https://careers.acme.example/"))
        .expect("valid document");
    assert_eq!(report.fetch_policy, SiteFetchPolicy::Static);
    let analysis = report.analysis.expect("a selector");
    assert_eq!(analysis.selector.as_str(), "ul.jobs li a");

    let json = serde_json::to_value(&Analyzer::default().report(&doc, &[], None).expect("valid document"))
        .expect("serializable");
    assert_eq!(json["selector"], "ul.jobs li a");
    assert_eq!(json["fetch_policy"], "static");
    assert_eq!(json["source"], "hinted_container");
}

#[test]
fn shell_report_recommends_browser() {
    let doc = dom::parse(NEXT_SHELL);
    let report = Analyzer::default().report(&doc, &[], None).expect("valid document");
    assert!(report.analysis.is_none());
    assert_eq!(report.fetch_policy, SiteFetchPolicy::BrowserRendered);
}
