use job_selector::{dom, find_best_selector, Error, Selector, SelectorSource};

fn jobs_list(job_titles: usize) -> String {
    let mut html = String::from(r#"<html><body><ul class="jobs">"#);
    for i in 0..job_titles {
        html.push_str(&format!("<li><a>Backend developer {i} (Payments)</a></li>"));
    }
    html.push_str("<li><a>Contact Us</a></li>");
    html.push_str("</ul></body></html>");
    html
}

const KOREAN_BOARD: &str = r#"
<html><body>
  <header>
    <a href="/">회사 홈페이지 바로가기</a>
    <a href="/culture">기업문화 소개 페이지</a>
  </header>
  <div class="board">
    <div class="item"><a href="/1"><p class="subject">[Acme] 백엔드 개발자 경력 채용</p><span class="date">2025.01.31</span></a></div>
    <div class="item"><a href="/2"><p class="subject">2025년 신입 프론트엔드 개발자 채용</p><span class="date">2025.02.01</span></a></div>
    <div class="item"><a href="/3"><p class="subject">데이터 엔지니어 (검색 플랫폼)</p><span class="date">2025.02.02</span></a></div>
    <div class="item"><a href="/4"><p class="subject">UI/UX 디자이너 정규직 채용</p><span class="date">2025.02.03</span></a></div>
  </div>
  <footer><a href="/privacy">개인정보 처리방침</a></footer>
</body></html>"#;

fn retained(doc: &dom::Document, selector: &Selector) -> Vec<String> {
    dom::select_texts(doc, selector.as_str())
        .into_iter()
        .filter(|t| t.chars().count() > 5)
        .collect()
}

#[test]
fn list_with_one_non_job_link_is_accepted_whole() {
    let doc = dom::parse(&jobs_list(9));
    let analysis = find_best_selector(&doc, &[]).expect("valid document").expect("a selector");

    assert_eq!(analysis.selector.as_str(), "ul.jobs li a");
    assert_eq!(analysis.source, SelectorSource::HintedContainer);
    // Acceptance is by ratio; the returned titles are not filtered per title.
    assert_eq!(analysis.titles.len(), 10);
    assert!(analysis.titles.contains(&"Contact Us".to_string()));
    assert_eq!(analysis.job_titles.len(), 9);
    assert!((analysis.relevance_ratio - 0.9).abs() < 1e-9);
}

#[test]
fn generic_child_step_is_anchored_to_its_list() {
    let mut html = String::from(r#"<html><body><ul class="stack">"#);
    for i in 0..4 {
        html.push_str(&format!("<li><a>Backend developer {i} (Payments)</a></li>"));
    }
    html.push_str("</ul></body></html>");
    let doc = dom::parse(&html);
    let analysis = find_best_selector(&doc, &[]).expect("valid document").expect("a selector");

    assert_eq!(analysis.selector.as_str(), "ul.stack > li > a");
    assert_eq!(analysis.source, SelectorSource::Synthesized);
    assert_eq!(analysis.titles.len(), 4);
}

#[test]
fn board_without_hints_is_synthesized() {
    let doc = dom::parse(KOREAN_BOARD);
    let analysis = find_best_selector(&doc, &[]).expect("valid document").expect("a selector");

    assert_eq!(analysis.selector.as_str(), "div.item > a p.subject");
    assert_eq!(analysis.source, SelectorSource::Synthesized);
    assert_eq!(
        analysis.titles,
        vec![
            "[Acme] 백엔드 개발자 경력 채용",
            "2025년 신입 프론트엔드 개발자 채용",
            "데이터 엔지니어 (검색 플랫폼)",
            "UI/UX 디자이너 정규직 채용",
        ]
    );
}

#[test]
fn reapplying_the_selector_reproduces_the_titles() {
    for html in [jobs_list(9), KOREAN_BOARD.to_string()] {
        let doc = dom::parse(&html);
        let analysis = find_best_selector(&doc, &[]).expect("valid document").expect("a selector");
        assert_eq!(retained(&doc, &analysis.selector), analysis.titles);
    }
}

#[test]
fn first_valid_hint_wins() {
    let doc = dom::parse(KOREAN_BOARD);
    let hints = [
        Selector::from("ol.old-list li a"),
        Selector::from("div.board p.subject"),
        Selector::from("div.item > a p.subject"),
    ];
    let analysis = find_best_selector(&doc, &hints).expect("valid document").expect("a selector");
    assert_eq!(analysis.selector.as_str(), "div.board p.subject");
    assert_eq!(analysis.source, SelectorSource::Hint);
}

#[test]
fn stale_hints_fall_through_to_discovery() {
    let doc = dom::parse(&jobs_list(5));
    let hints = [Selector::from("table.notice td.subject a"), Selector::from("li")];
    let analysis = find_best_selector(&doc, &hints).expect("valid document").expect("a selector");
    assert_eq!(analysis.source, SelectorSource::HintedContainer);
}

#[test]
fn page_without_postings_is_none() {
    let html = r#"<html><body>
        <header><a href="/">Home</a></header>
        <main><p>We make tools for small businesses.</p><p>Founded in 2011.</p></main>
        <footer><p>Copyright 2025</p></footer>
    </body></html>"#;
    let doc = dom::parse(html);
    assert!(matches!(find_best_selector(&doc, &[]), Ok(None)));
}

#[test]
fn title_outside_candidate_tags_is_not_considered() {
    let html = r#"<html><body><h1>Backend developer (Payments)</h1></body></html>"#;
    let doc = dom::parse(html);
    assert!(matches!(find_best_selector(&doc, &[]), Ok(None)));
}

#[test]
fn empty_document_is_an_error() {
    for html in ["", "<html><head></head><body></body></html>", "   "] {
        let doc = dom::parse(html);
        assert!(
            matches!(find_best_selector(&doc, &[]), Err(Error::InvalidDocument(_))),
            "expected InvalidDocument for {html:?}"
        );
    }
}

#[test]
fn mostly_non_job_list_is_rejected() {
    let mut html = String::from(r#"<html><body><ul class="jobs">"#);
    html.push_str(r#"<li><a href="/1">Backend developer (Payments)</a></li>"#);
    html.push_str(r#"<li><a href="/2">Data engineer, Search</a></li>"#);
    for i in 0..10 {
        html.push_str(&format!(r#"<li><a href="/n{i}">Office gardening club {i}</a></li>"#));
    }
    html.push_str("</ul></body></html>");
    let doc = dom::parse(&html);

    // 2 of 12 is below the 0.4 floor, even with "li > a" anchored to the list
    assert!(find_best_selector(&doc, &[]).expect("valid document").is_none());
}
