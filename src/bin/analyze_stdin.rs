//! Simple CLI that reads a career page from stdin and outputs JSON to stdout.
//! Used by the monitoring wrapper to analyze newly added companies.
//!
//! Usage: `analyze_stdin [URL] [--hint SELECTOR]...`
//!
//! Logs go to stderr, filtered by `RUST_LOG` (default `warn`).

use std::io::{self, Read};

use job_selector::{encoding, Analyzer, Selector, SelectorSource, SiteFetchPolicy};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Serialize)]
struct Output {
    selector: Option<String>,
    titles: Vec<String>,
    job_titles: Vec<String>,
    relevance_ratio: f64,
    source: Option<SelectorSource>,
    fetch_policy: Option<SiteFetchPolicy>,
    error: Option<String>,
}

fn parse_args() -> (Option<String>, Vec<Selector>) {
    let mut url = None;
    let mut hints = Vec::new();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--hint" {
            if let Some(hint) = args.next() {
                hints.push(Selector::new(hint));
            }
        } else if url.is_none() {
            url = Some(arg);
        }
    }
    (url, hints)
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let (url, hints) = parse_args();

    // Read raw bytes so EUC-KR pages decode correctly
    let mut html = Vec::new();
    if io::stdin().read_to_end(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let doc = encoding::parse_bytes(&html);
    let analyzer = Analyzer::default().with_seeded_cache();

    let output = match analyzer.report(&doc, &hints, url.as_deref()) {
        Ok(report) => {
            let fetch_policy = Some(report.fetch_policy);
            match report.analysis {
                Some(a) => Output {
                    selector: Some(a.selector.into_string()),
                    titles: a.titles,
                    job_titles: a.job_titles,
                    relevance_ratio: a.relevance_ratio,
                    source: Some(a.source),
                    fetch_policy,
                    error: None,
                },
                None => Output {
                    selector: None,
                    titles: Vec::new(),
                    job_titles: Vec::new(),
                    relevance_ratio: 0.0,
                    source: None,
                    fetch_policy,
                    error: None,
                },
            }
        }
        Err(e) => Output {
            selector: None,
            titles: Vec::new(),
            job_titles: Vec::new(),
            relevance_ratio: 0.0,
            source: None,
            fetch_policy: None,
            error: Some(e.to_string()),
        },
    };

    println!("{}", serde_json::to_string(&output).unwrap_or_default());
}
