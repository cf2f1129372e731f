//! Integration tests for the crawl and extraction pipeline
//!
//! These tests use wiremock to serve a tiny article site and run the full
//! frontier, download, and extraction cycle end-to-end.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use wiki_corpus::config::{
    Config, CrawlerConfig, ExtractConfig, OutputConfig, SiteConfig, UserAgentConfig,
};
use wiki_corpus::corpus::parse_tagged;
use wiki_corpus::crawler::crawl;
use wiki_corpus::extract::{extract_corpus, NO_DESCRIPTION};
use wiki_corpus::CorpusFormat;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration for a site served at `base_url`
fn create_test_config(base_url: &str, workdir: &Path, article_target: usize) -> Config {
    Config {
        site: SiteConfig {
            base_url: base_url.to_string(),
            ..SiteConfig::default()
        },
        crawler: CrawlerConfig {
            seeds_path: workdir.join("seeds.txt"),
            article_target,
            frontier_slack: 0.005,
            max_retries: 1,
            retry_delay_ms: 10, // Very short for testing
            workers: 3,
            prune_to_target: true,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        output: OutputConfig {
            repository_path: workdir.join("repository"),
            corpus_path: workdir.join("corpus"),
            format: CorpusFormat::Tagged,
        },
        extract: ExtractConfig {
            workers: 2,
            ..ExtractConfig::default()
        },
    }
}

/// Renders an article page with the given lead paragraph and body links
fn article_page(base_url: &str, title: &str, lead: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<li><a href="{}">{}</a></li>"#, href, href))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html><head>
<link rel="canonical" href="{base_url}/wiki/{title}">
<script type="application/ld+json">{{"datePublished":"2001-09-09T01:46:40Z","dateModified":"2001-09-09T01:46:50Z"}}</script>
</head><body>
<h1 id="firstHeading">{title}</h1>
<div id="mw-content-text"><div class="mw-parser-output">
<p>{lead}</p>
<h2>See also</h2>
<ul>{anchors}</ul>
</div></div>
</body></html>"#
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_and_extract() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let workdir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/wiki/A",
        article_page(
            &base_url,
            "A",
            "A is the first letter.",
            &["/wiki/B", "/wiki/A", "https://example.org/elsewhere", "/wiki/ISO_8601"],
        ),
    )
    .await;
    mount_page(
        &mock_server,
        "/wiki/B",
        article_page(&base_url, "B", "B is the second letter.", &["/wiki/A#History"]),
    )
    .await;

    fs::write(workdir.path().join("seeds.txt"), "/wiki/A\n").unwrap();
    let config = create_test_config(&base_url, workdir.path(), 5);

    let report = crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.frontier_size, 2);
    assert_eq!(report.parsed, Some(2));
    assert_eq!(report.fetch.stored, 2);
    assert!(report.fetch.fetch_failures.is_empty());
    assert!(report.fetch.write_failures.is_empty());
    assert!(report.pruned.is_empty());

    let repository = workdir.path().join("repository");
    let manifest = fs::read_to_string(repository.join("urls.txt")).unwrap();
    assert_eq!(manifest, "/wiki/A\n/wiki/B\n");
    assert!(repository.join("A.html").exists());
    assert!(repository.join("B.html").exists());

    let extracted = extract_corpus(&config).await.expect("Extraction failed");
    assert_eq!(extracted.outcome.processed, 2);
    assert_eq!(extracted.outcome.succeeded(), 2);

    let corpus = workdir.path().join("corpus");
    let record = parse_tagged(&fs::read_to_string(corpus.join("A.xml")).unwrap()).unwrap();
    assert_eq!(record.url, format!("{}/wiki/A", base_url));
    assert_eq!(record.title.as_deref(), Some("A"));
    assert_eq!(record.published.as_deref(), Some("1000000000"));
    assert_eq!(record.updated.as_deref(), Some("1000000010"));

    let summary = record
        .sections
        .iter()
        .find(|(heading, _)| heading == "__summary__")
        .map(|(_, content)| content.as_str());
    assert_eq!(summary, Some("A is the first letter."));
    assert_ne!(summary, Some(NO_DESCRIPTION));

    let headings: Vec<&str> = record.sections.iter().map(|(h, _)| h.as_str()).collect();
    assert_eq!(headings, vec!["A", "See also", "__summary__"]);
}

#[tokio::test]
async fn test_unreachable_seed_is_reported() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let workdir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/wiki/A",
        article_page(&base_url, "A", "A is the first letter.", &[]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/wiki/Gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    fs::write(workdir.path().join("seeds.txt"), "/wiki/A\n/wiki/Gone\n").unwrap();
    let config = create_test_config(&base_url, workdir.path(), 10);

    let report = crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.frontier_size, 2);
    assert_eq!(report.parsed, Some(1));
    assert_eq!(report.fetch.stored, 1);
    assert_eq!(report.fetch.fetch_failures, vec!["/wiki/Gone".to_string()]);
    assert!(!workdir.path().join("repository").join("Gone.html").exists());
}

#[tokio::test]
async fn test_surplus_articles_are_pruned() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let workdir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/wiki/A",
        article_page(&base_url, "A", "A is a letter.", &["/wiki/B", "/wiki/C"]),
    )
    .await;
    mount_page(
        &mock_server,
        "/wiki/B",
        article_page(&base_url, "B", "B is a letter.", &[]),
    )
    .await;
    mount_page(
        &mock_server,
        "/wiki/C",
        article_page(&base_url, "C", "C is a letter.", &[]),
    )
    .await;

    fs::write(workdir.path().join("seeds.txt"), "/wiki/A\n").unwrap();
    let mut config = create_test_config(&base_url, workdir.path(), 2);
    // A generous slack admits one identifier beyond the target
    config.crawler.frontier_slack = 0.5;

    let report = crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.frontier_size, 3);
    assert_eq!(report.fetch.stored, 3);
    assert_eq!(report.pruned, vec!["C.html".to_string()]);

    let repository = workdir.path().join("repository");
    assert!(repository.join("A.html").exists());
    assert!(repository.join("B.html").exists());
    assert!(!repository.join("C.html").exists());
}
