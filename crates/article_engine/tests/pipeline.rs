use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use article_engine::{
    BlogArticleExtractor, ContentRules, FailureKind, FetchError, FetchMetadata, FetchedPage,
    Fetcher, Harvester, HtmdConverter, PersistError, ProgressSink, RunConfig, RunEvent,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct TestSink {
    events: Mutex<Vec<RunEvent>>,
}

impl TestSink {
    fn take(&self) -> Vec<RunEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: RunEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Serves canned pages; unknown URLs fail like an unreachable host.
struct MapFetcher {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl MapFetcher {
    fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, html)| (url.to_string(), html.to_string()))
                .collect(),
            requested: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl Fetcher for MapFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        let html = self
            .pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::new(FailureKind::Network, "unreachable"))?;
        Ok(FetchedPage {
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url: url.to_string(),
                content_type: Some("text/html".to_string()),
                encoding_label: "UTF-8".to_string(),
                byte_len: html.len() as u64,
            },
            html,
        })
    }
}

fn article_page(title: &str, date: &str, body: &str) -> String {
    format!(
        r#"<html><body><header><a href="/articles">Articles</a></header>
        <article><h1>{title}</h1><time>{date}</time><p>{body}</p>
        <p><a href="https://acad.link/promo">Buy the course</a></p>
        <footer>Thanks for reading</footer></article></body></html>"#
    )
}

fn mdx_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".mdx"))
        .collect();
    names.sort();
    names
}

fn config_for(base_url: &str, output: &Path) -> RunConfig {
    RunConfig {
        base_url: base_url.to_string(),
        ..RunConfig::default_with_output(output.to_path_buf())
    }
}

async fn mount_page(server: &MockServer, route: &str, status: u16, html: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_raw(html.to_string(), "text/html"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn two_articles_produce_two_documents() {
    engine_logging::initialize_for_tests();
    let server = MockServer::start().await;
    let listing = r#"<ul>
        <li><a href="/articles/first-post">First</a></li>
        <li><a href="/articles/second-post">Second</a></li>
        <li><a href="/articles">All</a></li>
    </ul>"#;
    mount_page(&server, "/articles", 200, listing).await;
    mount_page(
        &server,
        "/articles/first-post",
        200,
        &article_page("First Post!", "Jan 1, 2024", "Hello from one."),
    )
    .await;
    mount_page(
        &server,
        "/articles/second-post",
        200,
        &article_page("Second: Post", "Feb 2, 2024", "Hello from two."),
    )
    .await;

    let temp = TempDir::new().unwrap();
    let out = temp.path().join("articles");
    let mut harvester = Harvester::new(config_for(&server.uri(), &out)).unwrap();
    let sink = TestSink::default();

    let summary = harvester.run(&sink).await.unwrap();

    assert_eq!(summary.discovered, 2);
    assert_eq!(summary.saved, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(mdx_files(&out), vec!["first-post.mdx", "second-post.mdx"]);

    let first = fs::read_to_string(out.join("first-post.mdx")).unwrap();
    let expected_head = format!(
        "---\ntitle: \"First Post!\"\ndate: \"Jan 1, 2024\"\nsource: \"{}/articles/first-post\"\n---\n\n",
        server.uri()
    );
    assert!(first.starts_with(&expected_head), "{first}");
    assert!(first.contains("Hello from one."));
    assert!(!first.contains("Buy the course"));
    assert!(!first.contains("Thanks for reading"));

    let second = fs::read_to_string(out.join("second-post.mdx")).unwrap();
    assert!(second.contains("title: \"Second: Post\""));
    assert!(second.contains("date: \"Feb 2, 2024\""));

    let events = sink.take();
    assert!(events.contains(&RunEvent::LinksDiscovered { count: 2 }));
    assert!(matches!(events.last(), Some(RunEvent::Finished(s)) if s.saved == 2));
}

#[tokio::test]
async fn failed_and_empty_articles_are_skipped_without_stopping() {
    let server = MockServer::start().await;
    let listing = r#"
        <a href="/articles/a-broken">Broken</a>
        <a href="/articles/b-empty">Empty</a>
        <a href="/articles/c-good">Good</a>
    "#;
    mount_page(&server, "/articles", 200, listing).await;
    mount_page(&server, "/articles/a-broken", 500, "oops").await;
    mount_page(
        &server,
        "/articles/b-empty",
        200,
        "<html><body><h1>No container</h1><p>Loose</p></body></html>",
    )
    .await;
    mount_page(
        &server,
        "/articles/c-good",
        200,
        &article_page("Good One", "", "Survived."),
    )
    .await;

    let temp = TempDir::new().unwrap();
    let mut harvester = Harvester::new(config_for(&server.uri(), temp.path())).unwrap();
    let sink = TestSink::default();

    let summary = harvester.run(&sink).await.unwrap();

    assert_eq!(summary.discovered, 3);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.saved, 1);
    assert_eq!(mdx_files(temp.path()), vec!["good-one.mdx"]);
    let good = fs::read_to_string(temp.path().join("good-one.mdx")).unwrap();
    assert!(good.contains("date: \"\""));

    let failures: Vec<_> = sink
        .take()
        .into_iter()
        .filter_map(|event| match event {
            RunEvent::ArticleFailed { url, error } => Some((url, error.kind)),
            _ => None,
        })
        .collect();
    assert_eq!(
        failures,
        vec![(
            format!("{}/articles/a-broken", server.uri()),
            FailureKind::HttpStatus(500)
        )]
    );
}

#[tokio::test]
async fn listing_failure_finishes_with_nothing_written() {
    let server = MockServer::start().await;
    mount_page(&server, "/articles", 503, "down").await;

    let temp = TempDir::new().unwrap();
    let out = temp.path().join("articles");
    let mut harvester = Harvester::new(config_for(&server.uri(), &out)).unwrap();
    let sink = TestSink::default();

    let summary = harvester.run(&sink).await.unwrap();

    assert_eq!(summary.discovered, 0);
    assert_eq!(summary.saved, 0);
    assert!(out.is_dir());
    assert!(mdx_files(&out).is_empty());
    let events = sink.take();
    assert!(matches!(
        events.first(),
        Some(RunEvent::ListingFailed { error, .. }) if error.kind == FailureKind::HttpStatus(503)
    ));
}

#[tokio::test]
async fn output_path_that_is_a_file_aborts_the_run() {
    let fetcher = MapFetcher::new(&[
        (
            "https://blog.example.com/articles",
            r#"<a href="/articles/alpha">a</a>"#,
        ),
        (
            "https://blog.example.com/articles/alpha",
            "<article><h1>Alpha</h1><p>first</p></article>",
        ),
    ]);

    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("articles");
    fs::write(&blocker, "not a directory").unwrap();
    let extractor = BlogArticleExtractor::new(ContentRules::default(), HtmdConverter::new());
    let mut harvester = Harvester::with_parts(
        config_for("https://blog.example.com", &blocker),
        Box::new(fetcher),
        Box::new(extractor),
    );
    let sink = TestSink::default();

    let result = harvester.run(&sink).await;

    assert!(matches!(result, Err(PersistError::OutputDir(_))), "{result:?}");
    assert_eq!(fs::read_to_string(&blocker).unwrap(), "not a directory");
    let events = sink.take();
    assert!(!events
        .iter()
        .any(|event| matches!(event, RunEvent::Finished(_))));
}

#[tokio::test]
async fn articles_are_visited_one_at_a_time_in_sorted_order() {
    let base = "https://blog.example.com";
    let fetcher = MapFetcher::new(&[
        (
            "https://blog.example.com/articles",
            r#"<a href="/articles/zeta">z</a><a href="/articles/alpha">a</a><a href="/articles/zeta">z</a>"#,
        ),
        (
            "https://blog.example.com/articles/alpha",
            "<article><h1>Alpha</h1><p>first</p></article>",
        ),
    ]);

    let temp = TempDir::new().unwrap();
    let extractor = BlogArticleExtractor::new(ContentRules::default(), HtmdConverter::new());
    let fetcher = std::sync::Arc::new(fetcher);
    let mut harvester = Harvester::with_parts(
        config_for(base, temp.path()),
        Box::new(SharedFetcher(fetcher.clone())),
        Box::new(extractor),
    );
    let sink = TestSink::default();

    let summary = harvester.run(&sink).await.unwrap();

    assert_eq!(summary.saved, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(
        *fetcher.requested.lock().unwrap(),
        vec![
            "https://blog.example.com/articles".to_string(),
            "https://blog.example.com/articles/alpha".to_string(),
            "https://blog.example.com/articles/zeta".to_string(),
        ]
    );
    assert_eq!(mdx_files(temp.path()), vec!["alpha.mdx"]);
}

struct SharedFetcher(std::sync::Arc<MapFetcher>);

#[async_trait::async_trait]
impl Fetcher for SharedFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.0.fetch(url).await
    }
}
