//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use form_scout::catalog::FormCatalog;
use form_scout::config::Config;
use form_scout::crawler::{run_crawl, Coordinator, CrawlOutcome, CrawlSettings};
use form_scout::output::{CrawlStatistics, REPORT_HEADERS};
use form_scout::state::CrawlState;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Settings tuned for fast tests
fn test_settings(batch_size: usize, max_pages: usize) -> CrawlSettings {
    CrawlSettings {
        batch_size,
        max_pages,
        crawl_timeout: Duration::from_secs(60),
        request_timeout: Duration::from_secs(5),
        user_agent: "FormScoutTest/1.0".to_string(),
    }
}

/// Serves `body` as an HTML page at `page_path`
async fn mount_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Fails the test on drop if `page_path` is ever requested
async fn mount_never_fetched(server: &MockServer, page_path: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(0)
        .mount(server)
        .await;
}

async fn crawl(server: &MockServer, settings: CrawlSettings) -> CrawlOutcome {
    let coordinator = Coordinator::new(
        settings,
        FormCatalog::builtin(),
        &format!("{}/", server.uri()),
    )
    .expect("Failed to create coordinator");
    coordinator.run().await
}

#[tokio::test]
async fn test_root_form_is_reported() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><head><title>Home</title></head><body>
        <form id="home-recommendations">
            <input type="text" name="email" required>
        </form>
        </body></html>"#,
    )
    .await;

    let outcome = crawl(&mock_server, test_settings(5, 500)).await;

    assert_eq!(outcome.state, CrawlState::Completed);
    let forms = outcome.session.report().forms();
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0].form_id, "home-recommendations");
    assert_eq!(forms[0].form_type, "Get Free Recommendations");
    assert_eq!(forms[0].url, mock_server.uri());

    let fields: Vec<String> = forms[0].fields.iter().map(|f| f.to_string()).collect();
    assert_eq!(fields, vec!["input[name='email']|text|required"]);
}

#[tokio::test]
async fn test_form_without_visible_fields_is_dropped() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><body><a href="/contact-us">Contact</a></body></html>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/contact-us",
        r#"<html><body><form class="contact-form">
            <input type="hidden" name="csrf"><input type="submit">
        </form></body></html>"#,
    )
    .await;

    let outcome = crawl(&mock_server, test_settings(5, 500)).await;

    assert_eq!(outcome.state, CrawlState::Completed);
    assert_eq!(outcome.session.frontier().visited_count(), 2);
    assert!(outcome.session.report().is_empty());
}

#[tokio::test]
async fn test_page_limit_stops_after_one_page() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><body><a href="/a">A</a><a href="/b">B</a></body></html>"#,
    )
    .await;
    mount_never_fetched(&mock_server, "/a").await;
    mount_never_fetched(&mock_server, "/b").await;

    let outcome = crawl(&mock_server, test_settings(5, 1)).await;

    assert_eq!(outcome.state, CrawlState::PageLimitReached);
    assert_eq!(outcome.session.frontier().visited_count(), 1);
    assert_eq!(outcome.session.frontier().len(), 2);
}

#[tokio::test]
async fn test_equivalent_links_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_page(
        &mock_server,
        "/",
        &format!(
            r#"<html><body>
            <a href="/a">A</a>
            <a href="/a/">A again</a>
            <a href="/a//">A once more</a>
            <a href="{}/a">Absolute A</a>
            </body></html>"#,
            base_url
        ),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><a href=\"/\">Home</a></html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = crawl(&mock_server, test_settings(5, 500)).await;

    assert_eq!(outcome.state, CrawlState::Completed);
    assert_eq!(outcome.session.frontier().visited_count(), 2);
    assert_eq!(outcome.session.frontier().known_count(), 2);
}

#[tokio::test]
async fn test_server_error_does_not_abort_crawl() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><body>
        <a href="/broken">Broken</a>
        <a href="/contact-us">Contact</a>
        </body></html>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/contact-us",
        r#"<html><body><form class="contact-form">
            <input type="email" name="email" required>
            <textarea name="message"></textarea>
        </form></body></html>"#,
    )
    .await;

    let outcome = crawl(&mock_server, test_settings(5, 500)).await;
    let stats = CrawlStatistics::from_outcome(&outcome);

    assert_eq!(outcome.state, CrawlState::Completed);
    assert_eq!(stats.pages_visited, 3);
    assert_eq!(stats.pages_failed, 1);
    assert_eq!(stats.forms_found, 1);

    let form = &outcome.session.report().forms()[0];
    assert_eq!(form.form_id, "contact-");
    assert_eq!(form.form_type, "Contact Form");
}

#[tokio::test]
async fn test_offsite_and_denylisted_links_not_fetched() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r##"<html><body>
        <a href="/brochure.pdf">PDF</a>
        <a href="/styles/site.css">CSS</a>
        <a href="/blog/feed/">Feed</a>
        <a href="/list?offset=10">Next</a>
        <a href="http://other.test/page">Elsewhere</a>
        <a href="mailto:sales@site.test">Mail</a>
        <a href="javascript:void(0)">Script</a>
        <a href="#top">Top</a>
        </body></html>"##,
    )
    .await;
    mount_never_fetched(&mock_server, "/brochure.pdf").await;
    mount_never_fetched(&mock_server, "/styles/site.css").await;
    mount_never_fetched(&mock_server, "/blog/feed").await;
    mount_never_fetched(&mock_server, "/list").await;

    let outcome = crawl(&mock_server, test_settings(5, 500)).await;

    assert_eq!(outcome.state, CrawlState::Completed);
    assert_eq!(outcome.session.frontier().visited_count(), 1);
    assert_eq!(outcome.session.frontier().known_count(), 1);
}

#[tokio::test]
async fn test_priority_links_fetched_first() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><body>
        <a href="/about">About</a>
        <a href="/team">Team</a>
        <a href="/contact-us">Contact</a>
        </body></html>"#,
    )
    .await;
    for page in ["/about", "/team", "/contact-us"] {
        mount_page(&mock_server, page, "<html><body></body></html>").await;
    }

    let outcome = crawl(&mock_server, test_settings(1, 500)).await;
    assert_eq!(outcome.state, CrawlState::Completed);

    let requests = mock_server
        .received_requests()
        .await
        .expect("Request recording is enabled");
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(paths, vec!["/", "/contact-us", "/about", "/team"]);
}

#[tokio::test]
async fn test_report_follows_dispatch_order_within_batch() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><body>
        <a href="/contact-us/slow">Slow</a>
        <a href="/contact-us/fast">Fast</a>
        </body></html>"#,
    )
    .await;

    let contact_page = r#"<html><body><form class="contact-form">
        <input type="email" name="email" required>
    </form></body></html>"#;

    Mock::given(method("GET"))
        .and(path("/contact-us/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(contact_page)
                .set_delay(Duration::from_millis(800)),
        )
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/contact-us/fast", contact_page).await;

    let outcome = crawl(&mock_server, test_settings(5, 500)).await;
    assert_eq!(outcome.state, CrawlState::Completed);

    let urls: Vec<&str> = outcome
        .session
        .report()
        .forms()
        .iter()
        .map(|f| f.url.as_str())
        .collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/contact-us/slow", mock_server.uri()),
            format!("{}/contact-us/fast", mock_server.uri()),
        ]
    );
}

#[tokio::test]
async fn test_user_agent_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(wiremock::matchers::header("user-agent", "FormScoutTest/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = crawl(&mock_server, test_settings(5, 500)).await;
    assert_eq!(outcome.session.pages_failed(), 0);
}

#[tokio::test]
async fn test_run_crawl_writes_csv_report() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><head>
        <meta name="description" content="">
        <meta name="keywords" content="software, reviews">
        </head><body>
        <form id="home-recommendations">
            <input type="text" name="email" required>
            <input type="hidden" name="token">
        </form>
        </body></html>"#,
    )
    .await;

    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("forms.csv");

    let mut config = Config::default();
    config.crawler.request_timeout_secs = 5;
    config.output.csv_path = csv_path.to_string_lossy().to_string();

    let outcome = run_crawl(&config, &format!("{}/", mock_server.uri()))
        .await
        .expect("Crawl should succeed");
    assert_eq!(outcome.state, CrawlState::Completed);

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, REPORT_HEADERS);

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "home-recommendations");
    assert_eq!(&rows[0][3], ".success-message");
    assert_eq!(&rows[0][4], "input[name='email']|text|required");
    assert_eq!(&rows[0][6], "False");
    assert_eq!(&rows[0][8], "True");
    assert_eq!(&rows[0][9], "software, reviews");
    assert_eq!(&rows[0][10], "Empty meta description");
}

#[tokio::test]
async fn test_run_crawl_without_forms_writes_nothing() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "<html><body><p>Nothing here</p></body></html>").await;

    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("forms.csv");

    let mut config = Config::default();
    config.output.csv_path = csv_path.to_string_lossy().to_string();

    let outcome = run_crawl(&config, &format!("{}/", mock_server.uri()))
        .await
        .expect("An empty report is not an error");

    assert!(outcome.session.report().is_empty());
    assert!(!csv_path.exists());
}

#[tokio::test]
async fn test_run_crawl_rejects_bad_base_url() {
    let result = run_crawl(&Config::default(), "not a url").await;
    assert!(result.is_err());
}
