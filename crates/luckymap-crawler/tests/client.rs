//! Integration tests for `WinningStoreClient` using wiremock HTTP mocks.

use std::time::Duration;

use luckymap_crawler::{
    CrawlMode, CrawlOptions, CrawlReport, CrawlerError, RankFilter, WinningStoreClient,
    WinningStoreQuery,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str, timeout_ms: u64) -> WinningStoreClient {
    WinningStoreClient::with_base_url(base_url, "luckymap-test/1.0", timeout_ms)
        .expect("client construction should not fail")
}

fn options(mode: CrawlMode) -> CrawlOptions {
    CrawlOptions {
        mode,
        headed: false,
    }
}

async fn mount_session_page(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/wnprchsplcsrch/home"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("set-cookie", "JSESSIONID=abc123; Path=/; HttpOnly")
                .append_header("set-cookie", "WMONID=w1; Path=/")
                .set_body_string("<html>search</html>"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn node_mode_replays_session_cookies() {
    let server = MockServer::start().await;
    mount_session_page(&server).await;

    let body = serde_json::json!({ "data": { "list": [{ "shpNm": "스파 편의점" }] } });
    Mock::given(method("GET"))
        .and(path("/wnprchsplcsrch/selectLtWnShp.do"))
        .and(query_param("srchWnShpRnk", "1"))
        .and(query_param("srchLtEpsd", "1206"))
        .and(query_param("srchShpLctn", "서울"))
        .and(header("cookie", "JSESSIONID=abc123; WMONID=w1"))
        .and(header("x-requested-with", "XMLHttpRequest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 5_000);
    let query = WinningStoreQuery::new(1206)
        .rank(RankFilter::First)
        .region("서울");
    let report = client
        .crawl(&query, options(CrawlMode::Node))
        .await
        .expect("crawl should succeed");

    let CrawlReport::Node(node) = &report else {
        panic!("expected node envelope, got {report:?}");
    };
    assert!(node.home.ok);
    assert_eq!(node.home.set_cookie_count, 2);
    assert!(node.api.ok);
    assert_eq!(node.json.as_ref(), Some(&body));
    assert!(node.hint.is_none());
    assert_eq!(report.meta().round, 1206);
    assert!(report.meta().query_url.contains("srchLtEpsd=1206"));
}

#[tokio::test]
async fn auto_mode_adds_hint_when_body_is_not_json() {
    let server = MockServer::start().await;
    mount_session_page(&server).await;

    Mock::given(method("GET"))
        .and(path("/wnprchsplcsrch/selectLtWnShp.do"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string("<html>Access denied</html>"),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 5_000);
    let report = client
        .crawl(&WinningStoreQuery::new(1206), options(CrawlMode::Auto))
        .await
        .expect("crawl should complete");

    let CrawlReport::Node(node) = &report else {
        panic!("expected node envelope, got {report:?}");
    };
    assert!(node.json.is_none());
    assert_eq!(node.text_preview, "<html>Access denied</html>");
    assert!(node.hint.as_deref().is_some_and(|h| h.contains("playwright")));

    let printed: serde_json::Value =
        serde_json::from_str(&report.to_pretty_json().unwrap()).unwrap();
    assert_eq!(printed["mode"], "node-fetch-with-cookie");
    assert!(printed["hint"].is_string());
}

#[tokio::test]
async fn auto_mode_adds_hint_on_error_status() {
    let server = MockServer::start().await;
    mount_session_page(&server).await;

    Mock::given(method("GET"))
        .and(path("/wnprchsplcsrch/selectLtWnShp.do"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({"error": 1})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 5_000);
    let report = client
        .crawl(&WinningStoreQuery::new(1), options(CrawlMode::Auto))
        .await
        .expect("crawl should complete");

    let CrawlReport::Node(node) = report else {
        panic!("expected node envelope");
    };
    assert!(!node.api.ok);
    assert_eq!(node.api.status, 403);
    assert!(node.hint.is_some());
}

#[tokio::test]
async fn node_mode_never_adds_hint() {
    let server = MockServer::start().await;
    mount_session_page(&server).await;

    Mock::given(method("GET"))
        .and(path("/wnprchsplcsrch/selectLtWnShp.do"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 5_000);
    let report = client
        .crawl(&WinningStoreQuery::new(1), options(CrawlMode::Node))
        .await
        .unwrap();
    let CrawlReport::Node(node) = report else {
        panic!("expected node envelope");
    };
    assert!(node.hint.is_none());
}

#[tokio::test]
async fn missing_cookies_send_no_cookie_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wnprchsplcsrch/home"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wnprchsplcsrch/selectLtWnShp.do"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 5_000);
    let report = client
        .crawl(&WinningStoreQuery::new(1), options(CrawlMode::Node))
        .await
        .unwrap();
    let CrawlReport::Node(node) = report else {
        panic!("expected node envelope");
    };
    assert_eq!(node.home.set_cookie_count, 0);

    let requests = server.received_requests().await.expect("recording enabled");
    let data_call = requests
        .iter()
        .find(|r| r.url.path().ends_with("selectLtWnShp.do"))
        .expect("data call made");
    assert!(data_call.headers.get("cookie").is_none());
}

#[tokio::test]
async fn slow_site_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wnprchsplcsrch/home"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 200);
    let result = client
        .crawl(&WinningStoreQuery::new(1206), options(CrawlMode::Auto))
        .await;
    assert!(
        matches!(result, Err(CrawlerError::Timeout { timeout_ms: 200 })),
        "expected timeout, got {result:?}"
    );
}

#[cfg(not(feature = "browser"))]
#[tokio::test]
async fn playwright_mode_without_browser_support_reports_missing() {
    let server = MockServer::start().await;
    let client = test_client(&server.uri(), 5_000);
    let report = client
        .crawl(&WinningStoreQuery::new(1206), options(CrawlMode::Playwright))
        .await
        .unwrap();

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["mode"], "playwright-missing");
    assert!(value["error"].is_string());
    assert!(value["details"].is_string());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
