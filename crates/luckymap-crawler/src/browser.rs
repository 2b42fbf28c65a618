//! `playwright` crawl mode: run the data call from inside a real browser page
//! so the request carries whatever the site's bot checks expect.

use reqwest::Url;

use crate::error::CrawlerError;
use crate::report::{CrawlMeta, CrawlReport};

#[cfg_attr(not(feature = "browser"), allow(dead_code))]
pub(crate) struct BrowserRequest<'a> {
    pub session_url: &'a Url,
    pub data_url: &'a Url,
    pub user_agent: &'a str,
    pub timeout_ms: u64,
    pub headed: bool,
}

#[cfg(not(feature = "browser"))]
#[allow(clippy::unused_async)]
pub(crate) async fn fetch_via_browser(
    _request: BrowserRequest<'_>,
    meta: CrawlMeta,
) -> Result<CrawlReport, CrawlerError> {
    tracing::warn!("browser mode requested but this build has no browser support");
    Ok(CrawlReport::BrowserMissing(crate::report::BrowserMissing {
        meta,
        error: "Browser automation is not available. Rebuild with `--features browser` \
                or use the node-mode result."
            .to_owned(),
        details: "luckymap-crawler was built without the `browser` feature".to_owned(),
    }))
}

#[cfg(feature = "browser")]
pub(crate) async fn fetch_via_browser(
    request: BrowserRequest<'_>,
    meta: CrawlMeta,
) -> Result<CrawlReport, CrawlerError> {
    use playwright::Playwright;

    use crate::report::BrowserMissing;

    let playwright = match Playwright::initialize().await {
        Ok(pw) => pw,
        Err(e) => {
            tracing::warn!(error = %e, "playwright driver failed to start");
            return Ok(CrawlReport::BrowserMissing(BrowserMissing {
                meta,
                error: "The Playwright driver could not be started.".to_owned(),
                details: e.to_string(),
            }));
        }
    };
    if let Err(e) = playwright.prepare() {
        return Ok(CrawlReport::BrowserMissing(BrowserMissing {
            meta,
            error: "Chromium could not be installed for Playwright.".to_owned(),
            details: e.to_string(),
        }));
    }

    let browser = playwright
        .chromium()
        .launcher()
        .headless(!request.headed)
        .launch()
        .await
        .map_err(browser_error)?;
    let outcome = run_in_page(&browser, &request, meta).await;
    if let Err(e) = browser.close().await {
        tracing::debug!(error = %e, "browser did not close cleanly");
    }
    outcome
}

#[cfg(feature = "browser")]
async fn run_in_page(
    browser: &playwright::api::Browser,
    request: &BrowserRequest<'_>,
    meta: CrawlMeta,
) -> Result<CrawlReport, CrawlerError> {
    use playwright::api::DocumentLoadState;
    use serde::Deserialize;

    use crate::report::{self, BrowserReport};

    #[derive(Deserialize)]
    struct PageFetch {
        ok: bool,
        status: u16,
        content_type: Option<String>,
        url: String,
        text: String,
    }

    const IN_PAGE_FETCH: &str = r"async ([url, accept]) => {
        const res = await fetch(url, {
            method: 'GET',
            credentials: 'include',
            headers: { 'X-Requested-With': 'XMLHttpRequest', Accept: accept },
        });
        return {
            ok: res.ok,
            status: res.status,
            content_type: res.headers.get('content-type'),
            url: res.url,
            text: await res.text(),
        };
    }";

    let context = browser
        .context_builder()
        .locale("ko-KR")
        .user_agent(request.user_agent)
        .build()
        .await
        .map_err(browser_error)?;
    let page = context.new_page().await.map_err(browser_error)?;

    #[allow(clippy::cast_precision_loss)]
    let timeout = request.timeout_ms as f64;
    page.goto_builder(request.session_url.as_str())
        .wait_until(DocumentLoadState::DomContentLoaded)
        .timeout(timeout)
        .goto()
        .await
        .map_err(browser_error)?;

    let fetched: PageFetch = page
        .evaluate(
            IN_PAGE_FETCH,
            (request.data_url.as_str(), crate::client::JSON_ACCEPT),
        )
        .await
        .map_err(browser_error)?;
    if let Err(e) = context.close().await {
        tracing::debug!(error = %e, "browser context did not close cleanly");
    }

    Ok(CrawlReport::Browser(BrowserReport {
        meta,
        ok: fetched.ok,
        status: fetched.status,
        content_type: fetched.content_type,
        url: fetched.url,
        json: report::parse_json_body(&fetched.text),
        text_preview: report::text_preview(&fetched.text),
    }))
}

#[cfg(feature = "browser")]
fn browser_error(e: impl std::fmt::Display) -> CrawlerError {
    CrawlerError::Browser(e.to_string())
}
