//! HTTP client for the lottery operator's winning-store search.
//!
//! The data endpoint only answers requests that carry the session cookies
//! issued by the search page, so every fetch is a two-step handshake: load the
//! search page, then call the data endpoint with its cookies, a `Referer` and
//! the XHR marker header.

use std::time::Duration;

use chrono::Utc;
use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE, REFERER};
use reqwest::{Client, Url};

use crate::browser;
use crate::cookies;
use crate::error::CrawlerError;
use crate::query::{self, WinningStoreQuery};
use crate::report::{
    self, ApiExchange, CrawlMeta, CrawlMode, CrawlReport, HomeExchange, NodeReport,
};

pub const DEFAULT_BASE_URL: &str = "https://dhlottery.co.kr";

const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
pub(crate) const JSON_ACCEPT: &str = "application/json, text/javascript, */*; q=0.01";

/// Per-crawl switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrawlOptions {
    pub mode: CrawlMode,
    /// Show the browser window in `playwright` mode.
    pub headed: bool,
}

/// Client for the winning-store search.
///
/// Use [`WinningStoreClient::new`] for the live site or
/// [`WinningStoreClient::with_base_url`] to point at a mock server in tests.
pub struct WinningStoreClient {
    client: Client,
    base_url: Url,
    user_agent: String,
    timeout_ms: u64,
}

impl WinningStoreClient {
    /// Creates a client pointed at the live site.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlerError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(user_agent: &str, timeout_ms: u64) -> Result<Self, CrawlerError> {
        Self::with_base_url(DEFAULT_BASE_URL, user_agent, timeout_ms)
    }

    /// Creates a client with a custom site root.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlerError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CrawlerError::InvalidUrl`] if `base_url`
    /// is not an http(s) URL.
    pub fn with_base_url(
        base_url: &str,
        user_agent: &str,
        timeout_ms: u64,
    ) -> Result<Self, CrawlerError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: query::parse_base_url(base_url)?,
            user_agent: user_agent.to_owned(),
            timeout_ms,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Run one crawl in the requested mode.
    ///
    /// `auto` runs the HTTP handshake and, when the data call fails or the body
    /// is not JSON, returns that envelope with a hint to retry in `playwright`
    /// mode. Nothing is retried automatically.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlerError::Timeout`] when the crawl exceeds the configured
    /// timeout, [`CrawlerError::Http`] on network failure, or
    /// [`CrawlerError::Browser`] if a started browser session fails.
    pub async fn crawl(
        &self,
        query: &WinningStoreQuery,
        options: CrawlOptions,
    ) -> Result<CrawlReport, CrawlerError> {
        let data_url = query.data_url(&self.base_url);
        let meta = CrawlMeta {
            round: query.round,
            query_url: data_url.to_string(),
            fetched_at: Utc::now(),
        };
        tracing::info!(round = query.round, mode = %options.mode, url = %data_url, "crawling winning stores");

        match options.mode {
            CrawlMode::Node => Ok(CrawlReport::Node(
                self.fetch_with_session_cookie(&data_url, meta).await?,
            )),
            CrawlMode::Auto => {
                let mut report = self.fetch_with_session_cookie(&data_url, meta).await?;
                if !report.is_usable() {
                    tracing::warn!(
                        status = report.api.status,
                        "HTTP fetch did not return usable JSON; browser mode may be required"
                    );
                    report.hint = Some(report::AUTO_MODE_HINT.to_owned());
                }
                Ok(CrawlReport::Node(report))
            }
            CrawlMode::Playwright => {
                let session_url = query::session_url(&self.base_url);
                let request = browser::BrowserRequest {
                    session_url: &session_url,
                    data_url: &data_url,
                    user_agent: &self.user_agent,
                    timeout_ms: self.timeout_ms,
                    headed: options.headed,
                };
                self.with_timeout(browser::fetch_via_browser(request, meta))
                    .await
            }
        }
    }

    /// Session-page handshake followed by the data call, under the overall
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlerError::Timeout`] or [`CrawlerError::Http`].
    pub async fn fetch_with_session_cookie(
        &self,
        data_url: &Url,
        meta: CrawlMeta,
    ) -> Result<NodeReport, CrawlerError> {
        self.with_timeout(self.handshake(data_url, meta)).await
    }

    async fn handshake(&self, data_url: &Url, meta: CrawlMeta) -> Result<NodeReport, CrawlerError> {
        let session_url = query::session_url(&self.base_url);

        let home = self
            .client
            .get(session_url.clone())
            .header(ACCEPT, HTML_ACCEPT)
            .send()
            .await?;
        let set_cookies = cookies::set_cookies(home.headers());
        let home_exchange = HomeExchange {
            ok: home.status().is_success(),
            status: home.status().as_u16(),
            set_cookie_count: set_cookies.len(),
        };
        tracing::debug!(
            status = home_exchange.status,
            cookies = home_exchange.set_cookie_count,
            "session page loaded"
        );

        let mut request = self
            .client
            .get(data_url.clone())
            .header(REFERER, session_url.as_str())
            .header("X-Requested-With", "XMLHttpRequest")
            .header(ACCEPT, JSON_ACCEPT);
        if let Some(cookie) = cookies::cookie_header(&set_cookies) {
            request = request.header(COOKIE, cookie);
        }

        let api = request.send().await?;
        let api_exchange = ApiExchange {
            ok: api.status().is_success(),
            status: api.status().as_u16(),
            content_type: api
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned),
            url: api.url().to_string(),
        };
        let text = api.text().await?;
        tracing::debug!(
            status = api_exchange.status,
            bytes = text.len(),
            "data endpoint answered"
        );

        Ok(NodeReport {
            meta,
            home: home_exchange,
            api: api_exchange,
            json: report::parse_json_body(&text),
            text_preview: report::text_preview(&text),
            hint: None,
        })
    }

    async fn with_timeout<T>(
        &self,
        fut: impl std::future::Future<Output = Result<T, CrawlerError>>,
    ) -> Result<T, CrawlerError> {
        tokio::time::timeout(Duration::from_millis(self.timeout_ms), fut)
            .await
            .map_err(|_| CrawlerError::Timeout {
                timeout_ms: self.timeout_ms,
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_targets_the_live_site() {
        let client = WinningStoreClient::new("luckymap-test/1.0", 1_000).expect("client builds");
        assert_eq!(client.base_url().as_str(), "https://dhlottery.co.kr/");
        assert_eq!(
            query::session_url(client.base_url()).as_str(),
            "https://dhlottery.co.kr/wnprchsplcsrch/home"
        );
    }
}
