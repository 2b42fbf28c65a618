//! Crawl result envelopes, serialized as the JSON the `crawl` command prints.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::CrawlerError;

/// Characters of the response body kept in `text_preview`.
pub const TEXT_PREVIEW_CHARS: usize = 500;

pub(crate) const AUTO_MODE_HINT: &str = "The HTTP fetch did not return JSON. The site probably \
     blocks non-browser clients; re-run with `--mode playwright` (requires the `browser` feature).";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrawlMode {
    /// HTTP fetch, plus a hint when the result does not look usable.
    #[default]
    Auto,
    Node,
    Playwright,
}

impl fmt::Display for CrawlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrawlMode::Auto => write!(f, "auto"),
            CrawlMode::Node => write!(f, "node"),
            CrawlMode::Playwright => write!(f, "playwright"),
        }
    }
}

impl FromStr for CrawlMode {
    type Err = CrawlerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "auto" => Ok(CrawlMode::Auto),
            "node" => Ok(CrawlMode::Node),
            "playwright" => Ok(CrawlMode::Playwright),
            other => Err(CrawlerError::InvalidArgument {
                field: "mode",
                reason: format!("expected auto, node or playwright; got '{other}'"),
            }),
        }
    }
}

/// Fields common to every envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrawlMeta {
    pub round: u32,
    pub query_url: String,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode")]
pub enum CrawlReport {
    #[serde(rename = "node-fetch-with-cookie")]
    Node(NodeReport),
    #[serde(rename = "playwright")]
    Browser(BrowserReport),
    #[serde(rename = "playwright-missing")]
    BrowserMissing(BrowserMissing),
}

impl CrawlReport {
    #[must_use]
    pub fn meta(&self) -> &CrawlMeta {
        match self {
            CrawlReport::Node(r) => &r.meta,
            CrawlReport::Browser(r) => &r.meta,
            CrawlReport::BrowserMissing(r) => &r.meta,
        }
    }

    /// The parsed response body, if any.
    #[must_use]
    pub fn json(&self) -> Option<&serde_json::Value> {
        match self {
            CrawlReport::Node(r) => r.json.as_ref(),
            CrawlReport::Browser(r) => r.json.as_ref(),
            CrawlReport::BrowserMissing(_) => None,
        }
    }

    /// Pretty-printed JSON, as written to stdout or `--out`.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlerError::Serialize`] if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String, CrawlerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeExchange {
    pub ok: bool,
    pub status: u16,
    pub set_cookie_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiExchange {
    pub ok: bool,
    pub status: u16,
    pub content_type: Option<String>,
    /// Final URL after redirects.
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeReport {
    #[serde(flatten)]
    pub meta: CrawlMeta,
    pub home: HomeExchange,
    pub api: ApiExchange,
    pub json: Option<serde_json::Value>,
    pub text_preview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl NodeReport {
    /// The data call succeeded and produced a non-null JSON body.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.api.ok && self.json.as_ref().is_some_and(|v| !v.is_null())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowserReport {
    #[serde(flatten)]
    pub meta: CrawlMeta,
    pub ok: bool,
    pub status: u16,
    pub content_type: Option<String>,
    pub url: String,
    pub json: Option<serde_json::Value>,
    pub text_preview: String,
}

/// Browser automation could not be started.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrowserMissing {
    #[serde(flatten)]
    pub meta: CrawlMeta,
    pub error: String,
    pub details: String,
}

/// First [`TEXT_PREVIEW_CHARS`] characters of `text`.
#[must_use]
pub fn text_preview(text: &str) -> String {
    text.chars().take(TEXT_PREVIEW_CHARS).collect()
}

/// Parse a body as JSON, yielding `None` when it is not JSON.
#[must_use]
pub fn parse_json_body(text: &str) -> Option<serde_json::Value> {
    serde_json::from_str(text).ok()
}

/// Write `report` to `out` as pretty JSON, creating parent directories.
/// Relative paths resolve against the current directory.
///
/// Returns the absolute path written.
///
/// # Errors
///
/// Returns [`CrawlerError::Io`] if the directory or file cannot be written,
/// or [`CrawlerError::Serialize`] if serialization fails.
pub async fn save_report(report: &CrawlReport, out: &Path) -> Result<PathBuf, CrawlerError> {
    let path = if out.is_absolute() {
        out.to_path_buf()
    } else {
        std::env::current_dir()?.join(out)
    };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, report.to_pretty_json()?).await?;
    tracing::info!(path = %path.display(), "crawl report saved");
    Ok(path)
}
