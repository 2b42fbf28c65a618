//! Winning-store search parameters and the URLs built from them.

use std::fmt;
use std::str::FromStr;

use reqwest::Url;

use crate::error::CrawlerError;

const SESSION_PATH: &str = "wnprchsplcsrch/home";
const DATA_PATH: &str = "wnprchsplcsrch/selectLtWnShp.do";

/// Rank filter accepted by the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankFilter {
    #[default]
    All,
    First,
    Second,
    /// Pension bonus tier.
    Bonus,
}

impl RankFilter {
    #[must_use]
    pub fn as_param(self) -> &'static str {
        match self {
            RankFilter::All => "all",
            RankFilter::First => "1",
            RankFilter::Second => "2",
            RankFilter::Bonus => "21",
        }
    }
}

impl fmt::Display for RankFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

impl FromStr for RankFilter {
    type Err = CrawlerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(RankFilter::All),
            "1" => Ok(RankFilter::First),
            "2" => Ok(RankFilter::Second),
            "21" => Ok(RankFilter::Bonus),
            other => Err(CrawlerError::InvalidArgument {
                field: "rank",
                reason: format!("expected all, 1, 2 or 21; got '{other}'"),
            }),
        }
    }
}

/// One winning-store lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinningStoreQuery {
    pub round: u32,
    pub rank: RankFilter,
    /// Empty means nationwide.
    pub region: String,
}

impl WinningStoreQuery {
    #[must_use]
    pub fn new(round: u32) -> Self {
        Self {
            round,
            rank: RankFilter::All,
            region: String::new(),
        }
    }

    #[must_use]
    pub fn rank(mut self, rank: RankFilter) -> Self {
        self.rank = rank;
        self
    }

    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Data endpoint URL with percent-encoded parameters.
    #[must_use]
    pub fn data_url(&self, base: &Url) -> Url {
        let mut url = join(base, DATA_PATH);
        url.query_pairs_mut()
            .append_pair("srchWnShpRnk", self.rank.as_param())
            .append_pair("srchLtEpsd", &self.round.to_string())
            .append_pair("srchShpLctn", &self.region);
        url
    }
}

/// Page that issues the session cookies the data endpoint expects.
#[must_use]
pub fn session_url(base: &Url) -> Url {
    join(base, SESSION_PATH)
}

/// Parse a site root, normalised to end in exactly one slash so relative
/// joins append to it.
///
/// # Errors
///
/// Returns [`CrawlerError::InvalidUrl`] if `raw` is not an absolute http(s) URL.
pub fn parse_base_url(raw: &str) -> Result<Url, CrawlerError> {
    let normalised = format!("{}/", raw.trim_end_matches('/'));
    let url = Url::parse(&normalised).map_err(|e| CrawlerError::InvalidUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CrawlerError::InvalidUrl {
            url: raw.to_owned(),
            reason: "scheme must be http or https".to_owned(),
        });
    }
    Ok(url)
}

fn join(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    let prefix = base.path().trim_end_matches('/');
    url.set_path(&format!("{prefix}/{path}"));
    url.set_query(None);
    url
}
