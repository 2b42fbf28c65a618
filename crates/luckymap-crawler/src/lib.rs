//! Winning-store crawler for the lottery operator's site.

mod browser;
pub mod client;
pub mod cookies;
pub mod error;
pub mod query;
pub mod report;

pub use client::{CrawlOptions, WinningStoreClient};
pub use error::CrawlerError;
pub use query::{RankFilter, WinningStoreQuery};
pub use report::{save_report, CrawlMode, CrawlReport};
