//! `crawl` command: one winning-store lookup against the operator's site.

use std::path::PathBuf;

use luckymap_core::AppConfig;
use luckymap_crawler::{
    save_report, CrawlMode, CrawlOptions, RankFilter, WinningStoreClient, WinningStoreQuery,
};

#[derive(Debug)]
pub(crate) struct CrawlArgs {
    pub round: u32,
    pub rank: RankFilter,
    pub region: String,
    pub out: Option<PathBuf>,
    pub mode: CrawlMode,
    pub headed: bool,
    pub timeout_ms: u64,
}

impl CrawlArgs {
    pub(crate) fn query(&self) -> WinningStoreQuery {
        WinningStoreQuery::new(self.round)
            .rank(self.rank)
            .region(self.region.trim())
    }
}

/// Run the crawl and either print the report or save it to `--out`.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the crawl fails or times
/// out, or the report cannot be written.
pub(crate) async fn run_crawl(config: &AppConfig, args: CrawlArgs) -> anyhow::Result<()> {
    let client = WinningStoreClient::with_base_url(
        &config.crawler_base_url,
        &config.crawler_user_agent,
        args.timeout_ms,
    )
    .map_err(|e| anyhow::anyhow!("failed to build crawler client: {e}"))?;

    let query = args.query();
    tracing::info!(
        round = query.round,
        rank = %query.rank,
        region = %query.region,
        mode = %args.mode,
        timeout_ms = args.timeout_ms,
        "starting crawl"
    );

    let report = client
        .crawl(
            &query,
            CrawlOptions {
                mode: args.mode,
                headed: args.headed,
            },
        )
        .await?;

    match args.out {
        Some(out) => {
            let saved = save_report(&report, &out).await?;
            println!("Saved: {}", saved.display());
        }
        None => println!("{}", report.to_pretty_json()?),
    }

    Ok(())
}
