mod crawl;
mod stores;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use luckymap_crawler::{CrawlMode, RankFilter};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "luckymap-cli")]
#[command(about = "Lucky Map command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the winning stores for one draw from the lottery operator's site
    Crawl {
        /// Draw number
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        round: u32,
        /// Rank filter: all, 1, 2 or 21
        #[arg(long, default_value = "all")]
        rank: RankFilter,
        /// Region filter; empty means nationwide
        #[arg(long, default_value = "")]
        region: String,
        /// Write the report to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Fetch strategy: auto, node or playwright
        #[arg(long, default_value = "auto")]
        mode: CrawlMode,
        /// Show the browser window in playwright mode
        #[arg(long)]
        headed: bool,
        /// Overall timeout in milliseconds (defaults to `LUCKYMAP_CRAWLER_TIMEOUT_MS`)
        #[arg(
            long = "timeout-ms",
            alias = "timeoutMs",
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        timeout_ms: Option<u64>,
    },
    /// Print the store ranking table
    Ranking {
        #[arg(long, default_value = luckymap_core::ALL)]
        region: String,
        #[arg(long, default_value = luckymap_core::ALL)]
        district: String,
        /// Exclude lotto stores
        #[arg(long)]
        no_lotto: bool,
        /// Exclude pension stores
        #[arg(long)]
        no_pension: bool,
    },
    /// List regions, or the districts of one region
    Regions {
        #[arg(long)]
        region: Option<String>,
    },
    /// Report stores whose win counters disagree with their history
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = luckymap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Crawl {
            round,
            rank,
            region,
            out,
            mode,
            headed,
            timeout_ms,
        } => {
            let args = crawl::CrawlArgs {
                round,
                rank,
                region,
                out,
                mode,
                headed,
                timeout_ms: timeout_ms.unwrap_or(config.crawler_timeout_ms),
            };
            crawl::run_crawl(&config, args).await?;
        }
        Commands::Ranking {
            region,
            district,
            no_lotto,
            no_pension,
        } => {
            let repo = stores::load_repository(&config)?;
            let filters = luckymap_core::FilterState {
                lotto: !no_lotto,
                pension: !no_pension,
            };
            print!(
                "{}",
                stores::render_ranking(&repo, &filters, &region, &district)
            );
        }
        Commands::Regions { region } => {
            let repo = stores::load_repository(&config)?;
            print!("{}", stores::render_regions(&repo, region.as_deref()));
        }
        Commands::Check => {
            let repo = stores::load_repository(&config)?;
            print!("{}", stores::render_check(&repo));
        }
    }

    Ok(())
}
