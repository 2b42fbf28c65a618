//! Read-only store commands: `ranking`, `regions`, `check`.

use std::fmt::Write as _;

use luckymap_core::{views, AppConfig, FilterState, Medal, StoreRepository, Tab, WinStats};

pub(crate) fn load_repository(config: &AppConfig) -> anyhow::Result<StoreRepository> {
    StoreRepository::load(config.stores_path.as_deref())
        .map_err(|e| anyhow::anyhow!("failed to load stores: {e}"))
}

fn medal_label(medal: Option<Medal>) -> &'static str {
    match medal {
        Some(Medal::Gold) => "🥇",
        Some(Medal::Silver) => "🥈",
        Some(Medal::Bronze) => "🥉",
        None => "",
    }
}

fn fmt_wins(wins: &WinStats) -> String {
    format!(
        "lotto1={} lotto2={} pension={}",
        wins.lotto1, wins.lotto2, wins.pension
    )
}

/// Ranking table for the type-filtered stores of `region`/`district`.
pub(crate) fn render_ranking(
    repo: &StoreRepository,
    filters: &FilterState,
    region: &str,
    district: &str,
) -> String {
    let filtered = views::type_filtered(repo.all(), filters);
    let ranked = views::ranking(&filtered, region, district);

    let mut out = String::new();
    if ranked.is_empty() {
        let _ = writeln!(out, "{}", Tab::Ranking.empty_hint());
        return out;
    }

    let _ = writeln!(out, "{region} / {district}");
    for (index, store) in ranked.iter().enumerate() {
        let position = index + 1;
        let _ = writeln!(
            out,
            "{position:>3} {medal:<2} {name} | {address} | 1st {first} | {wins}",
            medal = medal_label(Medal::for_position(position)),
            name = store.name,
            address = store.address,
            first = store.wins.first_prize_total(),
            wins = fmt_wins(&store.wins),
        );
    }
    out
}

/// Region list, or the district list of `region` when given.
pub(crate) fn render_regions(repo: &StoreRepository, region: Option<&str>) -> String {
    let all: Vec<_> = repo.all().iter().collect();
    let names = match region.map(str::trim).filter(|r| !r.is_empty()) {
        Some(region) => views::districts(&all, region),
        None => views::regions(&all),
    };

    let mut out = String::new();
    for name in names {
        let _ = writeln!(out, "{name}");
    }
    out
}

/// Stores whose stored counters differ from a recount of their history.
pub(crate) fn render_check(repo: &StoreRepository) -> String {
    let diverging: Vec<_> = repo
        .all()
        .iter()
        .filter(|s| s.wins_diverge_from_history())
        .collect();

    let mut out = String::new();
    if diverging.is_empty() {
        let _ = writeln!(out, "all {} stores match their history", repo.len());
        return out;
    }

    for store in &diverging {
        tracing::debug!(store_id = %store.id, "win counters diverge from history");
        let _ = writeln!(
            out,
            "{id} {name}: stored {stored}; history {recount}",
            id = store.id,
            name = store.name,
            stored = fmt_wins(&store.wins),
            recount = fmt_wins(&WinStats::from_history(&store.history)),
        );
    }
    let _ = writeln!(
        out,
        "{} of {} stores have incomplete history",
        diverging.len(),
        repo.len()
    );
    out
}

