//! Derived store views.
//!
//! Every view is a pure re-derivation over the repository and the current
//! selector state. Sorting uses `sort_by` (stable), so stores with equal
//! totals keep their input order.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::geo::Bounds;
use crate::lottery::LotteryType;
use crate::stores::Store;

/// Sentinel selector value meaning "no region/district restriction".
pub const ALL: &str = "전체";

/// Which lottery types are shown. Both flags always exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub lotto: bool,
    pub pension: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            lotto: true,
            pension: true,
        }
    }
}

impl FilterState {
    #[must_use]
    pub fn is_enabled(&self, kind: LotteryType) -> bool {
        match kind {
            LotteryType::Lotto => self.lotto,
            LotteryType::Pension => self.pension,
        }
    }

    pub fn toggle(&mut self, kind: LotteryType) {
        match kind {
            LotteryType::Lotto => self.lotto = !self.lotto,
            LotteryType::Pension => self.pension = !self.pension,
        }
    }
}

/// Stores whose primary category is enabled, in repository order.
///
/// Membership depends only on `primary_category`; a pension store with lotto
/// wins in its history stays hidden while the pension flag is off.
#[must_use]
pub fn type_filtered<'a>(stores: &'a [Store], filters: &FilterState) -> Vec<&'a Store> {
    stores
        .iter()
        .filter(|s| filters.is_enabled(s.primary_category))
        .collect()
}

/// Map-tab list.
///
/// Without bounds the input is returned untouched (no sort). With bounds,
/// stores inside the rectangle are kept and ordered by total wins, highest
/// first.
#[must_use]
pub fn visible_stores<'a>(stores: &[&'a Store], bounds: Option<&Bounds>) -> Vec<&'a Store> {
    let Some(bounds) = bounds else {
        return stores.to_vec();
    };

    let mut visible: Vec<&Store> = stores
        .iter()
        .copied()
        .filter(|s| bounds.contains(s.lat, s.lng))
        .collect();
    visible.sort_by(|a, b| b.wins.total().cmp(&a.wins.total()));
    visible
}

/// Region selector options: `ALL` followed by the distinct first address
/// tokens in ascending order.
#[must_use]
pub fn regions(stores: &[&Store]) -> Vec<String> {
    with_all(stores.iter().filter_map(|s| s.region()))
}

/// District selector options for `region`: `ALL` followed by the distinct
/// second address tokens among stores whose address starts with `region`.
#[must_use]
pub fn districts(stores: &[&Store], region: &str) -> Vec<String> {
    if region == ALL {
        return vec![ALL.to_owned()];
    }
    with_all(
        stores
            .iter()
            .filter(|s| s.address.starts_with(region))
            .filter_map(|s| s.district()),
    )
}

fn with_all<'a>(tokens: impl Iterator<Item = &'a str>) -> Vec<String> {
    let distinct: BTreeSet<&str> = tokens.collect();
    std::iter::once(ALL)
        .chain(distinct)
        .map(str::to_owned)
        .collect()
}

/// Ranking-tab list.
///
/// `region` is a prefix match on the whole address, so a region name that
/// prefixes another region's name matches both. `district` is a plain
/// substring match. Ordering counts first-place wins only (lotto2 excluded).
#[must_use]
pub fn ranking<'a>(stores: &[&'a Store], region: &str, district: &str) -> Vec<&'a Store> {
    let mut ranked: Vec<&Store> = stores
        .iter()
        .copied()
        .filter(|s| region == ALL || s.address.starts_with(region))
        .filter(|s| district == ALL || s.address.contains(district))
        .collect();
    ranked.sort_by(|a, b| {
        b.wins
            .first_prize_total()
            .cmp(&a.wins.first_prize_total())
    });
    ranked
}

/// Podium decoration for the first three ranking rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    /// Medal for a 1-based ranking position.
    #[must_use]
    pub fn for_position(position: usize) -> Option<Self> {
        match position {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }
}

/// Which sidebar list an empty-state message is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Map,
    Ranking,
}

impl Tab {
    /// Message shown when the tab's list is empty.
    #[must_use]
    pub fn empty_hint(self) -> &'static str {
        match self {
            Tab::Map => "move or zoom the map",
            Tab::Ranking => "pick another region",
        }
    }
}
