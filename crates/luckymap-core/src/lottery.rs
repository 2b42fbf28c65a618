use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Lottery product a store is classified under or a win was recorded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LotteryType {
    Lotto,
    Pension,
}

impl LotteryType {
    pub const ALL: [LotteryType; 2] = [LotteryType::Lotto, LotteryType::Pension];

    /// Display label used by the map front end and CLI tables.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            LotteryType::Lotto => "로또 6/45",
            LotteryType::Pension => "연금복권",
        }
    }

    /// Date of the first draw, from which weekly round dates are counted.
    fn first_draw(self) -> Option<NaiveDate> {
        match self {
            LotteryType::Lotto => NaiveDate::from_ymd_opt(2002, 12, 7),
            LotteryType::Pension => NaiveDate::from_ymd_opt(2020, 5, 7),
        }
    }
}

impl std::fmt::Display for LotteryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LotteryType::Lotto => write!(f, "LOTTO"),
            LotteryType::Pension => write!(f, "PENSION"),
        }
    }
}

/// How a winning lotto ticket was picked. Not recorded for pension wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LottoMethod {
    #[serde(alias = "자동")]
    Auto,
    #[serde(alias = "수동")]
    Manual,
    #[serde(alias = "반자동")]
    SemiAuto,
}

impl LottoMethod {
    /// Parse the label the lottery operator's site prints (`자동`, `수동`, `반자동`).
    #[must_use]
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim() {
            "자동" => Some(LottoMethod::Auto),
            "수동" => Some(LottoMethod::Manual),
            "반자동" => Some(LottoMethod::SemiAuto),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            LottoMethod::Auto => "자동",
            LottoMethod::Manual => "수동",
            LottoMethod::SemiAuto => "반자동",
        }
    }
}

/// Parse a rank label from the operator's site. `보너스` is the pension bonus
/// tier and maps to 0; unrecognised labels fall back to first place.
#[must_use]
pub fn parse_rank_label(raw: &str) -> u8 {
    match raw.trim() {
        "2등" => 2,
        "보너스" => 0,
        _ => 1,
    }
}

/// Weekly draw date for `round` (1-based). Returns `None` for round 0 or on
/// calendar overflow.
#[must_use]
pub fn draw_date(kind: LotteryType, round: u32) -> Option<NaiveDate> {
    let weeks = u64::from(round.checked_sub(1)?);
    kind.first_draw()?.checked_add_days(Days::new(weeks * 7))
}

/// A single winning draw attributed to a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: LotteryType,
    pub round: u32,
    /// 1 or 2 for lotto, always 1 for pension.
    pub rank: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<LottoMethod>,
    /// Display string such as `"2023.10.21"`; not guaranteed to parse.
    pub date: String,
}

impl WinRecord {
    #[must_use]
    pub fn lotto(id: &str, round: u32, rank: u8, method: LottoMethod, date: &str) -> Self {
        Self {
            id: format!("l-{id}"),
            kind: LotteryType::Lotto,
            round,
            rank,
            method: Some(method),
            date: date.to_owned(),
        }
    }

    #[must_use]
    pub fn pension(id: &str, round: u32, date: &str) -> Self {
        Self {
            id: format!("p-{id}"),
            kind: LotteryType::Pension,
            round,
            rank: 1,
            method: None,
            date: date.to_owned(),
        }
    }
}

/// Aggregate win counters used for ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinStats {
    pub lotto1: u32,
    pub lotto2: u32,
    pub pension: u32,
}

impl WinStats {
    /// Map-tab weighting: every counter.
    #[must_use]
    pub fn total(&self) -> u64 {
        u64::from(self.lotto1) + u64::from(self.lotto2) + u64::from(self.pension)
    }

    /// Ranking-tab weighting: first-place wins only.
    #[must_use]
    pub fn first_prize_total(&self) -> u64 {
        u64::from(self.lotto1) + u64::from(self.pension)
    }

    /// Recount the counters from a win history.
    ///
    /// Diagnostic only: stored counters stay authoritative and may cover wins
    /// the history does not list.
    #[must_use]
    pub fn from_history(history: &[WinRecord]) -> Self {
        history
            .iter()
            .fold(Self::default(), |mut acc, record| {
                match (record.kind, record.rank) {
                    (LotteryType::Lotto, 1) => acc.lotto1 += 1,
                    (LotteryType::Lotto, 2) => acc.lotto2 += 1,
                    (LotteryType::Pension, 1) => acc.pension += 1,
                    _ => {}
                }
                acc
            })
    }
}
