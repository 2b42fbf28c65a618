use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::lottery::{LotteryType, LottoMethod, WinRecord, WinStats};
use crate::ConfigError;

/// A retail outlet that has sold winning tickets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub name: String,
    /// Space-delimited hierarchy: region, district, street, ...
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    /// Drives marker colour and type-filter membership, independent of which
    /// win types appear in `history`.
    pub primary_category: LotteryType,
    pub wins: WinStats,
    #[serde(default)]
    pub history: Vec<WinRecord>,
}

impl Store {
    /// First address token, e.g. `"서울"`.
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.address.split_whitespace().next()
    }

    /// Second address token, e.g. `"노원구"`.
    #[must_use]
    pub fn district(&self) -> Option<&str> {
        self.address.split_whitespace().nth(1)
    }

    /// Whether the stored counters disagree with a recount of `history`.
    #[must_use]
    pub fn wins_diverge_from_history(&self) -> bool {
        WinStats::from_history(&self.history) != self.wins
    }
}

#[derive(Debug, Deserialize)]
pub struct StoresFile {
    pub stores: Vec<Store>,
}

/// Immutable, ordered store collection loaded once at startup.
#[derive(Debug, Clone)]
pub struct StoreRepository {
    stores: Vec<Store>,
}

impl StoreRepository {
    /// Build a repository from an already validated list.
    #[must_use]
    pub fn new(stores: Vec<Store>) -> Self {
        Self { stores }
    }

    /// The built-in store list shipped with the application.
    #[must_use]
    pub fn seed() -> Self {
        Self::new(seed_stores())
    }

    /// Load the YAML file at `path`, or fall back to the built-in seed when
    /// no path is configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            tracing::info!("no store file configured; using built-in seed list");
            return Ok(Self::seed());
        };

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::StoresFileIo {
            path: path.display().to_string(),
            source: e,
        })?;
        let repo = Self::from_yaml(&content)?;
        tracing::info!(path = %path.display(), stores = repo.len(), "loaded store file");
        Ok(repo)
    }

    /// Parse and validate a YAML document of the form `stores: [...]`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the document does not parse or fails validation.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let file: StoresFile =
            serde_yaml::from_str(content).map_err(ConfigError::StoresFileParse)?;
        validate_stores(&file.stores)?;
        Ok(Self::new(file.stores))
    }

    #[must_use]
    pub fn all(&self) -> &[Store] {
        &self.stores
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Store> {
        self.stores.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

fn validate_stores(stores: &[Store]) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for store in stores {
        if store.id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "store '{}' has an empty id",
                store.name
            )));
        }
        if !seen_ids.insert(store.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate store id: '{}'",
                store.id
            )));
        }
        if store.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "store '{}' has an empty name",
                store.id
            )));
        }
        if !store.lat.is_finite() || !store.lng.is_finite() {
            return Err(ConfigError::Validation(format!(
                "store '{}' has non-finite coordinates",
                store.id
            )));
        }
        for record in &store.history {
            validate_record(&store.id, record)?;
        }
    }

    Ok(())
}

fn validate_record(store_id: &str, record: &WinRecord) -> Result<(), ConfigError> {
    match record.kind {
        LotteryType::Lotto if !matches!(record.rank, 1 | 2) => {
            Err(ConfigError::Validation(format!(
                "store '{store_id}' record '{}': lotto rank must be 1 or 2, got {}",
                record.id, record.rank
            )))
        }
        LotteryType::Pension if record.rank != 1 => Err(ConfigError::Validation(format!(
            "store '{store_id}' record '{}': pension rank must be 1, got {}",
            record.id, record.rank
        ))),
        LotteryType::Pension if record.method.is_some() => {
            Err(ConfigError::Validation(format!(
                "store '{store_id}' record '{}': pension records carry no method",
                record.id
            )))
        }
        _ => Ok(()),
    }
}

#[allow(clippy::too_many_lines)]
fn seed_stores() -> Vec<Store> {
    use LottoMethod::{Auto, Manual, SemiAuto};

    let store = |id: &str,
                 name: &str,
                 address: &str,
                 (lat, lng): (f64, f64),
                 primary_category: LotteryType,
                 (lotto1, lotto2, pension): (u32, u32, u32),
                 history: Vec<WinRecord>| Store {
        id: id.to_owned(),
        name: name.to_owned(),
        address: address.to_owned(),
        lat,
        lng,
        primary_category,
        wins: WinStats {
            lotto1,
            lotto2,
            pension,
        },
        history,
    };

    vec![
        store(
            "1",
            "스파 편의점",
            "서울 노원구 동일로 1493",
            (37.6563, 127.0624),
            LotteryType::Lotto,
            (4, 2, 0),
            vec![
                WinRecord::lotto("1-1", 1090, 1, Auto, "2023.10.21"),
                WinRecord::lotto("1-2", 1085, 1, Auto, "2023.09.16"),
                WinRecord::lotto("1-3", 1072, 1, Manual, "2023.06.17"),
                WinRecord::lotto("1-4", 1060, 1, Auto, "2023.03.25"),
                WinRecord::lotto("1-5", 1055, 2, Auto, "2023.02.18"),
                WinRecord::lotto("1-6", 1040, 2, Manual, "2022.11.05"),
            ],
        ),
        store(
            "2",
            "부일카서비스",
            "부산 동구 자성로133번길 35",
            (35.1388, 129.0629),
            LotteryType::Lotto,
            (3, 3, 0),
            vec![
                WinRecord::lotto("2-1", 1100, 1, Auto, "2023.12.30"),
                WinRecord::lotto("2-2", 1095, 1, SemiAuto, "2023.11.25"),
                WinRecord::lotto("2-3", 1080, 1, Auto, "2023.08.12"),
                WinRecord::lotto("2-4", 1075, 2, Manual, "2023.07.08"),
                WinRecord::lotto("2-5", 1070, 2, Auto, "2023.06.03"),
                WinRecord::lotto("2-6", 1065, 2, Auto, "2023.04.29"),
            ],
        ),
        store(
            "3",
            "인터넷 복권 판매점",
            "동행복권 공식 홈페이지",
            (37.4815, 127.0125),
            LotteryType::Pension,
            (1, 5, 4),
            vec![
                WinRecord::pension("3-1", 195, "2024.01.04"),
                WinRecord::pension("3-2", 190, "2023.11.30"),
                WinRecord::pension("3-3", 188, "2023.11.16"),
                WinRecord::pension("3-4", 180, "2023.09.21"),
                WinRecord::lotto("3-5", 1099, 1, Manual, "2023.12.23"),
                WinRecord::lotto("3-6", 1098, 2, Manual, "2023.12.16"),
            ],
        ),
        store(
            "4",
            "잠실매점",
            "서울 송파구 올림픽로 269",
            (37.5147, 127.1005),
            LotteryType::Lotto,
            (2, 1, 0),
            vec![
                WinRecord::lotto("4-1", 1050, 1, Auto, "2023.01.14"),
                WinRecord::lotto("4-2", 1045, 1, Auto, "2022.12.10"),
                WinRecord::lotto("4-3", 1041, 2, Manual, "2022.11.12"),
            ],
        ),
        store(
            "6",
            "목화휴게소",
            "경남 사천시 용현면 주문리 4",
            (34.9912, 128.0531),
            LotteryType::Lotto,
            (2, 4, 0),
            vec![
                WinRecord::lotto("6-1", 1088, 1, Auto, "2023.10.07"),
                WinRecord::lotto("6-2", 1030, 1, Auto, "2022.08.27"),
                WinRecord::lotto("6-3", 1025, 2, Manual, "2022.07.23"),
                WinRecord::lotto("6-4", 1020, 2, Auto, "2022.06.18"),
            ],
        ),
        store(
            "7",
            "로또명당 대구점",
            "대구 달서구 월배로 100",
            (35.8242, 128.5375),
            LotteryType::Lotto,
            (1, 2, 0),
            vec![
                WinRecord::lotto("7-1", 1052, 1, Manual, "2023.01.28"),
                WinRecord::lotto("7-2", 1048, 2, Auto, "2022.12.31"),
            ],
        ),
        store(
            "9",
            "행운드림 복권방",
            "경기 성남시 분당구 판교로 300",
            (37.4011, 127.1098),
            LotteryType::Pension,
            (0, 1, 3),
            vec![
                WinRecord::pension("9-1", 185, "2023.10.26"),
                WinRecord::pension("9-2", 170, "2023.07.13"),
                WinRecord::pension("9-3", 165, "2023.06.08"),
                WinRecord::lotto("9-4", 1082, 2, Manual, "2023.08.26"),
            ],
        ),
        store(
            "15",
            "강남 페이퍼",
            "서울 강남구 테헤란로 152",
            (37.5000, 127.0355),
            LotteryType::Pension,
            (0, 2, 2),
            vec![
                WinRecord::pension("15-1", 175, "2023.08.17"),
                WinRecord::pension("15-2", 160, "2023.05.04"),
                WinRecord::lotto("15-3", 1080, 2, Auto, "2023.08.12"),
            ],
        ),
    ]
}
