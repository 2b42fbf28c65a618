pub mod app_config;
pub mod config;
pub mod controller;
pub mod geo;
pub mod lottery;
pub mod map;
pub mod stores;
pub mod views;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use controller::AppController;
pub use geo::{Bounds, Envelope, LatLng};
pub use lottery::{LotteryType, LottoMethod, WinRecord, WinStats};
pub use stores::{Store, StoreRepository};
pub use views::{FilterState, Medal, Tab, ALL};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read store file {path}: {source}")]
    StoresFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse store file: {0}")]
    StoresFileParse(#[source] serde_yaml::Error),

    #[error("store file validation failed: {0}")]
    Validation(String),
}
