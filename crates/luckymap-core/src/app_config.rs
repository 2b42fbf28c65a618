use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Store file to serve; the built-in seed list is used when unset.
    pub stores_path: Option<PathBuf>,
    pub kakao_map_api_key: Option<String>,
    pub crawler_base_url: String,
    pub crawler_user_agent: String,
    pub crawler_timeout_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("stores_path", &self.stores_path)
            .field(
                "kakao_map_api_key",
                &self.kakao_map_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("crawler_base_url", &self.crawler_base_url)
            .field("crawler_user_agent", &self.crawler_user_agent)
            .field("crawler_timeout_ms", &self.crawler_timeout_ms)
            .finish()
    }
}
