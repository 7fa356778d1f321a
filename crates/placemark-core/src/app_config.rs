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

/// Process-wide settings every command needs.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Directory for timestamped exports.
    pub output_dir: PathBuf,
}

/// Settings for the crawler backend client.
///
/// Loaded separately from [`AppConfig`] so that commands which never talk to
/// the backend do not fail on a bad backend setting. The extractor itself is
/// configuration-free.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Base URL of the crawler backend; `/search` is appended by the client.
    pub api_url: String,
    /// Default number of results requested per keyword.
    pub limit: u32,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
}
