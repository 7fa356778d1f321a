pub mod app_config;
pub mod config;
pub mod listing;

pub use app_config::{AppConfig, Environment, SearchConfig};
pub use config::{load_app_config, load_app_config_from_env, load_search_config_from_env};
pub use listing::{BusinessStatus, ExtractedListing, PromoMarker, COLUMN_HEADERS};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
