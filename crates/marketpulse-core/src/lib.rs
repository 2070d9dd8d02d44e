//! Shared configuration and request types for marketpulse.

mod app_config;
mod config;
mod policy;
mod request;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use policy::TieBreakPolicy;
pub use request::{
    AnalysisRequest, DEFAULT_INDUSTRY, DEFAULT_LOCATION, DEFAULT_SCENARIO, DEFAULT_TICKER,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
