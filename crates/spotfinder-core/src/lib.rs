//! Shared domain types and configuration for the activity-location pipeline.

pub mod activity;
pub mod app_config;
pub mod config;
pub mod coordinates;
pub mod retry;
pub mod suggestions;

pub use activity::{
    ActivityQuery, Category, Color, LocationRecord, ResolveRequest, ResolveResponse,
};
pub use app_config::{AppConfig, Environment};
pub use config::{build_app_config, load_app_config, load_app_config_from_env};
pub use coordinates::{parse_coordinate, Coordinates};
pub use retry::{retry_with_backoff, RetryPolicy};
pub use suggestions::{extract_activities, parse_suggestions};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// The request payload lacks one or more of the three category lists.
    #[error("restaurants, musics and sports are required (missing: {})", missing.join(", "))]
    InvalidInput { missing: Vec<&'static str> },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
