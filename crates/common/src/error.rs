use thiserror::Error;

/// Unified error type for Igloo crates.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to load connection settings: {0}")]
    Settings(#[from] config::ConfigError),
    #[error("Invalid connection option: {0}")]
    InvalidOption(String),
}

pub type Result<T> = std::result::Result<T, Error>;
