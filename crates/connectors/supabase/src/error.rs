use arrow::error::ArrowError;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised by the Supabase connector.
///
/// `Configuration` and `NotConnected` come from the connector itself; every
/// other variant is passed through from the client layer untouched.
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("{0}")]
    Configuration(String),

    #[error("Connection '{0}' is not connected")]
    NotConnected(String),

    #[error("{0}")]
    ClientCreation(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to build table from records: {0}")]
    Arrow(#[from] ArrowError),
}

pub type Result<T> = std::result::Result<T, SupabaseError>;

/// Error body returned by PostgREST for a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Error)]
#[error("{message} (status {status}, code {})", .code.as_deref().unwrap_or("none"))]
pub struct ApiError {
    #[serde(skip)]
    pub status: u16,
    #[serde(default)]
    pub code: Option<String>,
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl ApiError {
    /// Decodes a PostgREST error body, keeping the raw text when it is not one.
    pub(crate) fn from_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ApiError>(body) {
            Ok(error) => ApiError { status, ..error },
            Err(_) => ApiError {
                status,
                code: None,
                message: body.to_string(),
                details: None,
                hint: None,
            },
        }
    }
}
