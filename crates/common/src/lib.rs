//! Common crate
//!
//! Shared types for Igloo connectors: the [`Connection`] trait every
//! connector implements, the [`ConnectionOptions`] it is configured with,
//! and the crate-wide [`Error`].
//!
//! # Example
//! ```rust
//! use igloo_common::ConnectionOptions;
//!
//! let options = ConnectionOptions::new()
//!     .with("project_url", "https://abc.supabase.co")
//!     .with("api_key", "secret");
//! assert!(options.contains("project_url"));
//! ```

pub mod connection;
pub mod error;
pub mod options;

pub use connection::Connection;
pub use error::{Error, Result};
pub use options::ConnectionOptions;
