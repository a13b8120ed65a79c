//! Supabase connector
//!
//! Reads tables from a Supabase project through its PostgREST API and
//! returns them as Arrow [`RecordBatch`](arrow::record_batch::RecordBatch)es.
//!
//! [`SupabaseConnection`] implements [`igloo_common::Connection`]: it is
//! configured with `project_url` and `api_key` and exposes
//! [`SupabaseConnection::query`].

pub mod client;
pub mod connection;
pub mod error;
pub mod postgrest;
pub mod records;

pub use client::{create_client, create_client_with_options, ClientOptions, SupabaseClient};
pub use connection::{SupabaseConnection, API_KEY, PROJECT_URL};
pub use error::{ApiError, Result, SupabaseError};
pub use postgrest::{CountMethod, QueryResponse};
pub use records::records_to_batch;
