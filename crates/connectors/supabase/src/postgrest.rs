//! Read-only PostgREST query builder.
//!
//! Mirrors the `table(..).select(..).execute()` chain of the Supabase SDKs.
//! Only `GET` requests are ever issued.

use reqwest::header::{HeaderValue, ACCEPT, CONTENT_RANGE};
use serde_json::Value;
use tracing::debug;

use crate::client::SupabaseClient;
use crate::error::{ApiError, Result};

/// How PostgREST should count the rows matching a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountMethod {
    Exact,
    Planned,
    Estimated,
}

impl CountMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CountMethod::Exact => "exact",
            CountMethod::Planned => "planned",
            CountMethod::Estimated => "estimated",
        }
    }
}

/// Rows returned by [`SelectQuery::execute`].
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResponse {
    /// One JSON object per row, in the order the backend returned them.
    pub data: Vec<Value>,
    /// Row count reported by the backend when one was requested.
    pub count: Option<u64>,
}

pub struct TableQuery<'a> {
    client: &'a SupabaseClient,
    table_name: String,
}

impl<'a> TableQuery<'a> {
    pub(crate) fn new(client: &'a SupabaseClient, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }

    /// Restricts the query to `columns`, either `*` or a comma separated list.
    pub fn select(self, columns: &str) -> SelectQuery<'a> {
        SelectQuery {
            client: self.client,
            table_name: self.table_name,
            columns: clean_columns(columns),
            count: None,
        }
    }
}

pub struct SelectQuery<'a> {
    client: &'a SupabaseClient,
    table_name: String,
    columns: String,
    count: Option<CountMethod>,
}

impl SelectQuery<'_> {
    pub fn count(mut self, method: CountMethod) -> Self {
        self.count = Some(method);
        self
    }

    /// The `select` parameter sent to PostgREST.
    pub fn columns(&self) -> &str {
        &self.columns
    }

    pub async fn execute(self) -> Result<QueryResponse> {
        let url = self.client.table_url(&self.table_name)?;
        let mut request = self
            .client
            .http()
            .get(url)
            .query(&[("select", self.columns.as_str())])
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header("Accept-Profile", self.client.schema());
        if let Some(method) = self.count {
            request = request.header("Prefer", format!("count={}", method.as_str()));
        }

        debug!(table = %self.table_name, select = %self.columns, "executing select");
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            return Err(ApiError::from_body(status.as_u16(), &body).into());
        }

        let count = match self.count {
            Some(_) => response
                .headers()
                .get(CONTENT_RANGE)
                .and_then(|value| value.to_str().ok())
                .and_then(parse_content_range_total),
            None => None,
        };
        let data: Vec<Value> = response.json().await?;
        debug!(table = %self.table_name, rows = data.len(), "select returned");

        Ok(QueryResponse { data, count })
    }
}

/// Strips whitespace outside double-quoted identifiers, as PostgREST clients do.
fn clean_columns(columns: &str) -> String {
    let mut quoted = false;
    columns
        .chars()
        .filter(|c| {
            if *c == '"' {
                quoted = !quoted;
            }
            quoted || !c.is_whitespace()
        })
        .collect()
}

/// Total from a `Content-Range` header such as `0-24/3573`; `*` means unknown.
fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit_once('/').and_then(|(_, total)| total.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_columns_strips_whitespace() {
        assert_eq!(clean_columns("id, cases , region"), "id,cases,region");
        assert_eq!(clean_columns("*"), "*");
    }

    #[test]
    fn test_clean_columns_keeps_quoted_spaces() {
        assert_eq!(clean_columns(r#"id, "total cases""#), r#"id,"total cases""#);
    }

    #[test]
    fn test_parse_content_range_total() {
        assert_eq!(parse_content_range_total("0-24/3573"), Some(3573));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("0-1/*"), None);
        assert_eq!(parse_content_range_total("garbage"), None);
    }

    #[test]
    fn test_count_method_header_values() {
        assert_eq!(CountMethod::Exact.as_str(), "exact");
        assert_eq!(CountMethod::Planned.as_str(), "planned");
        assert_eq!(CountMethod::Estimated.as_str(), "estimated");
    }
}
