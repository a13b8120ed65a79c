use arrow::record_batch::RecordBatch;
use igloo_common::{Connection, ConnectionOptions};
use tracing::{debug, info};

use crate::client::{create_client, SupabaseClient};
use crate::error::{Result, SupabaseError};
use crate::records::records_to_batch;

pub const PROJECT_URL: &str = "project_url";
pub const API_KEY: &str = "api_key";

const MISSING_CREDENTIALS: &str = "project_url, api_key not provided.";

/// A named connection to a Supabase project.
///
/// ```rust,no_run
/// use igloo_common::{Connection, ConnectionOptions};
/// use igloo_connector_supabase::SupabaseConnection;
///
/// # async fn example() -> Result<(), igloo_connector_supabase::SupabaseError> {
/// let options = ConnectionOptions::new()
///     .with("project_url", "https://abc.supabase.co")
///     .with("api_key", "<anon key>");
/// let connection = SupabaseConnection::open("covid", &options)?;
/// let batch = connection.query("covidcases", "*").await?;
/// println!("{} rows", batch.num_rows());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SupabaseConnection {
    connection_name: String,
    client: Option<SupabaseClient>,
}

impl Connection for SupabaseConnection {
    type Client = SupabaseClient;
    type Error = SupabaseError;

    fn new(connection_name: &str) -> Self {
        Self {
            connection_name: connection_name.to_string(),
            client: None,
        }
    }

    fn connection_name(&self) -> &str {
        &self.connection_name
    }

    /// Creates the client from the `project_url` and `api_key` options.
    ///
    /// Only the presence of both keys is checked here. Client creation errors
    /// are returned as-is and leave any previous client in place.
    fn connect(&mut self, options: &ConnectionOptions) -> Result<&SupabaseClient> {
        let (Some(project_url), Some(api_key)) = (options.get(PROJECT_URL), options.get(API_KEY))
        else {
            return Err(SupabaseError::Configuration(MISSING_CREDENTIALS.to_string()));
        };

        let client = create_client(project_url, api_key)?;
        info!(connection = %self.connection_name, project_url, "connected to Supabase");
        Ok(self.client.insert(client))
    }

    fn client(&self) -> Option<&SupabaseClient> {
        self.client.as_ref()
    }
}

impl SupabaseConnection {
    /// Selects `column_selector` from `table_name` and returns the rows as a table.
    ///
    /// `column_selector` is `*` or a comma separated column list and is passed
    /// to the backend unchecked.
    pub async fn query(&self, table_name: &str, column_selector: &str) -> Result<RecordBatch> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| SupabaseError::NotConnected(self.connection_name.clone()))?;

        let response = client
            .table(table_name)
            .select(column_selector)
            .execute()
            .await?;
        let batch = records_to_batch(&response.data)?;
        debug!(
            connection = %self.connection_name,
            table = table_name,
            rows = batch.num_rows(),
            columns = batch.num_columns(),
            "query complete"
        );
        Ok(batch)
    }
}
