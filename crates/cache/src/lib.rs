//! Cache crate
//!
//! Keeps one connected instance per connection name so repeated lookups of
//! the same named connection share a single backend client.

use std::collections::HashMap;
use std::sync::Arc;

use igloo_common::{Connection, ConnectionOptions};
use tokio::sync::RwLock;
use tracing::debug;

/// A thread-safe cache of open connections, keyed by connection name.
pub struct ConnectionCache<C>
where
    C: Connection + 'static,
{
    store: RwLock<HashMap<String, Arc<C>>>,
}

impl<C> Default for ConnectionCache<C>
where
    C: Connection + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ConnectionCache<C>
where
    C: Connection + 'static,
{
    /// Creates a new, empty cache.
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached connection for `connection_name`, if one is open.
    pub async fn get(&self, connection_name: &str) -> Option<Arc<C>> {
        let store_guard = self.store.read().await;
        store_guard.get(connection_name).cloned()
    }

    /// Returns the cached connection, or opens one with `options` and caches it.
    ///
    /// A failed open leaves the cache untouched, so the next call tries again.
    pub async fn get_or_open(
        &self,
        connection_name: &str,
        options: &ConnectionOptions,
    ) -> Result<Arc<C>, C::Error> {
        if let Some(connection) = self.get(connection_name).await {
            debug!(connection = connection_name, "connection cache hit");
            return Ok(connection);
        }

        let mut store_guard = self.store.write().await;
        // Another task may have opened it while we waited for the write lock.
        if let Some(connection) = store_guard.get(connection_name) {
            return Ok(Arc::clone(connection));
        }

        debug!(connection = connection_name, "connection cache miss, opening");
        let connection = Arc::new(C::open(connection_name, options)?);
        store_guard.insert(connection_name.to_string(), Arc::clone(&connection));
        Ok(connection)
    }

    /// Evicts `connection_name`; the next [`get_or_open`](Self::get_or_open) reconnects.
    ///
    /// Returns whether an entry was removed.
    pub async fn reset(&self, connection_name: &str) -> bool {
        let mut store_guard = self.store.write().await;
        store_guard.remove(connection_name).is_some()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}
