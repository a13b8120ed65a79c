use crate::options::ConnectionOptions;

/// The capability every Igloo data-source connector provides.
///
/// A connection is created unconnected with [`Connection::new`] and becomes
/// connected once [`Connection::connect`] succeeds. There is no way back to
/// the unconnected state; callers that want a fresh client drop the instance
/// and open a new one.
pub trait Connection: Sized + Send + Sync {
    /// Handle produced by the backend once the connection is established.
    type Client: Send + Sync;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Creates an unconnected instance.
    fn new(connection_name: &str) -> Self;

    fn connection_name(&self) -> &str;

    /// Establishes the backend client from `options` and stores it.
    fn connect(&mut self, options: &ConnectionOptions) -> Result<&Self::Client, Self::Error>;

    /// The client stored by the last successful [`Connection::connect`], if any.
    fn client(&self) -> Option<&Self::Client>;

    fn is_connected(&self) -> bool {
        self.client().is_some()
    }

    /// Constructs and connects in one step.
    fn open(connection_name: &str, options: &ConnectionOptions) -> Result<Self, Self::Error> {
        let mut connection = Self::new(connection_name);
        connection.connect(options)?;
        Ok(connection)
    }
}
