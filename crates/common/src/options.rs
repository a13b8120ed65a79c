use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Environment variable naming the settings file.
pub const CONFIG_PATH_ENV: &str = "IGLOO_CONFIG_PATH";

/// Settings file read when neither `--config` nor [`CONFIG_PATH_ENV`] is given.
pub const DEFAULT_CONFIG_PATH: &str = "igloo.toml";

const ENV_PREFIX: &str = "IGLOO";

/// Key/value options handed to [`Connection::connect`](crate::Connection::connect).
///
/// Options come from three places, later ones winning: the
/// `[connections.<name>]` table of the settings file,
/// `IGLOO_CONNECTIONS__<NAME>__<KEY>` environment variables, and values passed
/// explicitly by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionOptions {
    values: BTreeMap<String, String>,
}

impl ConnectionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns `self` with every entry of `overrides` applied on top.
    pub fn merge(mut self, overrides: ConnectionOptions) -> Self {
        self.values.extend(overrides.values);
        self
    }

    /// Loads the options for `connection_name` from the settings file and the
    /// environment.
    ///
    /// `config_path` falls back to `$IGLOO_CONFIG_PATH`, then to `igloo.toml`.
    /// A missing file is not an error; a missing section yields empty options.
    pub fn from_settings(connection_name: &str, config_path: Option<&str>) -> Result<Self> {
        let config_file_path = match config_path {
            Some(path) => path.to_string(),
            None => std::env::var(CONFIG_PATH_ENV)
                .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string()),
        };

        let settings = config::Config::builder()
            .add_source(config::File::with_name(&config_file_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;
        Self::from_config(&settings, connection_name)
    }

    fn from_config(settings: &config::Config, connection_name: &str) -> Result<Self> {
        // Environment keys are always lowercased by the config crate.
        let mut table = lookup_section(settings, connection_name)?;
        let lowercase = connection_name.to_lowercase();
        if table.is_none() && lowercase != connection_name {
            table = lookup_section(settings, &lowercase)?;
        }

        let mut options = Self::new();
        for (key, value) in table.unwrap_or_default() {
            let value = value.into_string().map_err(|_| {
                Error::InvalidOption(format!(
                    "connections.{connection_name}.{key} must be a scalar value"
                ))
            })?;
            options.insert(key, value);
        }
        Ok(options)
    }
}

fn lookup_section(
    settings: &config::Config,
    connection_name: &str,
) -> Result<Option<config::Map<String, config::Value>>> {
    match settings.get_table(&format!("connections.{connection_name}")) {
        Ok(table) => Ok(Some(table)),
        Err(config::ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl<K, V> FromIterator<(K, V)> for ConnectionOptions
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
