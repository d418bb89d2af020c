use std::path::Path;

use serde::de::DeserializeOwned;

use super::env::EnvVarSource;
use super::file::FileSource;
use super::source::{merge_entry, ConfigSource};
use super::ConfigError;

/// Builder for loading configuration from TOML files and environment variables.
///
/// Sources are merged in registration order, with later sources overriding
/// earlier ones. Nested tables are merged recursively; other values
/// (including arrays) are replaced entirely.
///
/// ## Example
///
/// ```no_run
/// use prometheus_script::Config;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Install {
///     install_dir: String,
/// }
///
/// // file defaults, overridden by the environment
/// let install: Install = Config::builder()
///     .with_file("/etc/tiup/install.toml", false)
///     .with_env_var("TIUP_COMPONENT_INSTALL_DIR", "install_dir")
///     .build()?;
/// # Ok::<(), prometheus_script::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct Config {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl Config {
    /// Creates a new configuration builder.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Adds a TOML file to be loaded.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(FileSource::new(path, required))
    }

    /// Maps the environment variable `var` onto the dotted `key`.
    ///
    /// The value is used verbatim as a string. Unset and empty variables are
    /// skipped, leaving any earlier value for `key` in place.
    pub fn with_env_var(self, var: impl Into<String>, key: impl Into<String>) -> Self {
        self.with_source(EnvVarSource::new(var, key))
    }

    fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Loads and merges every source, then deserializes the result once.
    pub fn build<T: DeserializeOwned>(self) -> Result<T, ConfigError> {
        let mut merged = toml::Table::new();

        for source in &self.sources {
            for entry in source.entries()? {
                merge_entry(&mut merged, entry);
            }
        }

        toml::Value::Table(merged)
            .try_into()
            .map_err(ConfigError::DeserializeError)
    }
}
