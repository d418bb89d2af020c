use std::env::VarError;

use toml::Value;

use super::source::{ConfigEntry, ConfigSource};
use super::ConfigError;

/// Maps a single environment variable onto a config key.
///
/// The value is taken verbatim as a string, so paths that happen to look like
/// numbers or booleans survive. An unset or empty variable contributes nothing;
/// a value that is not valid UTF-8 is an error rather than being rewritten.
#[derive(Debug, Clone)]
pub struct EnvVarSource {
    var: String,
    key: String,
}

impl EnvVarSource {
    pub fn new(var: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            key: key.into(),
        }
    }
}

impl ConfigSource for EnvVarSource {
    fn entries(&self) -> Result<Vec<ConfigEntry>, ConfigError> {
        match std::env::var(&self.var) {
            Ok(value) if !value.is_empty() => {
                tracing::debug!(var = %self.var, key = %self.key, "config value from environment");
                Ok(vec![ConfigEntry::at_key(&self.key, Value::String(value))?])
            }
            Ok(_) | Err(VarError::NotPresent) => Ok(Vec::new()),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(self.var.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_is_not_coerced() {
        std::env::set_var("PROMETHEUS_SCRIPT_TEST_ENV_NUMERIC", "123");
        let source = EnvVarSource::new("PROMETHEUS_SCRIPT_TEST_ENV_NUMERIC", "install_dir");
        let entries = source.entries().unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, vec!["install_dir".to_string()]);
        assert_eq!(entries[0].value, Value::String("123".into()));
    }

    #[test]
    fn test_unset_and_empty_contribute_nothing() {
        let source = EnvVarSource::new("PROMETHEUS_SCRIPT_TEST_ENV_UNSET", "install_dir");
        assert!(source.entries().unwrap().is_empty());

        std::env::set_var("PROMETHEUS_SCRIPT_TEST_ENV_EMPTY", "");
        let source = EnvVarSource::new("PROMETHEUS_SCRIPT_TEST_ENV_EMPTY", "install_dir");
        assert!(source.entries().unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_value_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        std::env::set_var(
            "PROMETHEUS_SCRIPT_TEST_ENV_RAW",
            OsStr::from_bytes(b"/opt/comp\xff"),
        );
        let source = EnvVarSource::new("PROMETHEUS_SCRIPT_TEST_ENV_RAW", "install_dir");
        assert!(matches!(
            source.entries(),
            Err(ConfigError::NotUnicode(var)) if var == "PROMETHEUS_SCRIPT_TEST_ENV_RAW"
        ));
    }

    #[test]
    fn test_invalid_key() {
        std::env::set_var("PROMETHEUS_SCRIPT_TEST_ENV_BADKEY", "x");
        let source = EnvVarSource::new("PROMETHEUS_SCRIPT_TEST_ENV_BADKEY", "a..b");
        assert!(matches!(source.entries(), Err(ConfigError::InvalidKey(_))));
    }
}
