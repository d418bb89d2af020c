//! Location of the component install directory that holds packaged templates.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::{Config, ConfigError};

/// Environment variable naming the current component's install directory.
pub const ENV_COMPONENT_INSTALL_DIR: &str = "TIUP_COMPONENT_INSTALL_DIR";

const INSTALL_DIR_KEY: &str = "install_dir";

#[derive(Debug, Deserialize)]
struct InstallConfig {
    install_dir: Option<PathBuf>,
}

/// A resolved install directory.
///
/// Build one with [`InstallDir::new`] when the base path is already known, or
/// resolve it once up front with [`InstallDir::from_env`] / [`InstallDir::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallDir {
    base: PathBuf,
}

impl InstallDir {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Resolves the install directory from [`ENV_COMPONENT_INSTALL_DIR`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(None, ENV_COMPONENT_INSTALL_DIR)
    }

    /// Resolves the install directory from the environment variable `var`,
    /// falling back to an optional TOML file (`install_dir = "..."`) when the
    /// variable is unset or empty.
    ///
    /// The variable's bytes are used as the path unchanged.
    pub fn load(config_file: Option<&Path>, var: &str) -> Result<Self, ConfigError> {
        if let Some(base) = std::env::var_os(var).filter(|value| !value.is_empty()) {
            tracing::debug!(var, "install directory from environment");
            return Ok(Self::new(base));
        }

        let mut builder = Config::builder();
        if let Some(path) = config_file {
            builder = builder.with_file(path, false);
        }

        let config: InstallConfig = builder.build()?;
        match config.install_dir {
            Some(base) if !base.as_os_str().is_empty() => Ok(Self::new(base)),
            _ => Err(ConfigError::MissingValue(INSTALL_DIR_KEY)),
        }
    }

    /// The resolved base directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// An empty base cannot locate anything.
    pub fn is_resolved(&self) -> bool {
        !self.base.as_os_str().is_empty()
    }

    /// `<base>/templates/scripts/<file_name>`
    pub fn script_template(&self, file_name: &str) -> PathBuf {
        self.base.join("templates").join("scripts").join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_script_template_path() {
        let install = InstallDir::new("/opt/tiup/components/prometheus/v4.0.0");
        assert_eq!(
            install.script_template("run_prometheus.sh.tpl"),
            PathBuf::from(
                "/opt/tiup/components/prometheus/v4.0.0/templates/scripts/run_prometheus.sh.tpl"
            )
        );
    }

    #[test]
    fn test_load_from_env() {
        std::env::set_var("PROMETHEUS_SCRIPT_TEST_INSTALL_ENV", "/opt/prom");
        let install = InstallDir::load(None, "PROMETHEUS_SCRIPT_TEST_INSTALL_ENV").unwrap();
        assert_eq!(install.base(), Path::new("/opt/prom"));
        assert!(install.is_resolved());
    }

    #[test]
    fn test_load_from_file_when_env_unset() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "install_dir = \"/srv/prom\"").unwrap();

        let install =
            InstallDir::load(Some(file.path()), "PROMETHEUS_SCRIPT_TEST_INSTALL_UNSET").unwrap();
        assert_eq!(install.base(), Path::new("/srv/prom"));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "install_dir = \"/srv/prom\"").unwrap();
        std::env::set_var("PROMETHEUS_SCRIPT_TEST_INSTALL_BOTH", "/opt/prom");

        let install =
            InstallDir::load(Some(file.path()), "PROMETHEUS_SCRIPT_TEST_INSTALL_BOTH").unwrap();
        assert_eq!(install.base(), Path::new("/opt/prom"));
    }

    #[test]
    fn test_missing_value() {
        let result = InstallDir::load(None, "PROMETHEUS_SCRIPT_TEST_INSTALL_MISSING");
        assert!(matches!(result, Err(ConfigError::MissingValue("install_dir"))));

        std::env::set_var("PROMETHEUS_SCRIPT_TEST_INSTALL_EMPTY", "");
        let result = InstallDir::load(None, "PROMETHEUS_SCRIPT_TEST_INSTALL_EMPTY");
        assert!(matches!(result, Err(ConfigError::MissingValue(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_env_value_is_kept_verbatim() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"/opt/tiup/comp\xff/prom");
        std::env::set_var("PROMETHEUS_SCRIPT_TEST_INSTALL_RAW", raw);

        let install = InstallDir::load(None, "PROMETHEUS_SCRIPT_TEST_INSTALL_RAW").unwrap();
        assert_eq!(install.base().as_os_str(), raw);
        assert_eq!(
            install.script_template("run_prometheus.sh.tpl"),
            Path::new(raw).join("templates/scripts/run_prometheus.sh.tpl")
        );
    }

    #[test]
    fn test_empty_base_is_unresolved() {
        assert!(!InstallDir::new("").is_resolved());
    }
}
