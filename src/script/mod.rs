//! Run-script generation for a Prometheus instance.

mod error;

use std::io;
use std::path::Path;

pub use error::ScriptError;

use crate::install::InstallDir;
use gtmpl::Value;

use crate::template::{Field, Namespace, Template};

/// Port Prometheus listens on unless overridden.
pub const DEFAULT_PORT: u64 = 9090;

/// File name of the packaged run-script template.
pub const TEMPLATE_FILE: &str = "run_prometheus.sh.tpl";

/// Mode of the written script: rwx for owner, group and other.
pub const SCRIPT_MODE: u32 = 0o755;

/// Values substituted into the run-script template.
///
/// | Template field | Value |
/// |---|---|
/// | `IP` | [`ip`](Self::ip) |
/// | `Port` | [`port`](Self::port) |
/// | `DeployDir` | [`deploy_dir`](Self::deploy_dir) |
/// | `DataDir` | [`data_dir`](Self::data_dir) |
/// | `LogDir` | [`log_dir`](Self::log_dir) |
/// | `NumaNode` | [`numa_node`](Self::numa_node), empty when unset |
///
/// No field is validated; whatever is given ends up verbatim in the script.
///
/// ## Example
///
/// ```no_run
/// use prometheus_script::{InstallDir, PrometheusScript};
///
/// let install = InstallDir::from_env()?;
/// PrometheusScript::new("10.0.1.4", "/deploy/prom", "/data/prom", "/log/prom")
///     .with_port(9091)
///     .with_numa_node("0")
///     .render_to_file(&install, "/deploy/prom/scripts/run_prometheus.sh")?;
/// # Ok::<(), prometheus_script::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrometheusScript {
    ip: String,
    port: u64,
    deploy_dir: String,
    data_dir: String,
    log_dir: String,
    numa_node: String,
}

impl PrometheusScript {
    /// Creates a parameter set listening on [`DEFAULT_PORT`] with no NUMA binding.
    pub fn new(
        ip: impl Into<String>,
        deploy_dir: impl Into<String>,
        data_dir: impl Into<String>,
        log_dir: impl Into<String>,
    ) -> Self {
        Self {
            ip: ip.into(),
            port: DEFAULT_PORT,
            deploy_dir: deploy_dir.into(),
            data_dir: data_dir.into(),
            log_dir: log_dir.into(),
            numa_node: String::new(),
        }
    }

    /// Overrides the listen port.
    #[must_use]
    pub fn with_port(mut self, port: u64) -> Self {
        self.port = port;
        self
    }

    /// Sets the NUMA node the process is bound to. Empty means no binding.
    #[must_use]
    pub fn with_numa_node(mut self, numa_node: impl Into<String>) -> Self {
        self.numa_node = numa_node.into();
        self
    }

    /// Address the instance binds to and advertises.
    pub fn ip(&self) -> &str {
        &self.ip
    }

    /// Listen port, [`DEFAULT_PORT`] unless overridden.
    pub fn port(&self) -> u64 {
        self.port
    }

    /// Deploy directory the script runs from.
    pub fn deploy_dir(&self) -> &str {
        &self.deploy_dir
    }

    /// TSDB storage directory.
    pub fn data_dir(&self) -> &str {
        &self.data_dir
    }

    /// Directory the script logs into.
    pub fn log_dir(&self) -> &str {
        &self.log_dir
    }

    /// NUMA node hint; empty when unset.
    pub fn numa_node(&self) -> &str {
        &self.numa_node
    }

    /// Renders the packaged template
    /// `<install>/templates/scripts/run_prometheus.sh.tpl`.
    pub fn render(&self, install: &InstallDir) -> Result<Vec<u8>, ScriptError> {
        let path = install.script_template(TEMPLATE_FILE);
        if !install.is_resolved() {
            return Err(ScriptError::TemplateNotFound {
                path,
                source: io::Error::new(io::ErrorKind::NotFound, "install directory is not set"),
            });
        }

        let text = std::fs::read_to_string(&path)
            .map_err(|source| ScriptError::TemplateNotFound {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(path = %path.display(), "loaded script template");

        self.render_with_template(&text)
    }

    /// Renders `template` against this script's fields. Performs no I/O.
    pub fn render_with_template(&self, template: &str) -> Result<Vec<u8>, ScriptError> {
        let template = Template::<Self>::parse("prometheus", template)?;
        Ok(template.execute(self)?)
    }

    /// Renders the packaged template and writes it to `path` as an executable
    /// script.
    ///
    /// Nothing is written if rendering fails. The write itself is not atomic:
    /// an interrupted write can leave a partial file behind.
    pub fn render_to_file(
        &self,
        install: &InstallDir,
        path: impl AsRef<Path>,
    ) -> Result<(), ScriptError> {
        let path = path.as_ref();
        let content = self.render(install)?;

        write_script(path, &content).map_err(|source| ScriptError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote run script");
        Ok(())
    }
}

impl Namespace for PrometheusScript {
    const FIELDS: &'static [Field<Self>] = &[
        Field {
            name: "IP",
            get: |s| Value::from(s.ip.as_str()),
        },
        Field {
            name: "Port",
            get: |s| Value::from(s.port),
        },
        Field {
            name: "DeployDir",
            get: |s| Value::from(s.deploy_dir.as_str()),
        },
        Field {
            name: "DataDir",
            get: |s| Value::from(s.data_dir.as_str()),
        },
        Field {
            name: "LogDir",
            get: |s| Value::from(s.log_dir.as_str()),
        },
        Field {
            name: "NumaNode",
            get: |s| Value::from(s.numa_node.as_str()),
        },
    ];
}

fn write_script(path: &Path, content: &[u8]) -> io::Result<()> {
    std::fs::write(path, content)?;

    // Force the mode so the process umask cannot strip the execute bits.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(SCRIPT_MODE))?;
    }

    Ok(())
}
