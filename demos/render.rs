//! Renders the sample run script.
//!
//! ```sh
//! TIUP_COMPONENT_INSTALL_DIR=demos cargo run --example render
//! ```

use prometheus_script::{InstallDir, PrometheusScript};

fn main() -> Result<(), prometheus_script::Error> {
    let install = InstallDir::from_env()?;

    let script = PrometheusScript::new(
        "10.0.1.4",
        "/tidb-deploy/prometheus-9090",
        "/tidb-data/prometheus-9090",
        "/tidb-deploy/prometheus-9090/log",
    )
    .with_numa_node("0");

    let content = script.render(&install)?;
    print!("{}", String::from_utf8_lossy(&content));

    let target = std::env::temp_dir().join("run_prometheus.sh");
    script.render_to_file(&install, &target)?;
    println!("wrote {}", target.display());

    Ok(())
}
