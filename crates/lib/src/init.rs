//! Initialize the configuration directory: create ~/.skillgraph, a default config and the bundled skill graph.
//!
//! The bundled graph lives at `crates/lib/config/skill_graph.yaml` and is written to
//! `~/.skillgraph/skill_graph.yaml`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config;

static BUNDLED_SKILL_GRAPH: &str = include_str!("../config/skill_graph.yaml");

/// The skill graph shipped with the crate, as YAML text.
pub fn bundled_skill_graph() -> &'static str {
    BUNDLED_SKILL_GRAPH
}

/// Ensure the skill graph data file exists before trying to load it.
pub fn require_initialized(skill_graph_file: &Path) -> Result<()> {
    if !skill_graph_file.exists() {
        anyhow::bail!(
            "skill graph not found; run `skillgraph init` first or pass --file (missing: {})",
            skill_graph_file.display()
        );
    }
    Ok(())
}

/// Create the config directory and default files if they do not exist.
/// - Creates the config directory (parent of config file path).
/// - Writes `config.json` with `{}` if missing.
/// - Writes the bundled skill graph to the configured data file if missing.
///
/// Returns the path of the skill graph data file.
pub fn init_config_dir(config_path: &Path) -> Result<PathBuf> {
    let config_dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(config_dir)
        .with_context(|| format!("creating config directory {}", config_dir.display()))?;

    if !config_path.exists() {
        std::fs::write(config_path, b"{}")
            .with_context(|| format!("writing default config to {}", config_path.display()))?;
        log::info!("created default config at {}", config_path.display());
    }

    let (cfg, _) = config::load_config(Some(config_path.to_path_buf()))?;
    let graph_file = config::skill_graph_file_from_config(&cfg, config_path);
    if !graph_file.exists() {
        if let Some(parent) = graph_file.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        std::fs::write(&graph_file, BUNDLED_SKILL_GRAPH)
            .with_context(|| format!("writing bundled skill graph to {}", graph_file.display()))?;
        log::info!("wrote bundled skill graph to {}", graph_file.display());
    } else {
        log::debug!("skill graph already exists at {}, skipping", graph_file.display());
    }

    Ok(graph_file)
}
