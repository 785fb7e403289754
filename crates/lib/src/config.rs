//! Configuration types and loading.
//!
//! Config is loaded from a JSON file (e.g. `~/.skillgraph/config.json`) and environment.
//! It only says where the skill graph data file lives.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the skill graph data next to the config file when none is configured.
pub const DEFAULT_SKILL_GRAPH_FILE: &str = "skill_graph.yaml";

/// Top-level application config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Skill graph data source.
    #[serde(default)]
    pub skill_graph: SkillGraphConfig,
}

/// Where to load the skill graph from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGraphConfig {
    /// Data file (YAML or JSON). Relative paths are resolved against the config file's parent. Overridden by SKILLGRAPH_FILE env.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Resolve config path from env or default.
pub fn default_config_path() -> PathBuf {
    std::env::var("SKILLGRAPH_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(".skillgraph").join("config.json"))
                .unwrap_or_else(|| PathBuf::from("config.json"))
        })
}

/// Load config from the given path, or the default path (or SKILLGRAPH_CONFIG_PATH). Missing file => default config.
/// Returns the config and the path that was used (for resolving relative paths).
pub fn load_config(path: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    let path = path.unwrap_or_else(default_config_path);
    let config = if !path.exists() {
        log::debug!("config file not found, using defaults: {}", path.display());
        Config::default()
    } else {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        serde_json::from_str(&s)
            .with_context(|| format!("parsing config from {}", path.display()))?
    };
    Ok((config, path))
}

fn config_parent(config_path: &Path) -> &Path {
    config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Default data file when none is configured: `skill_graph.yaml` beside the config file.
pub fn default_skill_graph_file(config_path: &Path) -> PathBuf {
    config_parent(config_path).join(DEFAULT_SKILL_GRAPH_FILE)
}

/// Data file named by the config (relative paths resolved against the config file's parent), or the default.
pub fn skill_graph_file_from_config(config: &Config, config_path: &Path) -> PathBuf {
    match &config.skill_graph.file {
        Some(f) if !f.as_os_str().is_empty() => {
            if f.is_absolute() {
                f.clone()
            } else {
                config_parent(config_path).join(f)
            }
        }
        _ => default_skill_graph_file(config_path),
    }
}

/// Resolve the skill graph data file: env SKILLGRAPH_FILE overrides config.
pub fn resolve_skill_graph_file(config: &Config, config_path: &Path) -> PathBuf {
    std::env::var("SKILLGRAPH_FILE")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| skill_graph_file_from_config(config, config_path))
}
