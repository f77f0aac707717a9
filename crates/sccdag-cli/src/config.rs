//! Optional `sccdag.toml` settings.
//!
//! Lookup order: `--config <PATH>`, then `SCCDAG_CONFIG`, then
//! `./sccdag.toml`. A path named explicitly (flag or env) must exist; the
//! implicit working-directory file is optional.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name probed in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "sccdag.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub solver: SolverConfig,
}

/// Controls how much of a report the human renderers print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_true")]
    pub show_paths: bool,
    #[serde(default = "default_true")]
    pub show_members: bool,
    /// Truncate long listings after this many rows; `0` lists everything.
    #[serde(default)]
    pub max_listed: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            show_paths: default_true(),
            show_members: default_true(),
            max_listed: 0,
        }
    }
}

impl ReportConfig {
    /// Split `items` into the listed prefix and the number left out.
    pub fn limit<'a, T>(&self, items: &'a [T]) -> (&'a [T], usize) {
        if self.max_listed == 0 || items.len() <= self.max_listed {
            (items, 0)
        } else {
            (&items[..self.max_listed], items.len() - self.max_listed)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Source vertex used when the graph file declares none.
    #[serde(default)]
    pub default_source: usize,
}

const fn default_true() -> bool {
    true
}

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigSource {
    Explicit(PathBuf),
    Implicit(PathBuf),
    None,
}

fn resolve_config_source(
    flag: Option<&Path>,
    env_value: Option<&str>,
    cwd_candidate: Option<PathBuf>,
) -> ConfigSource {
    if let Some(path) = flag {
        return ConfigSource::Explicit(path.to_path_buf());
    }
    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        return ConfigSource::Explicit(PathBuf::from(value));
    }
    cwd_candidate.map_or(ConfigSource::None, ConfigSource::Implicit)
}

/// Parse a config document, annotating failures with `path`.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or has the wrong shape.
pub fn parse_config(content: &str, path: &Path) -> Result<AppConfig> {
    toml::from_str::<AppConfig>(content)
        .with_context(|| format!("Failed to parse config {}", path.display()))
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    parse_config(&content, path)
}

/// Load the effective configuration.
///
/// # Errors
///
/// Returns an error if an explicitly named file is missing, or if any
/// config file that is found cannot be parsed.
pub fn load_config(flag: Option<&Path>) -> Result<AppConfig> {
    let env_value = std::env::var("SCCDAG_CONFIG").ok();
    let cwd_candidate = Path::new(DEFAULT_CONFIG_FILE);
    let cwd_candidate = cwd_candidate
        .exists()
        .then(|| cwd_candidate.to_path_buf());

    match resolve_config_source(flag, env_value.as_deref(), cwd_candidate) {
        ConfigSource::Explicit(path) | ConfigSource::Implicit(path) => {
            let config = read_config(&path)?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(config)
        }
        ConfigSource::None => Ok(AppConfig::default()),
    }
}
