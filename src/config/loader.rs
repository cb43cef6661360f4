//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.pr-agent.toml` in the start-up directory
//! 4. `~/.config/pr-agent/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants;
use crate::env::Env;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub inspect: InspectConfig,
    pub templates: TemplatesConfig,
    pub server: ServerConfig,
    pub log: LogConfig,
    /// Problems found while loading, reported once logging is up.
    #[serde(skip)]
    pub warnings: Vec<String>,
}

/// Defaults for the `analyze_file_changes` tool arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    pub base_branch: String,
    pub include_diff: bool,
    pub max_diff_lines: usize,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            base_branch: constants::DEFAULT_BASE_BRANCH.to_string(),
            include_diff: true,
            max_diff_lines: constants::DEFAULT_MAX_DIFF_LINES,
        }
    }
}

/// Template store location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Directory holding the template files. `None` means the default
    /// `~/.config/pr-agent/templates`.
    pub dir: Option<PathBuf>,
}

/// MCP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Milliseconds to wait for the host's `roots/list` answer.
    pub roots_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            roots_timeout_ms: constants::DEFAULT_ROOTS_TIMEOUT_MS,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. `debug` or `pr_agent=trace`.
    pub level: Option<String>,
}

/// One config file as written. Only the fields it sets override the
/// layers below it.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigLayer {
    inspect: InspectLayer,
    templates: TemplatesConfig,
    server: ServerLayer,
    log: LogConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InspectLayer {
    base_branch: Option<String>,
    include_diff: Option<bool>,
    max_diff_lines: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ServerLayer {
    roots_timeout_ms: Option<u64>,
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads the global config, then `start_dir/.pr-agent.toml`, then
    /// applies environment variable overrides.
    pub fn load(start_dir: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        Self::load_layers(Self::global_config_path().as_deref(), start_dir, env)
    }

    fn load_layers(
        global_path: Option<&Path>,
        start_dir: Option<&Path>,
        env: &Env,
    ) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        let local_path = start_dir.map(|dir| dir.join(constants::CONFIG_FILENAME));

        for path in global_path.into_iter().chain(local_path.as_deref()) {
            if path.exists() {
                let layer = Self::load_file(path)?;
                config.merge(layer);
            }
        }

        config.apply_env_vars(env);

        Ok(config)
    }

    /// Emit the warnings collected during [`Config::load`]. Call after the
    /// subscriber is installed.
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            tracing::warn!("{warning}");
        }
    }

    /// The template store directory after all layers are applied.
    ///
    /// Falls back to `./templates` when no config directory can be
    /// determined (e.g. no home directory in a container).
    pub fn templates_dir(&self) -> PathBuf {
        if let Some(dir) = &self.templates.dir {
            return dir.clone();
        }
        dirs::config_dir()
            .map(|d| d.join(constants::CONFIG_DIR).join(constants::TEMPLATES_SUBDIR))
            .unwrap_or_else(|| PathBuf::from(constants::TEMPLATES_SUBDIR))
    }

    fn load_file(path: &Path) -> Result<ConfigLayer, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Overlay every field `layer` sets.
    fn merge(&mut self, layer: ConfigLayer) {
        if let Some(branch) = layer.inspect.base_branch {
            self.inspect.base_branch = branch;
        }
        if let Some(include) = layer.inspect.include_diff {
            self.inspect.include_diff = include;
        }
        if let Some(max) = layer.inspect.max_diff_lines {
            self.inspect.max_diff_lines = max;
        }

        if layer.templates.dir.is_some() {
            self.templates.dir = layer.templates.dir;
        }

        if let Some(ms) = layer.server.roots_timeout_ms {
            self.server.roots_timeout_ms = ms;
        }

        if layer.log.level.is_some() {
            self.log.level = layer.log.level;
        }
    }

    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(dir) = env.non_empty(constants::ENV_TEMPLATES_DIR) {
            self.templates.dir = Some(PathBuf::from(dir));
        }
        if let Some(branch) = env.non_empty(constants::ENV_BASE_BRANCH) {
            self.inspect.base_branch = branch;
        }
        if let Some(val) = env.non_empty(constants::ENV_MAX_DIFF_LINES) {
            match val.parse::<usize>() {
                Ok(n) => self.inspect.max_diff_lines = n,
                Err(_) => self.warnings.push(format!(
                    "ignoring invalid {} value: {val}",
                    constants::ENV_MAX_DIFF_LINES
                )),
            }
        }
        if let Some(val) = env.non_empty(constants::ENV_ROOTS_TIMEOUT_MS) {
            match val.parse::<u64>() {
                Ok(ms) => self.server.roots_timeout_ms = ms,
                Err(_) => self.warnings.push(format!(
                    "ignoring invalid {} value: {val}",
                    constants::ENV_ROOTS_TIMEOUT_MS
                )),
            }
        }
        if let Some(level) = env.non_empty(constants::ENV_LOG) {
            self.log.level = Some(level);
        }
    }
}
