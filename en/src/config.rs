//! ENHSP adapter configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::command::{Launcher, SearchParams};
use crate::engine::Enhsp;
use crate::variant::Variant;

/// Environment variable overriding the jar location
pub const JAR_ENV: &str = "ENHSP_JAR";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How to launch the engine
    pub engine: EngineConfig,

    /// Default search parameters
    pub search: SearchConfig,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// Keep per-run working directories for inspection
    #[serde(rename = "keep-workdir")]
    pub keep_workdir: bool,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: ./enhsp.yml
        let local_config = PathBuf::from("enhsp.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/enhsp/enhsp.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("enhsp").join("enhsp.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is set up
    ///
    /// Errors are swallowed: a broken config is reported later by [`Config::load`].
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates = match config_path {
            Some(path) => vec![path.clone()],
            None => {
                let mut paths = vec![PathBuf::from("enhsp.yml")];
                if let Some(config_dir) = dirs::config_dir() {
                    paths.push(config_dir.join("enhsp").join("enhsp.yml"));
                }
                paths
            }
        };

        candidates
            .iter()
            .find(|p| p.exists())
            .and_then(|p| Self::load_from_file(p).ok())
            .and_then(|c| c.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Build an engine for `variant` from this configuration
    pub fn engine_for(&self, variant: Variant) -> Enhsp {
        Enhsp::new(variant, self.engine.launcher())
            .with_params(self.search.params())
            .keep_workdir(self.keep_workdir)
    }
}

/// How the engine jar is executed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Java executable
    pub java: String,

    /// Path to enhsp.jar; `ENHSP_JAR` takes precedence
    pub jar: PathBuf,

    /// Extra JVM arguments placed before `-jar`
    #[serde(rename = "jvm-args")]
    pub jvm_args: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            java: "java".to_string(),
            jar: default_jar_path(),
            jvm_args: Vec::new(),
        }
    }
}

fn default_jar_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("enhsp")
        .join("ENHSP")
        .join("enhsp.jar")
}

impl EngineConfig {
    /// Effective jar path after the environment override
    pub fn jar_path(&self) -> PathBuf {
        match std::env::var_os(JAR_ENV) {
            Some(jar) if !jar.is_empty() => PathBuf::from(jar),
            _ => self.jar.clone(),
        }
    }

    pub fn launcher(&self) -> Launcher {
        Launcher::java(self.java.clone(), &self.jvm_args, &self.jar_path())
    }
}

/// Default search parameters for non-optimal variants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search algorithm passed with `-s`
    #[serde(rename = "search-algorithm")]
    pub search_algorithm: Option<String>,

    /// Heuristic passed with `-h`
    pub heuristic: Option<String>,

    /// Free-form flags; when set, replaces algorithm and heuristic
    pub params: Option<String>,
}

impl SearchConfig {
    pub fn params(&self) -> SearchParams {
        match &self.params {
            Some(raw) => SearchParams::Raw(raw.clone()),
            None => SearchParams::discrete(self.search_algorithm.clone(), self.heuristic.clone()),
        }
    }

    /// Overlay command-line values on top of these defaults
    pub fn overlay(&self, search_algorithm: Option<String>, heuristic: Option<String>, params: Option<String>) -> Self {
        if params.is_some() {
            return Self {
                search_algorithm: None,
                heuristic: None,
                params,
            };
        }
        if search_algorithm.is_some() || heuristic.is_some() {
            return Self {
                search_algorithm: search_algorithm.or_else(|| self.search_algorithm.clone()),
                heuristic: heuristic.or_else(|| self.heuristic.clone()),
                params: None,
            };
        }
        self.clone()
    }
}
