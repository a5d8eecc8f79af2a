use crate::suite::SuiteSettings;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub enable_tracing: bool,
    #[serde(default)]
    pub suite: SuiteConfig,
}

/// Where to find the tool and its test data
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SuiteConfig {
    /// Executable name, without platform suffix
    pub program: String,
    /// Searched first under the binary root
    pub relative_binary_path: String,
    /// Inputs and golden outputs, relative to the source root
    pub app_test_dir: String,
    /// JSON report written after the run, if set
    pub report_path: Option<String>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            program: "stellar".to_string(),
            relative_binary_path: ".".to_string(),
            app_test_dir: "test/cli".to_string(),
            report_path: None,
        }
    }
}

impl SuiteConfig {
    pub fn settings(&self, source_root: &Path, binary_root: &Path) -> SuiteSettings {
        SuiteSettings {
            source_root: source_root.to_path_buf(),
            binary_root: binary_root.to_path_buf(),
            app_test_dir: PathBuf::from(&self.app_test_dir),
            program: self.program.clone(),
            relative_binary_path: PathBuf::from(&self.relative_binary_path),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "stellar_cli_tests.log".to_string(),
            use_json: false,
            rotation: "never".to_string(),
            enable_tracing: true,
            suite: SuiteConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn config_path(env: &str) -> PathBuf {
        PathBuf::from(format!("config/{}.yaml", env))
    }

    pub fn load(env: &str) -> Result<Self> {
        let config_path = Self::config_path(env);
        Self::from_file(&config_path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config yaml: {}", path.display()))
    }

    /// Built-in defaults when `config/<env>.yaml` does not exist
    pub fn load_or_default(env: &str) -> Result<Self> {
        if Self::config_path(env).exists() {
            Self::load(env)
        } else {
            Ok(Self::default())
        }
    }
}
