use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "~/.battery-cycle-count.json";

fn default_years() -> u32 {
    1
}

/// Settings remembered between runs so the log path only has to be given once.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CycleConfig {
    #[serde(default)]
    pub log_file: Option<String>,
    #[serde(default = "default_years")]
    pub years: u32,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            years: default_years(),
        }
    }
}

pub fn config_path(custom: Option<&str>) -> PathBuf {
    let raw = custom.unwrap_or(DEFAULT_CONFIG_PATH);
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

pub fn load_config(path: &Path) -> Result<CycleConfig> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: CycleConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    } else {
        Ok(CycleConfig::default())
    }
}

pub fn save_config(path: &Path, config: &CycleConfig) -> Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    Ok(())
}
