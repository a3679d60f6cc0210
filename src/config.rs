use crate::gradebook::{self, Gradebook, Grades};
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_ENV: &str = "GRADEBOOKD_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GradebookConfig {
    pub capacity: usize,
    pub max_name_length: usize,
    pub weights: Grades,
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self {
            capacity: gradebook::MAX_ENTRIES,
            max_name_length: gradebook::MAX_NAME_LENGTH,
            weights: gradebook::DEFAULT_WEIGHTS,
        }
    }
}

impl GradebookConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.capacity == 0 {
            return Err(anyhow!("capacity must be >= 1"));
        }
        if self.max_name_length < 2 {
            return Err(anyhow!("maxNameLength must be >= 2"));
        }
        gradebook::validate_weights(&self.weights)?;
        Ok(())
    }

    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        let cfg: GradebookConfig =
            serde_json::from_str(text).context("failed to parse gradebook config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.to_string_lossy()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("invalid config {}", path.to_string_lossy()))
    }

    /// Reads the file named by `GRADEBOOKD_CONFIG`, or falls back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(p) if !p.is_empty() => Self::load_file(Path::new(&p)),
            _ => Ok(Self::default()),
        }
    }

    pub fn build(&self) -> Gradebook {
        Gradebook::new(self.capacity, self.max_name_length, self.weights)
    }
}
