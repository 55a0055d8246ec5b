//! Saved-dataset registry for the CLI runner.
//!
//! Datasets name JSON seed files so a store can be rebuilt by name instead
//! of by path. The registry lives in the user config directory as TOML.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub name: String,
    /// Path to a JSON seed file shaped `{ "table": [ {...}, ... ] }`.
    pub path: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SavedDatasets {
    datasets: Vec<DatasetConfig>,
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tabsql")
        .join("datasets.toml")
}

pub fn load_saved_datasets() -> Result<Vec<DatasetConfig>> {
    load_datasets_from(&config_path())
}

pub fn save_datasets(datasets: &[DatasetConfig]) -> Result<()> {
    save_datasets_to(&config_path(), datasets)
}

fn load_datasets_from(path: &Path) -> Result<Vec<DatasetConfig>> {
    if !path.exists() {
        return Ok(vec![]);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset registry: {}", path.display()))?;
    let saved: SavedDatasets = toml::from_str(&content)
        .with_context(|| format!("Malformed dataset registry: {}", path.display()))?;
    Ok(saved.datasets)
}

fn save_datasets_to(path: &Path, datasets: &[DatasetConfig]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let saved = SavedDatasets {
        datasets: datasets.to_vec(),
    };
    let content = toml::to_string_pretty(&saved)?;
    std::fs::write(path, content)?;
    Ok(())
}
