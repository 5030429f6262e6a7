//! File I/O for native CLI

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use gleaner_core::{EngineConfig, InMemoryQuoteStore, QuoteStore, ScanCapture};

/// Load a recognized capture from a JSON file
pub fn load_capture(path: &Path) -> Result<ScanCapture> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read capture: {}", path.display()))?;

    ScanCapture::from_json(&content)
        .with_context(|| format!("Failed to parse capture: {}", path.display()))
}

/// Get the ~/.gleaner directory path, creating it if needed
pub fn gleaner_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not find home directory")?;
    let gleaner_dir = home.join(".gleaner");

    if !gleaner_dir.exists() {
        fs::create_dir_all(&gleaner_dir)
            .with_context(|| format!("Failed to create {}", gleaner_dir.display()))?;
    }

    Ok(gleaner_dir)
}

/// Load the engine config from `path`, or ~/.gleaner/config.toml when it exists
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default = gleaner_dir()?.join("config.toml");
            if !default.exists() {
                return Ok(EngineConfig::default());
            }
            default
        }
    };

    EngineConfig::load(&path).with_context(|| format!("Failed to load config: {}", path.display()))
}

/// Export saved quotes to ~/.gleaner/quotes.json
pub fn export_quotes(store: &InMemoryQuoteStore) -> Result<PathBuf> {
    let export_path = gleaner_dir()?.join("quotes.json");
    write_quotes(store, &export_path)?;
    Ok(export_path)
}

pub fn write_quotes(store: &InMemoryQuoteStore, path: &Path) -> Result<()> {
    let json = gleaner_core::to_json(store.list())?;

    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
