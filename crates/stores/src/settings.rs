//! The remembered output directory, stored as a single line of text.

use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Error};
use thiserror::Error;
use tracing::{debug, info};
use part_generator::run::AppState;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Output directory is not valid UTF-8. directory: {}", .0.display())]
    NonUtf8Directory(PathBuf),
}

pub fn load_output_directory(settings_path: &Path) -> Result<Option<PathBuf>, Error> {
    if !settings_path.exists() {
        debug!("No settings file. file: {}", settings_path.display());
        return Ok(None)
    }

    let content = fs::read_to_string(settings_path)
        .with_context(|| format!("Error reading settings. file: {}", settings_path.display()))?;

    let directory = content.trim();
    if directory.is_empty() {
        return Ok(None)
    }

    Ok(Some(PathBuf::from(directory)))
}

pub fn store_output_directory(settings_path: &Path, directory: &Path) -> Result<(), Error> {
    let directory_str = directory.to_str()
        .ok_or_else(|| SettingsError::NonUtf8Directory(directory.to_path_buf()))?;

    fs::write(settings_path, directory_str)
        .with_context(|| format!("Error writing settings. file: {}", settings_path.display()))?;

    info!("Remembered output directory. directory: {}", directory_str);

    Ok(())
}

pub fn load_state(settings_path: &Path) -> Result<AppState, Error> {
    Ok(AppState {
        output_directory: load_output_directory(settings_path)?,
    })
}
