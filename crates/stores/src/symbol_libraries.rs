use std::fs;
use std::path::Path;
use std::str::FromStr;
use anyhow::{Context, Error};
use tracing::{info, Level};
use eda::kicad::symbol_lib::SymbolLib;

#[tracing::instrument(level = Level::DEBUG)]
pub fn load_library(library_source: &Path) -> Result<SymbolLib, Error> {
    info!("Loading symbol library. source: '{}'", library_source.display());

    let content = fs::read_to_string(library_source)
        .with_context(|| format!("Error reading symbol library. file: {}", library_source.display()))?;

    let library = SymbolLib::from_str(&content)
        .with_context(|| format!("Error parsing symbol library. file: {}", library_source.display()))?;

    Ok(library)
}

pub fn store_library(library_target: &Path, library: &SymbolLib) -> Result<(), Error> {
    info!("Storing symbol library. target: '{}'", library_target.display());

    fs::write(library_target, library.to_string())
        .with_context(|| format!("Error writing symbol library. file: {}", library_target.display()))?;

    Ok(())
}
