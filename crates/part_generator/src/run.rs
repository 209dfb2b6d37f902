//! One generation run: validate the request, load the inputs, generate, and store the library.

use std::path::{Path, PathBuf};
use eda::EdaTool;
use eda::kicad::symbol_lib::SymbolLib;
use thiserror::Error;
use tracing::{info, warn};
use crate::{GenerationResult, PartGenerator};
use crate::input_row::InputRow;

/// State that outlives a single run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    /// The last chosen output directory
    pub output_directory: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub parts_source: Option<PathBuf>,
    /// Falls back to `AppState::output_directory` when unset
    pub output_directory: Option<PathBuf>,
    pub library_source: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub parts_source: PathBuf,
    pub library_source: PathBuf,
    pub output_path: PathBuf,
}

#[derive(Error, Debug, PartialEq)]
pub enum RequestError {
    #[error("No parts file selected")]
    NoInputFile,

    #[error("No output directory selected")]
    NoOutputDirectory,

    #[error("Invalid parts file name. file: {}", .0.display())]
    InvalidInputFile(PathBuf),
}

impl GenerationRequest {
    pub fn resolve(&self, state: &AppState) -> Result<ResolvedRequest, RequestError> {
        let parts_source = self.parts_source.as_ref()
            .ok_or(RequestError::NoInputFile)?;

        let output_directory = self.output_directory.as_ref()
            .or(state.output_directory.as_ref())
            .ok_or(RequestError::NoOutputDirectory)?;

        let output_path = build_output_path(parts_source, output_directory)?;

        Ok(ResolvedRequest {
            parts_source: parts_source.clone(),
            library_source: self.library_source.clone(),
            output_path,
        })
    }
}

/// `<output_directory>/<parts file name without extension>.kicad_sym`
pub fn build_output_path(parts_source: &Path, output_directory: &Path) -> Result<PathBuf, RequestError> {
    let stem = parts_source.file_stem()
        .ok_or_else(|| RequestError::InvalidInputFile(parts_source.to_path_buf()))?;

    let mut file_name = stem.to_os_string();
    file_name.push(".");
    file_name.push(EdaTool::KiCad.symbol_library_extension());

    Ok(output_directory.join(file_name))
}

pub trait RowSource {
    fn load_rows(&self, source: &Path) -> anyhow::Result<Vec<InputRow>>;
}

pub trait LibrarySource {
    fn load_library(&self, source: &Path) -> anyhow::Result<SymbolLib>;
}

pub trait LibrarySink {
    fn store_library(&self, target: &Path, library: &SymbolLib) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Created { path: PathBuf, result: GenerationResult },
    NothingProduced { result: GenerationResult },
}

impl GenerationOutcome {
    pub fn result(&self) -> &GenerationResult {
        match self {
            GenerationOutcome::Created { result, .. } => result,
            GenerationOutcome::NothingProduced { result } => result,
        }
    }
}

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("Unable to load parts. file: {}, error: {reason:#}", .path.display())]
    UnableToLoadRows { path: PathBuf, reason: anyhow::Error },

    #[error("Unable to load symbol library. file: {}, error: {reason:#}", .path.display())]
    UnableToLoadLibrary { path: PathBuf, reason: anyhow::Error },

    #[error("Unable to store symbol library. file: {}, error: {reason:#}", .path.display())]
    UnableToStoreLibrary { path: PathBuf, reason: anyhow::Error },
}

pub fn run_generation<IO>(request: &GenerationRequest, state: &AppState, io: &IO) -> Result<GenerationOutcome, GenerationError>
where
    IO: RowSource + LibrarySource + LibrarySink
{
    let ResolvedRequest { parts_source, library_source, output_path } = request.resolve(state)?;

    let rows = io.load_rows(&parts_source).map_err(|reason| {
        GenerationError::UnableToLoadRows { path: parts_source.clone(), reason }
    })?;
    info!("Loaded {} rows", rows.len());

    let library = io.load_library(&library_source).map_err(|reason| {
        GenerationError::UnableToLoadLibrary { path: library_source.clone(), reason }
    })?;
    info!("Loaded {} symbols", library.symbols.len());

    for name in library.duplicate_names() {
        warn!("Duplicate symbol name in library, the first one is used. symbol: '{}'", name);
    }

    let result = PartGenerator::generate(&rows, &library);

    if result.is_empty() {
        return Ok(GenerationOutcome::NothingProduced { result })
    }

    let generated_library = library.with_same_header(result.symbols());

    for symbol in generated_library.symbols.iter() {
        if let Some(parent) = symbol.extends() {
            if generated_library.find_symbol(parent).is_none() {
                warn!("Generated symbol extends a symbol that is not in the generated library. symbol: '{}', extends: '{}'", symbol.entry_name(), parent);
            }
        }
    }

    io.store_library(&output_path, &generated_library).map_err(|reason| {
        GenerationError::UnableToStoreLibrary { path: output_path.clone(), reason }
    })?;

    Ok(GenerationOutcome::Created { path: output_path, result })
}
