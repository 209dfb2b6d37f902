pub mod csv;
pub mod part_rows;
pub mod settings;
pub mod symbol_libraries;

use std::path::Path;
use eda::kicad::symbol_lib::SymbolLib;
use part_generator::input_row::InputRow;
use part_generator::run::{LibrarySink, LibrarySource, RowSource};

/// Reads and writes generation inputs and outputs on the local filesystem.
#[derive(Debug, Default)]
pub struct FileStore {}

impl RowSource for FileStore {
    fn load_rows(&self, source: &Path) -> anyhow::Result<Vec<InputRow>> {
        part_rows::load_rows(source)
    }
}

impl LibrarySource for FileStore {
    fn load_library(&self, source: &Path) -> anyhow::Result<SymbolLib> {
        symbol_libraries::load_library(source)
    }
}

impl LibrarySink for FileStore {
    fn store_library(&self, target: &Path, library: &SymbolLib) -> anyhow::Result<()> {
        symbol_libraries::store_library(target, library)
    }
}
