pub mod input_row;
pub mod run;

use eda::kicad::symbol::Symbol;
use eda::kicad::symbol_lib::SymbolLib;
use thiserror::Error;
use tracing::{info, warn};
use crate::input_row::{InputRow, PART_FIELD, SYMBOL_FIELD};

/// Properties copied from a row onto the generated symbol, in the order they are applied.
pub const KNOWN_PROPERTIES: [&str; 8] = ["Value", "Description", "Footprint", "Datasheet", "Package", "Type", "Series", "Brand"];

/// Properties that are always hidden on a generated symbol.
pub const HIDDEN_PROPERTIES: [&str; 7] = ["Description", "Footprint", "Datasheet", "Package", "Type", "Series", "Brand"];

pub trait TemplateLookup {
    /// First template with the given name.
    fn find_template(&self, name: &str) -> Option<&Symbol>;
}

impl TemplateLookup for [Symbol] {
    fn find_template(&self, name: &str) -> Option<&Symbol> {
        self.iter().find(|symbol| symbol.entry_name() == name)
    }
}

impl TemplateLookup for SymbolLib {
    fn find_template(&self, name: &str) -> Option<&Symbol> {
        self.find_symbol(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPart {
    /// 1-based data row number, excluding the header
    pub row: usize,
    pub template_name: String,
    pub symbol: Symbol,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: SkipReason,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipReason {
    #[error("Missing required field. field: '{field}'")]
    MissingRequiredField { field: String },

    #[error("Template not found. symbol: '{symbol}'")]
    TemplateNotFound { symbol: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationResult {
    pub parts: Vec<GeneratedPart>,
    pub skipped: Vec<SkippedRow>,
}

impl GenerationResult {
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn symbols(&self) -> Vec<Symbol> {
        self.parts.iter().map(|part| part.symbol.clone()).collect()
    }
}

pub struct PartGenerator {}

impl PartGenerator {
    pub fn generate<L: TemplateLookup + ?Sized>(rows: &[InputRow], templates: &L) -> GenerationResult {
        let mut result = GenerationResult::default();

        for (index, input_row) in rows.iter().enumerate() {
            let row = index + 1;

            match Self::generate_part(input_row, templates) {
                Ok((template_name, symbol)) => {
                    info!("Generated part. row: {}, part: '{}', template: '{}'", row, symbol.entry_name(), template_name);
                    result.parts.push(GeneratedPart { row, template_name, symbol });
                },
                Err(reason) => {
                    warn!("Skipping row. row: {}, reason: {}", row, reason);
                    result.skipped.push(SkippedRow { row, reason });
                },
            }
        }

        result
    }

    fn generate_part<L: TemplateLookup + ?Sized>(input_row: &InputRow, templates: &L) -> Result<(String, Symbol), SkipReason> {
        let symbol_name = input_row.symbol()
            .ok_or(SkipReason::MissingRequiredField { field: SYMBOL_FIELD.to_string() })?;
        let part_name = input_row.part()
            .ok_or(SkipReason::MissingRequiredField { field: PART_FIELD.to_string() })?;

        let template = templates.find_template(symbol_name)
            .ok_or_else(|| SkipReason::TemplateNotFound { symbol: symbol_name.to_string() })?;

        let symbol = KNOWN_PROPERTIES.iter()
            .filter_map(|&key| input_row.field(key).map(|value| (key, value)))
            .fold(template.renamed(part_name), |symbol, (key, value)| {
                symbol.with_property(key, value, HIDDEN_PROPERTIES.contains(&key))
            });

        // blank cells leave a template's value in place, it is hidden all the same
        let symbol = HIDDEN_PROPERTIES.iter()
            .fold(symbol, |symbol, key| symbol.with_hidden_property(key));

        Ok((symbol_name.to_string(), symbol))
    }
}
