pub mod property;
pub mod symbol;
pub mod symbol_lib;

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum KiCadError {
    #[error("Not a symbol library. found: '{found}'")]
    NotASymbolLibrary { found: String },

    #[error("Missing symbol name")]
    MissingSymbolName,

    #[error("Invalid property. symbol: '{symbol}', property: {property}")]
    InvalidProperty { symbol: String, property: String },

    #[error("Invalid library header. field: {field}")]
    InvalidHeader { field: String },

    #[error(transparent)]
    Parse(#[from] sexpr::ParseError),
}

/// First library version that writes `(hide yes)` instead of a bare `hide` flag.
pub const HIDE_LIST_VERSION: u32 = 20231120;

/// How a hidden property is written inside its `effects`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideStyle {
    /// `hide`, KiCad 6 and 7
    Flag,
    /// `(hide yes)`, KiCad 8 onwards
    List,
}

impl HideStyle {
    /// Unparsable versions are treated as current.
    pub fn for_version(version: &str) -> Self {
        match version.trim().parse::<u32>() {
            Ok(version) if version < HIDE_LIST_VERSION => HideStyle::Flag,
            _ => HideStyle::List,
        }
    }
}
