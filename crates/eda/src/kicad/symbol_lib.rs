use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use sexpr::{kv, Sexpr};
use crate::kicad::{HideStyle, KiCadError};
use crate::kicad::symbol::Symbol;

pub const DEFAULT_VERSION: &str = "20211014";
pub const DEFAULT_GENERATOR: &str = "kicad_symbol_editor";

/// A `(kicad_symbol_lib ...)` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolLib {
    pub version: String,
    pub generator: String,
    pub generator_version: Option<String>,
    pub symbols: Vec<Symbol>,
}

impl Default for SymbolLib {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            generator: DEFAULT_GENERATOR.to_string(),
            generator_version: None,
            symbols: vec![],
        }
    }
}

impl SymbolLib {
    /// An empty library with the same header as `self`.
    pub fn with_same_header(&self, symbols: Vec<Symbol>) -> SymbolLib {
        SymbolLib {
            version: self.version.clone(),
            generator: self.generator.clone(),
            generator_version: self.generator_version.clone(),
            symbols,
        }
    }

    /// First symbol with the given entry name.
    pub fn find_symbol(&self, entry_name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|symbol| symbol.entry_name() == entry_name)
    }

    /// Entry names used by more than one symbol, in order of their second occurrence.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        let mut duplicates = vec![];
        for symbol in self.symbols.iter() {
            let name = symbol.entry_name();
            if !seen.insert(name) && !duplicates.contains(&name) {
                duplicates.push(name);
            }
        }
        duplicates
    }

    pub fn from_sexpr(expr: &Sexpr) -> Result<Self, KiCadError> {
        let tag = expr.tag().unwrap_or_default();
        if tag != "kicad_symbol_lib" {
            return Err(KiCadError::NotASymbolLibrary { found: tag.to_string() })
        }

        let mut library = SymbolLib::default();

        if let Some(item) = expr.find_list("version") {
            library.version = header_value(item, "version")?;
        }
        if let Some(item) = expr.find_list("generator") {
            library.generator = header_value(item, "generator")?;
        }
        library.generator_version = expr.find_list("generator_version")
            .map(|item| header_value(item, "generator_version"))
            .transpose()?;

        library.symbols = expr.find_all_lists("symbol")
            .map(|item| Symbol::from_sexpr(item.as_list().unwrap_or_default()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(library)
    }

    /// Hidden properties are written in the syntax of the library's `version`.
    pub fn to_sexpr(&self) -> Sexpr {
        let hide_style = HideStyle::for_version(&self.version);

        let mut items = vec![
            Sexpr::atom("kicad_symbol_lib"),
            kv("version", Sexpr::atom(self.version.as_str())),
            kv("generator", Sexpr::string(self.generator.as_str())),
        ];
        if let Some(generator_version) = &self.generator_version {
            items.push(kv("generator_version", Sexpr::string(generator_version.as_str())));
        }
        items.extend(self.symbols.iter().map(|symbol| symbol.to_sexpr(hide_style)));

        Sexpr::list(items)
    }
}

fn header_value(item: &Sexpr, field: &str) -> Result<String, KiCadError> {
    item.as_list()
        .and_then(|items| items.get(1))
        .and_then(Sexpr::as_text)
        .map(str::to_string)
        .ok_or_else(|| KiCadError::InvalidHeader { field: field.to_string() })
}

impl FromStr for SymbolLib {
    type Err = KiCadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let expr = sexpr::parse(s)?;
        SymbolLib::from_sexpr(&expr)
    }
}

/// KiCad layout, as written by the symbol editor.
impl Display for SymbolLib {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&sexpr::formatter::format_tree(&self.to_sexpr()))
    }
}
