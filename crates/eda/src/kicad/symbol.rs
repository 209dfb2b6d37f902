use sexpr::Sexpr;
use tracing::{trace, warn};
use crate::kicad::{HideStyle, KiCadError};
use crate::kicad::property::Property;

/// A top-level `(symbol "<lib_id>" ...)` entry of a symbol library.
///
/// Symbols are value records; the `with_*`/`renamed` methods return new symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    entry_name: String,
    lib_id: String,
    items: Vec<SymbolItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolItem {
    Property(Property),
    Unit(Unit),
    /// Flags and any other nodes, e.g. `(in_bom yes)`, `(pin_names (offset 0))`, `(extends "R")`.
    Other(Sexpr),
}

/// A nested `(symbol "<entry_name>_<unit>_<style>" ...)` holding graphics and pins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    name: String,
    items: Vec<Sexpr>,
}

impl Unit {
    pub fn name(&self) -> &str {
        &self.name
    }

    fn to_sexpr(&self) -> Sexpr {
        let mut items = vec![Sexpr::atom("symbol"), Sexpr::string(self.name.as_str())];
        items.extend(self.items.iter().cloned());
        Sexpr::list(items)
    }
}

impl Symbol {
    pub fn new(lib_id: impl Into<String>) -> Self {
        let lib_id = lib_id.into();
        Self {
            entry_name: entry_name_of(&lib_id).to_string(),
            lib_id,
            items: vec![],
        }
    }

    /// The symbol's name within its library, i.e. the lib-id without a `nickname:` prefix.
    pub fn entry_name(&self) -> &str {
        &self.entry_name
    }

    pub fn lib_id(&self) -> &str {
        &self.lib_id
    }

    pub fn items(&self) -> &[SymbolItem] {
        &self.items
    }

    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.items.iter().filter_map(|item| match item {
            SymbolItem::Property(property) => Some(property),
            _ => None,
        })
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.items.iter().filter_map(|item| match item {
            SymbolItem::Unit(unit) => Some(unit),
            _ => None,
        })
    }

    pub fn find_property(&self, key: &str) -> Option<&Property> {
        self.properties().find(|property| property.key() == key)
    }

    /// Parent symbol name from an `(extends "<name>")` node, if any.
    pub fn extends(&self) -> Option<&str> {
        self.items.iter().find_map(|item| match item {
            SymbolItem::Other(node) if node.is_tagged("extends") => node.as_list()?.get(1)?.as_text(),
            _ => None,
        })
    }

    /// A copy of this symbol named `name`.
    ///
    /// The lib-id has its first occurrence of the current entry name replaced with `name`, and
    /// units named `<entry_name>_<unit>_<style>` are renamed to `<name>_<unit>_<style>`.
    /// The first occurrence is not always the entry name itself, e.g. the `R` in `Resistors:R`;
    /// that case is logged as a warning.
    pub fn renamed(&self, name: &str) -> Symbol {
        let old_name = self.entry_name.as_str();
        let unit_prefix = format!("{}_", old_name);

        if self.lib_id.find(old_name) != self.lib_id.len().checked_sub(old_name.len()) {
            warn!("Symbol name occurs in the library nickname, the nickname is renamed. lib_id: '{}', from: '{}', to: '{}'", self.lib_id, old_name, name);
        }

        let items = self.items.iter().map(|item| match item {
            SymbolItem::Unit(unit) => {
                let unit_name = match unit.name.strip_prefix(&unit_prefix) {
                    Some(suffix) => format!("{}_{}", name, suffix),
                    None => unit.name.clone(),
                };
                SymbolItem::Unit(Unit { name: unit_name, items: unit.items.clone() })
            },
            other => other.clone(),
        }).collect();

        let lib_id = self.lib_id.replacen(old_name, name, 1);
        trace!("Renamed symbol. from: '{}', to: '{}', lib_id: '{}'", self.lib_id, name, lib_id);

        Symbol {
            entry_name: name.to_string(),
            lib_id,
            items,
        }
    }

    /// Sets the value of the property `key`, appending a new property when there is none.
    ///
    /// When `hide` is set the property ends up hidden; otherwise the visibility of an existing
    /// property is left as it was and a new property is visible.
    pub fn with_property(mut self, key: &str, value: &str, hide: bool) -> Symbol {
        let existing = self.items.iter_mut().find_map(|item| match item {
            SymbolItem::Property(property) if property.key() == key => Some(property),
            _ => None,
        });

        match existing {
            Some(property) => {
                let mut updated = property.clone().with_value(value);
                if hide {
                    updated = updated.with_hidden(true);
                }
                *property = updated;
            },
            None => {
                let mut property = Property::new(key, value).with_hidden(hide);
                if let Some(id) = self.next_property_id() {
                    property = property.with_id(id);
                }

                let index = self.property_insertion_index();
                self.items.insert(index, SymbolItem::Property(property));
            }
        }

        self
    }

    /// Hides the property `key`, if the symbol has one.
    pub fn with_hidden_property(mut self, key: &str) -> Symbol {
        for item in self.items.iter_mut() {
            if let SymbolItem::Property(property) = item {
                if property.key() == key && !property.is_hidden() {
                    *property = property.clone().with_hidden(true);
                }
            }
        }
        self
    }

    /// KiCad 6 libraries number their properties; continue the numbering if this symbol does.
    fn next_property_id(&self) -> Option<i64> {
        self.properties()
            .filter_map(Property::id)
            .max()
            .map(|id| id + 1)
    }

    /// After the last property, or else before the first unit, or else at the end.
    fn property_insertion_index(&self) -> usize {
        let last_property = self.items.iter()
            .rposition(|item| matches!(item, SymbolItem::Property(_)));

        match last_property {
            Some(index) => index + 1,
            None => self.items.iter()
                .position(|item| matches!(item, SymbolItem::Unit(_)))
                .unwrap_or(self.items.len()),
        }
    }

    pub fn from_sexpr(items: &[Sexpr]) -> Result<Self, KiCadError> {
        let lib_id = items.get(1)
            .and_then(Sexpr::as_text)
            .ok_or(KiCadError::MissingSymbolName)?;

        let mut symbol = Symbol::new(lib_id);

        for item in items.iter().skip(2) {
            let symbol_item = match item.tag() {
                Some("property") => {
                    let property = item.as_list()
                        .and_then(Property::from_sexpr)
                        .ok_or_else(|| KiCadError::InvalidProperty { symbol: lib_id.to_string(), property: item.to_string() })?;
                    SymbolItem::Property(property)
                },
                Some("symbol") => {
                    let unit_items = item.as_list().unwrap_or_default();
                    let name = unit_items.get(1)
                        .and_then(Sexpr::as_text)
                        .ok_or(KiCadError::MissingSymbolName)?;
                    SymbolItem::Unit(Unit { name: name.to_string(), items: unit_items[2..].to_vec() })
                },
                _ => SymbolItem::Other(item.clone()),
            };
            symbol.items.push(symbol_item);
        }

        Ok(symbol)
    }

    pub fn to_sexpr(&self, hide_style: HideStyle) -> Sexpr {
        let mut items = vec![Sexpr::atom("symbol"), Sexpr::string(self.lib_id.as_str())];
        items.extend(self.items.iter().map(|item| match item {
            SymbolItem::Property(property) => property.to_sexpr(hide_style),
            SymbolItem::Unit(unit) => unit.to_sexpr(),
            SymbolItem::Other(node) => node.clone(),
        }));
        Sexpr::list(items)
    }
}

fn entry_name_of(lib_id: &str) -> &str {
    match lib_id.split_once(':') {
        Some((_nickname, entry_name)) => entry_name,
        None => lib_id,
    }
}
