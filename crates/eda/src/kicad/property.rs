use sexpr::{kv, Sexpr};
use crate::kicad::HideStyle;

pub const DEFAULT_FONT_SIZE: &str = "1.27";

/// A `(property "<key>" "<value>" ...)` node of a symbol.
///
/// Visibility is tracked separately from the rest of the node; attributes other than the
/// key and value (`id`, `at`, font, justification, ...) are kept as they were read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    key: String,
    value: String,
    hidden: bool,
    attributes: Vec<Sexpr>,
    effects: Option<Vec<Sexpr>>,
}

impl Property {
    /// A property placed at the symbol origin with the default font.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            hidden: false,
            attributes: vec![
                Sexpr::list(vec![Sexpr::atom("at"), Sexpr::atom("0"), Sexpr::atom("0"), Sexpr::atom("0")]),
            ],
            effects: Some(vec![default_font()]),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// The KiCad 6 `(id N)` attribute, if present.
    pub fn id(&self) -> Option<i64> {
        self.attributes.iter()
            .find(|attribute| attribute.is_tagged("id"))
            .and_then(|attribute| attribute.as_list()?.get(1)?.as_atom()?.parse().ok())
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.attributes.retain(|attribute| !attribute.is_tagged("id"));
        self.attributes.insert(0, kv("id", Sexpr::atom(id.to_string())));
        self
    }

    /// Returns `None` unless `items` is a `(property <key> <value> ...)` list.
    pub fn from_sexpr(items: &[Sexpr]) -> Option<Self> {
        if items.first()?.as_atom()? != "property" {
            return None
        }
        let key = items.get(1)?.as_text()?.to_string();
        let value = items.get(2)?.as_text()?.to_string();

        let mut hidden = false;
        let mut attributes = vec![];
        let mut effects = None;

        for item in items.iter().skip(3) {
            if let Some(flag) = hide_flag(item) {
                hidden = flag;
            } else if item.is_tagged("effects") {
                let mut children = vec![];
                for child in item.as_list().unwrap_or_default().iter().skip(1) {
                    match hide_flag(child) {
                        Some(flag) => hidden = flag,
                        None => children.push(child.clone()),
                    }
                }
                effects = Some(children);
            } else {
                attributes.push(item.clone());
            }
        }

        Some(Self { key, value, hidden, attributes, effects })
    }

    pub fn to_sexpr(&self, hide_style: HideStyle) -> Sexpr {
        let mut items = vec![
            Sexpr::atom("property"),
            Sexpr::string(self.key.as_str()),
            Sexpr::string(self.value.as_str()),
        ];
        items.extend(self.attributes.iter().cloned());

        let effects = match (&self.effects, self.hidden) {
            (Some(children), _) => Some(children.clone()),
            (None, true) => Some(vec![default_font()]),
            (None, false) => None,
        };

        if let Some(mut children) = effects {
            if self.hidden {
                children.push(match hide_style {
                    HideStyle::Flag => Sexpr::atom("hide"),
                    HideStyle::List => kv("hide", Sexpr::atom("yes")),
                });
            }
            let mut effects_items = vec![Sexpr::atom("effects")];
            effects_items.extend(children);
            items.push(Sexpr::list(effects_items));
        }

        Sexpr::list(items)
    }
}

/// Recognises a bare `hide` atom (KiCad 6/7) and a `(hide yes|no)` list (KiCad 8+).
fn hide_flag(item: &Sexpr) -> Option<bool> {
    match item {
        Sexpr::Atom(value) if value == "hide" => Some(true),
        Sexpr::List(items) if item.is_tagged("hide") => {
            match items.get(1).and_then(Sexpr::as_atom) {
                Some("no") => Some(false),
                _ => Some(true),
            }
        },
        _ => None,
    }
}

fn default_font() -> Sexpr {
    Sexpr::list(vec![
        Sexpr::atom("font"),
        Sexpr::list(vec![Sexpr::atom("size"), Sexpr::atom(DEFAULT_FONT_SIZE), Sexpr::atom(DEFAULT_FONT_SIZE)]),
    ])
}
