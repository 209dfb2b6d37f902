use indexmap::IndexMap;

pub const SYMBOL_FIELD: &str = "Symbol";
pub const PART_FIELD: &str = "Part";

/// One row of the parts file, field name to value, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputRow(IndexMap<String, String>);

impl InputRow {
    pub fn new(fields: IndexMap<String, String>) -> Self {
        Self(fields)
    }

    /// The value of `field`, or `None` when the field is absent or blank.
    pub fn field(&self, field: &str) -> Option<&str> {
        self.0.get(field)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn symbol(&self) -> Option<&str> {
        self.field(SYMBOL_FIELD)
    }

    pub fn part(&self) -> Option<&str> {
        self.field(PART_FIELD)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InputRow {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(name, value)| (name.into(), value.into())).collect())
    }
}
