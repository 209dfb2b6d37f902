use indexmap::IndexMap;
use part_generator::input_row::InputRow;

/// A row of the parts file.
///
/// Only `Symbol`, `Part` and the known property columns are used; any other columns are
/// carried along but ignored by the generator.
#[derive(Debug, serde::Deserialize)]
pub struct PartRowRecord(IndexMap<String, String>);

impl PartRowRecord {
    pub fn build_input_row(self) -> InputRow {
        InputRow::new(self.0)
    }
}
