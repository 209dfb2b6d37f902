use tracing::{info, warn, Level};
use std::path::Path;
use anyhow::{Context, Error};
use csv::Trim;
use tracing::trace;
use part_generator::input_row::{InputRow, PART_FIELD, SYMBOL_FIELD};
use crate::csv::PartRowRecord;

#[tracing::instrument(level = Level::DEBUG)]
pub fn load_rows(parts_source: &Path) -> Result<Vec<InputRow>, Error> {
    info!("Loading parts. source: '{}'", parts_source.display());

    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(Trim::Headers)
        .from_path(parts_source)
        .with_context(|| format!("Error reading parts. file: {}", parts_source.display()))?;

    let headers = csv_reader.headers()
        .with_context(|| format!("Error reading parts header. file: {}", parts_source.display()))?
        .clone();

    for required in [SYMBOL_FIELD, PART_FIELD] {
        if !headers.iter().any(|header| header == required) {
            warn!("Parts file has no '{}' column, every row will be skipped. file: {}", required, parts_source.display());
        }
    }

    let mut rows: Vec<InputRow> = vec![];

    for result in csv_reader.deserialize() {
        let record: PartRowRecord = result
            .with_context(|| "Deserializing part row record".to_string())?;

        trace!("{:?}", record);

        rows.push(record.build_input_row());
    }
    Ok(rows)
}
