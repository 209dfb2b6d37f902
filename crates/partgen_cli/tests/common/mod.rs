use std::path::Path;
use csv::QuoteStyle;
use indoc::indoc;

pub const BASE_LIBRARY: &str = indoc! {r#"
    (kicad_symbol_lib
        (version 20231120)
        (generator "kicad_symbol_editor")
        (symbol "R0603"
            (property "Reference" "R" (at 2.032 0 90) (effects (font (size 1.27 1.27))))
            (property "Value" "R0603" (at 0 0 90) (effects (font (size 1.27 1.27))))
            (property "Footprint" "" (at -1.778 0 90) (effects (font (size 1.27 1.27)) hide))
            (symbol "R0603_0_1"
                (rectangle (start -1.016 -2.54) (end 1.016 2.54) (stroke (width 0.254) (type default)) (fill (type none)))
            )
        )
        (symbol "C0603"
            (property "Reference" "C" (at 0.635 2.54 0) (effects (font (size 1.27 1.27))))
            (property "Value" "C0603" (at 0.635 -2.54 0) (effects (font (size 1.27 1.27))))
        )
    )
"#};

#[derive(Debug, Default, serde::Serialize)]
#[serde(rename_all(serialize = "PascalCase"))]
pub struct TestPartRecord {
    pub symbol: String,
    pub part: String,
    pub value: String,
    pub footprint: String,
    pub brand: String,
}

impl TestPartRecord {
    pub fn new(symbol: &str, part: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            part: part.to_string(),
            ..Default::default()
        }
    }

    pub fn with_value(self, value: &str) -> Self {
        Self { value: value.to_string(), ..self }
    }

    pub fn with_footprint(self, footprint: &str) -> Self {
        Self { footprint: footprint.to_string(), ..self }
    }

    pub fn with_brand(self, brand: &str) -> Self {
        Self { brand: brand.to_string(), ..self }
    }
}

pub fn write_parts(path: &Path, records: &[TestPartRecord]) -> Result<(), std::io::Error> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_path(path)?;

    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;

    Ok(())
}
