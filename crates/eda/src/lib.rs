pub mod kicad;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdaTool {
    KiCad,
}

impl EdaTool {
    /// File extension of the tool's symbol library files.
    pub fn symbol_library_extension(&self) -> &'static str {
        match self {
            EdaTool::KiCad => "kicad_sym",
        }
    }
}
