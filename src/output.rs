use std::io::{self, Write};

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionSummary {
    pub rows_converted: usize,
    pub rows_skipped: usize,
    pub lineages: usize,
    pub taxa: usize,
    pub triples: usize,
    pub warnings: Vec<String>,
}

pub struct JsonSummary;

impl JsonSummary {
    pub fn print(summary: &ConversionSummary) -> io::Result<()> {
        Self::write(&mut io::stderr().lock(), summary)
    }

    pub fn write<W: Write>(out: &mut W, summary: &ConversionSummary) -> io::Result<()> {
        let json = serde_json::to_string_pretty(summary).map_err(io::Error::other)?;
        out.write_all(json.as_bytes())?;
        out.write_all(b"\n")?;
        Ok(())
    }
}
