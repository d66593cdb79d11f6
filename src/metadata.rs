use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::str::FromStr;

use crate::columns::{ColumnRule, date_literal, value_literal};
use crate::config::ResolvedConfig;
use crate::error::GtdbError;
use crate::hierarchy::write_hierarchy;
use crate::output::ConversionSummary;
use crate::taxonomy::{TaxonomyAccumulator, encode_spaces, lineage_leaf};
use crate::turtle::{Literal, TurtleWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromStr for Header {
    type Err = GtdbError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let columns = split_fields(line)
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        Ok(Self { columns })
    }
}

// Trailing empty fields are dropped, so a blank line has no fields at all.
pub fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = line
        .trim_end_matches(['\n', '\r'])
        .split('\t')
        .collect::<Vec<_>>();
    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }
    fields
}

fn read_line<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
) -> Result<Option<String>, GtdbError> {
    buf.clear();
    let read = reader
        .read_until(b'\n', buf)
        .map_err(|err| GtdbError::InputRead(err.to_string()))?;
    if read == 0 {
        return Ok(None);
    }
    let line = match String::from_utf8_lossy(&buf[..]) {
        Cow::Borrowed(text) => text.to_string(),
        Cow::Owned(text) => {
            tracing::debug!("replaced invalid UTF-8 in input line");
            text
        }
    };
    Ok(Some(line))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Converted { triples: usize },
    Skipped,
}

#[derive(Debug, Default)]
pub struct MetadataConverter {
    taxonomy: TaxonomyAccumulator,
    rows_converted: usize,
    rows_skipped: usize,
}

impl MetadataConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn convert_row<W: Write>(
        &mut self,
        header: &Header,
        fields: &[&str],
        out: &mut TurtleWriter<W>,
    ) -> Result<RowOutcome, GtdbError> {
        if header.len() != fields.len() || fields.is_empty() {
            self.rows_skipped += 1;
            tracing::debug!(
                expected = header.len(),
                found = fields.len(),
                "skipping row with mismatched column count"
            );
            return Ok(RowOutcome::Skipped);
        }

        let before = out.triples_written();
        let accession = fields[0];
        let subject = format!(":{accession}");
        let assembly = accession.get(3..).unwrap_or("");

        out.triple(&subject, "a", "ddbjtax:Taxon")?;
        out.triple(&subject, "ddbjtax:rank", ":Strain")?;
        out.triple(&subject, "rdfs:seeAlso", format!("ncbigenome:{assembly}"))?;
        out.triple(&subject, "rdfs:seeAlso", format!("gca:{assembly}"))?;

        for (column, value) in header.columns().iter().zip(fields).skip(1) {
            let predicate = format!("onto:{column}");
            match ColumnRule::for_column(column) {
                ColumnRule::Taxonomy => {
                    self.taxonomy.record(value);
                    let parent = encode_spaces(lineage_leaf(value));
                    out.triple(&subject, "rdfs:subClassOf", format!(":{parent}"))?;
                    out.triple(&subject, &predicate, &Literal::Plain(value.to_string()))?;
                }
                ColumnRule::CrossReference(namespace) => {
                    out.triple(&subject, &predicate, &Literal::Plain(value.to_string()))?;
                    out.triple(&subject, "rdfs:seeAlso", format!("{namespace}:{value}"))?;
                }
                ColumnRule::Date => {
                    out.triple(&subject, &predicate, &date_literal(value))?;
                }
                ColumnRule::Value => {
                    out.triple(&subject, &predicate, &value_literal(value))?;
                }
            }
        }

        self.rows_converted += 1;
        Ok(RowOutcome::Converted {
            triples: out.triples_written() - before,
        })
    }

    pub fn finish<W: Write, D: Write>(
        self,
        out: &mut TurtleWriter<W>,
        diagnostics: &mut D,
    ) -> Result<ConversionSummary, GtdbError> {
        let tree = self.taxonomy.build_tree();
        let report = write_hierarchy(&tree, out, diagnostics)?;
        Ok(ConversionSummary {
            rows_converted: self.rows_converted,
            rows_skipped: self.rows_skipped,
            lineages: self.taxonomy.len(),
            taxa: report.taxa,
            triples: out.triples_written(),
            warnings: report.warnings.iter().map(ToString::to_string).collect(),
        })
    }
}

pub fn convert_reader<R: BufRead, W: Write, D: Write>(
    mut reader: R,
    source: &str,
    config: &ResolvedConfig,
    out: W,
    diagnostics: &mut D,
) -> Result<ConversionSummary, GtdbError> {
    let mut buf = Vec::new();
    let header_line = read_line(&mut reader, &mut buf)?
        .ok_or_else(|| GtdbError::MissingHeader(source.to_string()))?;
    let header: Header = header_line.parse()?;

    let mut out = out;
    if config.emit_prefixes {
        config.prefix_table.write(&mut out)?;
    }
    let mut out = TurtleWriter::new(out);

    let mut converter = MetadataConverter::new();
    while let Some(line) = read_line(&mut reader, &mut buf)? {
        converter.convert_row(&header, &split_fields(&line), &mut out)?;
    }

    let summary = converter.finish(&mut out, diagnostics)?;
    out.flush()?;
    tracing::info!(
        source,
        rows = summary.rows_converted,
        skipped = summary.rows_skipped,
        taxa = summary.taxa,
        "conversion finished"
    );
    Ok(summary)
}

pub fn convert_file<W: Write, D: Write>(
    path: &Path,
    config: &ResolvedConfig,
    out: W,
    diagnostics: &mut D,
) -> Result<ConversionSummary, GtdbError> {
    let file = File::open(path).map_err(|err| GtdbError::InputOpen {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    let source = path.display().to_string();
    convert_reader(BufReader::new(file), &source, config, out, diagnostics)
}
