use std::io::Write;

use indexmap::IndexMap;

use crate::error::GtdbError;

pub const DEFAULT_PREFIXES: &[(&str, &str)] = &[
    ("", "<http://identifiers.org/gtdb/>"),
    ("onto", "<http://identifiers.org/gtdb/onto/>"),
    ("ddbjtax", "<http://ddbj.nig.ac.jp/ontologies/taxonomy/>"),
    ("taxid", "<http://identifiers.org/taxonomy/>"),
    ("biosample", "<http://identifiers.org/biosample/>"),
    ("bioproject", "<http://identifiers.org/bioproject/>"),
    ("gca", "<http://identifiers.org/insdc.gca/>"),
    ("rdf", "<http://www.w3.org/1999/02/22-rdf-syntax-ns#>"),
    ("rdfs", "<http://www.w3.org/2000/01/rdf-schema#>"),
    ("skos", "<http://www.w3.org/2004/02/skos/core#>"),
    ("obo", "<http://purl.obolibrary.org/obo/>"),
    ("dct", "<http://purl.org/dc/terms/>"),
    ("xsd", "<http://www.w3.org/2001/XMLSchema#>"),
    ("ncbigenome", "<http://www.ncbi.nlm.nih.gov/datasets/genome/>"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTable {
    entries: IndexMap<String, String>,
}

impl Default for PrefixTable {
    fn default() -> Self {
        let entries = DEFAULT_PREFIXES
            .iter()
            .map(|(prefix, iri)| (prefix.to_string(), iri.to_string()))
            .collect();
        Self { entries }
    }
}

impl PrefixTable {
    pub fn bind(&mut self, prefix: &str, iri: &str) -> Result<(), GtdbError> {
        let trimmed = iri.trim();
        let bare = trimmed
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
            .unwrap_or(trimmed);
        let is_valid = !bare.is_empty()
            && !bare
                .chars()
                .any(|ch| ch.is_whitespace() || ch == '<' || ch == '>');
        if !is_valid {
            return Err(GtdbError::InvalidNamespace {
                prefix: prefix.to_string(),
                iri: iri.to_string(),
            });
        }
        self.entries.insert(prefix.to_string(), format!("<{bare}>"));
        Ok(())
    }

    pub fn iri(&self, prefix: &str) -> Option<&str> {
        self.entries.get(prefix).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn write<W: Write>(&self, out: &mut W) -> Result<(), GtdbError> {
        for (prefix, iri) in &self.entries {
            writeln!(out, "@prefix {prefix}: {iri} .")
                .map_err(|err| GtdbError::Output(err.to_string()))?;
        }
        writeln!(out).map_err(|err| GtdbError::Output(err.to_string()))?;
        Ok(())
    }
}
