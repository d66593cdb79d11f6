use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum GtdbError {
    #[error("failed to open metadata file {path}: {message}")]
    InputOpen { path: PathBuf, message: String },

    #[error("failed to read metadata input: {0}")]
    InputRead(String),

    #[error("metadata input has no header line: {0}")]
    MissingHeader(String),

    #[error("failed to write turtle output: {0}")]
    Output(String),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("invalid namespace IRI for prefix `{prefix}`: {iri}")]
    InvalidNamespace { prefix: String, iri: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionWarning {
    #[error("Unknown root! found [{}]", .roots.join(", "))]
    UnknownRoot { roots: Vec<String> },

    #[error("Unknown rank! {label}")]
    UnknownRank { label: String },
}
