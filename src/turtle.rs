use std::fmt;
use std::io::Write;

use crate::error::GtdbError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Plain(String),
    LongString(String),
    Date(String),
    Numeric(String),
}

impl Literal {
    pub fn string(value: &str) -> Self {
        if value.contains('"') {
            Literal::LongString(value.to_string())
        } else {
            Literal::Plain(value.to_string())
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Plain(value) => write!(f, "\"{value}\""),
            Literal::LongString(value) => write!(f, "'''{value}'''"),
            Literal::Date(value) => write!(f, "\"{value}\"^^xsd:date"),
            Literal::Numeric(value) => write!(f, "{value}"),
        }
    }
}

pub struct TurtleWriter<W: Write> {
    inner: W,
    triples: usize,
}

impl<W: Write> TurtleWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, triples: 0 }
    }

    pub fn triple(
        &mut self,
        subject: &str,
        predicate: &str,
        object: impl fmt::Display,
    ) -> Result<(), GtdbError> {
        writeln!(self.inner, "{subject}\t{predicate}\t{object} .")
            .map_err(|err| GtdbError::Output(err.to_string()))?;
        self.triples += 1;
        Ok(())
    }

    pub fn triples_written(&self) -> usize {
        self.triples
    }

    pub fn flush(&mut self) -> Result<(), GtdbError> {
        self.inner
            .flush()
            .map_err(|err| GtdbError::Output(err.to_string()))
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
