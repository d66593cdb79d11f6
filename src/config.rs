use std::fs;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::GtdbError;
use crate::prefixes::PrefixTable;

pub const DEFAULT_CONFIG_FILE: &str = "gtdb-rdf.json";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub prefixes: Option<bool>,
    #[serde(default)]
    pub namespaces: IndexMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub emit_prefixes: bool,
    pub prefix_table: PrefixTable,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            emit_prefixes: false,
            prefix_table: PrefixTable::default(),
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, GtdbError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if path.is_none() && !config_path.exists() {
            return Ok(ResolvedConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| GtdbError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| GtdbError::ConfigParse(err.to_string()))?;
        tracing::debug!(path = %config_path.display(), "loaded config");

        Self::resolve_config(config)
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, GtdbError> {
        let mut prefix_table = PrefixTable::default();
        for (prefix, iri) in &config.namespaces {
            prefix_table.bind(prefix, iri)?;
        }
        Ok(ResolvedConfig {
            emit_prefixes: config.prefixes.unwrap_or(false),
            prefix_table,
        })
    }
}
