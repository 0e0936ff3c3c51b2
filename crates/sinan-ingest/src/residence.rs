use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use tracing::info;

const CODE_COLUMN: &str = "ID_MN_RESI";
const MUNICIPALITY_COLUMN: &str = "MUNICIPIO RESI";
const STATE_COLUMN: &str = "UF RESI";

/// Reference dictionary mapping residence-municipality codes to the
/// human-readable municipality and state names used by the location tree.
///
/// Loaded once per run. Lookups are total: unknown codes resolve to the
/// empty string, never an error.
#[derive(Debug, Clone, Default)]
pub struct ResidenceDictionary {
    municipalities: HashMap<String, String>,
    states: HashMap<String, String>,
}

impl ResidenceDictionary {
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("open residence dictionary {}", path.display()))?;

        let headers: Vec<String> = reader
            .headers()
            .context("read residence dictionary headers")?
            .iter()
            .map(|h| h.trim().trim_matches('\u{feff}').to_uppercase())
            .collect();

        let position = |name: &str| headers.iter().position(|h| h == name);
        let (Some(code), Some(municipality), Some(state)) = (
            position(CODE_COLUMN),
            position(MUNICIPALITY_COLUMN),
            position(STATE_COLUMN),
        ) else {
            bail!(
                "residence dictionary {} is missing one of {CODE_COLUMN}, \
                 {MUNICIPALITY_COLUMN}, {STATE_COLUMN}",
                path.display()
            );
        };

        let mut dictionary = Self::default();
        for record in reader.records() {
            let record = record.context("read residence dictionary record")?;
            let key = record.get(code).unwrap_or("").trim();
            if key.is_empty() {
                continue;
            }
            dictionary.insert(
                key,
                record.get(municipality).unwrap_or("").trim(),
                record.get(state).unwrap_or("").trim(),
            );
        }

        info!(entries = dictionary.municipalities.len(), "residence dictionary loaded");
        Ok(dictionary)
    }

    pub fn insert(&mut self, code: &str, municipality: &str, state: &str) {
        self.municipalities
            .entry(code.to_string())
            .or_insert_with(|| municipality.to_string());
        self.states
            .entry(code.to_string())
            .or_insert_with(|| state.to_string());
    }

    /// Municipality name for a residence code, empty when unknown.
    pub fn municipality(&self, code: &str) -> &str {
        self.municipalities.get(code).map_or("", String::as_str)
    }

    /// State name for a residence code, empty when unknown.
    pub fn state(&self, code: &str) -> &str {
        self.states.get(code).map_or("", String::as_str)
    }

    /// Both names at once, in (state, municipality) order.
    pub fn names(&self, code: &str) -> (&str, &str) {
        (self.state(code), self.municipality(code))
    }
}
