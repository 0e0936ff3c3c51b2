//! Batch conversion: preprocessed table → uploadable cases.
//!
//! Row-granular failure isolation lives here: rows without a natural key
//! are dropped before mapping, rows that fail mapping are logged and
//! skipped, and every surviving row yields exactly one assembled case.

use godata_model::GoDataCase;
use sinan_ingest::{CaseTable, ResidenceDictionary};
use tracing::{info, warn};

use crate::assembler::assemble_case;
use crate::disease::DiseaseModule;
use crate::location::LocationIndex;
use crate::questionnaire::map_questionnaire;
use crate::row_mapper::{VISUAL_ID_COLUMN, map_row};
use crate::translation::TranslationRegistry;

/// Converts every mappable row into an assembled case for `outbreak_id`.
pub fn build_cases(
    table: &CaseTable,
    dictionary: &ResidenceDictionary,
    locations: &LocationIndex,
    module: &DiseaseModule,
    translations: &TranslationRegistry,
    outbreak_id: &str,
    processed_at: &str,
) -> Vec<GoDataCase> {
    let mut cases = Vec::with_capacity(table.len());
    let mut dropped = 0usize;

    for row in table.iter() {
        if row.non_blank(VISUAL_ID_COLUMN).is_none() {
            dropped += 1;
            continue;
        }
        match map_row(row, dictionary, locations, processed_at) {
            Ok(record) => {
                let answers = map_questionnaire(row, module, dictionary);
                cases.push(assemble_case(
                    &record,
                    answers,
                    outbreak_id,
                    &module.name,
                    translations,
                ));
            }
            Err(error) => {
                warn!(row = row.index() + 1, %error, "row skipped");
            }
        }
    }

    if dropped > 0 {
        warn!(rows = dropped, "rows without a notification number dropped");
    }
    info!(cases = cases.len(), rows = table.len(), "rows converted");
    cases
}
