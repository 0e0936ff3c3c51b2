//! Table preprocessing: missing-value sentinels and anonymization.

use chrono::NaiveDate;
use sinan_ingest::CaseTable;
use tracing::info;

use crate::datetime;

/// Cell values that mean "missing" in SINAN exports.
const MISSING_SENTINELS: &[&str] = &["NA"];

/// Column holding the patient's birth date.
pub const BIRTH_DATE_COLUMN: &str = "DT_NASC";
/// Column holding the patient age in years, derived here when anonymizing.
pub const AGE_COLUMN: &str = "IDADE";

/// Placeholder values written over personally identifying columns.
const PII_PLACEHOLDERS: &[(&str, &str)] = &[
    ("NM_PACIENT", "Paciente Anônimo"),
    ("NU_CEP", "00000-000"),
    ("NU_TELEFON", "(00)0000-0000"),
    ("ID_CNS_SUS", "000000000000000"),
    (BIRTH_DATE_COLUMN, "2000-01-01"),
];

/// Normalizes missing values and optionally anonymizes PII columns.
///
/// The first pass collapses missing-value sentinels to the empty string in
/// every cell. The anonymization pass then derives the [`AGE_COLUMN`] from
/// the still-true birth date and only afterwards overwrites the five PII
/// columns with fixed placeholders. The derivation must stay ahead of the
/// overwrite: once the placeholder lands in `DT_NASC`, ages computed from it
/// would all collapse to the placeholder epoch.
pub fn preprocess(table: &mut CaseTable, anonymize: bool, today: NaiveDate) {
    table.map_cells(|cell| {
        MISSING_SENTINELS
            .contains(&cell)
            .then(String::new)
    });

    if !anonymize {
        return;
    }

    info!("anonymizing personally identifying columns");
    derive_age_column(table, today);
    for (column, placeholder) in PII_PLACEHOLDERS {
        table.fill_column(column, placeholder);
    }
}

fn derive_age_column(table: &mut CaseTable, today: NaiveDate) {
    if !table.has_column(BIRTH_DATE_COLUMN) {
        return;
    }
    table.ensure_column(AGE_COLUMN);
    for index in 0..table.len() {
        let Some(birth) = table.get(index, BIRTH_DATE_COLUMN) else {
            continue;
        };
        if birth.is_empty() {
            continue;
        }
        if let Some(age) = datetime::age_on(birth, today) {
            table.set(index, AGE_COLUMN, &age.to_string());
        }
    }
}
