//! Normalized intermediate record for one SINAN notification.
//!
//! Produced once per source row by the row mapper and read (never mutated)
//! by the case assembler. Raw SINAN codes for sex, pregnancy, outcome, and
//! classification stay untranslated here; translation happens at assembly.

use serde::Serialize;

/// Residence address fields extracted from a notification row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Residence {
    pub neighborhood: String,
    pub street: String,
    pub number: String,
    pub complement: String,
    /// Single-line address assembled from the non-blank parts above.
    pub address_line: String,
    pub postal_code: String,
    /// Canonical registry location id, when name resolution succeeded.
    pub location_id: Option<String>,
}

/// One notification, normalized but still carrying source codes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SinanCase {
    /// Natural key (`NU_NOTIFIC`); never empty after mapping.
    pub visual_id: String,
    pub patient_name: String,
    /// Raw `CS_SEXO` code.
    pub sex: String,
    /// Raw `CS_GESTANT` code.
    pub pregnancy: String,
    /// Birth date, normalized to the registry timestamp format.
    pub birth_date: Option<String>,
    pub age_years: Option<i64>,
    pub phone: Option<String>,
    /// CNS document number; `None` when the column is blank, which leaves
    /// the assembled document list empty.
    pub document_number: Option<String>,
    pub residence: Residence,
    /// Raw `EVOLUCAO` code.
    pub outcome_code: String,
    /// Raw `CLASS_FIN` code.
    pub classification_code: String,
    pub onset_date: Option<String>,
    pub notification_date: Option<String>,
    /// When this run processed the row (distinct from the upload timestamp
    /// stamped at assembly time).
    pub processed_at: String,
}
