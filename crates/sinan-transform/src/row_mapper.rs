//! Raw notification row → normalized [`SinanCase`].
//!
//! One row in, one record out. Per-field defaults cover absent or blank
//! columns; an error here fails only the offending row (the batch loop in
//! [`crate::import`] logs and skips it).

use godata_model::{Residence, SinanCase};
use sinan_ingest::{ResidenceDictionary, Row};
use tracing::warn;

use crate::datetime;
use crate::error::{Result, TransformError};
use crate::location::LocationIndex;
use crate::preprocess::AGE_COLUMN;

/// Natural-key column; rows with a blank value are dropped before mapping.
pub const VISUAL_ID_COLUMN: &str = "NU_NOTIFIC";

/// Column holding the IBGE residence-municipality code.
const RESIDENCE_CODE_COLUMN: &str = "ID_MN_RESI";

/// Placeholder for notifications without a patient name.
const DEFAULT_PATIENT_NAME: &str = "Paciente Anônimo";

/// Converts one row. The caller has already checked the natural key.
pub fn map_row(
    row: Row<'_>,
    dictionary: &ResidenceDictionary,
    locations: &LocationIndex,
    processed_at: &str,
) -> Result<SinanCase> {
    let visual_id = row
        .non_blank(VISUAL_ID_COLUMN)
        .ok_or_else(|| TransformError::RowMapping {
            row: row.index() + 1,
            reason: "blank notification number".to_string(),
        })?;

    let patient_name = match row.non_blank("NM_PACIENT") {
        Some(name) => name.to_string(),
        None => DEFAULT_PATIENT_NAME.to_string(),
    };

    let age_years = match row.non_blank(AGE_COLUMN) {
        Some(raw) => Some(
            raw.parse::<i64>()
                .map_err(|_| TransformError::RowMapping {
                    row: row.index() + 1,
                    reason: format!("invalid age {raw:?}"),
                })?,
        ),
        None => None,
    };

    Ok(SinanCase {
        visual_id: visual_id.to_string(),
        patient_name,
        sex: row.value("CS_SEXO").to_string(),
        pregnancy: row.value("CS_GESTANT").to_string(),
        birth_date: optional_date(row, "DT_NASC")?,
        age_years,
        phone: row.non_blank("NU_TELEFON").map(str::to_string),
        document_number: row.non_blank("ID_CNS_SUS").map(str::to_string),
        residence: map_residence(row, dictionary, locations),
        outcome_code: row.value("EVOLUCAO").to_string(),
        classification_code: row.value("CLASS_FIN").to_string(),
        onset_date: optional_date(row, "DT_SIN_PRI")?,
        notification_date: optional_date(row, "DT_NOTIFIC")?,
        processed_at: processed_at.to_string(),
    })
}

fn optional_date(row: Row<'_>, column: &str) -> Result<Option<String>> {
    row.non_blank(column).map(datetime::to_iso_utc).transpose()
}

fn map_residence(
    row: Row<'_>,
    dictionary: &ResidenceDictionary,
    locations: &LocationIndex,
) -> Residence {
    let neighborhood = row.value("NM_BAIRRO").to_string();
    let street = row.value("NM_LOGRADO").to_string();
    let number = row.value("NU_NUMERO").to_string();
    let complement = row.value("NM_COMPLEM").to_string();

    let address_line = [
        neighborhood.as_str(),
        street.as_str(),
        number.as_str(),
        complement.as_str(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(", ");

    let location_id = row.non_blank(RESIDENCE_CODE_COLUMN).and_then(|code| {
        let (state, municipality) = dictionary.names(code);
        if state.is_empty() || municipality.is_empty() {
            warn!(code, "residence code not in reference dictionary");
            return None;
        }
        locations.resolve(state, municipality).map(str::to_string)
    });

    Residence {
        neighborhood,
        street,
        number,
        complement,
        address_line,
        postal_code: row.value("NU_CEP").to_string(),
        location_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use godata_model::LocationNode;
    use sinan_ingest::CaseTable;

    fn table(headers: &[&str], rows: &[&[&str]]) -> CaseTable {
        CaseTable::from_rows(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn dictionary() -> ResidenceDictionary {
        let mut dictionary = ResidenceDictionary::default();
        dictionary.insert("355030", "São Paulo", "São Paulo");
        dictionary
    }

    fn locations() -> LocationIndex {
        let state = LocationNode::new("loc-sp", "São Paulo")
            .with_children(vec![LocationNode::new("loc-sp-city", "São Paulo")]);
        LocationIndex::new(LocationNode::new("loc-br", "Brasil").with_children(vec![state]))
    }

    const PROCESSED_AT: &str = "2024-06-01T12:00:00.000Z";

    #[test]
    fn maps_a_complete_row() {
        let t = table(
            &[
                "NU_NOTIFIC",
                "NM_PACIENT",
                "CS_SEXO",
                "DT_NOTIFIC",
                "ID_MN_RESI",
                "NM_BAIRRO",
                "NM_LOGRADO",
                "NU_NUMERO",
                "IDADE",
            ],
            &[&[
                "1001",
                "Maria dos Santos",
                "F",
                "2024-01-05",
                "355030",
                "Centro",
                "Rua das Flores",
                "42",
                "034",
            ]],
        );
        let case = map_row(t.row(0), &dictionary(), &locations(), PROCESSED_AT).expect("map");
        assert_eq!(case.visual_id, "1001");
        assert_eq!(case.sex, "F");
        assert_eq!(case.age_years, Some(34));
        assert_eq!(
            case.notification_date.as_deref(),
            Some("2024-01-05T00:00:00.000Z")
        );
        assert_eq!(case.residence.address_line, "Centro, Rua das Flores, 42");
        assert_eq!(case.residence.location_id.as_deref(), Some("loc-sp-city"));
        assert_eq!(case.processed_at, PROCESSED_AT);
    }

    #[test]
    fn blank_fields_fall_back_to_defaults() {
        let t = table(&["NU_NOTIFIC", "ID_CNS_SUS"], &[&["1001", ""]]);
        let case = map_row(t.row(0), &dictionary(), &locations(), PROCESSED_AT).expect("map");
        assert_eq!(case.patient_name, DEFAULT_PATIENT_NAME);
        assert_eq!(case.document_number, None);
        assert_eq!(case.age_years, None);
        assert_eq!(case.notification_date, None);
        assert_eq!(case.residence.location_id, None);
        assert_eq!(case.residence.address_line, "");
    }

    #[test]
    fn bad_record_dates_fail_the_row() {
        let t = table(&["NU_NOTIFIC", "DT_NOTIFIC"], &[&["1002", "05/01/2024"]]);
        let error = map_row(t.row(0), &dictionary(), &locations(), PROCESSED_AT)
            .expect_err("slash dates are not a recognized format");
        assert!(matches!(error, TransformError::DateFormat(_)));
    }

    #[test]
    fn unknown_residence_codes_leave_location_unset() {
        let t = table(&["NU_NOTIFIC", "ID_MN_RESI"], &[&["1001", "999999"]]);
        let case = map_row(t.row(0), &dictionary(), &locations(), PROCESSED_AT).expect("map");
        assert_eq!(case.residence.location_id, None);
    }
}
