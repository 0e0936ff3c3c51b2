//! Final case assembly.
//!
//! Combines the normalized record, the questionnaire answers, and the
//! resolved outbreak into the record shape the registry accepts. This is
//! where raw SINAN codes become registry reference values.

use godata_model::{Address, Age, Document, GoDataCase, QuestionnaireAnswers, SinanCase};

use crate::datetime;
use crate::translation::TranslationRegistry;

/// Assembles one uploadable case, stamping `updatedAt` with the current
/// time. The processing timestamp carried by the intermediate record is a
/// different instant with a different meaning and is left untouched.
pub fn assemble_case(
    case: &SinanCase,
    answers: QuestionnaireAnswers,
    outbreak_id: &str,
    disease: &str,
    translations: &TranslationRegistry,
) -> GoDataCase {
    assemble_case_at(
        case,
        answers,
        outbreak_id,
        disease,
        translations,
        datetime::now_timestamp(),
    )
}

fn assemble_case_at(
    case: &SinanCase,
    answers: QuestionnaireAnswers,
    outbreak_id: &str,
    disease: &str,
    translations: &TranslationRegistry,
    updated_at: String,
) -> GoDataCase {
    let mut target = GoDataCase::with_defaults(&case.visual_id, outbreak_id);

    target.first_name = case.patient_name.clone();
    target.gender = translations.translate("gender", &case.sex);
    target.pregnancy_status = translations.translate("pregnancy_status", &case.pregnancy);
    target.age = case.age_years.map(Age::years);
    target.dob = case.birth_date.clone();

    target.documents = case
        .document_number
        .as_ref()
        .map(|number| {
            vec![Document {
                doc_type: translations.translate("document_type", "CNS"),
                number: number.clone(),
            }]
        })
        .unwrap_or_default();

    target.addresses = vec![residence_address(case, translations)];

    target.classification = translations.translate(
        &format!("{disease}_case_classification"),
        &case.classification_code,
    );
    target.outcome_id = translations.translate(&format!("{disease}_outcome"), &case.outcome_code);

    // Reporting date is required by the registry; rows notified without one
    // fall back to the assembly timestamp.
    target.date_of_reporting = case
        .notification_date
        .clone()
        .unwrap_or_else(|| updated_at.clone());
    target.date_of_onset = case.onset_date.clone();
    target.updated_at = updated_at;
    target.questionnaire_answers = answers;

    target
}

fn residence_address(case: &SinanCase, translations: &TranslationRegistry) -> Address {
    let residence = &case.residence;
    let mut address = Address::of_type(translations.translate("address_type", "Endereço Atual"));
    if !residence.address_line.is_empty() {
        address.address_line1 = Some(residence.address_line.clone());
    }
    if !residence.postal_code.is_empty() {
        address.postal_code = Some(residence.postal_code.clone());
    }
    address.location_id = residence.location_id.clone();
    address.phone_number = case.phone.clone();
    address
}

#[cfg(test)]
mod tests {
    use super::*;
    use godata_model::Residence;

    use crate::disease;
    use crate::translation::TranslationRegistry;

    fn translations() -> TranslationRegistry {
        let mut translations = TranslationRegistry::with_builtins();
        disease::DiseaseRegistry::load(disease::builtin_descriptors(), &mut translations);
        translations
    }

    fn sinan_case() -> SinanCase {
        SinanCase {
            visual_id: "1001".to_string(),
            patient_name: "Paciente Anônimo".to_string(),
            sex: "M".to_string(),
            pregnancy: "".to_string(),
            birth_date: Some("1990-01-01T00:00:00.000Z".to_string()),
            age_years: Some(34),
            phone: Some("(47)3333-0000".to_string()),
            document_number: None,
            residence: Residence {
                neighborhood: "Centro".to_string(),
                street: "Rua XV".to_string(),
                number: "100".to_string(),
                complement: String::new(),
                address_line: "Centro, Rua XV, 100".to_string(),
                postal_code: "89010-000".to_string(),
                location_id: Some("loc-blumenau".to_string()),
            },
            outcome_code: "1".to_string(),
            classification_code: "1".to_string(),
            onset_date: Some("2024-01-02T00:00:00.000Z".to_string()),
            notification_date: Some("2024-01-05T00:00:00.000Z".to_string()),
            processed_at: "2024-06-01T12:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn assembles_translated_case() {
        let case = sinan_case();
        let target = assemble_case_at(
            &case,
            QuestionnaireAnswers::new(),
            "ob-1",
            "sarampo",
            &translations(),
            "2024-06-01T15:00:00.000Z".to_string(),
        );
        assert_eq!(target.visual_id, "1001");
        assert_eq!(target.outbreak_id, "ob-1");
        assert_eq!(target.gender, "LNG_REFERENCE_DATA_CATEGORY_GENDER_MALE");
        assert_eq!(
            target.pregnancy_status,
            "LNG_REFERENCE_DATA_CATEGORY_PREGNANCY_STATUS_NONE"
        );
        assert_eq!(target.classification, "SARAMPO");
        assert_eq!(target.outcome_id, "CURA");
        assert_eq!(target.date_of_reporting, "2024-01-05T00:00:00.000Z");
        assert_eq!(target.updated_at, "2024-06-01T15:00:00.000Z");
        assert!(target.documents.is_empty());
        let address = &target.addresses[0];
        assert_eq!(
            address.type_id,
            "LNG_REFERENCE_DATA_CATEGORY_ADDRESS_TYPE_USUAL_PLACE_OF_RESIDENCE"
        );
        assert_eq!(address.address_line1.as_deref(), Some("Centro, Rua XV, 100"));
        assert_eq!(address.location_id.as_deref(), Some("loc-blumenau"));
        // Registry defaults stay present.
        assert!(target.active);
        assert!(target.vaccines_received.is_empty());
    }

    #[test]
    fn document_list_built_only_when_number_exists() {
        let mut case = sinan_case();
        case.document_number = Some("700000000000000".to_string());
        let target = assemble_case_at(
            &case,
            QuestionnaireAnswers::new(),
            "ob-1",
            "sarampo",
            &translations(),
            "2024-06-01T15:00:00.000Z".to_string(),
        );
        assert_eq!(target.documents.len(), 1);
        assert_eq!(
            target.documents[0].doc_type,
            "LNG_REFERENCE_DATA_CATEGORY_DOCUMENT_TYPE_CNS"
        );
        assert_eq!(target.documents[0].number, "700000000000000");
    }

    #[test]
    fn missing_reporting_date_falls_back_to_assembly_time() {
        let mut case = sinan_case();
        case.notification_date = None;
        let target = assemble_case_at(
            &case,
            QuestionnaireAnswers::new(),
            "ob-1",
            "sarampo",
            &translations(),
            "2024-06-01T15:00:00.000Z".to_string(),
        );
        assert_eq!(target.date_of_reporting, "2024-06-01T15:00:00.000Z");
    }
}
