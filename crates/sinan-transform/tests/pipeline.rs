//! End-to-end transformation tests: table in, uploadable case out.

use chrono::NaiveDate;

use godata_model::{Answer, LocationNode};
use sinan_ingest::{CaseTable, ResidenceDictionary};
use sinan_transform::{
    DiseaseRegistry, LocationIndex, TranslationRegistry, build_cases, disease, preprocess,
};

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
    dictionary.insert("420240", "Blumenau", "Santa Catarina");
    dictionary
}

fn locations() -> LocationIndex {
    let blumenau = LocationNode::new("loc-blumenau", "Blumenau");
    let region = LocationNode::new("loc-vale", "Vale do Itajaí").with_children(vec![blumenau]);
    let state = LocationNode::new("loc-sc", "Santa Catarina").with_children(vec![region]);
    LocationIndex::new(LocationNode::new("loc-br", "Brasil").with_children(vec![state]))
}

fn registries() -> (TranslationRegistry, DiseaseRegistry) {
    let mut translations = TranslationRegistry::with_builtins();
    let diseases = DiseaseRegistry::load(disease::builtin_descriptors(), &mut translations);
    (translations, diseases)
}

const PROCESSED_AT: &str = "2024-06-01T12:00:00.000Z";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("date")
}

#[test]
fn notification_row_becomes_an_uploadable_case() {
    let (translations, diseases) = registries();
    let module = diseases.get("sarampo").expect("sarampo module");

    let mut t = table(
        &["NU_NOTIFIC", "CS_SEXO", "ID_CNS_SUS", "DT_NOTIFIC"],
        &[&["1001", "M", "", "2024-01-05"]],
    );
    preprocess(&mut t, false, today());

    let cases = build_cases(
        &t,
        &dictionary(),
        &locations(),
        module,
        &translations,
        "ob-1",
        PROCESSED_AT,
    );
    assert_eq!(cases.len(), 1);

    let target = &cases[0];
    assert_eq!(target.visual_id, "1001");
    assert_eq!(target.outbreak_id, "ob-1");
    assert_eq!(target.gender, "LNG_REFERENCE_DATA_CATEGORY_GENDER_MALE");
    assert!(target.documents.is_empty());
    assert_eq!(target.date_of_reporting, "2024-01-05T00:00:00.000Z");
    // One answer entry per schema field, all blank for this row.
    assert_eq!(target.questionnaire_answers.len(), module.schema.len());
    for entries in target.questionnaire_answers.values() {
        assert_eq!(entries, &Answer::blank().into_entry());
    }
}

#[test]
fn resolved_residence_reaches_the_case_address() {
    let (translations, diseases) = registries();
    let module = diseases.get("sarampo").expect("sarampo module");

    let mut t = table(
        &["NU_NOTIFIC", "ID_MN_RESI", "NM_BAIRRO", "NU_CEP"],
        &[&["1001", "420240", "Centro", "89010-000"]],
    );
    preprocess(&mut t, false, today());

    let cases = build_cases(
        &t,
        &dictionary(),
        &locations(),
        module,
        &translations,
        "ob-1",
        PROCESSED_AT,
    );
    let address = &cases[0].addresses[0];
    // Blumenau sits below a region node, two levels under Santa Catarina.
    assert_eq!(address.location_id.as_deref(), Some("loc-blumenau"));
    assert_eq!(address.postal_code.as_deref(), Some("89010-000"));
    assert_eq!(address.address_line1.as_deref(), Some("Centro"));
}

#[test]
fn anonymized_batch_keeps_true_age_but_placeholder_birth_date() {
    let (translations, diseases) = registries();
    let module = diseases.get("sarampo").expect("sarampo module");

    let mut t = table(
        &["NU_NOTIFIC", "DT_NASC", "NM_PACIENT"],
        &[&["1001", "1990-01-01", "Maria dos Santos"]],
    );
    preprocess(&mut t, true, today());

    let cases = build_cases(
        &t,
        &dictionary(),
        &locations(),
        module,
        &translations,
        "ob-1",
        PROCESSED_AT,
    );

    let target = &cases[0];
    // Age came from the true birth date; the record shows the placeholder.
    assert_eq!(target.age.map(|age| age.years), Some(34));
    assert_eq!(target.dob.as_deref(), Some("2000-01-01T00:00:00.000Z"));
    assert_eq!(target.first_name, "Paciente Anônimo");
}

#[test]
fn assembled_case_serializes_in_registry_shape() {
    let (translations, diseases) = registries();
    let module = diseases.get("sarampo").expect("sarampo module");

    let mut t = table(
        &["NU_NOTIFIC", "CS_SEXO", "DT_NOTIFIC", "DT_COL_1"],
        &[&["1001", "F", "2024-01-05", "2024-01-03 00:00:00"]],
    );
    preprocess(&mut t, false, today());

    let cases = build_cases(
        &t,
        &dictionary(),
        &locations(),
        module,
        &translations,
        "ob-1",
        PROCESSED_AT,
    );

    let json = serde_json::to_value(&cases[0]).expect("serialize");
    assert_eq!(json["visualId"], "1001");
    assert_eq!(json["gender"], "LNG_REFERENCE_DATA_CATEGORY_GENDER_FEMALE");
    assert_eq!(json["active"], true);
    assert_eq!(
        json["questionnaireAnswers"]["data_da_coleta_s1"][0]["date"],
        "2024-01-03T00:00:00.000Z"
    );
    // Blank answers are single-element lists holding an empty object.
    assert_eq!(
        json["questionnaireAnswers"]["nome_da_mae"][0],
        serde_json::json!({})
    );
}
