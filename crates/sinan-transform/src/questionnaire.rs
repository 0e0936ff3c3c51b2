//! Raw row → disease-specific questionnaire answers.

use godata_model::{Answer, QuestionnaireAnswers};
use sinan_ingest::{ResidenceDictionary, Row};

use crate::datetime;
use crate::disease::{DiseaseModule, FieldKind};

/// Builds the answer set for one row.
///
/// Every schema field gets exactly one entry, in the registry's
/// single-element-list shape, even when the source column is absent or
/// blank. Unparseable questionnaire dates become blank answers, never
/// errors.
pub fn map_questionnaire(
    row: Row<'_>,
    module: &DiseaseModule,
    dictionary: &ResidenceDictionary,
) -> QuestionnaireAnswers {
    let mut answers = QuestionnaireAnswers::new();
    for field in &module.schema {
        let cell = module
            .columns
            .get(&field.name)
            .and_then(|column| row.non_blank(column));
        answers.insert(field.name.clone(), answer_for(field.kind, cell, dictionary));
    }
    answers
}

fn answer_for(kind: FieldKind, cell: Option<&str>, dictionary: &ResidenceDictionary) -> Vec<Answer> {
    let Some(raw) = cell else {
        return Answer::blank().into_entry();
    };
    let answer = match kind {
        FieldKind::Date => datetime::parse_questionnaire_date(raw)
            .map_or_else(Answer::blank, Answer::date),
        FieldKind::LocationCode => Answer::value(dictionary.municipality(raw)),
        FieldKind::Text => Answer::value(raw),
    };
    answer.into_entry()
}
