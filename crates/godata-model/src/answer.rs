//! Questionnaire answer values.
//!
//! Go.Data stores every questionnaire answer as a single-element list whose
//! entry is one of `{}` (no answer), `{"value": V}`, or `{"date": D}`. The
//! list wrapper is a registry schema requirement, not a repeated answer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping from questionnaire field name to its single-element answer list.
pub type QuestionnaireAnswers = BTreeMap<String, Vec<Answer>>;

/// A single questionnaire answer entry.
///
/// Serializes without a tag: `Date` becomes `{"date": …}`, `Value` becomes
/// `{"value": …}`, and `Blank` becomes the empty object the registry expects
/// for unanswered fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Date { date: String },
    Value { value: String },
    Blank {},
}

impl Answer {
    pub fn date(date: impl Into<String>) -> Self {
        Self::Date { date: date.into() }
    }

    pub fn value(value: impl Into<String>) -> Self {
        Self::Value {
            value: value.into(),
        }
    }

    pub fn blank() -> Self {
        Self::Blank {}
    }

    /// Wraps the answer in the single-element list the registry requires.
    pub fn into_entry(self) -> Vec<Answer> {
        vec![self]
    }
}
