//! The case record shape accepted by the Go.Data outbreak registry.
//!
//! Field names follow the registry's JSON contract (camelCase). Optional
//! fields the registry treats as "present but empty" are modeled as concrete
//! defaults rather than `Option`, because omitting them is not equivalent to
//! sending the documented default.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::answer::QuestionnaireAnswers;

/// Identity document attached to a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "type")]
    pub doc_type: String,
    pub number: String,
}

/// Case age in years, with optional month precision for infants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Age {
    pub years: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months: Option<i64>,
}

impl Age {
    pub fn years(years: i64) -> Self {
        Self {
            years,
            months: None,
        }
    }
}

/// Geographic coordinates for an address.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lng: f64,
}

/// One address entry of a case.
///
/// `type_id` carries the registry's address-category reference value and is
/// always required; everything else is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub type_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    pub geo_location_accurate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_location: Option<GeoLocation>,
}

impl Address {
    /// A minimal address of the given category with every optional field
    /// unset.
    pub fn of_type(type_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            city: None,
            address_line1: None,
            postal_code: None,
            location_id: None,
            geo_location_accurate: false,
            date: None,
            phone_number: None,
            geo_location: None,
        }
    }
}

/// Duplicate-detection keys the registry expects on every case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DuplicateKeys {
    pub document: Vec<Value>,
    pub name: Vec<Value>,
}

/// A complete case record as the Go.Data registry accepts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoDataCase {
    /// Natural key: the notification system's own case identifier.
    pub visual_id: String,
    pub outbreak_id: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub gender: String,
    pub pregnancy_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<Age>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,
    pub documents: Vec<Document>,
    pub addresses: Vec<Address>,
    pub classification: String,
    pub outcome_id: String,
    pub date_of_reporting: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_onset: Option<String>,
    pub updated_at: String,
    pub questionnaire_answers: QuestionnaireAnswers,
    // Registry defaults that must be sent explicitly even when empty.
    pub active: bool,
    pub transfer_refused: bool,
    pub was_contact: bool,
    pub safe_burial: bool,
    pub duplicate_keys: DuplicateKeys,
    pub vaccines_received: Vec<Value>,
    pub date_ranges: Vec<Value>,
}

impl GoDataCase {
    /// An empty case carrying only the registry-required defaults.
    ///
    /// Every field the remote schema distinguishes from "absent" starts at
    /// its documented default (`active=true`, empty lists, `false` flags).
    pub fn with_defaults(visual_id: impl Into<String>, outbreak_id: impl Into<String>) -> Self {
        Self {
            visual_id: visual_id.into(),
            outbreak_id: outbreak_id.into(),
            first_name: String::new(),
            last_name: None,
            gender: String::new(),
            pregnancy_status: String::new(),
            age: None,
            dob: None,
            documents: Vec::new(),
            addresses: Vec::new(),
            classification: String::new(),
            outcome_id: String::new(),
            date_of_reporting: String::new(),
            date_of_onset: None,
            updated_at: String::new(),
            questionnaire_answers: QuestionnaireAnswers::new(),
            active: true,
            transfer_refused: false,
            was_contact: false,
            safe_burial: false,
            duplicate_keys: DuplicateKeys::default(),
            vaccines_received: Vec::new(),
            date_ranges: Vec::new(),
        }
    }
}
