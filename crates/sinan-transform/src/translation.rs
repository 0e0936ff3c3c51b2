//! Named code-to-reference-value translators.
//!
//! The registry maps raw SINAN codes to the Go.Data `LNG_…` reference values.
//! A translator is either a static table with its own default or a function;
//! the two cases are explicit variants, dispatched by match rather than by
//! runtime type inspection.

use std::collections::HashMap;

/// One registered translator.
pub enum Translator {
    /// Static mapping. Lookups outside the table yield `default`.
    Table {
        map: HashMap<String, String>,
        default: String,
    },
    /// Computed translation.
    Function(Box<dyn Fn(&str) -> String + Send + Sync>),
}

impl Translator {
    /// Builds a table translator from literal entries.
    pub fn table<'a>(
        entries: impl IntoIterator<Item = (&'a str, &'a str)>,
        default: &str,
    ) -> Self {
        Self::Table {
            map: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            default: default.to_string(),
        }
    }

    pub fn function(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self::Function(Box::new(f))
    }

    fn apply(&self, value: &str) -> String {
        match self {
            Self::Table { map, default } => {
                map.get(value).cloned().unwrap_or_else(|| default.clone())
            }
            Self::Function(f) => f(value),
        }
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table { map, default } => f
                .debug_struct("Table")
                .field("entries", &map.len())
                .field("default", default)
                .finish(),
            Self::Function(_) => f.debug_struct("Function").finish_non_exhaustive(),
        }
    }
}

/// Registry of named translators.
///
/// `translate` is total: a name with no registered translator passes the
/// value through unchanged ("no rule defined"), while a registered table
/// falls back to its own default ("rule defined, value not in table").
#[derive(Debug, Default)]
pub struct TranslationRegistry {
    translators: HashMap<String, Translator>,
}

impl TranslationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the standard SINAN → Go.Data code tables.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(
            "gender",
            Translator::table(
                [
                    ("M", "LNG_REFERENCE_DATA_CATEGORY_GENDER_MALE"),
                    ("F", "LNG_REFERENCE_DATA_CATEGORY_GENDER_FEMALE"),
                ],
                "",
            ),
        );
        registry.register(
            "pregnancy_status",
            Translator::table(
                [
                    (
                        "1",
                        "LNG_REFERENCE_DATA_CATEGORY_PREGNANCY_STATUS_YES_FIRST_TRIMESTER",
                    ),
                    (
                        "2",
                        "LNG_REFERENCE_DATA_CATEGORY_PREGNANCY_STATUS_YES_SECOND_TRIMESTER",
                    ),
                    (
                        "3",
                        "LNG_REFERENCE_DATA_CATEGORY_PREGNANCY_STATUS_YES_THIRD_TRIMESTER",
                    ),
                    (
                        "4",
                        "LNG_REFERENCE_DATA_CATEGORY_PREGNANCY_STATUS_YES_TRIMESTER_UNKNOWN",
                    ),
                    ("5", "LNG_REFERENCE_DATA_CATEGORY_PREGNANCY_STATUS_NOT_PREGNANT"),
                ],
                "LNG_REFERENCE_DATA_CATEGORY_PREGNANCY_STATUS_NONE",
            ),
        );
        registry.register(
            "document_type",
            Translator::table(
                [
                    ("CNS", "LNG_REFERENCE_DATA_CATEGORY_DOCUMENT_TYPE_CNS"),
                    ("CPF", "LNG_REFERENCE_DATA_CATEGORY_DOCUMENT_TYPE_CPF"),
                    ("Other", "LNG_REFERENCE_DATA_CATEGORY_DOCUMENT_TYPE_OTHER"),
                ],
                "",
            ),
        );
        registry.register(
            "address_type",
            Translator::table(
                [(
                    "Endereço Atual",
                    "LNG_REFERENCE_DATA_CATEGORY_ADDRESS_TYPE_USUAL_PLACE_OF_RESIDENCE",
                )],
                "",
            ),
        );
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, translator: Translator) {
        self.translators.insert(name.into(), translator);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.translators.contains_key(name)
    }

    /// Applies the translator registered under `name`, or returns the value
    /// unchanged when none is registered.
    pub fn translate(&self, name: &str, value: &str) -> String {
        match self.translators.get(name) {
            Some(translator) => translator.apply(value),
            None => value.to_string(),
        }
    }
}
