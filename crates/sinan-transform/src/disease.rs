//! Disease module registry.
//!
//! Each disease ships four artifacts: a questionnaire schema, a field →
//! source-column map, and the classification and outcome code tables. The
//! registry validates descriptors at startup and registers the two code
//! tables into the translation registry under disease-qualified names
//! (`{disease}_case_classification`, `{disease}_outcome`). Descriptors
//! missing an artifact are skipped, not rejected, so new diseases can land
//! incrementally.

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info};

use crate::error::{Result, TransformError};
use crate::translation::{TranslationRegistry, Translator};

/// Semantic type of a questionnaire field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Verbatim string answer.
    Text,
    /// Cell holds `%Y-%m-%d %H:%M:%S`; emitted as a date answer.
    Date,
    /// Cell holds an administrative code; emitted as the municipality name.
    LocationCode,
}

/// One questionnaire field declaration.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldDef {
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }
}

/// A code table plus its fallback value.
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    pub entries: HashMap<String, String>,
    pub default: String,
}

impl CodeTable {
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>, default: &str) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            default: default.to_string(),
        }
    }

    fn into_translator(self) -> Translator {
        Translator::Table {
            map: self.entries,
            default: self.default,
        }
    }
}

/// Unvalidated disease description, as declared in the manifest.
///
/// Artifacts are optional here; [`DiseaseRegistry::load`] accepts a
/// descriptor only when all four are present and the schema is non-empty.
#[derive(Debug, Clone, Default)]
pub struct DiseaseDescriptor {
    pub name: String,
    pub schema: Vec<FieldDef>,
    /// Questionnaire field name → source column.
    pub columns: BTreeMap<String, String>,
    pub classification: Option<CodeTable>,
    pub outcome: Option<CodeTable>,
}

/// A validated, accepted disease module.
#[derive(Debug, Clone)]
pub struct DiseaseModule {
    pub name: String,
    pub schema: Vec<FieldDef>,
    pub columns: BTreeMap<String, String>,
}

impl DiseaseModule {
    /// Translation-registry key for this disease's classification table.
    pub fn classification_key(&self) -> String {
        format!("{}_case_classification", self.name)
    }

    /// Translation-registry key for this disease's outcome table.
    pub fn outcome_key(&self) -> String {
        format!("{}_outcome", self.name)
    }
}

/// All accepted disease modules, keyed by name.
#[derive(Debug, Default)]
pub struct DiseaseRegistry {
    modules: BTreeMap<String, DiseaseModule>,
}

impl DiseaseRegistry {
    /// Validates descriptors and registers accepted code tables into
    /// `translations`.
    pub fn load(
        descriptors: Vec<DiseaseDescriptor>,
        translations: &mut TranslationRegistry,
    ) -> Self {
        let mut modules = BTreeMap::new();
        for descriptor in descriptors {
            let name = descriptor.name.clone();
            let Some((module, classification, outcome)) = validate(descriptor) else {
                debug!(disease = %name, "disease descriptor incomplete, skipped");
                continue;
            };
            translations.register(module.classification_key(), classification.into_translator());
            translations.register(module.outcome_key(), outcome.into_translator());
            modules.insert(module.name.clone(), module);
        }
        info!(diseases = modules.len(), "disease modules loaded");
        Self { modules }
    }

    pub fn get(&self, name: &str) -> Result<&DiseaseModule> {
        self.modules
            .get(name)
            .ok_or_else(|| TransformError::UnknownDisease(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }
}

fn validate(descriptor: DiseaseDescriptor) -> Option<(DiseaseModule, CodeTable, CodeTable)> {
    if descriptor.name.is_empty() || descriptor.schema.is_empty() || descriptor.columns.is_empty() {
        return None;
    }
    let classification = descriptor.classification?;
    let outcome = descriptor.outcome?;
    Some((
        DiseaseModule {
            name: descriptor.name,
            schema: descriptor.schema,
            columns: descriptor.columns,
        },
        classification,
        outcome,
    ))
}

/// The disease manifest shipped with this importer.
pub fn builtin_descriptors() -> Vec<DiseaseDescriptor> {
    vec![sarampo()]
}

/// Measles/rubella (exanthematic disease) module.
fn sarampo() -> DiseaseDescriptor {
    use FieldKind::{Date, LocationCode, Text};

    let fields: &[(&str, FieldKind, &str)] = &[
        ("resultado_rubeola_s2_igg", Text, "ID_S2_IGG_"),
        ("resultado_rubeola_s2_igm", Text, "ID_S2_IGM_"),
        ("resultado_sarampo_s2_igg", Text, "ID_S2_IGG"),
        ("resultado_sarampo_s2_igm", Text, "ID_S2_IGM"),
        ("resultado_rubeola_s1_igg", Text, "ID_S1_IGG_"),
        ("resultado_rubeola_s1_igm", Text, "ID_S1_IGM_"),
        ("resultado_sarampo_s1_igg", Text, "ID_S1_IGG"),
        ("resultado_sarampo_s1_igm", Text, "ID_S1_IGM"),
        ("data_da_coleta_s1", Date, "DT_COL_1"),
        ("data_da_coleta_s2", Date, "DT_COL_2"),
        (
            "contato_com_caso_suspeito_ate_23_dias_antes_dos_sintomas",
            Text,
            "CS_FONTE",
        ),
        ("tomou_vacina_contra_sarampo_e_rubeola", Text, "CS_VACINA"),
        ("data_do_inicio_da_febre", Date, "DT_FEBRE"),
        ("data_do_inicio_do_exantema", Date, "DT_INICIO_"),
        ("nome_da_mae", Text, "NM_MAE_PAC"),
        ("municipio_de_notificacao", LocationCode, "ID_MUNICIP"),
    ];

    DiseaseDescriptor {
        name: "sarampo".to_string(),
        schema: fields
            .iter()
            .map(|(name, kind, _)| FieldDef::new(name, *kind))
            .collect(),
        columns: fields
            .iter()
            .map(|(name, _, column)| (name.to_string(), column.to_string()))
            .collect(),
        classification: Some(CodeTable::new(
            [("1", "SARAMPO"), ("2", "RUBEOLA"), ("3", "DISCARDED")],
            "",
        )),
        outcome: Some(CodeTable::new(
            [
                ("1", "CURA"),
                ("2", "ÓBITO POR DOENÇA EXANTEMÁTICA"),
                ("3", "ÓBITO POR OUTRAS CAUSAS"),
            ],
            "",
        )),
    }
}
