//! Transformation pipeline from SINAN notification rows to Go.Data cases.
//!
//! Stages, in data-flow order:
//!
//! 1. [`preprocess`]: missing-value sentinels, optional anonymization
//! 2. [`row_mapper`]: raw row to [`godata_model::SinanCase`]
//! 3. [`questionnaire`]: raw row to disease-specific answers
//! 4. [`assembler`]: intermediate record + answers to [`godata_model::GoDataCase`]
//!
//! [`import::build_cases`] drives 2–4 per row with row-level failure
//! isolation, supported by the [`translation`] registry, the [`disease`]
//! module registry, [`location`] name resolution, and the shared
//! [`datetime`] normalizer.

pub mod assembler;
pub mod datetime;
pub mod disease;
pub mod error;
pub mod import;
pub mod location;
pub mod preprocess;
pub mod questionnaire;
pub mod row_mapper;
pub mod translation;

pub use assembler::assemble_case;
pub use disease::{CodeTable, DiseaseDescriptor, DiseaseModule, DiseaseRegistry, FieldDef, FieldKind};
pub use error::{Result, TransformError};
pub use import::build_cases;
pub use location::LocationIndex;
pub use preprocess::preprocess;
pub use questionnaire::map_questionnaire;
pub use row_mapper::map_row;
pub use translation::{TranslationRegistry, Translator};
