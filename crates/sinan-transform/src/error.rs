use thiserror::Error;

/// Errors raised while transforming notification rows.
///
/// `UnknownDisease` is fatal configuration; `DateFormat` aborts the mapping
/// of the offending row when it reaches a record-level date (questionnaire
/// dates swallow it into a blank answer); `RowMapping` is always recovered
/// by skipping the row.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("unknown disease module: {0}")]
    UnknownDisease(String),
    #[error("unrecognized date format: {0:?}")]
    DateFormat(String),
    #[error("row {row}: {reason}")]
    RowMapping { row: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, TransformError>;
