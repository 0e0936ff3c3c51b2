pub mod case_table;
pub mod residence;

pub use case_table::{CaseTable, Row, read_case_table};
pub use residence::ResidenceDictionary;
