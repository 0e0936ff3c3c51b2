pub mod answer;
pub mod case;
pub mod location;
pub mod outcome;
pub mod sinan;

pub use answer::{Answer, QuestionnaireAnswers};
pub use case::{Address, Age, Document, DuplicateKeys, GeoLocation, GoDataCase};
pub use location::{LocationNode, LocationRef};
pub use outcome::{UploadOutcome, UploadStatus};
pub use sinan::{Residence, SinanCase};
