pub mod auth;
pub mod client;
pub mod error;
pub mod uploader;

pub use auth::login;
pub use client::{CaseResponse, ExistingCase, GodataClient, Outbreak};
pub use error::{ApiError, Result};
pub use uploader::{CaseApi, CaseUploader, DEFAULT_WORKERS};
