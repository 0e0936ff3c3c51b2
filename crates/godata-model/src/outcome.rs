//! Per-case result of an upload batch.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Success,
    Error,
}

/// What happened to one case during an upsert batch.
///
/// Exactly one of `response_id` (success) or `error_message` (error) is set.
#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub visual_id: String,
    pub status: UploadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl UploadOutcome {
    pub fn success(visual_id: impl Into<String>, response_id: Option<String>) -> Self {
        Self {
            visual_id: visual_id.into(),
            status: UploadStatus::Success,
            response_id,
            error_message: None,
        }
    }

    pub fn error(visual_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            visual_id: visual_id.into(),
            status: UploadStatus::Error,
            response_id: None,
            error_message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == UploadStatus::Success
    }
}
