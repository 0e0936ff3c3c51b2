//! Concurrent case upsert with per-case failure isolation.
//!
//! The existing-case lookup is fetched exactly once before any worker
//! starts; workers only read shared state, so no locking is needed. One
//! case's failure never aborts the batch, and results arrive in completion
//! order.

use std::collections::HashMap;
use std::sync::mpsc;

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{error, info};

use godata_model::{GoDataCase, UploadOutcome};

use crate::client::{CaseResponse, ExistingCase, GodataClient};
use crate::error::{ApiError, Result};

/// Default size of the upload worker pool.
pub const DEFAULT_WORKERS: usize = 5;

/// The subset of the registry API the uploader needs. Implemented by
/// [`GodataClient`]; tests substitute an in-memory fake.
pub trait CaseApi: Sync {
    fn list_cases(&self, outbreak_id: &str) -> Result<Vec<ExistingCase>>;
    fn create_case(&self, outbreak_id: &str, case: &GoDataCase) -> Result<CaseResponse>;
    fn update_case(&self, outbreak_id: &str, case_id: &str, case: &GoDataCase)
    -> Result<CaseResponse>;
}

impl CaseApi for GodataClient {
    fn list_cases(&self, outbreak_id: &str) -> Result<Vec<ExistingCase>> {
        GodataClient::list_cases(self, outbreak_id)
    }

    fn create_case(&self, outbreak_id: &str, case: &GoDataCase) -> Result<CaseResponse> {
        GodataClient::create_case(self, outbreak_id, case)
    }

    fn update_case(
        &self,
        outbreak_id: &str,
        case_id: &str,
        case: &GoDataCase,
    ) -> Result<CaseResponse> {
        GodataClient::update_case(self, outbreak_id, case_id, case)
    }
}

pub struct CaseUploader<'a, A: CaseApi> {
    api: &'a A,
    workers: usize,
}

impl<'a, A: CaseApi> CaseUploader<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            workers: DEFAULT_WORKERS,
        }
    }

    pub fn with_workers(api: &'a A, workers: usize) -> Self {
        Self {
            api,
            workers: workers.max(1),
        }
    }

    /// Upserts every case, returning one outcome per input case.
    ///
    /// The decision between create and update is made against a snapshot of
    /// the outbreak's cases taken before dispatch; cases created by other
    /// processes during the run are not seen.
    pub fn send_cases(
        &self,
        cases: &[GoDataCase],
        outbreak_id: &str,
    ) -> Result<Vec<UploadOutcome>> {
        let existing = self.existing_case_ids(outbreak_id)?;
        info!(
            cases = cases.len(),
            existing = existing.len(),
            workers = self.workers,
            "uploading cases"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .map_err(|err| ApiError::Transport(format!("worker pool: {err}")))?;

        let (sender, receiver) = mpsc::channel();
        pool.install(|| {
            cases.par_iter().for_each_with(sender, |sender, case| {
                let case_id = existing.get(&case.visual_id).map(String::as_str);
                // Receiver outlives every worker; a send cannot fail.
                let _ = sender.send(self.send_case(case, outbreak_id, case_id));
            });
        });

        let outcomes: Vec<UploadOutcome> = receiver.into_iter().collect();
        let failed = outcomes.iter().filter(|outcome| !outcome.is_success()).count();
        info!(
            uploaded = outcomes.len() - failed,
            failed, "upload batch finished"
        );
        Ok(outcomes)
    }

    fn existing_case_ids(&self, outbreak_id: &str) -> Result<HashMap<String, String>> {
        let cases = self.api.list_cases(outbreak_id)?;
        Ok(cases
            .into_iter()
            .filter_map(|case| case.visual_id.map(|visual_id| (visual_id, case.id)))
            .collect())
    }

    fn send_case(
        &self,
        case: &GoDataCase,
        outbreak_id: &str,
        case_id: Option<&str>,
    ) -> UploadOutcome {
        let result = match case_id {
            Some(id) => self.api.update_case(outbreak_id, id, case),
            None => self.api.create_case(outbreak_id, case),
        };
        match result {
            Ok(response) => {
                info!(visual_id = %case.visual_id, "case upserted");
                UploadOutcome::success(&case.visual_id, response.id)
            }
            Err(err) => {
                error!(visual_id = %case.visual_id, %err, "case upload failed");
                UploadOutcome::error(&case.visual_id, err.to_string())
            }
        }
    }
}
