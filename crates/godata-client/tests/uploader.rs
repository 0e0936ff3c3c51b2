//! Uploader tests against an in-memory registry fake.

use std::collections::HashSet;
use std::sync::Mutex;

use godata_client::{ApiError, CaseApi, CaseResponse, CaseUploader, ExistingCase};
use godata_model::{GoDataCase, UploadStatus};

#[derive(Default)]
struct FakeApi {
    existing: Vec<ExistingCase>,
    fail_on: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    fn with_existing(visual_ids: &[(&str, &str)]) -> Self {
        Self {
            existing: visual_ids
                .iter()
                .map(|(visual_id, id)| ExistingCase {
                    id: id.to_string(),
                    visual_id: Some(visual_id.to_string()),
                })
                .collect(),
            ..Self::default()
        }
    }

    fn failing_on(mut self, visual_id: &str) -> Self {
        self.fail_on.insert(visual_id.to_string());
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

impl CaseApi for FakeApi {
    fn list_cases(&self, _outbreak_id: &str) -> godata_client::Result<Vec<ExistingCase>> {
        Ok(self.existing.clone())
    }

    fn create_case(
        &self,
        _outbreak_id: &str,
        case: &GoDataCase,
    ) -> godata_client::Result<CaseResponse> {
        self.record(format!("create {}", case.visual_id));
        if self.fail_on.contains(&case.visual_id) {
            return Err(ApiError::Transport("connection reset".to_string()));
        }
        Ok(CaseResponse {
            id: Some(format!("created-{}", case.visual_id)),
        })
    }

    fn update_case(
        &self,
        _outbreak_id: &str,
        case_id: &str,
        case: &GoDataCase,
    ) -> godata_client::Result<CaseResponse> {
        self.record(format!("update {} as {case_id}", case.visual_id));
        if self.fail_on.contains(&case.visual_id) {
            return Err(ApiError::Transport("connection reset".to_string()));
        }
        Ok(CaseResponse {
            id: Some(case_id.to_string()),
        })
    }
}

fn case(visual_id: &str) -> GoDataCase {
    GoDataCase::with_defaults(visual_id, "ob-1")
}

#[test]
fn one_failure_never_aborts_the_batch() {
    let api = FakeApi::default().failing_on("1002");
    let cases = [case("1001"), case("1002"), case("1003")];

    let outcomes = CaseUploader::new(&api)
        .send_cases(&cases, "ob-1")
        .expect("batch runs");

    assert_eq!(outcomes.len(), 3);
    let failed: Vec<_> = outcomes
        .iter()
        .filter(|outcome| outcome.status == UploadStatus::Error)
        .collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].visual_id, "1002");
    assert!(failed[0].error_message.as_deref().unwrap().contains("connection reset"));
    for outcome in &outcomes {
        match outcome.status {
            UploadStatus::Success => assert!(outcome.response_id.is_some()),
            UploadStatus::Error => assert!(outcome.error_message.is_some()),
        }
    }
}

#[test]
fn known_natural_keys_update_and_new_ones_create() {
    let api = FakeApi::with_existing(&[("1001", "remote-1")]);
    let cases = [case("1001"), case("1002")];

    let outcomes = CaseUploader::with_workers(&api, 1)
        .send_cases(&cases, "ob-1")
        .expect("batch runs");

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|outcome| outcome.is_success()));
    assert_eq!(
        api.calls(),
        vec!["update 1001 as remote-1".to_string(), "create 1002".to_string()]
    );
}

#[test]
fn empty_batch_yields_no_outcomes() {
    let api = FakeApi::default();
    let outcomes = CaseUploader::new(&api)
        .send_cases(&[], "ob-1")
        .expect("batch runs");
    assert!(outcomes.is_empty());
}

#[test]
fn outcome_count_matches_input_count_under_concurrency() {
    let api = FakeApi::default();
    let cases: Vec<GoDataCase> = (0..40).map(|i| case(&format!("{:04}", i))).collect();

    let outcomes = CaseUploader::with_workers(&api, 5)
        .send_cases(&cases, "ob-1")
        .expect("batch runs");

    assert_eq!(outcomes.len(), cases.len());
    // Completion order is not submission order; compare as sets.
    let mut seen: Vec<_> = outcomes.iter().map(|o| o.visual_id.clone()).collect();
    seen.sort();
    let mut expected: Vec<_> = cases.iter().map(|c| c.visual_id.clone()).collect();
    expected.sort();
    assert_eq!(seen, expected);
}

#[test]
fn failing_case_listing_is_fatal() {
    struct BrokenListing;
    impl CaseApi for BrokenListing {
        fn list_cases(&self, _: &str) -> godata_client::Result<Vec<ExistingCase>> {
            Err(ApiError::Status {
                status: 500,
                message: "boom".to_string(),
            })
        }
        fn create_case(&self, _: &str, _: &GoDataCase) -> godata_client::Result<CaseResponse> {
            unreachable!("no upsert may start before the lookup succeeds")
        }
        fn update_case(
            &self,
            _: &str,
            _: &str,
            _: &GoDataCase,
        ) -> godata_client::Result<CaseResponse> {
            unreachable!("no upsert may start before the lookup succeeds")
        }
    }

    let result = CaseUploader::new(&BrokenListing).send_cases(&[case("1001")], "ob-1");
    assert!(result.is_err());
}
