// src/testing.rs
//
// Shared test double for code that depends on `BlinkoApi`.
// Public so the integration tests under `tests/` can use it.

use crate::api::{BlinkoApi, UpsertNoteRequest};
use crate::credential::Credential;
use crate::error::{BlinkoError, Result};
use std::cell::RefCell;

/// Mock remote with configurable probe and upsert outcomes. Every call is
/// recorded so tests can assert on what would have gone over the wire.
///
/// ```
/// use blinko_capture::testing::MockApi;
///
/// let api = MockApi::builder()
///     .with_probe_result(false)
///     .build();
/// ```
pub struct MockApi {
    probe_ok: bool,
    upsert_failure: Option<String>,
    probes: RefCell<Vec<Credential>>,
    upserts: RefCell<Vec<(Credential, UpsertNoteRequest)>>,
}

impl MockApi {
    pub fn builder() -> MockApiBuilder {
        MockApiBuilder::new()
    }

    pub fn probes(&self) -> Vec<Credential> {
        self.probes.borrow().clone()
    }

    pub fn upserts(&self) -> Vec<(Credential, UpsertNoteRequest)> {
        self.upserts.borrow().clone()
    }
}

impl BlinkoApi for MockApi {
    fn probe(&self, credential: &Credential) -> bool {
        self.probes.borrow_mut().push(credential.clone());
        self.probe_ok
    }

    fn upsert_note(&self, credential: &Credential, note: &UpsertNoteRequest) -> Result<()> {
        self.upserts
            .borrow_mut()
            .push((credential.clone(), note.clone()));
        match &self.upsert_failure {
            Some(reason) => Err(BlinkoError::SubmissionFailure(reason.clone())),
            None => Ok(()),
        }
    }
}

pub struct MockApiBuilder {
    probe_ok: bool,
    upsert_failure: Option<String>,
}

impl MockApiBuilder {
    fn new() -> Self {
        Self {
            probe_ok: true,
            upsert_failure: None,
        }
    }

    pub fn with_probe_result(mut self, ok: bool) -> Self {
        self.probe_ok = ok;
        self
    }

    pub fn with_upsert_failure(mut self, reason: impl Into<String>) -> Self {
        self.upsert_failure = Some(reason.into());
        self
    }

    pub fn build(self) -> MockApi {
        MockApi {
            probe_ok: self.probe_ok,
            upsert_failure: self.upsert_failure,
            probes: RefCell::new(Vec::new()),
            upserts: RefCell::new(Vec::new()),
        }
    }
}
