// API client module: a small blocking HTTP client that talks to a Blinko
// instance. Two endpoints are used: the note list (as a credential probe)
// and note upsert (to create a note).

use crate::credential::Credential;
use crate::error::{BlinkoError, Result};
use anyhow::Context;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub const NOTE_LIST_PATH: &str = "/api/v1/note/list";
pub const NOTE_UPSERT_PATH: &str = "/api/v1/note/upsert";

/// Default timeout for every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Note type discriminator for a plain note.
pub const NOTE_TYPE_PLAIN: i32 = 0;

/// Note type filter meaning "all types".
pub const NOTE_TYPE_ALL: i32 = -1;

/// Body of the note-list request used as a probe: the smallest page of
/// live notes, newest first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListNotesRequest {
    pub page: u32,
    pub size: u32,
    pub order_by: String,
    #[serde(rename = "type")]
    pub note_type: i32,
    pub is_archived: bool,
    pub is_recycle: bool,
    pub search_text: String,
}

impl ListNotesRequest {
    pub fn probe() -> Self {
        Self {
            page: 1,
            size: 1,
            order_by: "desc".into(),
            note_type: NOTE_TYPE_ALL,
            is_archived: false,
            is_recycle: false,
            search_text: String::new(),
        }
    }
}

/// Body of the note upsert request. Only content and type are sent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UpsertNoteRequest {
    pub content: String,
    #[serde(rename = "type")]
    pub note_type: i32,
}

impl UpsertNoteRequest {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            note_type: NOTE_TYPE_PLAIN,
        }
    }
}

/// Remote operations the capture flows need. Implemented by [`ApiClient`]
/// and by the mock in [`crate::testing`].
pub trait BlinkoApi {
    /// True only when the instance answers the probe with a 2xx status.
    fn probe(&self, credential: &Credential) -> bool;

    fn upsert_note(&self, credential: &Credential, note: &UpsertNoteRequest) -> Result<()>;
}

/// Blocking reqwest client. Holds no credential; each call receives one.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ApiClient { client })
    }

    /// Wrap an already configured reqwest client.
    pub fn from_client(client: Client) -> Self {
        ApiClient { client }
    }

    /// Authorization and content-type headers for a credential.
    fn auth_headers(credential: &Credential) -> std::result::Result<HeaderMap, String> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let val = format!("Bearer {}", credential.access_token);
        let val = HeaderValue::from_str(&val).map_err(|e| format!("invalid token: {e}"))?;
        headers.insert(AUTHORIZATION, val);
        Ok(headers)
    }

    fn post<T: Serialize>(
        &self,
        credential: &Credential,
        path: &str,
        body: &T,
    ) -> std::result::Result<Response, String> {
        let url = credential.endpoint(path);
        debug!(%url, "POST");
        self.client
            .post(&url)
            .headers(Self::auth_headers(credential)?)
            .json(body)
            .send()
            .map_err(|e| e.to_string())
    }
}

impl BlinkoApi for ApiClient {
    fn probe(&self, credential: &Credential) -> bool {
        match self.post(credential, NOTE_LIST_PATH, &ListNotesRequest::probe()) {
            Ok(res) if res.status().is_success() => true,
            Ok(res) => {
                warn!(status = %res.status(), "Probe rejected");
                false
            }
            Err(e) => {
                warn!(error = %e, "Probe request failed");
                false
            }
        }
    }

    fn upsert_note(&self, credential: &Credential, note: &UpsertNoteRequest) -> Result<()> {
        let res = self
            .post(credential, NOTE_UPSERT_PATH, note)
            .map_err(BlinkoError::SubmissionFailure)?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            return Err(BlinkoError::SubmissionFailure(format!("{} - {}", status, txt)));
        }
        Ok(())
    }
}
