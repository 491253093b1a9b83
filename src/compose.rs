// Note composition: tags + body text, formatted into a single note.

use crate::api::{BlinkoApi, UpsertNoteRequest};
use crate::credential::Credential;
use crate::error::Result;
use std::time::Duration;
use tracing::{debug, info};

/// How long the interactive screen shows the success confirmation before
/// clearing the draft.
pub const SUCCESS_CONFIRM_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Creation timestamp in milliseconds, unique within a draft.
    pub id: i64,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub body: String,
    pub tags: Vec<Tag>,
}

impl NoteDraft {
    /// `#t1 #t2` on the first line, a blank line, then the body verbatim.
    pub fn format_content(&self) -> String {
        let tag_section = self
            .tags
            .iter()
            .map(|tag| format!("#{}", tag.text))
            .collect::<Vec<_>>()
            .join(" ");
        format!("{}\n\n{}", tag_section, self.body)
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty() && self.tags.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeState {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success,
    Failure(String),
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success)
    }
}

/// Working memory of the compose screen.
#[derive(Debug)]
pub struct Composer {
    draft: NoteDraft,
    state: ComposeState,
    last_tag_id: i64,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    pub fn new() -> Self {
        Self {
            draft: NoteDraft::default(),
            state: ComposeState::Idle,
            last_tag_id: 0,
        }
    }

    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    pub fn state(&self) -> ComposeState {
        self.state
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.draft.body = body.into();
    }

    /// Commit staged tag text. Whitespace is trimmed and blank input is
    /// ignored. Returns the new tag's id.
    pub fn add_tag(&mut self, text: &str) -> Option<i64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let now = chrono::Utc::now().timestamp_millis();
        let id = now.max(self.last_tag_id + 1);
        self.last_tag_id = id;
        self.draft.tags.push(Tag {
            id,
            text: text.to_string(),
        });
        Some(id)
    }

    pub fn remove_tag(&mut self, id: i64) {
        self.draft.tags.retain(|tag| tag.id != id);
    }

    /// Discard body and tags.
    pub fn reset(&mut self) {
        self.draft = NoteDraft::default();
    }

    /// Enter `Submitting` and return the note to send. `None` while a
    /// previous submission has not been finished.
    pub fn begin_submit(&mut self) -> Option<UpsertNoteRequest> {
        if self.state == ComposeState::Submitting {
            return None;
        }
        self.state = ComposeState::Submitting;
        debug!(tags = self.draft.tags.len(), "Submitting note");
        Some(UpsertNoteRequest::plain(self.draft.format_content()))
    }

    /// Back to `Idle`. On success the draft is cleared; on failure it is
    /// left untouched so the user can retry.
    pub fn finish_submit(&mut self, outcome: Result<()>) -> SubmissionResult {
        self.state = ComposeState::Idle;
        match outcome {
            Ok(()) => {
                info!("Note saved");
                self.reset();
                SubmissionResult::Success
            }
            Err(e) => SubmissionResult::Failure(e.to_string()),
        }
    }

    /// Send the draft as a plain note.
    pub fn submit(&mut self, api: &dyn BlinkoApi, credential: &Credential) -> SubmissionResult {
        match self.begin_submit() {
            Some(note) => {
                let outcome = api.upsert_note(credential, &note);
                self.finish_submit(outcome)
            }
            None => SubmissionResult::Failure("a submission is already in progress".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockApi;

    fn credential() -> Credential {
        Credential::new("https://blinko.example.com", "abc123")
    }

    #[test]
    fn given_two_tags_when_formatting_then_hash_prefixed_first_line() {
        let mut composer = Composer::new();
        composer.add_tag("t1");
        composer.add_tag("t2");
        composer.set_body("body");

        assert_eq!(composer.draft().format_content(), "#t1 #t2\n\nbody");
    }

    #[test]
    fn given_no_tags_when_formatting_then_leading_blank_lines() {
        let mut composer = Composer::new();
        composer.set_body("body");

        assert_eq!(composer.draft().format_content(), "\n\nbody");
    }

    #[test]
    fn given_padded_tag_when_adding_then_trimmed() {
        let mut composer = Composer::new();

        composer.add_tag("  work  ");

        assert_eq!(composer.draft().tags[0].text, "work");
    }

    #[test]
    fn given_blank_tag_when_adding_then_ignored() {
        let mut composer = Composer::new();

        assert_eq!(composer.add_tag("   "), None);
        assert!(composer.draft().tags.is_empty());
    }

    #[test]
    fn tags_added_in_same_millisecond_get_distinct_ids() {
        let mut composer = Composer::new();

        let ids: Vec<i64> = (0..20).filter_map(|i| composer.add_tag(&format!("t{i}"))).collect();

        let mut sorted = ids.clone();
        sorted.dedup();
        assert_eq!(sorted.len(), 20);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn given_tag_id_when_removing_then_only_that_tag_goes() {
        let mut composer = Composer::new();
        let first = composer.add_tag("a").unwrap();
        composer.add_tag("b");

        composer.remove_tag(first);
        composer.remove_tag(-1);

        let texts: Vec<_> = composer.draft().tags.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["b"]);
    }

    #[test]
    fn given_successful_upsert_when_submitting_then_draft_cleared() {
        let api = MockApi::builder().build();
        let mut composer = Composer::new();
        composer.add_tag("work");
        composer.set_body("hello");

        let result = composer.submit(&api, &credential());

        assert_eq!(result, SubmissionResult::Success);
        assert!(composer.draft().is_empty());
        assert_eq!(composer.state(), ComposeState::Idle);
    }

    #[test]
    fn given_failing_upsert_when_submitting_then_draft_unchanged() {
        let api = MockApi::builder().with_upsert_failure("500 Internal Server Error").build();
        let mut composer = Composer::new();
        composer.add_tag("work");
        composer.set_body("hello");
        let before = composer.draft().clone();

        let result = composer.submit(&api, &credential());

        match result {
            SubmissionResult::Failure(reason) => assert!(reason.contains("500")),
            SubmissionResult::Success => panic!("expected failure"),
        }
        assert_eq!(composer.draft(), &before);
        assert_eq!(composer.state(), ComposeState::Idle);
    }

    #[test]
    fn given_pending_submission_when_submitting_again_then_rejected_without_request() {
        let api = MockApi::builder().build();
        let mut composer = Composer::new();
        composer.set_body("hello");

        let first = composer.begin_submit();
        let second = composer.begin_submit();
        let result = composer.submit(&api, &credential());

        assert_eq!(first, Some(UpsertNoteRequest::plain("\n\nhello")));
        assert_eq!(second, None);
        assert_eq!(composer.state(), ComposeState::Submitting);
        assert!(!result.is_success());
        assert!(api.upserts().is_empty());
        assert_eq!(composer.draft().body, "hello");
    }

    #[test]
    fn given_pending_submission_when_finished_then_idle_again() {
        let mut composer = Composer::new();
        composer.set_body("hello");
        composer.begin_submit();

        let result = composer.finish_submit(Ok(()));

        assert_eq!(result, SubmissionResult::Success);
        assert_eq!(composer.state(), ComposeState::Idle);
        assert!(composer.begin_submit().is_some());
    }

    #[test]
    fn given_reset_when_draft_filled_then_everything_cleared() {
        let mut composer = Composer::new();
        composer.add_tag("x");
        composer.set_body("y");

        composer.reset();

        assert!(composer.draft().is_empty());
    }
}
