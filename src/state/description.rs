// Pull request description editor state.
// View/edit toggle, draft tracking, and the save/cancel flow around one PATCH call.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::api::{PullRequest, UpdatePullReqRequest};
use crate::error::Result;

static NEXT_EDITOR_ID: AtomicU64 = AtomicU64::new(1);

/// Editor mode. `Saving` sits between `Edit` and the save result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    View,
    Edit,
    Saving,
}

/// Pane shown by the editable surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorPane {
    #[default]
    Write,
    Preview,
}

/// Local draft of the description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftState {
    pub is_editing: bool,
    /// Last text confirmed by the server.
    pub original_text: String,
    pub current_text: String,
    /// `current_text` differs from `original_text`.
    pub is_dirty: bool,
}

impl DraftState {
    fn new(text: String) -> Self {
        Self {
            is_editing: false,
            original_text: text.clone(),
            current_text: text,
            is_dirty: false,
        }
    }
}

/// Identifies one in-flight save of one editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveTicket {
    editor_id: u64,
    seq: u64,
}

impl SaveTicket {
    pub fn editor_id(&self) -> u64 {
        self.editor_id
    }
}

/// Update call prepared by `begin_save`.
#[derive(Debug, Clone)]
pub struct SaveRequest {
    pub ticket: SaveTicket,
    pub number: u64,
    pub body: UpdatePullReqRequest,
}

/// Result of applying a save response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Draft kept; carries the message shown to the user.
    Failed(String),
    /// Response did not belong to the current in-flight save.
    Discarded,
}

/// Capabilities the editor needs from the page hosting it.
pub trait EditorHost {
    /// The pull request changed on the server; re-fetch it.
    fn entity_updated(&mut self);
    /// Raise a transient error notification.
    fn show_error(&mut self, message: &str);
    /// Warn before leaving the page while `when` is true.
    fn set_leave_guard(&mut self, when: bool);
}

/// The single mutation the editor depends on.
pub trait PullRequestUpdater {
    fn update_pull_request(
        &self,
        repo_path: &str,
        number: u64,
        request: &UpdatePullReqRequest,
    ) -> impl Future<Output = Result<PullRequest>> + Send;
}

/// Inline editor for a pull request description.
#[derive(Debug)]
pub struct DescriptionEditor {
    id: u64,
    mode: EditorMode,
    pane: EditorPane,
    draft: DraftState,
    save_seq: u64,
    in_flight: Option<SaveTicket>,
}

impl DescriptionEditor {
    /// Create an editor in view mode showing the pull request's description.
    pub fn new(pull_request: &PullRequest) -> Self {
        Self {
            id: NEXT_EDITOR_ID.fetch_add(1, Ordering::Relaxed),
            mode: EditorMode::View,
            pane: EditorPane::Write,
            draft: DraftState::new(pull_request.description.clone()),
            save_seq: 0,
            in_flight: None,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn pane(&self) -> EditorPane {
        self.pane
    }

    pub fn draft(&self) -> &DraftState {
        &self.draft
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_editing
    }

    pub fn is_dirty(&self) -> bool {
        self.draft.is_dirty
    }

    pub fn is_saving(&self) -> bool {
        self.mode == EditorMode::Saving
    }

    /// Text the viewer shows outside edit mode.
    pub fn view_text(&self) -> &str {
        &self.draft.original_text
    }

    /// Enter edit mode. Returns false if already editing.
    pub fn start_edit(&mut self) -> bool {
        if self.mode != EditorMode::View {
            return false;
        }
        self.mode = EditorMode::Edit;
        self.pane = EditorPane::Write;
        self.draft.is_editing = true;
        true
    }

    /// Replace the draft text. Ignored unless in `Edit`.
    pub fn update_draft(&mut self, text: impl Into<String>, host: &mut impl EditorHost) -> bool {
        if self.mode != EditorMode::Edit {
            return false;
        }
        self.draft.current_text = text.into();
        self.draft_changed(host);
        true
    }

    /// Append a character to the draft.
    pub fn insert_char(&mut self, c: char, host: &mut impl EditorHost) -> bool {
        if self.mode != EditorMode::Edit {
            return false;
        }
        self.draft.current_text.push(c);
        self.draft_changed(host);
        true
    }

    /// Remove the last character of the draft.
    pub fn backspace(&mut self, host: &mut impl EditorHost) -> bool {
        if self.mode != EditorMode::Edit || self.draft.current_text.pop().is_none() {
            return false;
        }
        self.draft_changed(host);
        true
    }

    fn draft_changed(&mut self, host: &mut impl EditorHost) {
        self.draft.is_dirty = self.draft.current_text != self.draft.original_text;
        host.set_leave_guard(self.draft.is_dirty);
    }

    /// Switch between the Write and Preview panes.
    pub fn toggle_pane(&mut self) {
        if self.mode == EditorMode::Edit {
            self.pane = match self.pane {
                EditorPane::Write => EditorPane::Preview,
                EditorPane::Preview => EditorPane::Write,
            };
        }
    }

    /// Discard the draft and return to view mode. No network call.
    pub fn cancel(&mut self, host: &mut impl EditorHost) -> bool {
        if self.mode != EditorMode::Edit {
            return false;
        }
        self.draft.current_text = self.draft.original_text.clone();
        self.draft.is_dirty = false;
        self.draft.is_editing = false;
        self.mode = EditorMode::View;
        host.set_leave_guard(false);
        true
    }

    /// Enter `Saving` and build the update call.
    ///
    /// The title is taken unchanged from `pull_request`. Returns `None`
    /// unless in `Edit`, which also blocks double submission.
    pub fn begin_save(&mut self, pull_request: &PullRequest) -> Option<SaveRequest> {
        if self.mode != EditorMode::Edit {
            return None;
        }
        self.save_seq += 1;
        let ticket = SaveTicket {
            editor_id: self.id,
            seq: self.save_seq,
        };
        self.in_flight = Some(ticket);
        self.mode = EditorMode::Saving;

        Some(SaveRequest {
            ticket,
            number: pull_request.number,
            body: UpdatePullReqRequest {
                title: pull_request.title.clone(),
                description: self.draft.current_text.clone(),
            },
        })
    }

    /// Apply the response of the save identified by `ticket`.
    pub fn complete_save(
        &mut self,
        ticket: SaveTicket,
        result: Result<PullRequest>,
        host: &mut impl EditorHost,
    ) -> SaveOutcome {
        if self.mode != EditorMode::Saving || self.in_flight != Some(ticket) {
            tracing::debug!(editor = self.id, ?ticket, "discarding stale save response");
            return SaveOutcome::Discarded;
        }
        self.in_flight = None;

        match result {
            Ok(pr) => {
                tracing::info!(number = pr.number, "description saved");
                self.draft.original_text = self.draft.current_text.clone();
                self.draft.is_dirty = false;
                self.draft.is_editing = false;
                self.mode = EditorMode::View;
                host.set_leave_guard(false);
                host.entity_updated();
                SaveOutcome::Saved
            }
            Err(err) => {
                tracing::warn!(error = %err, "description update failed");
                let message = err.user_message();
                self.mode = EditorMode::Edit;
                host.show_error(&message);
                SaveOutcome::Failed(message)
            }
        }
    }

    /// Save inline: one update call, then apply its result.
    pub async fn save<U: PullRequestUpdater>(
        &mut self,
        repo_path: &str,
        pull_request: &PullRequest,
        updater: &U,
        host: &mut impl EditorHost,
    ) -> SaveOutcome {
        let Some(request) = self.begin_save(pull_request) else {
            return SaveOutcome::Discarded;
        };
        let result = updater
            .update_pull_request(repo_path, request.number, &request.body)
            .await;
        self.complete_save(request.ticket, result, host)
    }
}
