//! Workspace session read model and events.
//!
//! The workspace engine in artisan-core owns the mutable session; views only
//! ever see a [`WorkspaceSnapshot`] clone and the [`WorkspaceEvent`] stream.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::history::HistoryRecord;
use crate::prompt::{PromptElements, SuggestionSet};
use crate::template::PromptTemplate;

/// Status of one on-demand assist channel (idea processing or refinement).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

impl TaskStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, TaskStatus::Loading)
    }
}

/// How a workspace visit starts. Decided once at the navigation boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum WorkspaceEntry {
    #[default]
    Empty,
    /// Start from a free-text idea and process it immediately.
    Seed(String),
    FromTemplate(PromptTemplate),
    FromHistory(HistoryRecord),
}

/// Point-in-time copy of the workspace session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    pub idea: String,
    pub prompt: PromptElements,
    /// Composed prompt text derived from `prompt`.
    pub composed: String,
    pub suggestions: Option<SuggestionSet>,
    pub ghost_suggestion: String,
    pub refinements: Vec<String>,
    pub history_id: Option<Uuid>,
    pub idea_status: TaskStatus,
    pub refine_status: TaskStatus,
    /// User-visible error message, if any.
    pub error: Option<String>,
}

impl WorkspaceSnapshot {
    /// Text for copying out of the workspace: the composed prompt, plus the
    /// ghost suggestion as a trailing bullet while one is showing.
    pub fn export_text(&self) -> String {
        if self.ghost_suggestion.is_empty() {
            self.composed.clone()
        } else {
            format!("{}\n- {}", self.composed, self.ghost_suggestion)
        }
    }

    /// Whether the ghost suggestion can be accepted right now.
    pub fn has_ghost(&self) -> bool {
        !self.ghost_suggestion.is_empty()
    }
}

/// Events broadcast on every workspace state transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkspaceEvent {
    IdeaChanged,

    /// The composed prompt text changed.
    PromptChanged { composed: String },

    IdeaProcessingStarted,
    IdeaProcessed,
    IdeaProcessingFailed { message: String },

    /// A new suggestion set arrived (from processing or bootstrap).
    SuggestionsUpdated,

    /// Ghost suggestion replaced or cleared (empty text).
    GhostUpdated { text: String },

    RefineStarted,
    RefineCompleted { count: usize },
    RefineFailed { message: String },

    /// A save completed under the given record id.
    Saved { history_id: Uuid },

    /// The user-visible error message was set or cleared.
    ErrorChanged { message: Option<String> },

    /// The session was torn down; no further events follow.
    Closed,
}
