//! Mutable session state owned by the engine task.

use artisan_types::prompt::SuggestionSet;
use artisan_types::workspace::{TaskStatus, WorkspaceSnapshot};
use uuid::Uuid;

use crate::prompt::PromptStore;

/// State of one workspace visit.
///
/// `history_id` is assigned at most once: either at bootstrap from a history
/// record or by the first successful save.
#[derive(Debug, Default)]
pub struct WorkspaceSession {
    pub idea: String,
    pub store: PromptStore,
    pub suggestions: Option<SuggestionSet>,
    pub refinements: Vec<String>,
    pub history_id: Option<Uuid>,
    pub idea_status: TaskStatus,
    pub refine_status: TaskStatus,
    pub error: Option<String>,
}

impl WorkspaceSession {
    /// Whether an on-demand assist call (idea or refine) is outstanding.
    pub fn assist_busy(&self) -> bool {
        self.idea_status.is_loading() || self.refine_status.is_loading()
    }

    /// Record the id of a completed save unless one is already assigned.
    ///
    /// Returns whether the id was adopted.
    pub fn adopt_history_id(&mut self, id: Uuid) -> bool {
        if self.history_id.is_some() {
            return false;
        }
        self.history_id = Some(id);
        true
    }

    pub fn snapshot(&self) -> WorkspaceSnapshot {
        WorkspaceSnapshot {
            idea: self.idea.clone(),
            prompt: self.store.get().clone(),
            composed: self.store.composed(),
            suggestions: self.suggestions.clone(),
            ghost_suggestion: self.store.ghost().to_string(),
            refinements: self.refinements.clone(),
            history_id: self.history_id,
            idea_status: self.idea_status,
            refine_status: self.refine_status,
            error: self.error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use artisan_types::prompt::PromptField;

    use super::*;

    #[test]
    fn history_id_is_adopted_once() {
        let mut session = WorkspaceSession::default();
        let first = Uuid::now_v7();
        let second = Uuid::now_v7();

        assert!(session.adopt_history_id(first));
        assert!(!session.adopt_history_id(second));
        assert_eq!(session.history_id, Some(first));
    }

    #[test]
    fn snapshot_includes_composed_prompt_and_ghost() {
        let mut session = WorkspaceSession {
            idea: "city at night".to_string(),
            ..Default::default()
        };
        session.store.set(PromptField::Role, "illustrator");
        session.store.set_ghost("- add rain");

        let snapshot = session.snapshot();
        assert_eq!(snapshot.idea, "city at night");
        assert_eq!(snapshot.composed, "## Role\nillustrator");
        assert_eq!(snapshot.ghost_suggestion, "- add rain");
        assert_eq!(snapshot.idea_status, TaskStatus::Idle);
    }

    #[test]
    fn assist_busy_tracks_both_channels() {
        let mut session = WorkspaceSession::default();
        assert!(!session.assist_busy());
        session.refine_status = TaskStatus::Loading;
        assert!(session.assist_busy());
        session.refine_status = TaskStatus::Ready;
        session.idea_status = TaskStatus::Loading;
        assert!(session.assist_busy());
    }
}
