//! Messages delivered to the engine task.

use artisan_types::error::{AssistError, RepositoryError, WorkspaceError};
use artisan_types::prompt::{PartialPromptElements, PromptField, SuggestionSet};
use artisan_types::workspace::WorkspaceSnapshot;
use tokio::sync::oneshot;
use uuid::Uuid;

pub(crate) type Reply<T = ()> = oneshot::Sender<Result<T, WorkspaceError>>;

/// Requests from a [`WorkspaceHandle`](super::WorkspaceHandle).
#[derive(Debug)]
pub(crate) enum Command {
    SetIdea(String),
    ProcessIdea { reply: Reply },
    SetField { field: PromptField, value: String },
    ApplySuggestion { field: PromptField, index: usize, reply: Reply },
    AcceptGhost { reply: Reply },
    RequestRefine { reply: Reply },
    ApplyRefinement { index: usize, reply: Reply },
    DismissError,
    Snapshot { reply: Reply<WorkspaceSnapshot> },
    Close { reply: oneshot::Sender<()> },
}

/// Debounce channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TimerKey {
    Autosave,
    Ghost,
}

/// Completions reported back to the engine by timers and spawned calls.
///
/// Assist results carry the generation of their channel at issue time.
#[derive(Debug)]
pub(crate) enum Internal {
    TimerFired {
        key: TimerKey,
        seq: u64,
    },
    IdeaProcessed {
        generation: u64,
        result: Result<(PartialPromptElements, SuggestionSet), AssistError>,
    },
    SuggestionsFetched {
        generation: u64,
        result: Result<SuggestionSet, AssistError>,
    },
    GhostFetched {
        generation: u64,
        result: Result<String, AssistError>,
    },
    Refined {
        generation: u64,
        result: Result<Vec<String>, AssistError>,
    },
    Saved {
        result: Result<Uuid, RepositoryError>,
    },
}
