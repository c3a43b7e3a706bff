//! Cloneable view-side handle to a running workspace engine.

use artisan_types::error::WorkspaceError;
use artisan_types::prompt::PromptField;
use artisan_types::workspace::{WorkspaceEvent, WorkspaceSnapshot};
use tokio::sync::{broadcast, mpsc, oneshot, watch};

use super::command::{Command, Reply};
use crate::event::EventBus;

/// Handle to a workspace session.
///
/// Every method returns [`WorkspaceError::Closed`] once the session has
/// been torn down. The session also tears itself down when the last handle
/// is dropped.
#[derive(Clone)]
pub struct WorkspaceHandle {
    commands: mpsc::Sender<Command>,
    events: EventBus,
    snapshot: watch::Receiver<WorkspaceSnapshot>,
}

impl WorkspaceHandle {
    pub(crate) fn new(
        commands: mpsc::Sender<Command>,
        events: EventBus,
        snapshot: watch::Receiver<WorkspaceSnapshot>,
    ) -> Self {
        Self {
            commands,
            events,
            snapshot,
        }
    }

    async fn send(&self, command: Command) -> Result<(), WorkspaceError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| WorkspaceError::Closed)
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(Reply<T>) -> Command,
    ) -> Result<T, WorkspaceError> {
        let (reply, rx) = oneshot::channel();
        self.send(command(reply)).await?;
        rx.await.map_err(|_| WorkspaceError::Closed)?
    }

    pub async fn set_idea(&self, idea: impl Into<String>) -> Result<(), WorkspaceError> {
        self.send(Command::SetIdea(idea.into())).await
    }

    /// Start expanding the current idea into prompt elements.
    ///
    /// Returns once processing has started; watch `idea_status` for the
    /// outcome. Fails with a validation error when the idea is blank.
    pub async fn process_idea(&self) -> Result<(), WorkspaceError> {
        self.request(|reply| Command::ProcessIdea { reply }).await
    }

    pub async fn set_field(
        &self,
        field: PromptField,
        value: impl Into<String>,
    ) -> Result<(), WorkspaceError> {
        self.send(Command::SetField {
            field,
            value: value.into(),
        })
        .await
    }

    /// Append the `index`-th suggestion for `field` as a bullet line.
    pub async fn apply_suggestion(
        &self,
        field: PromptField,
        index: usize,
    ) -> Result<(), WorkspaceError> {
        self.request(|reply| Command::ApplySuggestion {
            field,
            index,
            reply,
        })
        .await
    }

    /// Move the showing ghost suggestion into `details`.
    pub async fn accept_ghost(&self) -> Result<(), WorkspaceError> {
        self.request(|reply| Command::AcceptGhost { reply }).await
    }

    /// Start a refinement of the composed prompt.
    ///
    /// Returns once the call has started; watch `refine_status`.
    pub async fn request_refine(&self) -> Result<(), WorkspaceError> {
        self.request(|reply| Command::RequestRefine { reply }).await
    }

    /// Append the `index`-th refinement to `details` as a bullet line.
    pub async fn apply_refinement_item(&self, index: usize) -> Result<(), WorkspaceError> {
        self.request(|reply| Command::ApplyRefinement { index, reply })
            .await
    }

    pub async fn dismiss_error(&self) -> Result<(), WorkspaceError> {
        self.send(Command::DismissError).await
    }

    /// Current session state, after every previously sent command has been
    /// applied.
    pub async fn snapshot(&self) -> Result<WorkspaceSnapshot, WorkspaceError> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Subscribe to state transition events. Drop the receiver to unsubscribe.
    pub fn subscribe(&self) -> broadcast::Receiver<WorkspaceEvent> {
        self.events.subscribe()
    }

    /// Receiver that always holds the latest published snapshot.
    pub fn watch(&self) -> watch::Receiver<WorkspaceSnapshot> {
        self.snapshot.clone()
    }

    /// Number of live event subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }

    pub fn is_closed(&self) -> bool {
        self.commands.is_closed()
    }

    /// Tear the session down: pending timers are cancelled and results that
    /// arrive later are dropped. Closing an already closed session is a no-op.
    pub async fn close(&self) {
        let (reply, rx) = oneshot::channel();
        if self.commands.send(Command::Close { reply }).await.is_ok() {
            let _ = rx.await;
        }
    }
}

impl std::fmt::Debug for WorkspaceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceHandle")
            .field("closed", &self.is_closed())
            .field("subscribers", &self.events.receiver_count())
            .finish()
    }
}
