//! The engine task that owns a workspace session.
//!
//! Every mutation happens on this task, so the session needs no lock. Calls
//! to the assist and history gateways run in spawned tasks and report back
//! over an internal channel; the engine keeps serving commands meanwhile.
//!
//! Late results are filtered two ways. Each assist channel (idea, refine,
//! ghost) has a generation counter that is bumped whenever the channel is
//! re-triggered, and a result is applied only if it carries the current
//! generation. After teardown the internal receiver is gone, so anything
//! still in flight is dropped unseen.

use std::sync::Arc;
use std::time::Duration;

use artisan_types::config::WorkspaceConfig;
use artisan_types::error::{AssistError, RepositoryError, WorkspaceError};
use artisan_types::history::SaveRequest;
use artisan_types::prompt::{PartialPromptElements, PromptElements, PromptField, SuggestionSet};
use artisan_types::workspace::{TaskStatus, WorkspaceEntry, WorkspaceEvent, WorkspaceSnapshot};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::command::{Command, Internal, TimerKey};
use super::handle::WorkspaceHandle;
use super::session::WorkspaceSession;
use crate::assist::AssistGateway;
use crate::event::EventBus;
use crate::history::HistoryStore;
use crate::prompt::merge::append_bullet;
use crate::schedule::DebounceScheduler;

/// Buffer size for the handle -> engine command channel.
const COMMAND_BUFFER: usize = 64;

const BLANK_IDEA: &str = "Enter an idea first.";
const BLANK_PROMPT: &str = "Build a prompt before refining it.";

#[derive(Debug, Default)]
struct Generations {
    idea: u64,
    refine: u64,
    ghost: u64,
}

/// Autosave serialization state: at most one save is in flight, and fires
/// that land meanwhile collapse into a single follow-up.
#[derive(Debug, Default)]
struct SaveState {
    in_flight: bool,
    follow_up: bool,
}

pub struct WorkspaceEngine<A, H> {
    session: WorkspaceSession,
    assist: Arc<A>,
    history: Arc<H>,
    config: WorkspaceConfig,
    scheduler: DebounceScheduler<TimerKey>,
    generations: Generations,
    save: SaveState,
    /// Composed prompt and ghost as last published, for change detection.
    published_composed: String,
    published_ghost: String,
    events: EventBus,
    snapshot_tx: watch::Sender<WorkspaceSnapshot>,
    internal_tx: mpsc::UnboundedSender<Internal>,
}

impl<A, H> WorkspaceEngine<A, H>
where
    A: AssistGateway + 'static,
    H: HistoryStore + 'static,
{
    /// Start a session on a new task and return a handle to it.
    ///
    /// The session is bootstrapped from `entry` before the handle is
    /// returned, so the first snapshot already reflects it. Must be called
    /// inside a tokio runtime.
    pub fn spawn(
        entry: WorkspaceEntry,
        assist: Arc<A>,
        history: Arc<H>,
        config: WorkspaceConfig,
    ) -> WorkspaceHandle {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (internal_tx, internal_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(WorkspaceSnapshot::default());
        let events = EventBus::new(config.event_capacity);

        let mut engine = Self {
            session: WorkspaceSession::default(),
            assist,
            history,
            config,
            scheduler: DebounceScheduler::new(),
            generations: Generations::default(),
            save: SaveState::default(),
            published_composed: String::new(),
            published_ghost: String::new(),
            events: events.clone(),
            snapshot_tx,
            internal_tx,
        };
        engine.bootstrap(entry);

        tokio::spawn(engine.run(command_rx, internal_rx));
        WorkspaceHandle::new(command_tx, events, snapshot_rx)
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut internal: mpsc::UnboundedReceiver<Internal>,
    ) {
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Close { reply }) => {
                        self.shutdown();
                        let _ = reply.send(());
                        break;
                    }
                    Some(command) => self.handle_command(command),
                    None => {
                        debug!("all workspace handles dropped");
                        self.shutdown();
                        break;
                    }
                },
                Some(message) = internal.recv() => self.handle_internal(message),
            }
        }
    }

    fn bootstrap(&mut self, entry: WorkspaceEntry) {
        match entry {
            WorkspaceEntry::Empty => {}
            WorkspaceEntry::Seed(idea) => {
                self.session.idea = idea;
                if !self.session.idea.trim().is_empty() {
                    // Cannot fail: the idea is non-blank.
                    let _ = self.process_idea();
                }
            }
            WorkspaceEntry::FromTemplate(template) => {
                info!(template_id = template.id, title = %template.title, "opening workspace from template");
                self.session.idea = template.description;
                self.session.store.replace_all(template.prompt);
                self.fetch_suggestions();
            }
            WorkspaceEntry::FromHistory(record) => {
                info!(history_id = %record.id, "opening workspace from history");
                self.session.idea = record.idea;
                self.session.history_id = Some(record.id);
                self.session.store.replace_all(record.prompt);
                self.fetch_suggestions();
            }
        }
        self.sync();
    }

    fn shutdown(&mut self) {
        self.scheduler.cancel_all();
        self.events.publish(WorkspaceEvent::Closed);
        info!(history_id = ?self.session.history_id, "workspace closed");
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::SetIdea(idea) => {
                if self.session.idea != idea {
                    self.session.idea = idea;
                    self.events.publish(WorkspaceEvent::IdeaChanged);
                    // The idea is part of the saved record.
                    self.arm(TimerKey::Autosave, self.config.autosave_delay());
                }
            }
            Command::ProcessIdea { reply } => {
                let _ = reply.send(self.process_idea());
            }
            Command::SetField { field, value } => {
                self.session.store.set(field, value);
            }
            Command::ApplySuggestion {
                field,
                index,
                reply,
            } => {
                let _ = reply.send(self.apply_suggestion(field, index));
            }
            Command::AcceptGhost { reply } => {
                let result = if self.session.store.accept_ghost() {
                    Ok(())
                } else {
                    Err(WorkspaceError::validation("No suggestion to accept."))
                };
                let _ = reply.send(result);
            }
            Command::RequestRefine { reply } => {
                let _ = reply.send(self.request_refine());
            }
            Command::ApplyRefinement { index, reply } => {
                let _ = reply.send(self.apply_refinement(index));
            }
            Command::DismissError => self.set_error(None),
            Command::Snapshot { reply } => {
                let _ = reply.send(Ok(self.session.snapshot()));
                return;
            }
            // Handled by the run loop.
            Command::Close { .. } => return,
        }
        self.sync();
    }

    fn process_idea(&mut self) -> Result<(), WorkspaceError> {
        if self.session.idea.trim().is_empty() {
            return Err(self.reject(BLANK_IDEA));
        }

        self.generations.idea += 1;
        let generation = self.generations.idea;

        self.set_error(None);
        self.session.suggestions = None;
        self.session.store.replace_all(PromptElements::default());
        self.session.idea_status = TaskStatus::Loading;
        self.events.publish(WorkspaceEvent::IdeaProcessingStarted);
        info!(generation, "processing idea");

        let idea = self.session.idea.clone();
        let assist = Arc::clone(&self.assist);
        let tx = self.internal_tx.clone();
        tokio::spawn(async move {
            let result = tokio::try_join!(assist.expand_idea(&idea), assist.suggest_elements(&idea));
            let _ = tx.send(Internal::IdeaProcessed { generation, result });
        });
        Ok(())
    }

    /// Fetch a suggestion set for the current idea without touching the
    /// prompt fields. Used when a session opens on existing content.
    fn fetch_suggestions(&mut self) {
        if self.session.idea.trim().is_empty() {
            return;
        }
        let generation = self.generations.idea;
        let idea = self.session.idea.clone();
        let assist = Arc::clone(&self.assist);
        let tx = self.internal_tx.clone();
        tokio::spawn(async move {
            let result = assist.suggest_elements(&idea).await;
            let _ = tx.send(Internal::SuggestionsFetched { generation, result });
        });
    }

    fn apply_suggestion(&mut self, field: PromptField, index: usize) -> Result<(), WorkspaceError> {
        let item = self
            .session
            .suggestions
            .as_ref()
            .and_then(|set| set.for_field(field).get(index))
            .cloned()
            .ok_or_else(|| {
                WorkspaceError::validation(format!("No {field} suggestion at position {}.", index + 1))
            })?;
        self.session
            .store
            .update(field, |prev| append_bullet(prev, &item));
        Ok(())
    }

    fn request_refine(&mut self) -> Result<(), WorkspaceError> {
        let composed = self.session.store.composed();
        if composed.trim().is_empty() {
            return Err(self.reject(BLANK_PROMPT));
        }

        self.generations.refine += 1;
        let generation = self.generations.refine;

        self.set_error(None);
        self.session.refine_status = TaskStatus::Loading;
        self.events.publish(WorkspaceEvent::RefineStarted);
        info!(generation, "refining prompt");

        let assist = Arc::clone(&self.assist);
        let tx = self.internal_tx.clone();
        tokio::spawn(async move {
            let result = assist.refine(&composed).await;
            let _ = tx.send(Internal::Refined { generation, result });
        });
        Ok(())
    }

    fn apply_refinement(&mut self, index: usize) -> Result<(), WorkspaceError> {
        let item = self
            .session
            .refinements
            .get(index)
            .cloned()
            .ok_or_else(|| {
                WorkspaceError::validation(format!("No refinement at position {}.", index + 1))
            })?;
        self.session
            .store
            .update(PromptField::Details, |prev| append_bullet(prev, &item));
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Completions
    // -----------------------------------------------------------------------

    fn handle_internal(&mut self, message: Internal) {
        match message {
            Internal::TimerFired { key, seq } => {
                if !self.scheduler.claim(&key, seq) {
                    debug!(?key, seq, "ignoring superseded timer");
                    return;
                }
                match key {
                    TimerKey::Autosave => self.autosave(),
                    TimerKey::Ghost => self.fetch_ghost(),
                }
            }
            Internal::IdeaProcessed { generation, result } => {
                self.idea_processed(generation, result)
            }
            Internal::SuggestionsFetched { generation, result } => {
                self.suggestions_fetched(generation, result)
            }
            Internal::GhostFetched { generation, result } => {
                self.ghost_fetched(generation, result)
            }
            Internal::Refined { generation, result } => self.refined(generation, result),
            Internal::Saved { result } => self.saved(result),
        }
        self.sync();
    }

    fn idea_processed(
        &mut self,
        generation: u64,
        result: Result<(PartialPromptElements, SuggestionSet), AssistError>,
    ) {
        if generation != self.generations.idea {
            debug!(generation, current = self.generations.idea, "discarding stale idea result");
            return;
        }
        match result {
            Ok((partial, suggestions)) => {
                self.session.store.merge(&partial);
                self.session.suggestions = Some(suggestions);
                self.session.idea_status = TaskStatus::Ready;
                self.events.publish(WorkspaceEvent::IdeaProcessed);
                self.events.publish(WorkspaceEvent::SuggestionsUpdated);
                info!(generation, "idea processed");
            }
            Err(e) => {
                warn!(error = %e, "idea processing failed");
                let message = format!("Could not process the idea: {e}");
                self.session.idea_status = TaskStatus::Failed;
                self.events.publish(WorkspaceEvent::IdeaProcessingFailed {
                    message: message.clone(),
                });
                self.set_error(Some(message));
            }
        }
        self.rearm_ghost();
    }

    fn suggestions_fetched(&mut self, generation: u64, result: Result<SuggestionSet, AssistError>) {
        if generation != self.generations.idea {
            debug!(generation, "discarding stale suggestion set");
            return;
        }
        match result {
            Ok(suggestions) => {
                self.session.suggestions = Some(suggestions);
                self.events.publish(WorkspaceEvent::SuggestionsUpdated);
            }
            Err(e) => warn!(error = %e, "could not fetch suggestions"),
        }
    }

    fn ghost_fetched(&mut self, generation: u64, result: Result<String, AssistError>) {
        if generation != self.generations.ghost {
            debug!(generation, current = self.generations.ghost, "discarding stale ghost suggestion");
            return;
        }
        match result {
            Ok(text) if text.trim().is_empty() => self.session.store.clear_ghost(),
            Ok(text) => self.session.store.set_ghost(text),
            Err(e) => {
                debug!(error = %e, "ghost suggestion unavailable");
                self.session.store.clear_ghost();
            }
        }
    }

    fn refined(&mut self, generation: u64, result: Result<Vec<String>, AssistError>) {
        if generation != self.generations.refine {
            debug!(generation, "discarding stale refinement");
            return;
        }
        match result {
            Ok(items) => {
                let count = items.len();
                self.session.refinements = items;
                self.session.refine_status = TaskStatus::Ready;
                self.events.publish(WorkspaceEvent::RefineCompleted { count });
                info!(count, "prompt refined");
            }
            Err(e) => {
                warn!(error = %e, "refinement failed");
                let message = format!("Could not refine the prompt: {e}");
                self.session.refine_status = TaskStatus::Failed;
                self.events.publish(WorkspaceEvent::RefineFailed {
                    message: message.clone(),
                });
                self.set_error(Some(message));
            }
        }
        self.rearm_ghost();
    }

    fn saved(&mut self, result: Result<Uuid, RepositoryError>) {
        self.save.in_flight = false;
        match result {
            Ok(id) => {
                if self.session.adopt_history_id(id) {
                    info!(history_id = %id, "workspace saved to new history record");
                } else {
                    debug!(history_id = %id, "workspace saved");
                }
                self.events.publish(WorkspaceEvent::Saved { history_id: id });
            }
            Err(e) => warn!(error = %e, "autosave failed"),
        }
        if std::mem::take(&mut self.save.follow_up) {
            self.start_save();
        }
    }

    // -----------------------------------------------------------------------
    // Timers
    // -----------------------------------------------------------------------

    fn arm(&mut self, key: TimerKey, delay: Duration) {
        let tx = self.internal_tx.clone();
        self.scheduler.schedule(key, delay, move |seq| async move {
            let _ = tx.send(Internal::TimerFired { key, seq });
        });
    }

    fn on_prompt_changed(&mut self, composed: &str) {
        self.arm(TimerKey::Autosave, self.config.autosave_delay());

        self.generations.ghost += 1;
        if composed.trim().is_empty() {
            self.scheduler.cancel(&TimerKey::Ghost);
            self.session.store.clear_ghost();
        } else {
            self.arm(TimerKey::Ghost, self.config.ghost_delay());
        }
    }

    /// Restart the ghost cycle once no assist call blocks it. A cycle that
    /// fired while idea processing or a refine was loading was skipped.
    fn rearm_ghost(&mut self) {
        if self.session.assist_busy() || self.session.store.composed().trim().is_empty() {
            return;
        }
        self.generations.ghost += 1;
        self.arm(TimerKey::Ghost, self.config.ghost_delay());
    }

    fn autosave(&mut self) {
        if self.save.in_flight {
            debug!("save in flight, queueing follow-up");
            self.save.follow_up = true;
            return;
        }
        self.start_save();
    }

    fn start_save(&mut self) {
        if self.session.store.composed().trim().is_empty() {
            debug!("nothing to save");
            return;
        }
        let request = SaveRequest {
            id: self.session.history_id,
            idea: self.session.idea.clone(),
            prompt: self.session.store.get().clone(),
        };
        self.save.in_flight = true;

        let history = Arc::clone(&self.history);
        let tx = self.internal_tx.clone();
        tokio::spawn(async move {
            let result = history.save(&request).await;
            let _ = tx.send(Internal::Saved { result });
        });
    }

    fn fetch_ghost(&mut self) {
        if self.session.assist_busy() {
            debug!("assist call in progress, skipping ghost suggestion");
            return;
        }
        let composed = self.session.store.composed();
        if composed.trim().is_empty() {
            return;
        }

        let generation = self.generations.ghost;
        let assist = Arc::clone(&self.assist);
        let tx = self.internal_tx.clone();
        tokio::spawn(async move {
            let result = assist.next_addition(&composed).await;
            let _ = tx.send(Internal::GhostFetched { generation, result });
        });
    }

    // -----------------------------------------------------------------------
    // Publication
    // -----------------------------------------------------------------------

    fn set_error(&mut self, message: Option<String>) {
        if self.session.error != message {
            self.session.error = message.clone();
            self.events.publish(WorkspaceEvent::ErrorChanged { message });
        }
    }

    /// Surface a validation failure and hand it back to the caller.
    fn reject(&mut self, message: &str) -> WorkspaceError {
        self.set_error(Some(message.to_string()));
        WorkspaceError::validation(message)
    }

    /// Publish whatever changed since the last call and react to prompt edits.
    fn sync(&mut self) {
        let composed = self.session.store.composed();
        if composed != self.published_composed {
            self.published_composed.clone_from(&composed);
            self.events.publish(WorkspaceEvent::PromptChanged {
                composed: composed.clone(),
            });
            self.on_prompt_changed(&composed);
        }

        let ghost = self.session.store.ghost();
        if ghost != self.published_ghost {
            self.published_ghost = ghost.to_string();
            self.events.publish(WorkspaceEvent::GhostUpdated {
                text: ghost.to_string(),
            });
        }

        self.snapshot_tx.send_replace(self.session.snapshot());
    }
}
