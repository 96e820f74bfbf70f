// Application state and orchestration logic.
//
// The central event loop that owns the panel state and the chat session,
// applies user commands through the panel state machine, runs the effects it
// returns (spawning lookup tasks, opening/closing the chat), and pushes
// snapshots to the TUI render loop.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::chat::ChatSession;
use crate::config::Config;
use crate::lookup::LookupSet;
use crate::panel::{transition, Effect, PanelEvent, PanelState};
use crate::protocol::{AppSnapshot, LookupEvent, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    pub panel: PanelState,
    /// Open follow-up chat; present exactly when `panel.active_chat` is.
    pub chat: Option<ChatSession>,
    pub lookups: LookupSet,
    /// Sender handed to spawned lookup tasks.
    pub lookup_tx: mpsc::Sender<LookupEvent>,
    pub current_lookup_task: Option<JoinHandle<()>>,
    pub current_chat_task: Option<JoinHandle<()>>,
    /// Follow-up generation counter. Shared by every chat session so a reply
    /// still queued from a closed session can never match the open one.
    pub follow_up_generation: u64,
}

impl AppState {
    pub fn new(config: Config, lookups: LookupSet, lookup_tx: mpsc::Sender<LookupEvent>) -> Self {
        AppState {
            config,
            panel: PanelState::default(),
            chat: None,
            lookups,
            lookup_tx,
            current_lookup_task: None,
            current_chat_task: None,
            follow_up_generation: 0,
        }
    }

    /// Feed an event through the panel state machine and run its effect.
    pub fn dispatch(&mut self, event: PanelEvent) {
        let panel = std::mem::take(&mut self.panel);
        let (panel, effect) = transition(panel, event);
        self.panel = panel;
        if let Some(effect) = effect {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::StartLookups {
                question,
                generation,
            } => self.spawn_lookups(question, generation),
            Effect::OpenChat {
                category,
                initial_message,
            } => {
                self.cancel_chat_task();
                info!("Opening follow-up chat for {}", category);
                self.chat = Some(ChatSession::open(category, initial_message));
            }
            Effect::CloseChat => {
                self.cancel_chat_task();
                if let Some(chat) = self.chat.take() {
                    info!(
                        "Closed follow-up chat for {} ({} messages)",
                        chat.category,
                        chat.messages.len()
                    );
                }
            }
        }
    }

    /// Spawn the three-way lookup for a submission.
    fn spawn_lookups(&mut self, question: String, generation: u64) {
        let lookups = self.lookups.clone();
        let tx = self.lookup_tx.clone();

        info!("Submitting question (gen: {}): {}", generation, question);

        let handle = tokio::spawn(async move {
            let event = match lookups.fetch_all(&question).await {
                Ok(results) => LookupEvent::Completed {
                    generation,
                    results,
                },
                Err(e) => LookupEvent::Failed {
                    generation,
                    message: e.to_string(),
                },
            };
            if tx.send(event).await.is_err() {
                debug!("Lookup receiver dropped before gen {} completed", generation);
            }
        });

        self.current_lookup_task = Some(handle);
    }

    /// Send the typed follow-up in the open chat to its category's lookup.
    pub fn send_follow_up(&mut self) {
        let Some(chat) = self.chat.as_mut() else {
            return;
        };
        if !chat.can_send() {
            return;
        }
        self.follow_up_generation += 1;
        let generation = self.follow_up_generation;
        let Some(text) = chat.begin_follow_up(generation) else {
            return;
        };
        let category = chat.category;
        let lookup = self.lookups.for_category(category);
        let tx = self.lookup_tx.clone();

        info!(
            "Sending follow-up to {} (gen: {}): {}",
            category, generation, text
        );

        self.cancel_chat_task();
        let handle = tokio::spawn(async move {
            let event = match lookup.lookup(category, &text).await {
                Ok(text) => LookupEvent::FollowUpReply { generation, text },
                Err(e) => LookupEvent::FollowUpFailed {
                    generation,
                    message: e.to_string(),
                },
            };
            if tx.send(event).await.is_err() {
                debug!("Lookup receiver dropped before follow-up gen {} completed", generation);
            }
        });
        self.current_chat_task = Some(handle);
    }

    /// Cancel the in-flight follow-up task, if any.
    pub fn cancel_chat_task(&mut self) {
        if let Some(handle) = self.current_chat_task.take() {
            handle.abort();
        }
    }

    /// Abort all outstanding tasks. Used on shutdown.
    pub fn cancel_all_tasks(&mut self) {
        self.cancel_chat_task();
        if let Some(handle) = self.current_lookup_task.take() {
            handle.abort();
            info!("Cancelled in-flight lookup");
        }
    }

    pub fn build_snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            title: self.config.assistant.title.clone(),
            examples: self.config.examples.questions.clone(),
            panel: self.panel.clone(),
            chat: self.chat.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the main application event loop.
///
/// Listens on two channels using `tokio::select!`:
/// 1. Lookup completions from spawned tasks
/// 2. User commands from the TUI
///
/// Pushes a fresh snapshot through `ui_tx` after every handled message.
pub async fn run(
    mut lookup_rx: mpsc::Receiver<LookupEvent>,
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");
    push_snapshot(&state, &ui_tx).await;

    loop {
        tokio::select! {
            // --- Lookup completions ---
            // AppState holds a sender, so this channel never closes while
            // the loop runs.
            Some(event) = lookup_rx.recv() => {
                handle_lookup_event(&mut state, event);
                push_snapshot(&state, &ui_tx).await;
            }

            // --- User commands ---
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd);
                        push_snapshot(&state, &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }
        }
    }

    state.cancel_all_tasks();
    info!("Application event loop exiting");
    Ok(())
}

async fn push_snapshot(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let snapshot = state.build_snapshot();
    let _ = ui_tx.send(UiUpdate::StateSnapshot(Box::new(snapshot))).await;
}

/// Apply a completion from a lookup task.
///
/// Submission failures are reported here and nowhere else: the panel simply
/// returns to its pre-submission appearance.
pub fn handle_lookup_event(state: &mut AppState, event: LookupEvent) {
    match event {
        LookupEvent::Completed {
            generation,
            results,
        } => {
            info!(
                "Lookups completed (gen: {}, {} categories populated)",
                generation,
                results.populated()
            );
            state.current_lookup_task = None;
            state.dispatch(PanelEvent::LookupsSucceeded {
                generation,
                results,
            });
        }
        LookupEvent::Failed {
            generation,
            message,
        } => {
            error!("Failed to fetch results (gen: {}): {}", generation, message);
            state.current_lookup_task = None;
            state.dispatch(PanelEvent::LookupsFailed { generation });
        }
        LookupEvent::FollowUpReply { generation, text } => {
            let accepted = state
                .chat
                .as_mut()
                .is_some_and(|chat| chat.receive_reply(generation, text));
            if accepted {
                state.current_chat_task = None;
            } else {
                debug!("Discarding stale follow-up reply (gen: {})", generation);
            }
        }
        LookupEvent::FollowUpFailed {
            generation,
            message,
        } => {
            warn!("Follow-up lookup failed (gen: {}): {}", generation, message);
            let abandoned = state
                .chat
                .as_mut()
                .is_some_and(|chat| chat.abandon_follow_up(generation));
            if abandoned {
                state.current_chat_task = None;
            }
        }
    }
}

/// Handle a user command from the TUI.
pub fn handle_user_command(state: &mut AppState, cmd: UserCommand) {
    match cmd {
        UserCommand::Edit(edit) => match state.chat.as_mut() {
            Some(chat) => chat.apply_edit(edit),
            None => state.dispatch(PanelEvent::Edit(edit)),
        },
        UserCommand::SelectExample(index) => {
            match state.config.examples.questions.get(index) {
                Some(example) => {
                    let example = example.clone();
                    state.dispatch(PanelEvent::SelectExample(example));
                }
                None => debug!("No example question at index {}", index),
            }
        }
        UserCommand::Submit => {
            if !state.panel.can_submit() {
                debug!(
                    "Submit ignored (loading: {}, blank question: {})",
                    state.panel.loading,
                    state.panel.question.trim().is_empty()
                );
            }
            state.dispatch(PanelEvent::Submit);
        }
        UserCommand::Elaborate(category) => {
            state.dispatch(PanelEvent::RequestElaboration(category));
        }
        UserCommand::DismissChat => {
            state.dispatch(PanelEvent::DismissElaboration);
        }
        UserCommand::SendFollowUp => state.send_follow_up(),
        UserCommand::Quit => {
            // Handled in the main loop
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
