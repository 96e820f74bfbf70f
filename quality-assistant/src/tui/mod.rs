// TUI: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the latest `AppSnapshot` plus purely
// visual state (selected result slot, quit confirmation, chat scroll). The
// app orchestrator pushes `UiUpdate` messages over an mpsc channel; the TUI
// applies them to `ViewState` and re-renders on a fixed tick.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::panel::Category;
use crate::protocol::{AppSnapshot, UiUpdate, UserCommand};

use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state for rendering.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Latest state pushed by the app orchestrator.
    pub snapshot: AppSnapshot,
    /// Result slot targeted by the elaborate key.
    pub selected: Category,
    /// Whether the quit confirmation dialog is showing.
    pub confirm_quit: bool,
    /// Lines scrolled back from the bottom of the chat transcript.
    pub chat_scroll_back: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            snapshot: AppSnapshot::default(),
            selected: Category::Enterprise,
            confirm_quit: false,
            chat_scroll_back: 0,
        }
    }
}

impl ViewState {
    pub fn chat_open(&self) -> bool {
        self.snapshot.chat.is_some()
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::StateSnapshot(snapshot) => {
            let was_open = state.snapshot.chat.as_ref().map(|c| c.category);
            let now_open = snapshot.chat.as_ref().map(|c| c.category);
            if was_open != now_open {
                state.chat_scroll_back = 0;
            }
            state.snapshot = *snapshot;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete screen: panel zones, then any overlay on top.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::question_input::render(frame, layout.question, state);
    widgets::controls::render(frame, layout.controls, state);
    for category in Category::ALL {
        let area = layout.results[category.index()];
        widgets::result_slot::render(frame, area, state, category);
    }
    render_help_bar(frame, &layout, state);

    if state.chat_open() {
        widgets::chat_popup::render(frame, frame.area(), state);
    }
    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

/// Key hints for the current mode.
pub fn help_text(state: &ViewState) -> &'static str {
    if state.confirm_quit {
        " y:Quit | n/Esc:Cancel"
    } else if state.chat_open() {
        " Enter:Send | Up/Down:Scroll | Esc:Close"
    } else {
        " Enter:Submit | Alt+1-9:Example | Tab:Select slot | Ctrl+O:Ask more | Ctrl+U:Clear | Esc:Quit"
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        help_text(state),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
    frame_interval: Duration,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(frame_interval);
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        info!("UI channel closed, leaving TUI");
                        break Ok(());
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            debug!("Sending command: {:?}", cmd);
                            if cmd_tx.send(cmd).await.is_err() {
                                warn!("Command channel closed");
                                break Ok(());
                            }
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse, resize, focus: the next tick redraws
                    }
                    Some(Err(e)) => {
                        break Err(anyhow::Error::new(e).context("terminal input error"));
                    }
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::new(e).context("failed to draw frame"));
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
