// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages sent to the
// app orchestrator, or into local ViewState mutations (slot selection,
// chat scrolling, quit confirmation).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::ViewState;
use crate::panel::TextEdit;
use crate::protocol::UserCommand;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator. Returns `None` when it was handled locally or ignored.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // On Windows crossterm emits both Press and Release events.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of mode
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    if view_state.chat_open() {
        return handle_chat_mode(key_event, view_state);
    }

    handle_panel_mode(key_event, view_state)
}

/// Keys while the question panel has focus.
fn handle_panel_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key_event.modifiers.contains(KeyModifiers::ALT);

    match key_event.code {
        // The snapshot may lag behind typed keys; the orchestrator rejects
        // blank or in-flight submissions itself.
        KeyCode::Enter => Some(UserCommand::Submit),

        KeyCode::Char(c) if alt => {
            let index = example_index(c)?;
            (index < view_state.snapshot.examples.len())
                .then_some(UserCommand::SelectExample(index))
        }

        KeyCode::Char('o') if ctrl => {
            let category = view_state.selected;
            view_state
                .snapshot
                .panel
                .can_elaborate(category)
                .then_some(UserCommand::Elaborate(category))
        }
        KeyCode::Char('u') if ctrl => Some(UserCommand::Edit(TextEdit::Clear)),
        KeyCode::Char(_) if ctrl => None,

        KeyCode::Tab => {
            view_state.selected = view_state.selected.next();
            None
        }
        KeyCode::BackTab => {
            view_state.selected = view_state.selected.prev();
            None
        }

        KeyCode::Esc => {
            view_state.confirm_quit = true;
            None
        }

        KeyCode::Backspace => Some(UserCommand::Edit(TextEdit::Backspace)),
        KeyCode::Char(c) => Some(UserCommand::Edit(TextEdit::Insert(c))),

        _ => None,
    }
}

/// Keys while the chat overlay is open.
fn handle_chat_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key_event.modifiers.contains(KeyModifiers::ALT);

    match key_event.code {
        KeyCode::Esc => Some(UserCommand::DismissChat),
        // Blank or pending follow-ups are rejected by the orchestrator
        KeyCode::Enter => Some(UserCommand::SendFollowUp),
        KeyCode::Up => {
            view_state.chat_scroll_back = view_state.chat_scroll_back.saturating_add(1);
            None
        }
        KeyCode::Down => {
            view_state.chat_scroll_back = view_state.chat_scroll_back.saturating_sub(1);
            None
        }
        KeyCode::PageUp => {
            view_state.chat_scroll_back = view_state.chat_scroll_back.saturating_add(page_size());
            None
        }
        KeyCode::PageDown => {
            view_state.chat_scroll_back = view_state.chat_scroll_back.saturating_sub(page_size());
            None
        }
        KeyCode::Char('u') if ctrl => Some(UserCommand::Edit(TextEdit::Clear)),
        KeyCode::Char(_) if ctrl || alt => None,
        KeyCode::Backspace => Some(UserCommand::Edit(TextEdit::Backspace)),
        KeyCode::Char(c) => Some(UserCommand::Edit(TextEdit::Insert(c))),
        _ => None,
    }
}

/// Handle key events while in quit confirmation mode.
///
/// - `y` confirms quit
/// - `n` or `Esc` cancels
/// - All other keys are blocked
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(UserCommand::Quit),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

/// Map '1'..='9' to a zero-based example index.
fn example_index(c: char) -> Option<usize> {
    match c.to_digit(10) {
        Some(d) if d >= 1 => Some(d as usize - 1),
        _ => None,
    }
}

/// Page size for PageUp/PageDown scrolling.
fn page_size() -> usize {
    10
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
