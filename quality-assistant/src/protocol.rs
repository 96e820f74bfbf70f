// Message types exchanged between the app orchestrator, lookup tasks and
// the TUI.

use crate::chat::ChatSession;
use crate::panel::{Category, PanelState, ResultSet, TextEdit};

/// Completion messages sent by spawned lookup tasks back to the app loop.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupEvent {
    /// All three lookups for a submission resolved.
    Completed { generation: u64, results: ResultSet },
    /// A submission was abandoned because one lookup failed.
    Failed { generation: u64, message: String },
    /// A chat follow-up was answered.
    FollowUpReply { generation: u64, text: String },
    /// A chat follow-up lookup failed.
    FollowUpFailed { generation: u64, message: String },
}

/// Commands sent from the TUI to the app orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Edit the focused text input: the chat follow-up when the overlay is
    /// open, the question otherwise.
    Edit(TextEdit),
    /// Load the example question at this index.
    SelectExample(usize),
    Submit,
    Elaborate(Category),
    DismissChat,
    SendFollowUp,
    Quit,
}

/// Everything the TUI needs to draw one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppSnapshot {
    pub title: String,
    pub examples: Vec<String>,
    pub panel: PanelState,
    pub chat: Option<ChatSession>,
}

/// Updates pushed from the app orchestrator to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    StateSnapshot(Box<AppSnapshot>),
}
