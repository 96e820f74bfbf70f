// Follow-up chat session for a single result category.
//
// Opened with the category's result text as the first assistant message.
// The user can send follow-up questions; each one is answered by the same
// category's lookup. Replies are tagged with a generation handed out by the
// app orchestrator. Generations are never reused across sessions, so a reply
// for an earlier follow-up or a previous session is never attributed to the
// current one.

use chrono::{DateTime, Local};

use crate::panel::{Category, TextEdit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub sent_at: DateTime<Local>,
}

impl ChatMessage {
    fn now(role: ChatRole, text: String) -> Self {
        ChatMessage {
            role,
            text,
            sent_at: Local::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatSession {
    pub category: Category,
    pub messages: Vec<ChatMessage>,
    /// Follow-up being typed.
    pub input: String,
    /// True while waiting for a reply.
    pub pending: bool,
    /// Generation of the most recent follow-up sent in this session.
    pub generation: u64,
}

impl ChatSession {
    /// Open a session seeded with the category's result text.
    pub fn open(category: Category, initial_message: impl Into<String>) -> Self {
        ChatSession {
            category,
            messages: vec![ChatMessage::now(ChatRole::Assistant, initial_message.into())],
            input: String::new(),
            pending: false,
            generation: 0,
        }
    }

    /// The message the session was opened with.
    pub fn initial_message(&self) -> Option<&str> {
        self.messages.first().map(|m| m.text.as_str())
    }

    pub fn apply_edit(&mut self, edit: TextEdit) {
        edit.apply(&mut self.input);
    }

    pub fn can_send(&self) -> bool {
        !self.pending && !self.input.trim().is_empty()
    }

    /// Move the typed follow-up into the transcript.
    ///
    /// `generation` tags the reply this follow-up expects. Returns the
    /// follow-up text, or `None` when the input is blank or a reply is
    /// still pending.
    pub fn begin_follow_up(&mut self, generation: u64) -> Option<String> {
        if !self.can_send() {
            return None;
        }
        let text = std::mem::take(&mut self.input).trim().to_string();
        self.messages.push(ChatMessage::now(ChatRole::User, text.clone()));
        self.pending = true;
        self.generation = generation;
        Some(text)
    }

    /// Append a reply. Returns false if the reply is stale.
    pub fn receive_reply(&mut self, generation: u64, text: String) -> bool {
        if !self.pending || generation != self.generation {
            return false;
        }
        self.messages.push(ChatMessage::now(ChatRole::Assistant, text));
        self.pending = false;
        true
    }

    /// Give up on the pending reply. Returns false if the failure is stale.
    pub fn abandon_follow_up(&mut self, generation: u64) -> bool {
        if !self.pending || generation != self.generation {
            return false;
        }
        self.pending = false;
        true
    }
}
