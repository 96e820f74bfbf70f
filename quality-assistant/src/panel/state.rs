// Query panel state machine.
//
// `PanelState` holds the question, the current result set, the loading flag
// and the active chat selector. Every change goes through `transition`, a
// pure function from (state, event) to (state, effect). Effects that need
// I/O (running lookups, opening the chat overlay) are returned to the caller
// instead of performed here.

use super::category::Category;

// ---------------------------------------------------------------------------
// ResultSet
// ---------------------------------------------------------------------------

/// One text result per category for the current question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    pub enterprise: Option<String>,
    pub industry: Option<String>,
    pub international: Option<String>,
}

impl ResultSet {
    /// Build a result set by computing each category's text.
    pub fn from_fn(mut f: impl FnMut(Category) -> Option<String>) -> Self {
        ResultSet {
            enterprise: f(Category::Enterprise),
            industry: f(Category::Industry),
            international: f(Category::International),
        }
    }

    /// Text for a category. Empty strings count as absent.
    pub fn get(&self, category: Category) -> Option<&str> {
        let slot = match category {
            Category::Enterprise => &self.enterprise,
            Category::Industry => &self.industry,
            Category::International => &self.international,
        };
        slot.as_deref().filter(|s| !s.is_empty())
    }

    /// Number of categories holding text.
    pub fn populated(&self) -> usize {
        Category::ALL
            .iter()
            .filter(|c| self.get(**c).is_some())
            .count()
    }
}

// ---------------------------------------------------------------------------
// Events and effects
// ---------------------------------------------------------------------------

/// A single edit to a line of text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    Insert(char),
    Backspace,
    Clear,
}

impl TextEdit {
    /// Apply the edit to `buf`.
    pub fn apply(self, buf: &mut String) {
        match self {
            TextEdit::Insert(c) => buf.push(c),
            TextEdit::Backspace => {
                buf.pop();
            }
            TextEdit::Clear => buf.clear(),
        }
    }
}

/// Inputs to the panel state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    /// Edit the question text.
    Edit(TextEdit),
    /// Replace the question with a preset example.
    SelectExample(String),
    /// Start a three-way lookup for the current question.
    Submit,
    /// All three lookups for `generation` resolved.
    LookupsSucceeded { generation: u64, results: ResultSet },
    /// A lookup for `generation` failed; the submission is abandoned.
    LookupsFailed { generation: u64 },
    /// Open the follow-up chat for a category.
    RequestElaboration(Category),
    /// Close the follow-up chat.
    DismissElaboration,
}

/// Work the caller must perform after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Run the three lookups for `question` and report back tagged with
    /// `generation`.
    StartLookups { question: String, generation: u64 },
    /// Open the chat overlay seeded with `initial_message`.
    OpenChat {
        category: Category,
        initial_message: String,
    },
    /// Close the chat overlay.
    CloseChat,
}

// ---------------------------------------------------------------------------
// PanelState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelState {
    /// Current question text, exactly as typed.
    pub question: String,
    /// Results of the last successful submission.
    pub results: Option<ResultSet>,
    /// True while a submission is in flight.
    pub loading: bool,
    /// Category whose chat overlay is open, if any.
    pub active_chat: Option<Category>,
    /// Counter of accepted submissions. Completions carrying any other
    /// value are ignored.
    pub generation: u64,
}

impl PanelState {
    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.loading && !self.question.trim().is_empty()
    }

    /// Whether the elaborate control is shown for `category`.
    pub fn can_elaborate(&self, category: Category) -> bool {
        self.result_text(category).is_some()
    }

    /// Result text for a category, if a result set exists and holds text.
    pub fn result_text(&self, category: Category) -> Option<&str> {
        self.results.as_ref().and_then(|r| r.get(category))
    }
}

/// Advance the panel by one event.
///
/// Events whose preconditions do not hold leave the state unchanged and
/// produce no effect.
pub fn transition(mut state: PanelState, event: PanelEvent) -> (PanelState, Option<Effect>) {
    match event {
        PanelEvent::Edit(edit) => {
            edit.apply(&mut state.question);
            (state, None)
        }
        PanelEvent::SelectExample(text) => {
            state.question = text;
            (state, None)
        }
        PanelEvent::Submit => {
            if !state.can_submit() {
                return (state, None);
            }
            state.loading = true;
            state.generation += 1;
            let effect = Effect::StartLookups {
                question: state.question.clone(),
                generation: state.generation,
            };
            (state, Some(effect))
        }
        PanelEvent::LookupsSucceeded {
            generation,
            results,
        } => {
            if !state.loading || generation != state.generation {
                return (state, None);
            }
            state.loading = false;
            state.results = Some(results);
            // The overlay would otherwise keep showing text from the
            // replaced result set.
            if state.active_chat.take().is_some() {
                return (state, Some(Effect::CloseChat));
            }
            (state, None)
        }
        PanelEvent::LookupsFailed { generation } => {
            if state.loading && generation == state.generation {
                state.loading = false;
            }
            (state, None)
        }
        PanelEvent::RequestElaboration(category) => {
            let initial_message = match state.result_text(category) {
                Some(text) => text.to_string(),
                None => return (state, None),
            };
            state.active_chat = Some(category);
            (
                state,
                Some(Effect::OpenChat {
                    category,
                    initial_message,
                }),
            )
        }
        PanelEvent::DismissElaboration => {
            if state.active_chat.take().is_some() {
                (state, Some(Effect::CloseChat))
            } else {
                (state, None)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
