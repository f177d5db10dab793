//! Search box state machine.
//!
//! The search box distinguishes text the user typed from text the page put
//! there itself (picking a `field:` keyword suggestion), so the suggestion
//! list stays open across the programmatic change.
//!
//! ```text
//!            type(non-empty)              pick keyword
//!   Idle ────────────────────▶ UserTyping ───────────▶ ProgrammaticUpdate
//!    ▲  ◀──── type(empty) ────     │                         │ settle
//!    │                             │ submit / commit         ▼
//!    └──────── finish ──────── Committing ◀──────────── UserTyping
//! ```

use serde::{Deserialize, Serialize};

/// Phase of the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InputPhase {
    /// Empty and untouched.
    #[default]
    Idle,
    /// The user is editing the text.
    UserTyping,
    /// The page replaced the text; change events must not toggle the list.
    ProgrammaticUpdate,
    /// The text is being turned into a chip.
    Committing,
}

/// Text, phase and suggestion-list visibility of the search box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchInput {
    text: String,
    phase: InputPhase,
    open: bool,
}

impl SearchInput {
    pub fn new() -> Self {
        SearchInput::default()
    }

    /// Starts with `text` already in the box (restored from a location).
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let phase = if text.is_empty() {
            InputPhase::Idle
        } else {
            InputPhase::UserTyping
        };
        SearchInput {
            text,
            phase,
            open: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn phase(&self) -> InputPhase {
        self.phase
    }

    /// Whether the suggestion list is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// A change event carrying `text`.
    ///
    /// User edits open the list for non-empty text and close it for empty
    /// text. During a programmatic update visibility is left alone.
    pub fn type_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        if self.phase == InputPhase::ProgrammaticUpdate {
            return;
        }
        self.open = !self.text.is_empty();
        self.phase = if self.text.is_empty() {
            InputPhase::Idle
        } else {
            InputPhase::UserTyping
        };
    }

    /// The page sets the text itself and keeps the list open.
    pub fn set_programmatic(&mut self, text: impl Into<String>) {
        self.phase = InputPhase::ProgrammaticUpdate;
        self.text = text.into();
        self.open = true;
    }

    /// Ends a programmatic update. Visibility is whatever it was left at, so
    /// a blur during the update keeps the list closed.
    pub fn settle(&mut self) {
        if self.phase == InputPhase::ProgrammaticUpdate {
            self.phase = InputPhase::UserTyping;
        }
    }

    pub fn focus(&mut self) {
        self.open = !self.text.is_empty();
    }

    pub fn blur(&mut self) {
        self.open = false;
    }

    /// Enters [`InputPhase::Committing`] and returns the text to commit.
    pub fn begin_commit(&mut self) -> String {
        self.phase = InputPhase::Committing;
        self.text.trim().to_string()
    }

    /// Clears the box after a commit and closes the list.
    pub fn finish_commit(&mut self) {
        self.text.clear();
        self.phase = InputPhase::Idle;
        self.open = false;
    }

    /// Empties the box.
    pub fn clear(&mut self) {
        *self = SearchInput::default();
    }
}
