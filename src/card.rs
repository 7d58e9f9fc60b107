use chrono::{DateTime, Utc};

use crate::error::{JournalError, Result};
use crate::journal_entry::JournalEntry;

/// Which side of a card is facing the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlipState {
    #[default]
    Unflipped,
    Flipped,
}

impl FlipState {
    pub fn front_clicked(self) -> Self {
        FlipState::Flipped
    }

    /// Clicking inside the response input never turns the card back over.
    pub fn back_clicked(self, inside_input: bool) -> Self {
        if inside_input {
            self
        } else {
            FlipState::Unflipped
        }
    }
}

#[derive(Debug, Clone)]
pub struct Card {
    pub prompt: String,
    pub response: String,
    pub date: Option<DateTime<Utc>>,
    pub favorite: bool,
    flip: FlipState,
    flippable: bool,
    editable: bool,
    editing_prompt: bool,
    modified: bool,
}

impl Card {
    /// The card for writing today's entry.
    pub fn for_today(prompt: String) -> Self {
        Card {
            prompt,
            response: String::new(),
            date: None,
            favorite: false,
            flip: FlipState::Unflipped,
            flippable: true,
            editable: true,
            editing_prompt: false,
            modified: false,
        }
    }

    /// A read-only card showing a past entry.
    pub fn from_entry(entry: &JournalEntry) -> Self {
        Card {
            prompt: entry.prompt.clone(),
            response: entry.response.clone(),
            date: Some(entry.date),
            favorite: entry.favorite,
            flip: FlipState::Unflipped,
            flippable: true,
            editable: false,
            editing_prompt: false,
            modified: false,
        }
    }

    pub fn non_flippable(mut self) -> Self {
        self.flippable = false;
        self.flip = FlipState::Flipped;
        self
    }

    pub fn flip_state(&self) -> FlipState {
        self.flip
    }

    pub fn is_flipped(&self) -> bool {
        self.flip == FlipState::Flipped
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn is_editing_prompt(&self) -> bool {
        self.editing_prompt
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn click_front(&mut self) {
        if self.flippable {
            self.flip = self.flip.front_clicked();
        }
    }

    pub fn click_back(&mut self, inside_input: bool) {
        if self.flippable {
            self.flip = self.flip.back_clicked(inside_input);
        }
    }

    pub fn type_char(&mut self, c: char) {
        if self.editing_prompt {
            self.prompt.push(c);
            self.modified = true;
        } else if self.editable && self.is_flipped() {
            self.response.push(c);
            self.modified = true;
        }
    }

    pub fn backspace(&mut self) {
        let target = if self.editing_prompt {
            &mut self.prompt
        } else if self.editable && self.is_flipped() {
            &mut self.response
        } else {
            return;
        };
        if target.pop().is_some() {
            self.modified = true;
        }
    }

    pub fn replace_prompt(&mut self, prompt: String) {
        self.prompt = prompt;
        self.modified = true;
    }

    /// Enters or leaves prompt editing; returns whether editing is now on.
    pub fn toggle_prompt_edit(&mut self) -> bool {
        if self.editable {
            self.editing_prompt = !self.editing_prompt;
            if !self.editing_prompt {
                self.prompt = self.prompt.trim().to_string();
            }
        }
        self.editing_prompt
    }

    /// Builds the entry to save. The response must have some non-blank text.
    pub fn submit(&self, now: DateTime<Utc>) -> Result<JournalEntry> {
        let response = self.response.trim();
        if response.is_empty() {
            return Err(JournalError::EmptyResponse);
        }
        Ok(JournalEntry::new(
            self.prompt.trim().to_string(),
            response.to_string(),
            now,
        ))
    }

    /// Clears the draft after a successful save.
    pub fn reset(&mut self) {
        self.response.clear();
        self.editing_prompt = false;
        self.modified = false;
        if self.flippable {
            self.flip = FlipState::Unflipped;
        }
    }
}
