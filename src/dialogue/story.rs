//! The narrative engine seam.
//!
//! The dialogue machine only ever talks to a story through these traits, so
//! the script format behind them can change without touching the machine.

use super::error::DialogueError;

/// A running story session.
pub trait Story {
    /// Whether `continue_story` would produce another line.
    fn can_continue(&self) -> bool;

    /// Advance to the next line and return its full text.
    ///
    /// Returns an empty string when the story cannot continue.
    fn continue_story(&mut self) -> String;

    /// Full text of the line most recently returned by `continue_story`.
    fn current_text(&self) -> &str;

    /// Speaker of the current line, if the script names one.
    fn current_speaker(&self) -> Option<&str> {
        None
    }

    /// Choices on offer. Only non-empty once the story cannot continue.
    fn current_choices(&self) -> Vec<String> {
        Vec::new()
    }

    /// Pick one of `current_choices`.
    fn choose_choice_index(&mut self, index: usize) -> Result<(), DialogueError> {
        Err(DialogueError::ChoiceOutOfRange {
            index,
            available: 0,
        })
    }
}

/// Anything that can turn a script id into a fresh story session.
pub trait StorySource {
    type Story: Story;

    fn resolve(&self, script_id: &str) -> Result<Self::Story, DialogueError>;
}
