//! What happens when the player interacts with something.

use bevy::prelude::*;

use crate::core::PlayState;
use crate::dialogue::DialogueManager;

/// The behaviour behind an interactable zone.
#[derive(Component, Debug, Clone, PartialEq)]
pub enum InteractionKind {
    /// Start a conversation.
    Narrative { script_id: String },
    /// Change the player's outfit. Grants one control unlock token.
    Wardrobe { outfit: String, tint: Color },
    /// Show a note over the whole screen until the next interact press.
    PaperOverlay { text: String },
}

/// The note currently held up to the screen, if any.
#[derive(Resource, Debug, Default)]
pub struct PaperOverlay {
    text: Option<String>,
}

impl PaperOverlay {
    pub fn open(&mut self, text: String) {
        self.text = Some(text);
    }

    pub fn close(&mut self) {
        self.text = None;
    }

    pub fn is_open(&self) -> bool {
        self.text.is_some()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// Which play state the dialogue machine and the overlay call for.
pub fn desired_play_state(dialogue_active: bool, overlay_open: bool) -> PlayState {
    if dialogue_active {
        PlayState::Dialogue
    } else if overlay_open {
        PlayState::Reading
    } else {
        PlayState::Exploring
    }
}

/// Keep `PlayState` in step with the dialogue machine and the overlay.
pub fn sync_play_state(
    manager: Res<DialogueManager>,
    overlay: Res<PaperOverlay>,
    state: Res<State<PlayState>>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    let wanted = desired_play_state(manager.is_active(), overlay.is_open());
    if *state.get() != wanted {
        info!("Play state: {:?} -> {:?}", state.get(), wanted);
        next_state.set(wanted);
    }
}
