//! UI module - on-screen presentation of dialogue, notes, progress, and the intro.

mod dialogue_panel;
mod hud;
mod intro;
mod paper;
mod plugin;

pub use dialogue_panel::{
    validate_dialogue_ui, AdvanceButton, ChoiceButton, ChoiceList, DialoguePanel, DialogueText,
    SpeakerLabel,
};
pub use hud::{CoinCounter, DirectionIndicator, HudRoot};
pub use intro::{IntroOverlay, IntroText, IntroTypewriter};
pub use paper::{PaperOverlayUi, PaperText};
pub use plugin::UiPlugin;
