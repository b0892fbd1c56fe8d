//! Dialogue module - scripts, the typewriter, and the conversation state machine.

mod config;
mod error;
mod library;
mod machine;
mod plugin;
mod script;
mod story;
mod typing;

pub use config::DialogueConfig;
pub use error::DialogueError;
pub use library::{load_dialogue_scripts, ScriptLibrary, DIALOGUE_DIR};
pub use machine::{
    AdvanceOutcome, DialogueMachine, DialogueSession, DialogueState, EnterOutcome, SessionId,
    TickOutcome,
};
pub use plugin::{apply_dialogue_requests, DialogueManager, DialoguePlugin, DialogueRequest, DialogueSet};
pub use script::{DialogueScript, Knot, ScriptChoice, ScriptLine, ScriptStory};
pub use story::{Story, StorySource};
pub use typing::{pick_sound_index, TaskHandle, TypingScheduler, TypingStep, TypingTask};
