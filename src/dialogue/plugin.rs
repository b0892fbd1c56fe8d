//! Dialogue plugin - script loading, requests, and the typing clock.

use bevy::prelude::*;

use super::config::DialogueConfig;
use super::library::{load_dialogue_scripts, ScriptLibrary};
use super::machine::{AdvanceOutcome, DialogueMachine, EnterOutcome, TickOutcome};
use super::script::ScriptStory;
use super::typing::pick_sound_index;
use crate::core::{DialogueEndedEvent, DialogueStartedEvent, TickPhase, TypingSoundEvent};
use crate::input::InputFrame;

/// The game's dialogue machine, playing RON scripts.
pub type DialogueManager = DialogueMachine<ScriptStory>;

/// Requests to the dialogue machine from triggers and UI.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum DialogueRequest {
    /// Open a conversation. Ignored while one is running.
    Enter { script_id: String },
    /// Finish the typing line, or move to the next one.
    Advance,
    /// Pick one of the offered choices.
    Choose(usize),
    /// Close the conversation right away.
    Exit,
}

/// Ordering of dialogue work inside `TickPhase::Gameplay`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogueSet {
    /// Systems that send DialogueRequests
    Requests,
    /// The machine applies requests
    Apply,
    /// Typing advances by the frame's delta
    Typing,
}

/// Dialogue plugin - handles the conversation state machine.
pub struct DialoguePlugin;

impl Plugin for DialoguePlugin {
    fn build(&self, app: &mut App) {
        let config = DialogueConfig::default();

        app.insert_resource(DialogueManager::new(config.typing_speed))
            .insert_resource(config)
            .init_resource::<ScriptLibrary>()
            .add_event::<DialogueRequest>()
            .configure_sets(
                Update,
                (DialogueSet::Requests, DialogueSet::Apply, DialogueSet::Typing)
                    .chain()
                    .in_set(TickPhase::Gameplay),
            )
            .add_systems(Startup, (load_dialogue_config, load_dialogue_scripts))
            .add_systems(Update, advance_on_submit.in_set(DialogueSet::Requests))
            .add_systems(Update, apply_dialogue_requests.in_set(DialogueSet::Apply))
            .add_systems(Update, tick_typing.in_set(DialogueSet::Typing));
    }
}

/// Read the RON config and retune the machine's typing speed.
fn load_dialogue_config(mut config: ResMut<DialogueConfig>, mut manager: ResMut<DialogueManager>) {
    *config = DialogueConfig::load();
    manager.set_char_interval(config.typing_speed);
}

/// Submit advances a running conversation.
///
/// Runs before requests are applied, so the press that opens a
/// conversation never also advances it.
fn advance_on_submit(
    frame: Res<InputFrame>,
    manager: Res<DialogueManager>,
    mut requests: EventWriter<DialogueRequest>,
) {
    if manager.is_active() && frame.submit_pressed() {
        requests.send(DialogueRequest::Advance);
    }
}

/// Apply this frame's requests in the order they were sent.
pub fn apply_dialogue_requests(
    mut requests: EventReader<DialogueRequest>,
    mut manager: ResMut<DialogueManager>,
    library: Res<ScriptLibrary>,
    mut started: EventWriter<DialogueStartedEvent>,
    mut ended: EventWriter<DialogueEndedEvent>,
) {
    for request in requests.read() {
        let running = manager
            .session()
            .map(|session| session.script_id().to_string());

        match request {
            DialogueRequest::Enter { script_id } => match manager.enter(script_id, &*library) {
                Ok(EnterOutcome::Started | EnterOutcome::AwaitingChoice) => {
                    info!("Dialogue started: {}", script_id);
                    started.send(DialogueStartedEvent {
                        script_id: script_id.clone(),
                    });
                }
                Ok(EnterOutcome::Ended) => {
                    warn!("Dialogue '{}' has no content", script_id);
                    started.send(DialogueStartedEvent {
                        script_id: script_id.clone(),
                    });
                    ended.send(DialogueEndedEvent {
                        script_id: script_id.clone(),
                    });
                }
                Ok(EnterOutcome::AlreadyActive) => {
                    debug!("Ignoring '{}', a conversation is already running", script_id);
                }
                Ok(EnterOutcome::Disabled) => {
                    debug!("Ignoring '{}', dialogue is disabled", script_id);
                }
                Err(e) => error!("Cannot start dialogue: {}", e),
            },
            DialogueRequest::Advance => {
                if manager.advance() == AdvanceOutcome::Ended {
                    if let Some(script_id) = running {
                        info!("Dialogue finished: {}", script_id);
                        ended.send(DialogueEndedEvent { script_id });
                    }
                }
            }
            DialogueRequest::Choose(index) => match manager.choose(*index) {
                Ok(AdvanceOutcome::Ended) => {
                    if let Some(script_id) = running {
                        info!("Dialogue finished: {}", script_id);
                        ended.send(DialogueEndedEvent { script_id });
                    }
                }
                Ok(_) => {}
                Err(e) => warn!("{}", e),
            },
            DialogueRequest::Exit => {
                if let Some(script_id) = manager.exit() {
                    info!("Dialogue closed: {}", script_id);
                    ended.send(DialogueEndedEvent { script_id });
                }
            }
        }
    }
}

/// Reveal the next character when its time has come.
fn tick_typing(
    time: Res<Time>,
    config: Res<DialogueConfig>,
    mut manager: ResMut<DialogueManager>,
    mut sounds: EventWriter<TypingSoundEvent>,
) {
    match manager.tick(time.delta_secs()) {
        TickOutcome::Revealed(_) => {
            if let Some(index) = pick_sound_index(config.typing_sounds.len(), &mut rand::thread_rng()) {
                sounds.send(TypingSoundEvent { index });
            }
        }
        TickOutcome::LineComplete => debug!("Dialogue line finished typing"),
        TickOutcome::Idle | TickOutcome::Waiting => {}
    }
}
