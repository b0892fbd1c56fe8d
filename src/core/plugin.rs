//! Core plugin that sets up game states, events, and the frame phases.

use bevy::prelude::*;

use super::events::*;
use super::schedule::configure_tick_phases;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame) and the PlayState sub-state
/// - Global events (DialogueStartedEvent, UnlockTokenEvent, etc.)
/// - The chained TickPhase system sets
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        configure_tick_phases(app);

        app
            // Initialize game states
            .init_state::<GameState>()
            .add_sub_state::<PlayState>()

            // Register global events
            .add_event::<DialogueStartedEvent>()
            .add_event::<DialogueEndedEvent>()
            .add_event::<TypingSoundEvent>()
            .add_event::<UnlockTokenEvent>()
            .add_event::<CoinCollectedEvent>()

            // Data files are read synchronously in Startup, so gameplay can
            // begin as soon as the first frame runs
            .add_systems(OnEnter(GameState::Loading), transition_to_game);
    }
}

/// Leave the loading state once Startup has finished reading data.
fn transition_to_game(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}
