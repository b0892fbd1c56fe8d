//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. For example,
//! player movement only runs while exploring, and stops as soon as a
//! conversation opens or a note is being read.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while scripts and data files are read
/// - Move to `InGame` once everything is in place
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading dialogue scripts and data files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
}

/// Sub-states for gameplay - only active when GameState::InGame.
///
/// These are derived every frame from the dialogue machine and the paper
/// overlay, see `sync_play_state`.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(GameState = GameState::InGame)]
pub enum PlayState {
    /// Normal gameplay - walking around and interacting
    #[default]
    Exploring,
    /// A conversation is on screen
    Dialogue,
    /// A paper note is open over the game
    Reading,
}
