//! Garden of Neufa - a small top-down garden game in Bevy.
//!
//! The player walks the garden, talks to the neighbours through typed-out
//! dialogue, picks up coins that earn new walking directions, changes
//! clothes and reads notes left lying around.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, the per-frame phase ordering
//! - **Input**: Edge-triggered action flags shared by UI and gameplay
//! - **Dialogue**: Scripts, the typewriter, the conversation state machine
//! - **Player**: Cardinal movement and earned controls
//! - **World**: Scene layout, proximity zones, coins, interactables
//! - **UI**: Dialogue panel, note overlay, HUD
//! - **Audio**: Typing sounds (added separately, needs bevy_kira_audio)
//!
//! Each frame runs the [`core::TickPhase`] sets in order: input sampling,
//! UI consumers, gameplay consumers, presentation, then the input flags
//! are reset.

pub mod audio;
pub mod core;
pub mod dialogue;
pub mod input;
pub mod player;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
///
/// Expects `DefaultPlugins` and Rapier's physics plugin to be present.
pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)
            .add_plugins(input::InputPlugin)
            .add_plugins(dialogue::DialoguePlugin)
            .add_plugins(player::PlayerPlugin)
            .add_plugins(world::WorldPlugin)
            .add_plugins(ui::UiPlugin);
    }
}
