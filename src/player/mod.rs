//! Player module - the walking character and its earned controls.

mod components;
mod controls;
mod movement;
mod plugin;

pub use components::*;
pub use controls::{apply_unlock_tokens, CardinalDirection, ControlUnlocks};
pub use movement::{cardinal_direction, spawn_player, AXIS_THRESHOLD, PLAYER_SIZE};
pub use plugin::PlayerPlugin;
