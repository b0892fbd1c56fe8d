//! Player plugin - movement, outfits, and control unlocks.

use bevy::prelude::*;

use super::components::*;
use super::controls::{apply_unlock_tokens, ControlUnlocks};
use super::movement::{halt_player, player_movement, update_player_sprite};
use crate::core::{PlayState, TickPhase};

/// Player plugin - handles walking and the directions the player has earned.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        let config = PlayerConfig::default();

        app.insert_resource(ControlUnlocks::new(&config.unlock_order))
            .insert_resource(config)
            .add_systems(Startup, load_player_config)
            .add_systems(
                Update,
                (
                    apply_unlock_tokens,
                    player_movement.run_if(in_state(PlayState::Exploring)),
                )
                    .chain()
                    .in_set(TickPhase::Gameplay),
            )
            .add_systems(Update, update_player_sprite.in_set(TickPhase::Presentation))
            .add_systems(OnExit(PlayState::Exploring), halt_player);
    }
}

/// Read the RON config and restart unlocks from its direction order.
fn load_player_config(mut config: ResMut<PlayerConfig>, mut unlocks: ResMut<ControlUnlocks>) {
    *config = PlayerConfig::load();
    *unlocks = ControlUnlocks::new(&config.unlock_order);
}
