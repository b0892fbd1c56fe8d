//! Garden of Neufa - Entry Point
//!
//! A small top-down 2D garden where you chat with the neighbours, collect
//! coins to loosen up your legs and try on clothes.
//!
//! Controls:
//! - WASD / Arrows: Move
//! - E: Interact
//! - Space / Enter: Advance dialogue

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Garden of Neufa".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics (trigger zones and the kinematic player only, so gravity never applies)
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(32.0))

        // Audio
        .add_plugins(bevy_kira_audio::AudioPlugin)
        .add_plugins(neufa_garden::audio::AudioFeedbackPlugin)

        // Our game plugin
        .add_plugins(neufa_garden::GameplayPlugin)

        .run();
}
