//! Player-related components.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

use super::controls::CardinalDirection;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Cardinal movement state, read by presentation systems.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PlayerMotion {
    /// Unit cardinal vector, or zero while idle
    pub current: Vec2,
    /// Direction the player last moved in. Starts facing down.
    pub last_facing: Vec2,
    pub is_moving: bool,
}

impl Default for PlayerMotion {
    fn default() -> Self {
        Self {
            current: Vec2::ZERO,
            last_facing: Vec2::NEG_Y,
            is_moving: false,
        }
    }
}

/// What the player is wearing. Changed by wardrobes.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Outfit {
    pub name: String,
    pub tint: Color,
}

impl Default for Outfit {
    fn default() -> Self {
        Self {
            name: "nightgown".to_string(),
            tint: Color::srgb(0.85, 0.85, 0.95),
        }
    }
}

/// Player tuning loaded from assets/data/player_config.ron.
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct PlayerConfig {
    /// Movement speed in pixels per second
    pub move_speed: f32,
    /// Order in which walking directions become available. The first
    /// one is available from the start.
    pub unlock_order: Vec<CardinalDirection>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 120.0,
            unlock_order: vec![
                CardinalDirection::Right,
                CardinalDirection::Down,
                CardinalDirection::Left,
                CardinalDirection::Up,
            ],
        }
    }
}

impl PlayerConfig {
    pub const PATH: &'static str = "assets/data/player_config.ron";

    /// Load player config from RON file.
    pub fn load() -> Self {
        let path = Self::PATH;
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", path, e);
                return Self::default();
            }
        };

        match ron::from_str::<Self>(&contents) {
            Ok(config) => {
                info!("Loaded player config from {}", path);
                config
            }
            Err(e) => {
                error!("Failed to parse {}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }
}
