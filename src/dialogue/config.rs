//! Dialogue configuration loaded from external RON file.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

/// Dialogue configuration loaded from assets/data/dialogue_config.ron.
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct DialogueConfig {
    /// Seconds between revealed characters
    pub typing_speed: f32,
    /// Sound clips played per revealed character, relative to assets/
    #[serde(default)]
    pub typing_sounds: Vec<String>,
    #[serde(default = "default_volume")]
    pub sound_volume: f64,
    /// Text typed over the garden when the game starts. None skips it.
    #[serde(default)]
    pub intro_text: Option<String>,
    /// Seconds between revealed characters of the intro
    #[serde(default = "default_intro_speed")]
    pub intro_speed: f32,
}

fn default_volume() -> f64 {
    0.6
}

fn default_intro_speed() -> f32 {
    0.05
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            typing_speed: 0.04,
            typing_sounds: Vec::new(),
            sound_volume: default_volume(),
            intro_text: None,
            intro_speed: default_intro_speed(),
        }
    }
}

impl DialogueConfig {
    pub const PATH: &'static str = "assets/data/dialogue_config.ron";

    /// Load dialogue config from RON file.
    pub fn load() -> Self {
        let path = Self::PATH;
        match fs::read_to_string(path) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded dialogue config from {}", path);
                    config
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }
}
