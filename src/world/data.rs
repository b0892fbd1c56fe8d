//! Scene layout structures and RON loading.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::error::SceneLoadError;

/// Default scene loaded when entering the game.
pub const GARDEN_SCENE: &str = "assets/data/scenes/garden.ron";

/// A solid rectangle the player cannot walk through.
#[derive(Debug, Clone, Deserialize)]
pub struct WallDef {
    pub position: (f32, f32),
    pub size: (f32, f32),
}

/// A character the player can talk to.
#[derive(Debug, Clone, Deserialize)]
pub struct NpcDef {
    pub name: String,
    pub position: (f32, f32),
    /// Dialogue script id (file stem under assets/data/dialogue/)
    pub script: String,
    #[serde(default = "default_npc_color")]
    pub color: (f32, f32, f32),
    /// Radius of the talk zone in pixels
    #[serde(default = "default_zone_radius")]
    pub zone_radius: f32,
}

/// A coin hopping along a list of positions.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinDef {
    pub waypoints: Vec<(f32, f32)>,
}

/// A wardrobe that changes the player's outfit.
#[derive(Debug, Clone, Deserialize)]
pub struct WardrobeDef {
    pub position: (f32, f32),
    pub outfit: String,
    pub tint: (f32, f32, f32),
}

/// A note that can be picked up and read.
#[derive(Debug, Clone, Deserialize)]
pub struct NoteDef {
    pub position: (f32, f32),
    pub text: String,
}

fn default_npc_color() -> (f32, f32, f32) {
    (0.9, 0.6, 0.4)
}

fn default_zone_radius() -> f32 {
    28.0
}

fn default_background() -> (f32, f32, f32) {
    (0.2, 0.35, 0.22)
}

/// Everything placed in one scene.
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct SceneLayout {
    pub name: String,
    pub player_start: (f32, f32),
    #[serde(default = "default_background")]
    pub background: (f32, f32, f32),
    #[serde(default)]
    pub walls: Vec<WallDef>,
    #[serde(default)]
    pub npcs: Vec<NpcDef>,
    #[serde(default)]
    pub coins: Vec<CoinDef>,
    #[serde(default)]
    pub wardrobes: Vec<WardrobeDef>,
    #[serde(default)]
    pub notes: Vec<NoteDef>,
}

impl Default for SceneLayout {
    /// A single talking NPC, enough to play through a conversation.
    fn default() -> Self {
        Self {
            name: "Fallback Garden".to_string(),
            player_start: (0.0, 0.0),
            background: default_background(),
            walls: Vec::new(),
            npcs: vec![NpcDef {
                name: "Claire".to_string(),
                position: (64.0, 0.0),
                script: "claire".to_string(),
                color: default_npc_color(),
                zone_radius: default_zone_radius(),
            }],
            coins: Vec::new(),
            wardrobes: Vec::new(),
            notes: Vec::new(),
        }
    }
}

impl SceneLayout {
    /// Parse and validate a layout from RON source.
    pub fn from_ron(path: &str, contents: &str) -> Result<Self, SceneLoadError> {
        let layout: Self = ron::from_str(contents).map_err(|e| SceneLoadError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn load(path: &Path) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(path).map_err(|e| SceneLoadError::ReadError {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        Self::from_ron(&path.display().to_string(), &contents)
    }

    fn validate(&self) -> Result<(), SceneLoadError> {
        if let Some(index) = self.coins.iter().position(|coin| coin.waypoints.is_empty()) {
            return Err(SceneLoadError::EmptyCoinRoute { index });
        }
        if let Some(npc) = self.npcs.iter().find(|npc| npc.script.trim().is_empty()) {
            return Err(SceneLoadError::MissingScript {
                name: npc.name.clone(),
            });
        }
        Ok(())
    }

    pub fn player_start(&self) -> Vec2 {
        Vec2::new(self.player_start.0, self.player_start.1)
    }
}

/// Load the garden scene at startup, falling back to the built-in layout.
pub fn load_scene_layout(mut commands: Commands) {
    let layout = match SceneLayout::load(Path::new(GARDEN_SCENE)) {
        Ok(layout) => {
            info!(
                "Loaded scene '{}': {} NPCs, {} coins, {} wardrobes, {} notes",
                layout.name,
                layout.npcs.len(),
                layout.coins.len(),
                layout.wardrobes.len(),
                layout.notes.len()
            );
            layout
        }
        Err(e) => {
            error!("{}. Using fallback scene.", e);
            SceneLayout::default()
        }
    };

    commands.insert_resource(layout);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_lists_default_to_empty() {
        let layout =
            SceneLayout::from_ron("test", r#"(name: "Empty", player_start: (1.0, 2.0))"#).unwrap();

        assert_eq!(layout.player_start(), Vec2::new(1.0, 2.0));
        assert!(layout.npcs.is_empty());
        assert!(layout.coins.is_empty());
    }

    #[test]
    fn coin_without_waypoints_is_rejected() {
        let result = SceneLayout::from_ron(
            "test",
            r#"(name: "Bad", player_start: (0.0, 0.0), coins: [(waypoints: [(1.0, 1.0)]), (waypoints: [])])"#,
        );
        assert!(matches!(result, Err(SceneLoadError::EmptyCoinRoute { index: 1 })));
    }

    #[test]
    fn shipped_garden_is_valid() {
        let layout = SceneLayout::load(Path::new(GARDEN_SCENE)).unwrap();
        assert!(layout.npcs.iter().any(|npc| npc.script == "claire"));
        assert!(!layout.coins.is_empty());
    }
}
