//! World module - scene layout, proximity zones, and interactables.

mod coin;
mod data;
mod error;
mod interactable;
mod plugin;
mod spawning;
mod trigger;

pub use coin::{collect_coins, Coin, CoinPurse, CoinStep, COIN_SIZE};
pub use data::{CoinDef, NoteDef, NpcDef, SceneLayout, WallDef, WardrobeDef, GARDEN_SCENE};
pub use error::SceneLoadError;
pub use interactable::{desired_play_state, sync_play_state, InteractionKind, PaperOverlay};
pub use plugin::{setup_scene, InteractionPlugin, WorldPlugin};
pub use spawning::{spawn_coin, spawn_npc, spawn_note, spawn_scene, spawn_wardrobe, SceneEntity};
pub use trigger::{
    apply_zone_contacts, interact_with_triggers, update_visual_cues, ProximityTrigger,
    VisualCue, ZoneContact, ZoneContactEvent,
};
