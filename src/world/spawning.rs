//! Entity spawning functions for scene construction.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::coin::{Coin, COIN_SIZE};
use super::data::{CoinDef, NoteDef, NpcDef, SceneLayout, WallDef, WardrobeDef};
use super::interactable::InteractionKind;
use super::trigger::{ProximityTrigger, VisualCue};
use crate::player::spawn_player;

/// Marker for everything spawned from a scene layout, cleaned up on exit.
#[derive(Component)]
pub struct SceneEntity;

const NPC_SIZE: Vec2 = Vec2::new(16.0, 24.0);
const PROP_SIZE: Vec2 = Vec2::new(20.0, 28.0);
const NOTE_SIZE: Vec2 = Vec2::new(10.0, 12.0);
const CUE_SIZE: Vec2 = Vec2::new(6.0, 6.0);
const PROP_ZONE_RADIUS: f32 = 22.0;

fn rgb(color: (f32, f32, f32)) -> Color {
    Color::srgb(color.0, color.1, color.2)
}

fn pos(position: (f32, f32)) -> Vec2 {
    Vec2::new(position.0, position.1)
}

/// Sensor collider that reports overlaps with the kinematic player.
fn zone_sensor(radius: f32) -> impl Bundle {
    (
        Collider::ball(radius),
        Sensor,
        ActiveEvents::COLLISION_EVENTS,
        ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_STATIC,
    )
}

/// Spawn the whole scene and return the player entity.
pub fn spawn_scene(commands: &mut Commands, layout: &SceneLayout) -> Entity {
    commands.insert_resource(ClearColor(rgb(layout.background)));
    commands.spawn((Name::new("Camera"), Camera2d, SceneEntity));

    for wall in &layout.walls {
        spawn_wall(commands, wall);
    }
    for npc in &layout.npcs {
        spawn_npc(commands, npc);
    }
    for coin in &layout.coins {
        spawn_coin(commands, coin);
    }
    for wardrobe in &layout.wardrobes {
        spawn_wardrobe(commands, wardrobe);
    }
    for note in &layout.notes {
        spawn_note(commands, note);
    }

    let player = spawn_player(commands, layout.player_start());
    commands.entity(player).insert(SceneEntity);
    player
}

pub fn spawn_wall(commands: &mut Commands, wall: &WallDef) {
    let size = pos(wall.size);
    commands.spawn((
        Sprite::from_color(Color::srgb(0.3, 0.25, 0.2), size),
        Transform::from_translation(pos(wall.position).extend(0.0)),
        RigidBody::Fixed,
        Collider::cuboid(size.x / 2.0, size.y / 2.0),
        SceneEntity,
    ));
}

/// An NPC is a talk zone with a solid body and a cue floating above it.
pub fn spawn_npc(commands: &mut Commands, npc: &NpcDef) -> Entity {
    let entity = commands
        .spawn((
            Name::new(npc.name.clone()),
            Sprite::from_color(rgb(npc.color), NPC_SIZE),
            Transform::from_translation(pos(npc.position).extend(0.5)),
            ProximityTrigger::default(),
            InteractionKind::Narrative {
                script_id: npc.script.clone(),
            },
            zone_sensor(npc.zone_radius),
            SceneEntity,
        ))
        .id();

    commands.entity(entity).with_children(|parent| {
        parent.spawn((
            RigidBody::Fixed,
            Collider::cuboid(NPC_SIZE.x * 0.4, NPC_SIZE.y * 0.3),
            Transform::default(),
        ));
        spawn_cue(parent, NPC_SIZE.y);
    });

    info!("Spawned {} with script '{}'", npc.name, npc.script);
    entity
}

pub fn spawn_coin(commands: &mut Commands, coin: &CoinDef) -> Option<Entity> {
    let coin = Coin::new(coin.waypoints.iter().copied().map(pos).collect());
    let start = coin.start()?;

    let entity = commands
        .spawn((
            Name::new("Coin"),
            Sprite::from_color(Color::srgb(1.0, 0.85, 0.2), Vec2::splat(COIN_SIZE)),
            Transform::from_translation(start.extend(0.5)),
            coin,
            zone_sensor(COIN_SIZE),
            SceneEntity,
        ))
        .id();
    Some(entity)
}

pub fn spawn_wardrobe(commands: &mut Commands, wardrobe: &WardrobeDef) -> Entity {
    commands
        .spawn((
            Name::new(format!("Wardrobe ({})", wardrobe.outfit)),
            Sprite::from_color(Color::srgb(0.45, 0.3, 0.2), PROP_SIZE),
            Transform::from_translation(pos(wardrobe.position).extend(0.5)),
            ProximityTrigger::default(),
            InteractionKind::Wardrobe {
                outfit: wardrobe.outfit.clone(),
                tint: rgb(wardrobe.tint),
            },
            zone_sensor(PROP_ZONE_RADIUS),
            SceneEntity,
        ))
        .with_children(|parent| spawn_cue(parent, PROP_SIZE.y))
        .id()
}

pub fn spawn_note(commands: &mut Commands, note: &NoteDef) -> Entity {
    commands
        .spawn((
            Name::new("Note"),
            Sprite::from_color(Color::srgb(0.95, 0.93, 0.85), NOTE_SIZE),
            Transform::from_translation(pos(note.position).extend(0.5)),
            ProximityTrigger::default(),
            InteractionKind::PaperOverlay {
                text: note.text.clone(),
            },
            zone_sensor(PROP_ZONE_RADIUS),
            SceneEntity,
        ))
        .with_children(|parent| spawn_cue(parent, NOTE_SIZE.y))
        .id()
}

/// Hidden until the player walks into the parent's zone.
fn spawn_cue(parent: &mut ChildBuilder, height: f32) {
    parent.spawn((
        VisualCue,
        Sprite::from_color(Color::WHITE, CUE_SIZE),
        Transform::from_xyz(0.0, height / 2.0 + 8.0, 0.1),
        Visibility::Hidden,
    ));
}
