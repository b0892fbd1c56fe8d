//! World plugins - scene setup, zones, and interactables.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::{GameState, TickPhase};
use crate::dialogue::DialogueSet;

use super::coin::{collect_coins, Coin, CoinPurse};
use super::data::{load_scene_layout, SceneLayout};
use super::interactable::{sync_play_state, PaperOverlay};
use super::spawning::{spawn_scene, SceneEntity};
use super::trigger::{
    apply_zone_contacts, interact_with_triggers, update_visual_cues, ProximityTrigger,
    ZoneContact, ZoneContactEvent,
};

/// Zones, interactables and coins. Independent of physics; contacts
/// arrive as ZoneContactEvents.
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PaperOverlay>()
            .init_resource::<CoinPurse>()
            .add_event::<ZoneContactEvent>()
            .add_systems(
                Update,
                (apply_zone_contacts, collect_coins, interact_with_triggers)
                    .chain()
                    .in_set(DialogueSet::Requests),
            )
            .add_systems(
                Update,
                (
                    update_visual_cues,
                    sync_play_state.run_if(in_state(GameState::InGame)),
                )
                    .in_set(TickPhase::Presentation),
            );
    }
}

/// World plugin - builds the scene and feeds physics contacts to zones.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InteractionPlugin)
            .add_systems(Startup, load_scene_layout)
            .add_systems(OnEnter(GameState::InGame), setup_scene)
            .add_systems(OnExit(GameState::InGame), cleanup_scene)
            .add_systems(Update, forward_sensor_contacts.in_set(TickPhase::Input));
    }
}

/// Set up the scene from the loaded layout.
pub fn setup_scene(mut commands: Commands, layout: Option<Res<SceneLayout>>) {
    let Some(layout) = layout else {
        error!("No scene layout loaded!");
        return;
    };

    info!("Building scene: {}", layout.name);
    spawn_scene(&mut commands, &layout);
}

/// Clean up scene entities when leaving InGame state.
fn cleanup_scene(mut commands: Commands, scene_query: Query<Entity, With<SceneEntity>>) {
    for entity in scene_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

/// Translate Rapier sensor collisions into zone contacts.
fn forward_sensor_contacts(
    mut collisions: EventReader<CollisionEvent>,
    zones: Query<(), Or<(With<ProximityTrigger>, With<Coin>)>>,
    mut contacts: EventWriter<ZoneContactEvent>,
) {
    for collision in collisions.read() {
        let (a, b, kind) = match collision {
            CollisionEvent::Started(a, b, _) => (*a, *b, ZoneContact::Entered),
            CollisionEvent::Stopped(a, b, _) => (*a, *b, ZoneContact::Exited),
        };

        if zones.contains(a) {
            contacts.send(ZoneContactEvent { zone: a, actor: b, kind });
        }
        if zones.contains(b) {
            contacts.send(ZoneContactEvent { zone: b, actor: a, kind });
        }
    }
}
