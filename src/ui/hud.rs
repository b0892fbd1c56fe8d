//! In-game HUD - coins picked up and walking directions earned.

use bevy::prelude::*;

use crate::core::{CoinCollectedEvent, DialogueEndedEvent, DialogueStartedEvent, GameState, TickPhase};
use crate::player::{CardinalDirection, ControlUnlocks};
use crate::world::CoinPurse;

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Text showing the coin count.
#[derive(Component)]
pub struct CoinCounter;

/// One label per direction, lit once the direction is unlocked.
#[derive(Component, Debug, Clone, Copy)]
pub struct DirectionIndicator(pub CardinalDirection);

const LOCKED: Color = Color::srgba(0.5, 0.5, 0.5, 0.35);
const UNLOCKED: Color = Color::srgb(0.95, 0.95, 0.8);

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            (
                update_coin_counter,
                update_direction_indicators,
                hide_hud_during_dialogue,
            )
                .in_set(TickPhase::Presentation)
                .run_if(in_state(GameState::InGame)),
        );
}

/// Spawn the HUD UI in the top-left corner.
fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(16.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Coins: 0"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.85, 0.2)),
                CoinCounter,
            ));

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    margin: UiRect::top(Val::Px(6.0)),
                    ..default()
                })
                .with_children(|row| {
                    for direction in CardinalDirection::ALL {
                        row.spawn((
                            Text::new(direction.label()),
                            TextFont {
                                font_size: 14.0,
                                ..default()
                            },
                            TextColor(LOCKED),
                            Node {
                                margin: UiRect::right(Val::Px(8.0)),
                                ..default()
                            },
                            DirectionIndicator(direction),
                        ));
                    }
                });
        });
}

fn update_coin_counter(
    mut collected: EventReader<CoinCollectedEvent>,
    purse: Res<CoinPurse>,
    mut query: Query<&mut Text, With<CoinCounter>>,
) {
    let Some(last) = collected.read().last() else {
        return;
    };
    debug!("Coin {:?} collected ({} times)", last.coin, last.times_collected);
    for mut text in &mut query {
        **text = format!("Coins: {}", purse.collected);
    }
}

fn update_direction_indicators(
    unlocks: Res<ControlUnlocks>,
    mut query: Query<(&DirectionIndicator, &mut TextColor)>,
) {
    for (indicator, mut color) in &mut query {
        let wanted = if unlocks.is_unlocked(indicator.0) {
            UNLOCKED
        } else {
            LOCKED
        };
        if color.0 != wanted {
            color.0 = wanted;
        }
    }
}

/// The HUD steps aside while a conversation is on screen.
fn hide_hud_during_dialogue(
    mut started: EventReader<DialogueStartedEvent>,
    mut ended: EventReader<DialogueEndedEvent>,
    mut query: Query<&mut Visibility, With<HudRoot>>,
) {
    // Both can arrive in one frame; the conversation is over if it ended
    let started = started.read().count() > 0;
    let ended = ended.read().count() > 0;
    let wanted = match (started, ended) {
        (_, true) => Visibility::Inherited,
        (true, false) => Visibility::Hidden,
        (false, false) => return,
    };
    for mut visibility in &mut query {
        *visibility = wanted;
    }
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
