//! Full-screen note shown while reading.

use bevy::prelude::*;

use crate::core::{GameState, TickPhase};
use crate::world::PaperOverlay;

#[derive(Component)]
pub struct PaperOverlayUi;

#[derive(Component)]
pub struct PaperText;

pub fn setup_paper_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_paper_overlay)
        .add_systems(OnExit(GameState::InGame), cleanup_paper_overlay)
        .add_systems(Update, sync_paper_overlay.in_set(TickPhase::Presentation));
}

fn spawn_paper_overlay(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            Visibility::Hidden,
            PaperOverlayUi,
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(420.0),
                        min_height: Val::Px(300.0),
                        padding: UiRect::all(Val::Px(28.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.95, 0.93, 0.85)),
                ))
                .with_children(|paper| {
                    paper.spawn((
                        Text::new(""),
                        TextFont {
                            font_size: 20.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.2, 0.15, 0.1)),
                        PaperText,
                    ));
                });
        });
}

fn sync_paper_overlay(
    overlay: Res<PaperOverlay>,
    mut root_query: Query<&mut Visibility, With<PaperOverlayUi>>,
    mut text_query: Query<&mut Text, With<PaperText>>,
) {
    if !overlay.is_changed() {
        return;
    }

    for mut visibility in &mut root_query {
        *visibility = if overlay.is_open() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    for mut text in &mut text_query {
        **text = overlay.text().unwrap_or_default().to_string();
    }
}

fn cleanup_paper_overlay(mut commands: Commands, query: Query<Entity, With<PaperOverlayUi>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
