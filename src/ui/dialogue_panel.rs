//! Dialogue panel - speaker, typed text, choices, and the advance button.

use bevy::prelude::*;

use crate::core::{GameState, TickPhase};
use crate::dialogue::{DialogueManager, DialogueRequest};
use crate::input::{Action, InputFrame};

/// Marker for the panel root. Hidden while no conversation runs.
#[derive(Component)]
pub struct DialoguePanel;

/// Text node showing the line being typed.
#[derive(Component)]
pub struct DialogueText;

/// Text node naming who is speaking.
#[derive(Component)]
pub struct SpeakerLabel;

/// Container the choice buttons are spawned into.
#[derive(Component)]
pub struct ChoiceList;

/// A choice button, by index into the story's current choices.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceButton(pub usize);

/// On-screen button that advances the conversation like submit does.
#[derive(Component)]
pub struct AdvanceButton;

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.2);
const BUTTON_HOVERED: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED: Color = Color::srgb(0.3, 0.3, 0.35);

/// Set up dialogue panel systems.
pub fn setup_dialogue_panel_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_dialogue_panel)
        .add_systems(OnExit(GameState::InGame), cleanup_dialogue_panel)
        .add_systems(
            Update,
            (
                validate_dialogue_ui.run_if(in_state(GameState::InGame)),
                handle_dialogue_buttons,
                choose_with_number_keys,
            )
                .in_set(TickPhase::Ui),
        )
        .add_systems(
            Update,
            (sync_dialogue_panel, rebuild_choice_buttons).in_set(TickPhase::Presentation),
        );
}

/// Spawn the panel along the bottom of the screen.
fn spawn_dialogue_panel(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::End,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(24.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            Visibility::Hidden,
            DialoguePanel,
        ))
        .with_children(|root| {
            root.spawn((
                Node {
                    width: Val::Percent(80.0),
                    min_height: Val::Px(140.0),
                    flex_direction: FlexDirection::Column,
                    padding: UiRect::all(Val::Px(16.0)),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.05, 0.05, 0.08, 0.9)),
            ))
            .with_children(|panel| {
                panel.spawn((
                    Text::new(""),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.95, 0.8, 0.5)),
                    Node {
                        margin: UiRect::bottom(Val::Px(6.0)),
                        ..default()
                    },
                    SpeakerLabel,
                ));

                panel.spawn((
                    Text::new(""),
                    TextFont {
                        font_size: 22.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.9, 0.9, 0.92)),
                    DialogueText,
                ));

                panel.spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        margin: UiRect::top(Val::Px(10.0)),
                        ..default()
                    },
                    ChoiceList,
                ));

                panel
                    .spawn((
                        Node {
                            align_self: AlignSelf::End,
                            ..default()
                        },
                    ))
                    .with_children(|row| {
                        spawn_panel_button(row, "Next", AdvanceButton);
                    });
            });
        });
}

fn spawn_panel_button(parent: &mut ChildBuilder, label: &str, marker: impl Component) {
    parent
        .spawn((
            Button,
            Node {
                padding: UiRect::axes(Val::Px(14.0), Val::Px(6.0)),
                margin: UiRect::all(Val::Px(4.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            marker,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(label),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        });
}

/// Without a panel and a text node the dialogue cannot be shown, so the
/// machine is switched off instead.
///
/// Checks once, on the first in-game frame, after the spawn commands from
/// `OnEnter` have been applied.
pub fn validate_dialogue_ui(
    panels: Query<(), With<DialoguePanel>>,
    texts: Query<(), With<DialogueText>>,
    mut manager: ResMut<DialogueManager>,
    mut checked: Local<bool>,
) {
    if *checked {
        return;
    }
    *checked = true;

    if panels.is_empty() || texts.is_empty() {
        error!("Dialogue panel is missing; conversations are disabled");
        manager.disable();
    }
}

/// Clicking a panel button consumes this frame's submit, so gameplay does
/// not advance a second time.
fn handle_dialogue_buttons(
    mut frame: ResMut<InputFrame>,
    mut interaction_query: Query<
        (
            &Interaction,
            &mut BackgroundColor,
            Option<&ChoiceButton>,
            Option<&AdvanceButton>,
        ),
        (Changed<Interaction>, With<Button>),
    >,
    mut requests: EventWriter<DialogueRequest>,
) {
    for (interaction, mut bg_color, choice, advance) in interaction_query.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                *bg_color = BUTTON_PRESSED.into();
                if let Some(ChoiceButton(index)) = choice {
                    frame.consume_in_favor_of_ui(Action::Submit);
                    requests.send(DialogueRequest::Choose(*index));
                } else if advance.is_some() {
                    frame.consume_in_favor_of_ui(Action::Submit);
                    requests.send(DialogueRequest::Advance);
                }
            }
            Interaction::Hovered => *bg_color = BUTTON_HOVERED.into(),
            Interaction::None => *bg_color = BUTTON_IDLE.into(),
        }
    }
}

/// Number keys 1-9 pick the matching choice.
fn choose_with_number_keys(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    manager: Res<DialogueManager>,
    mut requests: EventWriter<DialogueRequest>,
) {
    const DIGITS: [KeyCode; 9] = [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
        KeyCode::Digit8,
        KeyCode::Digit9,
    ];

    let Some(keyboard) = keyboard else {
        return;
    };
    let available = manager.current_choices().len();
    if available == 0 {
        return;
    }

    if let Some(index) = DIGITS
        .iter()
        .take(available)
        .position(|key| keyboard.just_pressed(*key))
    {
        requests.send(DialogueRequest::Choose(index));
    }
}

/// Mirror the machine onto the panel.
fn sync_dialogue_panel(
    manager: Res<DialogueManager>,
    mut panel_query: Query<&mut Visibility, With<DialoguePanel>>,
    mut text_query: Query<&mut Text, (With<DialogueText>, Without<SpeakerLabel>)>,
    mut speaker_query: Query<&mut Text, (With<SpeakerLabel>, Without<DialogueText>)>,
) {
    let wanted = if manager.panel_visible() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut visibility in &mut panel_query {
        if *visibility != wanted {
            *visibility = wanted;
        }
    }

    for mut text in &mut text_query {
        if text.as_str() != manager.displayed_text() {
            **text = manager.displayed_text().to_string();
        }
    }

    let speaker = manager.current_speaker().unwrap_or_default();
    for mut text in &mut speaker_query {
        if text.as_str() != speaker {
            **text = speaker.to_string();
        }
    }
}

/// Respawn the choice buttons whenever the offered choices change.
fn rebuild_choice_buttons(
    mut commands: Commands,
    manager: Res<DialogueManager>,
    list_query: Query<Entity, With<ChoiceList>>,
    mut shown: Local<Vec<String>>,
) {
    let choices = manager.current_choices();
    if *shown == choices {
        return;
    }

    for list in &list_query {
        commands.entity(list).despawn_descendants();
        commands.entity(list).with_children(|parent| {
            for (index, choice) in choices.iter().enumerate() {
                spawn_panel_button(parent, &format!("{}. {}", index + 1, choice), ChoiceButton(index));
            }
        });
    }
    *shown = choices;
}

/// Clean up the panel when leaving InGame state.
fn cleanup_dialogue_panel(mut commands: Commands, query: Query<Entity, With<DialoguePanel>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
