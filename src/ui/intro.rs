//! Opening poem, typed over the garden when the game starts.

use bevy::prelude::*;
use rand::thread_rng;

use crate::core::{GameState, TickPhase, TypingSoundEvent};
use crate::dialogue::{pick_sound_index, DialogueConfig, TaskHandle, TypingScheduler, TypingStep};
use crate::input::{Action, InputFrame};

/// Marker for the intro overlay root.
#[derive(Component)]
pub struct IntroOverlay;

/// Text node the poem is typed into.
#[derive(Component)]
pub struct IntroText;

/// The intro's own typewriter. Open from start until dismissed.
#[derive(Resource, Debug, Default)]
pub struct IntroTypewriter {
    scheduler: TypingScheduler,
    handle: Option<TaskHandle>,
    full_text: String,
    open: bool,
}

impl IntroTypewriter {
    pub fn start(&mut self, text: &str, char_interval: f32) {
        self.full_text = text.to_string();
        self.handle = Some(self.scheduler.start_typing(text, char_interval));
        self.open = true;
    }

    /// One frame of typing. `None` once the whole poem is shown.
    pub fn step(&mut self, dt: f32) -> Option<TypingStep> {
        self.scheduler.step(dt)
    }

    /// A press while typing shows everything; the next one closes.
    pub fn skip_or_close(&mut self) {
        match self.handle.take() {
            Some(handle) if self.scheduler.is_typing() => {
                self.scheduler.complete_immediately(handle, &self.full_text);
            }
            _ => self.close(),
        }
    }

    pub fn close(&mut self) {
        self.scheduler.clear();
        self.handle = None;
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_typing(&self) -> bool {
        self.scheduler.is_typing()
    }

    pub fn displayed(&self) -> &str {
        self.scheduler.displayed()
    }
}

pub fn setup_intro_systems(app: &mut App) {
    app.init_resource::<IntroTypewriter>()
        .add_systems(OnEnter(GameState::InGame), (spawn_intro_overlay, start_intro))
        .add_systems(OnExit(GameState::InGame), cleanup_intro_overlay)
        .add_systems(Update, dismiss_intro.in_set(TickPhase::Ui))
        .add_systems(
            Update,
            (type_intro, sync_intro_overlay)
                .chain()
                .in_set(TickPhase::Presentation),
        );
}

fn spawn_intro_overlay(mut commands: Commands) {
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
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.85)),
            Visibility::Hidden,
            IntroOverlay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.92, 0.9, 0.85)),
                Node {
                    max_width: Val::Percent(70.0),
                    ..default()
                },
                IntroText,
            ));
        });
}

fn start_intro(config: Res<DialogueConfig>, mut intro: ResMut<IntroTypewriter>) {
    if let Some(text) = &config.intro_text {
        info!("Typing intro");
        intro.start(text, config.intro_speed);
    }
}

/// Submit or interact while the intro is up belongs to the intro.
fn dismiss_intro(mut frame: ResMut<InputFrame>, mut intro: ResMut<IntroTypewriter>) {
    if !intro.is_open() {
        return;
    }
    if frame.submit_pressed() || frame.interact_pressed() {
        intro.skip_or_close();
        if !intro.is_open() {
            info!("Intro closed");
        }
    }
    frame.consume_in_favor_of_ui(Action::Submit);
    frame.consume_in_favor_of_ui(Action::Interact);
}

fn type_intro(
    time: Res<Time>,
    config: Res<DialogueConfig>,
    mut intro: ResMut<IntroTypewriter>,
    mut sounds: EventWriter<TypingSoundEvent>,
) {
    if !intro.is_open() {
        return;
    }
    if let Some(TypingStep::Revealed(_)) = intro.step(time.delta_secs()) {
        if let Some(index) = pick_sound_index(config.typing_sounds.len(), &mut thread_rng()) {
            sounds.send(TypingSoundEvent { index });
        }
    }
}

fn sync_intro_overlay(
    intro: Res<IntroTypewriter>,
    mut overlay_query: Query<&mut Visibility, With<IntroOverlay>>,
    mut text_query: Query<&mut Text, With<IntroText>>,
) {
    if !intro.is_changed() {
        return;
    }

    let wanted = if intro.is_open() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut visibility in &mut overlay_query {
        *visibility = wanted;
    }
    for mut text in &mut text_query {
        if text.as_str() != intro.displayed() {
            **text = intro.displayed().to_string();
        }
    }
}

fn cleanup_intro_overlay(
    mut commands: Commands,
    query: Query<Entity, With<IntroOverlay>>,
    mut intro: ResMut<IntroTypewriter>,
) {
    intro.close();
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
