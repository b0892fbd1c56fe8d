//! Headless app harness shared by the integration tests.

#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use neufa_garden::core::{CorePlugin, GameState, PlayState, TickPhase, TypingSoundEvent};
use neufa_garden::dialogue::{DialogueManager, DialoguePlugin, ScriptLibrary};
use neufa_garden::input::InputPlugin;
use neufa_garden::player::{Outfit, Player, PlayerMotion, PlayerPlugin};
use neufa_garden::ui::{IntroTypewriter, UiPlugin};
use neufa_garden::world::{InteractionKind, InteractionPlugin, ProximityTrigger, ZoneContact, ZoneContactEvent};

/// Frame length used by every test app.
pub const FRAME: Duration = Duration::from_millis(10);

/// Gameplay plugins without rendering, physics or audio. Keyboard state is
/// driven by hand through `ButtonInput<KeyCode>`.
pub fn test_app() -> App {
    let mut app = base_app();
    reach_in_game(&mut app);
    app
}

/// `test_app` plus the game's UI systems. The opening poem is typing.
pub fn ui_test_app_with_intro() -> App {
    let mut app = base_app();
    app.add_plugins(UiPlugin);
    reach_in_game(&mut app);
    app
}

/// `ui_test_app_with_intro` with the poem already put away.
pub fn ui_test_app() -> App {
    let mut app = ui_test_app_with_intro();
    app.world_mut().resource_mut::<IntroTypewriter>().close();
    app.update();
    app
}

fn base_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .init_resource::<ButtonInput<KeyCode>>()
        .add_plugins((
            CorePlugin,
            InputPlugin,
            DialoguePlugin,
            PlayerPlugin,
            InteractionPlugin,
        ));
    app
}

fn reach_in_game(app: &mut App) {
    // Startup, then the Loading -> InGame transition
    app.update();
    app.update();
    assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::InGame);
}

/// Register a script and type at 20ms per character.
pub fn add_script(app: &mut App, script_id: &str, ron: &str) {
    app.world_mut()
        .resource_mut::<ScriptLibrary>()
        .insert_ron(script_id, ron)
        .unwrap();
    app.world_mut()
        .resource_mut::<DialogueManager>()
        .set_char_interval(0.02);
}

pub fn spawn_player(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((
            Player,
            PlayerMotion::default(),
            Outfit::default(),
            Transform::default(),
        ))
        .id()
}

pub fn spawn_zone(app: &mut App, kind: InteractionKind, position: Vec2) -> Entity {
    app.world_mut()
        .spawn((
            ProximityTrigger::default(),
            kind,
            Transform::from_translation(position.extend(0.0)),
        ))
        .id()
}

pub fn contact(app: &mut App, zone: Entity, actor: Entity, kind: ZoneContact) {
    app.world_mut().send_event(ZoneContactEvent { zone, actor, kind });
    app.update();
}

/// Press and release a key over two frames.
pub fn tap(app: &mut App, key: KeyCode) {
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(key);
    app.update();

    let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
    keyboard.clear();
    keyboard.release(key);
    app.update();
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
}

/// Hold a key for `frames` frames, then release it.
pub fn hold(app: &mut App, key: KeyCode, frames: usize) {
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(key);
    for _ in 0..frames {
        app.update();
        app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
    }
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().release(key);
    app.update();
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
}

/// Update until `done` holds, giving up after `max_frames`.
pub fn run_until(app: &mut App, max_frames: usize, done: impl Fn(&App) -> bool) -> bool {
    for _ in 0..max_frames {
        if done(app) {
            return true;
        }
        app.update();
    }
    done(app)
}

pub fn manager(app: &App) -> &DialogueManager {
    app.world().resource::<DialogueManager>()
}

pub fn play_state(app: &App) -> PlayState {
    *app.world().resource::<State<PlayState>>().get()
}

/// Typing sounds requested since `count_typing_sounds` was called.
#[derive(Resource, Default)]
pub struct SoundsHeard(pub usize);

fn listen_for_typing_sounds(
    mut sounds: EventReader<TypingSoundEvent>,
    mut heard: ResMut<SoundsHeard>,
) {
    heard.0 += sounds.read().count();
}

pub fn count_typing_sounds(app: &mut App) {
    app.init_resource::<SoundsHeard>()
        .add_systems(Update, listen_for_typing_sounds.in_set(TickPhase::EndOfTick));
}

pub fn sounds_heard(app: &App) -> usize {
    app.world().resource::<SoundsHeard>().0
}

pub fn visibility(app: &App, entity: Entity) -> Visibility {
    *app.world().get::<Visibility>(entity).unwrap()
}
