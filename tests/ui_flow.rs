//! Panel, HUD and intro overlay following the game through real frames.

mod common;

use bevy::prelude::*;

use common::*;
use neufa_garden::core::TickPhase;
use neufa_garden::dialogue::{DialogueConfig, DialogueRequest, DialogueState};
use neufa_garden::ui::{
    validate_dialogue_ui, CoinCounter, DialoguePanel, DialogueText, HudRoot, IntroOverlay,
    IntroText, IntroTypewriter,
};
use neufa_garden::world::{Coin, InteractionKind, ZoneContact};

const ONE_LINE: &str = r#"(knots: { "start": (lines: [(speaker: Some("Claire"), text: "Hi")]) })"#;

fn single<C: Component>(app: &mut App) -> Entity {
    let mut query = app.world_mut().query_filtered::<Entity, With<C>>();
    query.single(app.world())
}

fn text_of<C: Component>(app: &mut App) -> String {
    let mut query = app.world_mut().query_filtered::<&Text, With<C>>();
    query.single(app.world()).as_str().to_string()
}

fn intro(app: &App) -> &IntroTypewriter {
    app.world().resource::<IntroTypewriter>()
}

fn enter(app: &mut App, script_id: &str) {
    app.world_mut().send_event(DialogueRequest::Enter {
        script_id: script_id.to_string(),
    });
    app.update();
}

#[test]
fn panel_shows_for_the_conversation_only() {
    let mut app = ui_test_app();
    add_script(&mut app, "hello", ONE_LINE);
    let panel = single::<DialoguePanel>(&mut app);
    assert_eq!(visibility(&app, panel), Visibility::Hidden);

    enter(&mut app, "hello");
    assert_eq!(visibility(&app, panel), Visibility::Inherited);

    assert!(run_until(&mut app, 50, |app| {
        manager(app).state() == DialogueState::AwaitingAdvance
    }));
    app.update();
    assert_eq!(text_of::<DialogueText>(&mut app), "Hi");

    tap(&mut app, KeyCode::Space);
    assert!(!manager(&app).is_active());
    assert_eq!(visibility(&app, panel), Visibility::Hidden);
    assert_eq!(text_of::<DialogueText>(&mut app), "");
}

#[test]
fn shipped_panel_passes_validation() {
    let mut app = ui_test_app();
    assert!(!manager(&app).is_disabled());

    add_script(&mut app, "hello", ONE_LINE);
    enter(&mut app, "hello");
    assert!(manager(&app).is_active());
}

#[test]
fn missing_panel_disables_conversations() {
    let mut app = test_app();
    app.add_systems(Update, validate_dialogue_ui.in_set(TickPhase::Ui));
    app.update();
    assert!(manager(&app).is_disabled());

    add_script(&mut app, "hello", ONE_LINE);
    enter(&mut app, "hello");
    assert!(!manager(&app).is_active());
}

#[test]
fn panel_spawned_late_still_counts() {
    let mut app = test_app();
    app.world_mut().spawn((DialoguePanel, Visibility::Hidden));
    app.world_mut().spawn((DialogueText, Text::new("")));
    app.add_systems(Update, validate_dialogue_ui.in_set(TickPhase::Ui));
    app.update();
    assert!(!manager(&app).is_disabled());
}

#[test]
fn coin_counter_follows_collections() {
    let mut app = ui_test_app();
    let player = spawn_player(&mut app);
    let coin = Coin::new(vec![Vec2::new(20.0, 0.0), Vec2::new(20.0, 30.0)]);
    let coin = app
        .world_mut()
        .spawn((coin, Transform::from_xyz(20.0, 0.0, 0.0)))
        .id();
    assert_eq!(text_of::<CoinCounter>(&mut app), "Coins: 0");

    contact(&mut app, coin, player, ZoneContact::Entered);
    assert_eq!(text_of::<CoinCounter>(&mut app), "Coins: 1");

    contact(&mut app, coin, player, ZoneContact::Exited);
    contact(&mut app, coin, player, ZoneContact::Entered);
    assert_eq!(text_of::<CoinCounter>(&mut app), "Coins: 2");
}

#[test]
fn hud_steps_aside_during_dialogue() {
    let mut app = ui_test_app();
    add_script(&mut app, "hello", ONE_LINE);
    let hud = single::<HudRoot>(&mut app);
    assert_eq!(visibility(&app, hud), Visibility::Inherited);

    enter(&mut app, "hello");
    assert_eq!(visibility(&app, hud), Visibility::Hidden);

    app.world_mut().send_event(DialogueRequest::Exit);
    app.update();
    assert_eq!(visibility(&app, hud), Visibility::Inherited);
}

#[test]
fn intro_types_the_configured_poem() {
    let mut app = ui_test_app_with_intro();
    let poem = app
        .world()
        .resource::<DialogueConfig>()
        .intro_text
        .clone()
        .unwrap();
    assert!(intro(&app).is_open());
    assert!(intro(&app).is_typing());

    count_typing_sounds(&mut app);
    for _ in 0..20 {
        app.update();
    }
    let shown = intro(&app).displayed().to_string();
    assert!(!shown.is_empty());
    assert!(poem.starts_with(&shown));
    assert!(sounds_heard(&app) > 0);
    let overlay = single::<IntroOverlay>(&mut app);
    assert_eq!(visibility(&app, overlay), Visibility::Inherited);
    assert_eq!(text_of::<IntroText>(&mut app), shown);
}

#[test]
fn intro_skips_then_closes() {
    let mut app = ui_test_app_with_intro();
    let poem = app
        .world()
        .resource::<DialogueConfig>()
        .intro_text
        .clone()
        .unwrap();

    tap(&mut app, KeyCode::Space);
    assert!(intro(&app).is_open());
    assert!(!intro(&app).is_typing());
    assert_eq!(intro(&app).displayed(), poem);

    tap(&mut app, KeyCode::Enter);
    assert!(!intro(&app).is_open());
    let overlay = single::<IntroOverlay>(&mut app);
    assert_eq!(visibility(&app, overlay), Visibility::Hidden);
}

#[test]
fn intro_holds_back_interaction() {
    let mut app = ui_test_app_with_intro();
    add_script(&mut app, "hello", ONE_LINE);
    let player = spawn_player(&mut app);
    let npc = spawn_zone(
        &mut app,
        InteractionKind::Narrative {
            script_id: "hello".to_string(),
        },
        Vec2::new(20.0, 0.0),
    );
    contact(&mut app, npc, player, ZoneContact::Entered);

    tap(&mut app, KeyCode::KeyE);
    tap(&mut app, KeyCode::KeyE);
    assert!(!intro(&app).is_open());
    assert!(!manager(&app).is_active());

    tap(&mut app, KeyCode::KeyE);
    assert!(manager(&app).is_active());
}

#[test]
fn walking_is_not_held_back_by_the_intro() {
    let mut app = ui_test_app_with_intro();
    let player = spawn_player(&mut app);

    hold(&mut app, KeyCode::KeyD, 10);
    assert!(intro(&app).is_open());
    let position = app.world().get::<Transform>(player).unwrap().translation;
    assert!(position.x > 0.0);
}
