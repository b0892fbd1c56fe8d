//! Input plugin - samples keyboard and gamepad into the InputFrame.

use bevy::prelude::*;

use super::frame::{Action, InputFrame};
use crate::core::TickPhase;

/// Keys and buttons bound to each action.
#[derive(Resource, Debug, Clone)]
pub struct InputBindings {
    pub interact_keys: Vec<KeyCode>,
    pub submit_keys: Vec<KeyCode>,
    pub interact_button: GamepadButton,
    pub submit_button: GamepadButton,
    pub up: Vec<KeyCode>,
    pub down: Vec<KeyCode>,
    pub left: Vec<KeyCode>,
    pub right: Vec<KeyCode>,
    /// Stick magnitude below which gamepad movement is ignored
    pub stick_deadzone: f32,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            interact_keys: vec![KeyCode::KeyE],
            submit_keys: vec![KeyCode::Space, KeyCode::Enter],
            interact_button: GamepadButton::West,
            submit_button: GamepadButton::South,
            up: vec![KeyCode::KeyW, KeyCode::ArrowUp],
            down: vec![KeyCode::KeyS, KeyCode::ArrowDown],
            left: vec![KeyCode::KeyA, KeyCode::ArrowLeft],
            right: vec![KeyCode::KeyD, KeyCode::ArrowRight],
            stick_deadzone: 0.2,
        }
    }
}

impl InputBindings {
    fn keys(&self, action: Action) -> &[KeyCode] {
        match action {
            Action::Interact => &self.interact_keys,
            Action::Submit => &self.submit_keys,
        }
    }

    fn button(&self, action: Action) -> GamepadButton {
        match action {
            Action::Interact => self.interact_button,
            Action::Submit => self.submit_button,
        }
    }
}

/// Input plugin - owns the InputFrame and its end-of-frame reset.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputFrame>()
            .init_resource::<InputBindings>()
            .add_systems(Update, sample_input.in_set(TickPhase::Input))
            .add_systems(Update, reset_frame_flags.in_set(TickPhase::EndOfTick));
    }
}

/// Translate this frame's raw button edges and held directions into the InputFrame.
fn sample_input(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    gamepads: Query<&Gamepad>,
    bindings: Res<InputBindings>,
    mut frame: ResMut<InputFrame>,
) {
    let mut direction = Vec2::ZERO;

    if let Some(keyboard) = keyboard.as_deref() {
        for action in [Action::Interact, Action::Submit] {
            let keys = bindings.keys(action);
            if keyboard.any_just_pressed(keys.iter().copied()) {
                frame.on_action_start(action);
            }
            if keyboard.any_just_released(keys.iter().copied()) {
                frame.on_action_end(action);
            }
        }

        if keyboard.any_pressed(bindings.up.iter().copied()) {
            direction.y += 1.0;
        }
        if keyboard.any_pressed(bindings.down.iter().copied()) {
            direction.y -= 1.0;
        }
        if keyboard.any_pressed(bindings.left.iter().copied()) {
            direction.x -= 1.0;
        }
        if keyboard.any_pressed(bindings.right.iter().copied()) {
            direction.x += 1.0;
        }
    }

    for gamepad in gamepads.iter() {
        for action in [Action::Interact, Action::Submit] {
            let button = bindings.button(action);
            if gamepad.just_pressed(button) {
                frame.on_action_start(action);
            }
            if gamepad.just_released(button) {
                frame.on_action_end(action);
            }
        }

        let stick = gamepad.left_stick();
        if direction == Vec2::ZERO && stick.length() > bindings.stick_deadzone {
            direction = stick;
        }
    }

    frame.set_move_direction(direction);
}

/// Clear pressed-this-frame flags after every consumer has run.
fn reset_frame_flags(mut frame: ResMut<InputFrame>) {
    frame.end_of_tick();
}
