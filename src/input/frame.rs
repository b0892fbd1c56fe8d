//! Per-frame input snapshot with edge-triggered button flags.

use bevy::prelude::*;

/// Buttons that gameplay and UI compete for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Talk to / use whatever the player is standing next to
    Interact,
    /// Advance dialogue or confirm in UI
    Submit,
}

#[derive(Debug, Clone, Copy, Default)]
struct ActionState {
    held: bool,
    pressed_this_frame: bool,
    /// UI took this frame's press; later presses in the same frame are ignored
    consumed: bool,
}

/// Input state for the current frame.
///
/// Raw button callbacks mutate this during the `Input` phase, consumers read
/// it during `Ui` and `Gameplay`, and the input plugin resets the per-frame
/// flags in `EndOfTick`. Consumers never reset the flags themselves.
#[derive(Resource, Debug, Default)]
pub struct InputFrame {
    move_direction: Vec2,
    interact: ActionState,
    submit: ActionState,
}

impl InputFrame {
    fn state(&self, action: Action) -> &ActionState {
        match action {
            Action::Interact => &self.interact,
            Action::Submit => &self.submit,
        }
    }

    fn state_mut(&mut self, action: Action) -> &mut ActionState {
        match action {
            Action::Interact => &mut self.interact,
            Action::Submit => &mut self.submit,
        }
    }

    /// A button went down.
    pub fn on_action_start(&mut self, action: Action) {
        let state = self.state_mut(action);
        state.held = true;
        if !state.consumed {
            state.pressed_this_frame = true;
        }
    }

    /// A button was released.
    pub fn on_action_end(&mut self, action: Action) {
        self.state_mut(action).held = false;
    }

    /// UI handled this frame's press. Gameplay will not see it, and neither
    /// will any further press of the same button until the frame ends.
    pub fn consume_in_favor_of_ui(&mut self, action: Action) {
        let state = self.state_mut(action);
        state.pressed_this_frame = false;
        state.consumed = true;
    }

    /// Clear the per-frame flags. Only the input plugin's end-of-frame
    /// system calls this.
    pub(crate) fn end_of_tick(&mut self) {
        for state in [&mut self.interact, &mut self.submit] {
            state.pressed_this_frame = false;
            state.consumed = false;
        }
    }

    pub fn set_move_direction(&mut self, direction: Vec2) {
        self.move_direction = direction;
    }

    /// Raw movement input, not normalized or snapped.
    pub fn move_direction(&self) -> Vec2 {
        self.move_direction
    }

    pub fn pressed_this_frame(&self, action: Action) -> bool {
        self.state(action).pressed_this_frame
    }

    pub fn held(&self, action: Action) -> bool {
        self.state(action).held
    }

    pub fn interact_pressed(&self) -> bool {
        self.pressed_this_frame(Action::Interact)
    }

    pub fn submit_pressed(&self) -> bool {
        self.pressed_this_frame(Action::Submit)
    }

    pub fn submit_consumed_by_ui(&self) -> bool {
        self.submit.consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_visible_for_a_single_frame() {
        let mut frame = InputFrame::default();

        frame.on_action_start(Action::Interact);
        assert!(frame.interact_pressed());
        assert!(frame.held(Action::Interact));

        frame.end_of_tick();
        assert!(!frame.interact_pressed());
        assert!(frame.held(Action::Interact), "holding survives the frame reset");

        frame.on_action_end(Action::Interact);
        frame.end_of_tick();
        assert!(!frame.held(Action::Interact));
        assert!(!frame.interact_pressed());
    }

    #[test]
    fn every_edge_fires_exactly_once() {
        // (pressed down this frame, released this frame)
        let frames = [
            (true, false),
            (false, false),
            (false, true),
            (true, true),
            (true, false),
            (false, false),
        ];
        let mut frame = InputFrame::default();
        let mut observed = 0;

        for (down, up) in frames {
            if down {
                frame.on_action_start(Action::Submit);
            }
            if up {
                frame.on_action_end(Action::Submit);
            }
            if frame.submit_pressed() {
                observed += 1;
            }
            frame.end_of_tick();
        }

        assert_eq!(observed, 3);
    }

    #[test]
    fn ui_consumption_hides_the_press_from_gameplay() {
        let mut frame = InputFrame::default();

        frame.on_action_start(Action::Submit);
        frame.consume_in_favor_of_ui(Action::Submit);
        assert!(!frame.submit_pressed());
        assert!(frame.submit_consumed_by_ui());

        // A bounce within the same frame cannot sneak past the UI.
        frame.on_action_end(Action::Submit);
        frame.on_action_start(Action::Submit);
        assert!(!frame.submit_pressed());

        frame.end_of_tick();
        assert!(!frame.submit_consumed_by_ui());
        assert!(!frame.submit_pressed(), "a new press is needed next frame");

        frame.on_action_end(Action::Submit);
        frame.on_action_start(Action::Submit);
        assert!(frame.submit_pressed());
    }

    #[test]
    fn consuming_submit_leaves_interact_alone() {
        let mut frame = InputFrame::default();
        frame.on_action_start(Action::Interact);
        frame.on_action_start(Action::Submit);

        frame.consume_in_favor_of_ui(Action::Submit);

        assert!(frame.interact_pressed());
        assert!(!frame.submit_pressed());
    }
}
