//! Frame phases shared by every plugin.

use bevy::prelude::*;

/// Fixed per-frame ordering of gameplay work.
///
/// Raw input is sampled first, UI gets the first chance to consume it,
/// gameplay reads whatever is left, presentation mirrors the result onto
/// the screen, and the input debouncer resets its per-frame flags last.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickPhase {
    Input,
    Ui,
    Gameplay,
    Presentation,
    EndOfTick,
}

/// Chain the tick phases in `Update`.
pub fn configure_tick_phases(app: &mut App) {
    app.configure_sets(
        Update,
        (
            TickPhase::Input,
            TickPhase::Ui,
            TickPhase::Gameplay,
            TickPhase::Presentation,
            TickPhase::EndOfTick,
        )
            .chain(),
    );
}
