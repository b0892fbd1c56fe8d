//! UI plugin - dialogue panel, note overlay, HUD, and the opening poem.

use bevy::prelude::*;

use super::{dialogue_panel, hud, intro, paper};

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        dialogue_panel::setup_dialogue_panel_systems(app);
        paper::setup_paper_systems(app);
        hud::setup_hud_systems(app);
        intro::setup_intro_systems(app);
    }
}
