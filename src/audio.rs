//! Typing sounds played through bevy_kira_audio.

use bevy::prelude::*;
use bevy_kira_audio::prelude::{Audio, AudioControl};
use bevy_kira_audio::AudioSource;

use crate::core::TypingSoundEvent;
use crate::dialogue::DialogueConfig;

/// Clips for the typewriter, in the order the config lists them.
#[derive(Resource, Debug, Default)]
pub struct TypingSoundBank {
    pub clips: Vec<Handle<AudioSource>>,
    pub volume: f64,
}

/// Plays a one-shot clip for every TypingSoundEvent.
///
/// Needs `bevy_kira_audio::AudioPlugin`.
pub struct AudioFeedbackPlugin;

impl Plugin for AudioFeedbackPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TypingSoundBank>()
            .add_systems(PostStartup, load_typing_sounds)
            .add_systems(Update, play_typing_sounds);
    }
}

/// Runs after the dialogue config has been read in Startup.
fn load_typing_sounds(
    config: Res<DialogueConfig>,
    asset_server: Res<AssetServer>,
    mut bank: ResMut<TypingSoundBank>,
) {
    bank.clips = config
        .typing_sounds
        .iter()
        .map(|path| asset_server.load(path.clone()))
        .collect();
    bank.volume = config.sound_volume;

    if bank.clips.is_empty() {
        warn!("No typing sounds configured; dialogue will type silently");
    } else {
        info!("Loaded {} typing sounds", bank.clips.len());
    }
}

fn play_typing_sounds(
    mut events: EventReader<TypingSoundEvent>,
    bank: Res<TypingSoundBank>,
    audio: Res<Audio>,
) {
    for event in events.read() {
        if let Some(clip) = bank.clips.get(event.index) {
            audio.play(clip.clone()).with_volume(bank.volume);
        }
    }
}
