//! Proximity zones around interactables.
//!
//! A zone only tracks whether the player is inside it. Contact events
//! arrive as [`ZoneContactEvent`]s, which the world plugin forwards from
//! Rapier's sensor collisions.

use bevy::prelude::*;

use super::interactable::{InteractionKind, PaperOverlay};
use crate::core::UnlockTokenEvent;
use crate::dialogue::{DialogueManager, DialogueRequest};
use crate::input::InputFrame;
use crate::player::{Outfit, Player};

/// Whether an actor entered or left a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneContact {
    Entered,
    Exited,
}

/// An actor touched or left a zone.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneContactEvent {
    pub zone: Entity,
    pub actor: Entity,
    pub kind: ZoneContact,
}

/// Tracks whether the player stands inside this entity's zone.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProximityTrigger {
    player_in_range: bool,
}

impl ProximityTrigger {
    /// Only the player counts. Returns true if the state changed.
    pub fn on_zone_enter(&mut self, actor: Entity, player: Entity) -> bool {
        if actor != player || self.player_in_range {
            return false;
        }
        self.player_in_range = true;
        true
    }

    pub fn on_zone_exit(&mut self, actor: Entity, player: Entity) -> bool {
        if actor != player || !self.player_in_range {
            return false;
        }
        self.player_in_range = false;
        true
    }

    pub fn player_in_range(&self) -> bool {
        self.player_in_range
    }
}

/// Child sprite shown above an interactable while the player is close.
#[derive(Component, Debug, Default)]
pub struct VisualCue;

/// Feed contact events into the zones they name.
pub fn apply_zone_contacts(
    mut contacts: EventReader<ZoneContactEvent>,
    player_query: Query<Entity, With<Player>>,
    mut triggers: Query<&mut ProximityTrigger>,
) {
    let Ok(player) = player_query.get_single() else {
        contacts.clear();
        return;
    };

    for contact in contacts.read() {
        let Ok(mut trigger) = triggers.get_mut(contact.zone) else {
            continue;
        };

        let changed = match contact.kind {
            ZoneContact::Entered => trigger.on_zone_enter(contact.actor, player),
            ZoneContact::Exited => trigger.on_zone_exit(contact.actor, player),
        };
        if changed {
            debug!("Player {:?} zone {:?}", contact.kind, contact.zone);
        }
    }
}

/// Show each zone's cue while the player is in range.
pub fn update_visual_cues(
    triggers: Query<&ProximityTrigger>,
    mut cues: Query<(&Parent, &mut Visibility), With<VisualCue>>,
) {
    for (parent, mut visibility) in &mut cues {
        let in_range = triggers
            .get(parent.get())
            .is_ok_and(|trigger| trigger.player_in_range());

        let wanted = if in_range {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
}

/// Route an interact press to the nearest interactable in range.
///
/// Presses are ignored while a conversation runs. An open note is
/// closed by any press instead.
pub fn interact_with_triggers(
    frame: Res<InputFrame>,
    manager: Res<DialogueManager>,
    mut overlay: ResMut<PaperOverlay>,
    triggers: Query<(Entity, &ProximityTrigger, &InteractionKind, &Transform)>,
    mut player_query: Query<(Entity, &Transform, &mut Outfit), With<Player>>,
    mut dialogue: EventWriter<DialogueRequest>,
    mut tokens: EventWriter<UnlockTokenEvent>,
) {
    if !frame.interact_pressed() || manager.is_active() {
        return;
    }

    if overlay.is_open() {
        overlay.close();
        info!("Put the note away");
        return;
    }

    let Ok((player, player_transform, mut outfit)) = player_query.get_single_mut() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    let nearest = triggers
        .iter()
        .filter(|(_, trigger, _, _)| trigger.player_in_range())
        .min_by(|(_, _, _, a), (_, _, _, b)| {
            let da = a.translation.truncate().distance_squared(player_pos);
            let db = b.translation.truncate().distance_squared(player_pos);
            da.total_cmp(&db)
        });

    let Some((source, _, kind, _)) = nearest else {
        return;
    };

    match kind {
        InteractionKind::Narrative { script_id } => {
            dialogue.send(DialogueRequest::Enter {
                script_id: script_id.clone(),
            });
        }
        InteractionKind::Wardrobe { outfit: name, tint } => {
            info!("Player {:?} changed into {}", player, name);
            outfit.name = name.clone();
            outfit.tint = *tint;
            tokens.send(UnlockTokenEvent { source });
        }
        InteractionKind::PaperOverlay { text } => {
            info!("Reading note {:?}", source);
            overlay.open(text.clone());
        }
    }
}
