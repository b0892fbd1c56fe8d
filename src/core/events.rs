//! Global events used for cross-system communication.
//!
//! Events allow decoupled systems to communicate. For example, a coin
//! sends an UnlockTokenEvent when collected, and the player's control
//! system receives it to open up another walking direction.

use bevy::prelude::*;

/// Sent when a conversation opens.
#[derive(Event, Debug, Clone)]
pub struct DialogueStartedEvent {
    /// Script the conversation was started from
    pub script_id: String,
}

/// Sent when a conversation closes, either because the story ran out of
/// content or because it was torn down.
#[derive(Event, Debug, Clone)]
pub struct DialogueEndedEvent {
    pub script_id: String,
}

/// Sent once per revealed character while dialogue text is typing.
///
/// `index` points into the configured typing sound list.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingSoundEvent {
    pub index: usize,
}

/// Grants the player one control unlock.
#[derive(Event, Debug, Clone, Copy)]
pub struct UnlockTokenEvent {
    /// Entity that granted the token (coin, wardrobe, ...)
    pub source: Entity,
}

/// Sent when the player picks up a coin.
#[derive(Event, Debug, Clone, Copy)]
pub struct CoinCollectedEvent {
    pub coin: Entity,
    /// How many times this coin has been collected, including this one
    pub times_collected: usize,
}
