//! Walking directions and the tokens that unlock them.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::UnlockTokenEvent;

/// One of the four directions the player can walk in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum CardinalDirection {
    Up,
    Down,
    Left,
    Right,
}

impl CardinalDirection {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit vector, +Y up.
    pub fn vector(self) -> Vec2 {
        match self {
            Self::Up => Vec2::Y,
            Self::Down => Vec2::NEG_Y,
            Self::Left => Vec2::NEG_X,
            Self::Right => Vec2::X,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }
}

/// Which walking directions the player has earned so far.
#[derive(Resource, Debug, Clone)]
pub struct ControlUnlocks {
    order: Vec<CardinalDirection>,
    unlocked: usize,
    tokens: usize,
}

impl ControlUnlocks {
    /// Duplicate directions in `order` are dropped.
    pub fn new(order: &[CardinalDirection]) -> Self {
        let mut deduped: Vec<CardinalDirection> = Vec::with_capacity(order.len());
        for direction in order {
            if !deduped.contains(direction) {
                deduped.push(*direction);
            }
        }

        Self {
            unlocked: deduped.len().min(1),
            order: deduped,
            tokens: 0,
        }
    }

    /// Spend a token on the next locked direction. Returns the direction
    /// it opened, or None once everything is unlocked.
    pub fn grant_token(&mut self) -> Option<CardinalDirection> {
        self.tokens += 1;
        let next = self.order.get(self.unlocked).copied()?;
        self.unlocked += 1;
        Some(next)
    }

    pub fn is_unlocked(&self, direction: CardinalDirection) -> bool {
        self.unlocked().contains(&direction)
    }

    pub fn unlocked(&self) -> &[CardinalDirection] {
        &self.order[..self.unlocked]
    }

    pub fn all_unlocked(&self) -> bool {
        self.unlocked == self.order.len()
    }

    pub fn tokens_received(&self) -> usize {
        self.tokens
    }
}

impl Default for ControlUnlocks {
    fn default() -> Self {
        Self::new(&[
            CardinalDirection::Right,
            CardinalDirection::Down,
            CardinalDirection::Left,
            CardinalDirection::Up,
        ])
    }
}

/// Spend every UnlockTokenEvent received this frame.
pub fn apply_unlock_tokens(
    mut tokens: EventReader<UnlockTokenEvent>,
    mut unlocks: ResMut<ControlUnlocks>,
) {
    for token in tokens.read() {
        match unlocks.grant_token() {
            Some(direction) => info!("Unlocked walking {} (token from {:?})", direction.label(), token.source),
            None => debug!("Token from {:?} had nothing left to unlock", token.source),
        }
    }
}
