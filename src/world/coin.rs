//! Coins that hop between waypoints each time they are picked up.

use bevy::prelude::*;

use super::trigger::{ZoneContact, ZoneContactEvent};
use crate::core::{CoinCollectedEvent, UnlockTokenEvent};
use crate::player::Player;

/// Coin sprite size in pixels.
pub const COIN_SIZE: f32 = 8.0;

/// A collectible with an ordered route.
#[derive(Component, Debug, Clone)]
pub struct Coin {
    waypoints: Vec<Vec2>,
    collected: usize,
}

/// Where a coin goes after being picked up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoinStep {
    MoveTo(Vec2),
    Vanish,
}

impl Coin {
    pub fn new(waypoints: Vec<Vec2>) -> Self {
        Self {
            waypoints,
            collected: 0,
        }
    }

    /// Where the coin first appears.
    pub fn start(&self) -> Option<Vec2> {
        self.waypoints.first().copied()
    }

    pub fn collect(&mut self) -> CoinStep {
        self.collected += 1;
        match self.waypoints.get(self.collected) {
            Some(next) => CoinStep::MoveTo(*next),
            None => CoinStep::Vanish,
        }
    }

    pub fn times_collected(&self) -> usize {
        self.collected
    }

    /// True once the coin has been picked up at its last waypoint.
    pub fn is_spent(&self) -> bool {
        self.collected >= self.waypoints.len()
    }
}

/// Running total of coin pickups.
#[derive(Resource, Debug, Default)]
pub struct CoinPurse {
    pub collected: usize,
}

/// Pick up coins the player walks into.
pub fn collect_coins(
    mut commands: Commands,
    mut contacts: EventReader<ZoneContactEvent>,
    player_query: Query<(), With<Player>>,
    mut coins: Query<(&mut Coin, &mut Transform)>,
    mut purse: ResMut<CoinPurse>,
    mut tokens: EventWriter<UnlockTokenEvent>,
    mut collected: EventWriter<CoinCollectedEvent>,
) {
    for contact in contacts.read() {
        if contact.kind != ZoneContact::Entered || !player_query.contains(contact.actor) {
            continue;
        }
        let Ok((mut coin, mut transform)) = coins.get_mut(contact.zone) else {
            continue;
        };
        if coin.is_spent() {
            continue;
        }

        let step = coin.collect();
        purse.collected += 1;
        tokens.send(UnlockTokenEvent {
            source: contact.zone,
        });
        collected.send(CoinCollectedEvent {
            coin: contact.zone,
            times_collected: coin.times_collected(),
        });

        match step {
            CoinStep::MoveTo(next) => {
                info!("Coin {:?} hopped to {}", contact.zone, next);
                transform.translation = next.extend(transform.translation.z);
            }
            CoinStep::Vanish => {
                info!("Coin {:?} collected for good", contact.zone);
                commands.entity(contact.zone).despawn_recursive();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hops_through_waypoints_then_vanishes() {
        let mut coin = Coin::new(vec![Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)]);
        assert_eq!(coin.start(), Some(Vec2::ZERO));

        assert_eq!(coin.collect(), CoinStep::MoveTo(Vec2::new(10.0, 0.0)));
        assert_eq!(coin.collect(), CoinStep::MoveTo(Vec2::new(10.0, 10.0)));
        assert!(!coin.is_spent());

        assert_eq!(coin.collect(), CoinStep::Vanish);
        assert!(coin.is_spent());
        assert_eq!(coin.times_collected(), 3);
    }

    #[test]
    fn single_waypoint_vanishes_at_once() {
        let mut coin = Coin::new(vec![Vec2::ONE]);
        assert_eq!(coin.collect(), CoinStep::Vanish);
    }
}
