//! Top-down cardinal movement.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::*;
use super::controls::{CardinalDirection, ControlUnlocks};
use crate::input::InputFrame;

/// Stick or key input below this on an axis counts as none.
pub const AXIS_THRESHOLD: f32 = 0.01;

/// Player sprite size in pixels.
pub const PLAYER_SIZE: Vec2 = Vec2::new(16.0, 24.0);

/// Reduce raw input to one cardinal direction. Horizontal wins when both
/// axes are held.
pub fn cardinal_direction(input: Vec2) -> Option<CardinalDirection> {
    if input.x.abs() > AXIS_THRESHOLD {
        Some(if input.x > 0.0 {
            CardinalDirection::Right
        } else {
            CardinalDirection::Left
        })
    } else if input.y.abs() > AXIS_THRESHOLD {
        Some(if input.y > 0.0 {
            CardinalDirection::Up
        } else {
            CardinalDirection::Down
        })
    } else {
        None
    }
}

/// Handle walking.
///
/// Locked directions are treated as no input. Uses Rapier's
/// KinematicCharacterController when the player has one, so walls stop
/// the player; otherwise the transform moves directly.
pub fn player_movement(
    frame: Res<InputFrame>,
    time: Res<Time>,
    config: Res<PlayerConfig>,
    unlocks: Res<ControlUnlocks>,
    mut player_query: Query<
        (
            &mut PlayerMotion,
            &mut Transform,
            Option<&mut KinematicCharacterController>,
        ),
        With<Player>,
    >,
) {
    let Ok((mut motion, mut transform, controller)) = player_query.get_single_mut() else {
        return;
    };

    let direction = cardinal_direction(frame.move_direction())
        .filter(|direction| unlocks.is_unlocked(*direction));

    let Some(direction) = direction else {
        motion.current = Vec2::ZERO;
        motion.is_moving = false;
        return;
    };

    motion.current = direction.vector();
    motion.last_facing = motion.current;
    motion.is_moving = true;

    let step = motion.current * config.move_speed * time.delta_secs();
    match controller {
        Some(mut controller) => controller.translation = Some(step),
        None => transform.translation += step.extend(0.0),
    }
}

/// Stop walking when control is taken away (dialogue, reading).
pub fn halt_player(mut player_query: Query<&mut PlayerMotion, With<Player>>) {
    for mut motion in &mut player_query {
        motion.current = Vec2::ZERO;
        motion.is_moving = false;
    }
}

/// Mirror the sprite to match the facing direction and tint it with the outfit.
pub fn update_player_sprite(
    mut player_query: Query<(&PlayerMotion, &Outfit, &mut Sprite), With<Player>>,
) {
    for (motion, outfit, mut sprite) in &mut player_query {
        if motion.last_facing.x != 0.0 {
            sprite.flip_x = motion.last_facing.x < 0.0;
        }
        if sprite.color != outfit.tint {
            sprite.color = outfit.tint;
        }
    }
}

/// Spawn the player entity.
pub fn spawn_player(commands: &mut Commands, position: Vec2) -> Entity {
    let outfit = Outfit::default();

    commands
        .spawn((
            Name::new("Player"),
            Player,
            PlayerMotion::default(),
            Sprite::from_color(outfit.tint, PLAYER_SIZE),
            outfit,
            Transform::from_translation(position.extend(1.0)),
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::cuboid(PLAYER_SIZE.x * 0.4, PLAYER_SIZE.y * 0.4),
            ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_STATIC,
            KinematicCharacterController {
                offset: CharacterLength::Absolute(0.5),
                ..default()
            },
        ))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_input_wins() {
        assert_eq!(cardinal_direction(Vec2::new(0.5, 1.0)), Some(CardinalDirection::Right));
        assert_eq!(cardinal_direction(Vec2::new(-0.2, -1.0)), Some(CardinalDirection::Left));
    }

    #[test]
    fn vertical_input_when_horizontal_is_negligible() {
        assert_eq!(cardinal_direction(Vec2::new(0.005, 0.7)), Some(CardinalDirection::Up));
        assert_eq!(cardinal_direction(Vec2::new(0.0, -0.3)), Some(CardinalDirection::Down));
    }

    #[test]
    fn tiny_input_is_idle() {
        assert_eq!(cardinal_direction(Vec2::ZERO), None);
        assert_eq!(cardinal_direction(Vec2::new(0.01, -0.01)), None);
    }
}
