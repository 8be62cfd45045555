use pm_core::{DirectionKeys, Facing};

use crate::actor::Actor;

/// Pixels moved per frame by default.
pub const DEFAULT_SPEED: f32 = 3.0;

/// Move the actor one step for this frame's held keys.
///
/// Exactly one axis moves per frame, picked by [`DirectionKeys::primary`].
/// Returns the direction applied, if any.
pub fn apply_movement(actor: &mut Actor, keys: DirectionKeys, speed: f32) -> Option<Facing> {
    let facing = keys.primary()?;
    actor.translate(facing.step() * speed);
    actor.set_facing(facing);
    Some(facing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorShape;
    use bevy::math::Vec2;

    fn actor() -> Actor {
        Actor::new(Vec2::new(100.0, 100.0), ActorShape::default())
    }

    #[test]
    fn moves_along_one_axis() {
        let mut a = actor();
        apply_movement(&mut a, DirectionKeys::RIGHT, DEFAULT_SPEED);
        assert_eq!(a.position(), Vec2::new(103.0, 100.0));
        assert_eq!(a.facing(), Facing::Right);

        apply_movement(&mut a, DirectionKeys::UP, DEFAULT_SPEED);
        assert_eq!(a.position(), Vec2::new(103.0, 97.0));
        assert_eq!(a.facing(), Facing::Up);
    }

    #[test]
    fn up_and_left_never_moves_diagonally() {
        let mut a = actor();
        let applied = apply_movement(&mut a, DirectionKeys::UP | DirectionKeys::LEFT, DEFAULT_SPEED);
        assert_eq!(applied, Some(Facing::Up));
        assert_eq!(a.position().x, 100.0);
        assert_eq!(a.position().y, 97.0);
    }

    #[test]
    fn no_keys_keeps_position_and_facing() {
        let mut a = actor();
        a.set_facing(Facing::Left);
        assert_eq!(apply_movement(&mut a, DirectionKeys::empty(), DEFAULT_SPEED), None);
        assert_eq!(a.position(), Vec2::new(100.0, 100.0));
        assert_eq!(a.facing(), Facing::Left);
    }

    #[test]
    fn feet_box_is_refreshed_after_move() {
        let mut a = actor();
        let before = a.feet_box();
        apply_movement(&mut a, DirectionKeys::DOWN, DEFAULT_SPEED);
        assert_eq!(a.feet_box().y, before.y + DEFAULT_SPEED);
    }
}
