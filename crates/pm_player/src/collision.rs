use pm_tilemap::Wall;

use crate::actor::Actor;

/// Index of the first wall overlapping the actor's feet.
pub fn first_blocking_wall(actor: &Actor, walls: &[Wall]) -> Option<usize> {
    actor
        .feet_box()
        .first_intersecting(walls.iter().map(|w| &w.rect))
}

/// Roll the actor back to last frame's position if its feet hit any wall.
///
/// This is a full rollback of both axes, not a push-out: moving diagonally
/// into a corner stops the actor dead instead of sliding it along.
/// Returns true when a rollback happened.
pub fn resolve(actor: &mut Actor, walls: &[Wall]) -> bool {
    if first_blocking_wall(actor, walls).is_some() {
        actor.move_back();
        true
    } else {
        false
    }
}
