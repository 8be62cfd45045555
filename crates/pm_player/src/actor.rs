use bevy::math::Vec2;
use pm_core::{Facing, PixelRect};

/// Size of the character sprite in pixels.
pub const DEFAULT_SPRITE_SIZE: f32 = 32.0;
/// Height of the feet box in pixels.
pub const DEFAULT_FEET_HEIGHT: f32 = 12.0;

/// Fixed geometry of an actor: sprite size and feet footprint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorShape {
    pub size: Vec2,
    pub feet_size: Vec2,
}

impl ActorShape {
    /// Feet box is half the sprite width and `feet_height` tall.
    pub fn new(size: Vec2, feet_height: f32) -> Self {
        Self {
            size,
            feet_size: Vec2::new(size.x * 0.5, feet_height.min(size.y)),
        }
    }
}

impl Default for ActorShape {
    fn default() -> Self {
        Self::new(Vec2::splat(DEFAULT_SPRITE_SIZE), DEFAULT_FEET_HEIGHT)
    }
}

/// The player-controlled character.
///
/// `position` is the top-left corner of the sprite. Both boxes are derived
/// from it and refreshed on every change, so they can never go stale.
#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    position: Vec2,
    previous_position: Vec2,
    facing: Facing,
    shape: ActorShape,
    bounding_box: PixelRect,
    feet_box: PixelRect,
}

impl Actor {
    pub fn new(position: Vec2, shape: ActorShape) -> Self {
        let mut actor = Self {
            position,
            previous_position: position,
            facing: Facing::default(),
            shape,
            bounding_box: PixelRect::EMPTY,
            feet_box: PixelRect::EMPTY,
        };
        actor.refresh_boxes();
        actor
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn previous_position(&self) -> Vec2 {
        self.previous_position
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Full sprite rectangle.
    pub fn bounding_box(&self) -> PixelRect {
        self.bounding_box
    }

    /// Collision footprint, bottom-center of the bounding box.
    pub fn feet_box(&self) -> PixelRect {
        self.feet_box
    }

    pub fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.refresh_boxes();
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.set_position(self.position + delta);
    }

    /// Remember the current position as the rollback target.
    pub fn save_location(&mut self) {
        self.previous_position = self.position;
    }

    /// Return to the position saved by [`Actor::save_location`].
    pub fn move_back(&mut self) {
        self.set_position(self.previous_position);
    }

    /// Jump to `position` and make it the rollback target as well.
    pub fn teleport(&mut self, position: Vec2) {
        self.set_position(position);
        self.save_location();
    }

    fn refresh_boxes(&mut self) {
        self.bounding_box = PixelRect::from_corner(self.position, self.shape.size);
        self.feet_box = PixelRect::from_corner(Vec2::ZERO, self.shape.feet_size)
            .with_mid_bottom(self.bounding_box.mid_bottom());
    }
}
