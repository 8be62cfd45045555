use bevy::prelude::*;

pub mod actor;
pub mod collision;
pub mod movement;

pub use actor::{Actor, ActorShape, DEFAULT_FEET_HEIGHT, DEFAULT_SPRITE_SIZE};
pub use collision::{first_blocking_wall, resolve};
pub use movement::{apply_movement, DEFAULT_SPEED};

/// Player marker component for the sprite that mirrors the [`Actor`].
#[derive(Component)]
pub struct Player;
