pub mod direction;
pub mod geometry;
pub mod mode;

pub use direction::{DirectionKeys, Facing};
pub use geometry::{map_to_world, PixelRect};
pub use mode::{RunState, QUIT_KEY};
