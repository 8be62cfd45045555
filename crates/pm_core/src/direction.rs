use bevy::input::ButtonInput;
use bevy::math::Vec2;
use bevy::prelude::KeyCode;
use bitflags::bitflags;

/// Direction the actor last moved in. Selects the sprite, never physics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Unit step in map pixel-space (y grows downward).
    pub fn step(&self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Down => Vec2::new(0.0, 1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

bitflags! {
    /// Direction keys held during one frame.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DirectionKeys: u8 {
        const UP = 0b0001;
        const DOWN = 0b0010;
        const LEFT = 0b0100;
        const RIGHT = 0b1000;
    }
}

impl DirectionKeys {
    /// The single direction applied this frame.
    ///
    /// Priority is up, down, left, right: holding several keys never
    /// produces diagonal movement.
    pub fn primary(&self) -> Option<Facing> {
        if self.contains(Self::UP) {
            Some(Facing::Up)
        } else if self.contains(Self::DOWN) {
            Some(Facing::Down)
        } else if self.contains(Self::LEFT) {
            Some(Facing::Left)
        } else if self.contains(Self::RIGHT) {
            Some(Facing::Right)
        } else {
            None
        }
    }

    /// Sample the arrow keys (and WASD) from the keyboard state.
    pub fn from_keyboard(keyboard: &ButtonInput<KeyCode>) -> Self {
        let mut keys = Self::empty();
        keys.set(
            Self::UP,
            keyboard.any_pressed([KeyCode::ArrowUp, KeyCode::KeyW]),
        );
        keys.set(
            Self::DOWN,
            keyboard.any_pressed([KeyCode::ArrowDown, KeyCode::KeyS]),
        );
        keys.set(
            Self::LEFT,
            keyboard.any_pressed([KeyCode::ArrowLeft, KeyCode::KeyA]),
        );
        keys.set(
            Self::RIGHT,
            keyboard.any_pressed([KeyCode::ArrowRight, KeyCode::KeyD]),
        );
        keys
    }
}
