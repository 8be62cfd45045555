use bevy::prelude::KeyCode;

/// Run state of the game loop.
///
/// The loop starts `Running` and ends in `Stopped`, which is terminal.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, Debug)]
pub enum RunState {
    #[default]
    Running,
    Stopped,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Get the display name for logs and overlays.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Stopped => "Stopped",
        }
    }
}

/// Key that requests the game to quit, alongside closing the window.
pub const QUIT_KEY: KeyCode = KeyCode::Escape;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_running() {
        assert!(RunState::default().is_running());
        assert!(!RunState::Stopped.is_running());
    }

    #[test]
    fn states_have_names() {
        assert_ne!(RunState::Running.name(), RunState::Stopped.name());
    }
}
