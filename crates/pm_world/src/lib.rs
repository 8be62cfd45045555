pub mod config;
pub mod diagnostic;
pub mod game_loop;
pub mod plugin;
pub mod state;
pub mod transition;

pub use config::{GameConfig, DEFAULT_PORTAL_COOLDOWN, FALLBACK_SPAWN};
pub use diagnostic::Diagnostic;
pub use game_loop::{run, Frontend, RenderFrame};
pub use plugin::{MapChanged, MapLibrary, PmWorldPlugin, QuitRequested};
pub use state::{FrameInput, GameState, TickReport};
pub use transition::{Transition, TransitionController, TransitionOutcome};
