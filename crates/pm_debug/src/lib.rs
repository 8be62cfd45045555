use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod overlay;

pub use overlay::{DebugOverlayState, TOGGLE_KEY};

/// Debug overlay for Paimon.
/// Provides an egui inspector panel and collision gizmos.
pub struct PmDebugPlugin;

impl Plugin for PmDebugPlugin {
    fn build(&self, app: &mut App) {
        // Only add EguiPlugin if not already added
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin);
        }

        app.init_resource::<DebugOverlayState>().add_systems(
            Update,
            (
                overlay::toggle_overlay_system,
                overlay::debug_panel_system,
                overlay::collision_gizmos_system,
            )
                .chain(),
        );
    }
}
