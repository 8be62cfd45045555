use bevy::math::Isometry2d;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use pm_core::{map_to_world, PixelRect};
use pm_world::GameState;

/// Key toggling the debug panel.
pub const TOGGLE_KEY: KeyCode = KeyCode::F3;

/// State for the debug overlay.
#[derive(Resource, Default)]
pub struct DebugOverlayState {
    /// Show the debug panel.
    pub visible: bool,
    /// Draw walls, portals and the feet box.
    pub show_collision: bool,
    /// Show FPS counter.
    pub show_fps: bool,
}

/// System to toggle the panel with F3.
pub fn toggle_overlay_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut state: ResMut<DebugOverlayState>,
) {
    if keyboard.just_pressed(TOGGLE_KEY) {
        state.visible = !state.visible;
        debug!("Debug overlay {}", if state.visible { "shown" } else { "hidden" });
    }
}

/// System to render the debug panel.
pub fn debug_panel_system(
    mut contexts: EguiContexts,
    mut state: ResMut<DebugOverlayState>,
    game: Res<GameState>,
    time: Res<Time>,
) {
    if !state.visible {
        return;
    }

    egui::Window::new("Debug")
        .default_width(220.0)
        .resizable(false)
        .show(contexts.ctx_mut(), |ui| {
            let actor = game.actor();
            let map = game.map();

            ui.label(format!("Map: {}", map.id));
            ui.label(format!(
                "Walls: {}  Portals: {}  Spawns: {}",
                map.walls.len(),
                map.portals.len(),
                map.spawn_points.len()
            ));
            ui.separator();

            let position = actor.position();
            ui.label(format!("Position: ({:.1}, {:.1})", position.x, position.y));
            ui.label(format!("Facing: {}", actor.facing().name()));
            ui.label(format!("Portal cooldown: {}", game.cooldown()));
            if let Some(portal) = suppressed_portal_name(&game) {
                ui.label(format!("Ignoring portal '{}' until left", portal));
            }
            ui.label(format!("Frame: {}", game.frame()));
            ui.label(format!("State: {}", game.run_state().name()));

            ui.separator();
            ui.checkbox(&mut state.show_collision, "Collision");
            ui.checkbox(&mut state.show_fps, "FPS counter");

            if state.show_fps {
                let fps = 1.0 / time.delta_secs().max(f32::EPSILON);
                ui.label(format!("FPS: {:.1}", fps));
            }

            let diagnostics = game.recent_diagnostics();
            if !diagnostics.is_empty() {
                ui.separator();
                ui.label("Diagnostics:");
                for diagnostic in diagnostics.iter().rev() {
                    ui.label(diagnostic.to_string());
                }
            }
        });
}

/// Name of the portal skipped after a failed transition, if any.
fn suppressed_portal_name(game: &GameState) -> Option<&str> {
    let index = game.transitions().suppressed_portal()?;
    game.map().portals.get(index).map(|p| p.name.as_str())
}

fn outline(gizmos: &mut Gizmos, rect: PixelRect, color: Color) {
    if rect.is_empty() {
        return;
    }
    let center = map_to_world(rect.center());
    gizmos.rect_2d(Isometry2d::from_translation(center), rect.size(), color);
}

/// System to draw collision geometry when enabled.
pub fn collision_gizmos_system(
    state: Res<DebugOverlayState>,
    game: Res<GameState>,
    mut gizmos: Gizmos,
) {
    if !state.show_collision {
        return;
    }

    let map = game.map();
    for wall in &map.walls {
        outline(&mut gizmos, wall.rect, Color::srgb(1.0, 0.2, 0.2));
    }
    for portal in &map.portals {
        let color = if portal.target_map.is_some() {
            Color::srgb(0.2, 0.6, 1.0)
        } else {
            Color::srgb(0.5, 0.5, 0.5)
        };
        outline(&mut gizmos, portal.rect, color);
    }
    for spawn in map.spawn_points.iter() {
        gizmos.circle_2d(
            Isometry2d::from_translation(map_to_world(spawn.position())),
            2.0,
            Color::srgb(1.0, 1.0, 0.2),
        );
    }

    let actor = game.actor();
    outline(&mut gizmos, actor.bounding_box(), Color::srgba(1.0, 1.0, 1.0, 0.3));
    outline(&mut gizmos, actor.feet_box(), Color::srgb(0.2, 1.0, 0.4));
}
