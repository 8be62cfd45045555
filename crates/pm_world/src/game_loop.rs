//! Frame loop over an abstract presentation layer.
//!
//! [`run`] drives a [`GameState`] through any [`Frontend`]: poll input, tick,
//! hand the result to the frontend to draw, then wait for the next tick.
//! The Bevy binary does the same work through its fixed-timestep schedule
//! and only calls [`GameState::tick`] directly.

use bevy::log::info;
use bevy::math::Vec2;
use pm_core::{Facing, PixelRect};
use pm_tilemap::{MapId, MapSource, TileMap};

use crate::state::{FrameInput, GameState};

/// What the presentation layer needs to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderFrame {
    pub map_id: MapId,
    pub actor_box: PixelRect,
    pub feet_box: PixelRect,
    pub facing: Facing,
    /// Point the camera should be centered on.
    pub camera_center: Vec2,
}

/// Presentation boundary the loop calls into.
pub trait Frontend {
    /// Opaque handle to a map's drawable layer.
    type RenderLayer;

    /// Sample held keys and drain pending quit signals.
    fn poll_input(&mut self) -> FrameInput;

    /// Build the drawable layer for a freshly loaded map.
    fn load_render_layer(&mut self, map: &TileMap) -> Self::RenderLayer;

    fn center_camera(&mut self, point: Vec2);

    fn draw(&mut self, layer: &Self::RenderLayer, frame: &RenderFrame);

    fn present(&mut self);

    /// Block until the next tick boundary.
    fn wait_for_tick(&mut self, rate_hz: f64);

    /// Release presentation resources once the loop has stopped.
    fn shutdown(&mut self) {}
}

/// Run until the state stops. Returns the number of frames presented.
pub fn run<F: Frontend>(
    state: &mut GameState,
    maps: &dyn MapSource,
    frontend: &mut F,
    tick_rate_hz: f64,
) -> u64 {
    let mut layer = frontend.load_render_layer(state.map());
    let mut presented = 0;

    while state.run_state().is_running() {
        let input = frontend.poll_input();
        let report = state.tick(input, maps);
        if report.stopped {
            break;
        }

        if report.transition.is_some() {
            // The old layer is dropped along with the old map.
            layer = frontend.load_render_layer(state.map());
        }

        let frame = state.render_frame();
        frontend.center_camera(frame.camera_center);
        frontend.draw(&layer, &frame);
        frontend.present();
        presented += 1;

        frontend.wait_for_tick(tick_rate_hz);
    }

    frontend.shutdown();
    info!("Game loop stopped after {} presented frames", presented);
    presented
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use pm_core::DirectionKeys;
    use pm_tilemap::{InMemoryMaps, Portal};
    use std::collections::VecDeque;

    /// Replays a fixed list of inputs, then quits.
    #[derive(Default)]
    struct ScriptedFrontend {
        inputs: VecDeque<FrameInput>,
        layers_loaded: Vec<MapId>,
        drawn: Vec<(MapId, RenderFrame)>,
        camera: Vec<Vec2>,
        presents: u32,
        waits: u32,
        shut_down: bool,
    }

    impl Frontend for ScriptedFrontend {
        type RenderLayer = MapId;

        fn poll_input(&mut self) -> FrameInput {
            self.inputs.pop_front().unwrap_or_else(FrameInput::quit)
        }

        fn load_render_layer(&mut self, map: &TileMap) -> MapId {
            self.layers_loaded.push(map.id.clone());
            map.id.clone()
        }

        fn center_camera(&mut self, point: Vec2) {
            self.camera.push(point);
        }

        fn draw(&mut self, layer: &MapId, frame: &RenderFrame) {
            self.drawn.push((layer.clone(), frame.clone()));
        }

        fn present(&mut self) {
            self.presents += 1;
        }

        fn wait_for_tick(&mut self, _rate_hz: f64) {
            self.waits += 1;
        }

        fn shutdown(&mut self) {
            self.shut_down = true;
        }
    }

    fn maps() -> InMemoryMaps {
        let door = PixelRect::new(40.0, 0.0, 32.0, 64.0);
        let world = TileMap::new("carte.ron", Vec2::new(320.0, 240.0))
            .with_portal(Portal::new("enter_house", door, "house.ron", "spawn_house"))
            .with_spawn("player", 10.0, 10.0);
        let house = TileMap::new("house.ron", Vec2::new(160.0, 160.0)).with_spawn("spawn_house", 80.0, 80.0);
        InMemoryMaps::new().with(world).with(house)
    }

    #[test]
    fn loop_draws_every_tick_until_quit() {
        let maps = maps();
        let mut state = GameState::new(&GameConfig::default(), &maps).unwrap();
        let mut frontend = ScriptedFrontend {
            inputs: std::iter::repeat(FrameInput::default()).take(5).collect(),
            ..Default::default()
        };

        let presented = run(&mut state, &maps, &mut frontend, 60.0);

        assert_eq!(presented, 5);
        assert_eq!(frontend.presents, 5);
        assert_eq!(frontend.waits, 5);
        assert!(frontend.shut_down);
        assert!(!state.run_state().is_running());
        // Camera follows the sprite center.
        assert_eq!(frontend.camera[0], Vec2::new(26.0, 26.0));
    }

    #[test]
    fn transition_reloads_render_layer() {
        let maps = maps();
        let mut state = GameState::new(&GameConfig::default(), &maps).unwrap();
        let mut frontend = ScriptedFrontend {
            inputs: std::iter::repeat(FrameInput::keys(DirectionKeys::RIGHT)).take(12).collect(),
            ..Default::default()
        };

        run(&mut state, &maps, &mut frontend, 60.0);

        assert_eq!(
            frontend.layers_loaded,
            vec![MapId::from("carte.ron"), MapId::from("house.ron")]
        );
        let (layer, frame) = frontend.drawn.last().unwrap();
        assert_eq!(layer, &MapId::from("house.ron"));
        assert_eq!(frame.map_id, MapId::from("house.ron"));
    }

    #[test]
    fn immediate_quit_presents_nothing() {
        let maps = maps();
        let mut state = GameState::new(&GameConfig::default(), &maps).unwrap();
        let mut frontend = ScriptedFrontend::default();

        assert_eq!(run(&mut state, &maps, &mut frontend, 60.0), 0);
        assert!(frontend.drawn.is_empty());
        assert!(frontend.shut_down);
    }
}
