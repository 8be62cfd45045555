use bevy::app::AppExit;
use bevy::prelude::*;
use bevy::window::WindowCloseRequested;
use pm_core::{DirectionKeys, QUIT_KEY};
use pm_tilemap::MapSource;

use crate::state::{FrameInput, GameState};
use crate::transition::Transition;

/// Map loader shared with the tick system.
#[derive(Resource)]
pub struct MapLibrary(Box<dyn MapSource + Send + Sync>);

impl MapLibrary {
    pub fn new(source: impl MapSource + Send + Sync + 'static) -> Self {
        Self(Box::new(source))
    }

    pub fn source(&self) -> &dyn MapSource {
        &*self.0
    }
}

/// Quit signal seen since the last fixed tick.
#[derive(Resource, Default)]
pub struct QuitRequested(pub bool);

/// Event fired after the active map was replaced.
#[derive(Event, Clone, Debug)]
pub struct MapChanged {
    pub transition: Transition,
}

/// World plugin: runs the game tick on the fixed timestep.
///
/// Expects [`GameState`] and [`MapLibrary`] to be inserted by the app, and
/// the fixed timestep rate to be configured there.
pub struct PmWorldPlugin;

impl Plugin for PmWorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<QuitRequested>()
            .add_event::<MapChanged>()
            .add_systems(Update, capture_quit_signals)
            .add_systems(FixedUpdate, fixed_tick);
    }
}

/// Latch quit key presses and window close requests until the next tick.
pub fn capture_quit_signals(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut close_requests: EventReader<WindowCloseRequested>,
    mut quit: ResMut<QuitRequested>,
) {
    let closing = close_requests.read().count() > 0;
    if closing || keyboard.just_pressed(QUIT_KEY) {
        quit.0 = true;
    }
}

/// One game tick: sample input, advance the state, publish what changed.
pub fn fixed_tick(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut quit: ResMut<QuitRequested>,
    library: Res<MapLibrary>,
    mut state: ResMut<GameState>,
    mut map_changed: EventWriter<MapChanged>,
    mut exit: EventWriter<AppExit>,
) {
    let input = FrameInput {
        keys: DirectionKeys::from_keyboard(&keyboard),
        quit: std::mem::take(&mut quit.0),
    };

    let report = state.tick(input, library.source());

    if let Some(transition) = report.transition {
        map_changed.send(MapChanged { transition });
    }
    if report.stopped {
        exit.send(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use pm_core::{PixelRect, RunState};
    use pm_tilemap::{InMemoryMaps, MapId, Portal, TileMap};

    fn maps() -> InMemoryMaps {
        let world = TileMap::new("carte.ron", Vec2::new(320.0, 240.0))
            .with_portal(Portal::new(
                "enter_house",
                PixelRect::new(0.0, 0.0, 64.0, 64.0),
                "house.ron",
                "spawn_house",
            ))
            .with_spawn("player", 8.0, 8.0);
        let house = TileMap::new("house.ron", Vec2::splat(160.0)).with_spawn("spawn_house", 80.0, 80.0);
        InMemoryMaps::new().with(world).with(house)
    }

    fn test_app() -> App {
        let maps = maps();
        let state = GameState::new(&GameConfig::default(), &maps).unwrap();

        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<QuitRequested>()
            .add_event::<WindowCloseRequested>()
            .add_event::<MapChanged>()
            .add_event::<AppExit>()
            .insert_resource(state)
            .insert_resource(MapLibrary::new(maps))
            .add_systems(Update, (capture_quit_signals, fixed_tick).chain());
        app
    }

    #[test]
    fn tick_system_switches_map_and_fires_event() {
        let mut app = test_app();
        app.update();

        let state = app.world().resource::<GameState>();
        assert_eq!(state.map().id, MapId::from("house.ron"));
        let events = app.world().resource::<Events<MapChanged>>();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn quit_key_stops_the_game() {
        let mut app = test_app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(QUIT_KEY);
        app.update();

        let state = app.world().resource::<GameState>();
        assert_eq!(state.run_state(), RunState::Stopped);
        assert!(!app.world().resource::<Events<AppExit>>().is_empty());
        assert!(!app.world().resource::<QuitRequested>().0);
    }
}
