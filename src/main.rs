use std::path::Path;

use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use pm_core::{map_to_world, PixelRect};
use pm_persistence::{load_config, RonMapDir, CONFIG_PATH};
use pm_player::Player;
use pm_tilemap::{MapId, TileMap};
use pm_world::{GameConfig, GameState, MapChanged, MapLibrary, PmWorldPlugin};

const BACKGROUND_Z: f32 = 0.0;
const WALL_Z: f32 = 1.0;
const PORTAL_Z: f32 = 2.0;
const PLAYER_Z: f32 = 10.0;

fn main() -> AppExit {
    let (config, config_error) = match load_config(Path::new(CONFIG_PATH)) {
        Ok(config) => (config, None),
        Err(err) => (GameConfig::default(), Some(err)),
    };

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: config.title.clone(),
                    resolution: config.window_size.into(),
                    ..default()
                }),
                // Closing goes through the game's Stopped state
                close_when_requested: false,
                ..default()
            })
            .set(LogPlugin {
                level: Level::INFO,
                filter: "info,wgpu=error,pm_world=debug".to_string(),
                ..default()
            })
            .set(ImagePlugin::default_nearest()),
    );

    if let Some(err) = config_error {
        error!("Bad config: {}", err);
        return AppExit::error();
    }

    let maps = RonMapDir::new(&config.maps_dir);
    let state = match GameState::new(&config, &maps) {
        Ok(state) => state,
        Err(err) => {
            error!("Cannot start: {}", err);
            return AppExit::error();
        }
    };

    app.insert_resource(Time::<Fixed>::from_hz(config.tick_rate_hz))
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(state)
        .insert_resource(MapLibrary::new(maps))
        .insert_resource(config)
        .init_resource::<DisplayedMap>()
        .add_plugins((PmWorldPlugin, pm_debug::PmDebugPlugin))
        .add_systems(Startup, (setup_camera, spawn_player))
        .add_systems(
            Update,
            (refresh_map_layer, sync_player_sprite, follow_player).chain(),
        )
        .run()
}

/// Marker for entities drawn from the active map.
#[derive(Component)]
struct MapLayer;

/// Child of the player sprite pointing where the player faces.
#[derive(Component)]
struct FacingMarker;

/// Map the layer entities were built from.
#[derive(Resource, Default)]
struct DisplayedMap(Option<MapId>);

fn setup_camera(mut commands: Commands, config: Res<GameConfig>) {
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scale: 1.0 / config.zoom.max(0.01),
            ..OrthographicProjection::default_2d()
        },
    ));
}

fn spawn_player(mut commands: Commands, state: Res<GameState>) {
    let size = state.actor().bounding_box().size();
    commands
        .spawn((
            Player,
            Sprite::from_color(Color::srgb(0.95, 0.75, 0.35), size),
            Transform::from_translation(Vec3::Z * PLAYER_Z),
        ))
        .with_children(|parent| {
            parent.spawn((
                FacingMarker,
                Sprite::from_color(Color::srgb(0.2, 0.15, 0.1), Vec2::splat(4.0)),
                Transform::from_translation(Vec3::Z * 0.5),
            ));
        });
}

fn rect_sprite(rect: PixelRect, color: Color, z: f32) -> (MapLayer, Sprite, Transform) {
    (
        MapLayer,
        Sprite::from_color(color, rect.size()),
        Transform::from_translation(map_to_world(rect.center()).extend(z)),
    )
}

fn spawn_map_layer(commands: &mut Commands, map: &TileMap) {
    let [r, g, b] = map.background;
    commands.spawn(rect_sprite(
        map.bounds(),
        Color::srgb_u8(r, g, b),
        BACKGROUND_Z,
    ));

    for wall in &map.walls {
        commands.spawn(rect_sprite(wall.rect, Color::srgb(0.25, 0.22, 0.3), WALL_Z));
    }
    for portal in &map.portals {
        commands.spawn(rect_sprite(
            portal.rect,
            Color::srgba(0.55, 0.4, 0.2, 0.8),
            PORTAL_Z,
        ));
    }
}

/// Rebuild the map layer after a transition or when the map id changes.
fn refresh_map_layer(
    mut commands: Commands,
    mut map_changed: EventReader<MapChanged>,
    mut displayed: ResMut<DisplayedMap>,
    state: Res<GameState>,
    layer: Query<Entity, With<MapLayer>>,
) {
    let transitioned = map_changed.read().count() > 0;
    let current = &state.map().id;
    if !transitioned && displayed.0.as_ref() == Some(current) {
        return;
    }

    for entity in &layer {
        commands.entity(entity).despawn_recursive();
    }
    spawn_map_layer(&mut commands, state.map());
    debug!("Built render layer for {}", current);
    displayed.0 = Some(current.clone());
}

fn sync_player_sprite(
    state: Res<GameState>,
    mut player: Query<&mut Transform, (With<Player>, Without<FacingMarker>)>,
    mut marker: Query<&mut Transform, (With<FacingMarker>, Without<Player>)>,
) {
    let frame = state.render_frame();

    for mut transform in &mut player {
        let world = map_to_world(frame.actor_box.center());
        transform.translation.x = world.x;
        transform.translation.y = world.y;
    }

    let reach = frame.actor_box.size() / 2.0 - Vec2::splat(3.0);
    let offset = map_to_world(frame.facing.step()) * reach;
    for mut transform in &mut marker {
        transform.translation.x = offset.x;
        transform.translation.y = offset.y;
    }
}

fn follow_player(
    state: Res<GameState>,
    mut camera: Query<&mut Transform, (With<Camera2d>, Without<Player>)>,
) {
    let center = map_to_world(state.render_frame().camera_center);
    for mut transform in &mut camera {
        transform.translation.x = center.x;
        transform.translation.y = center.y;
    }
}
