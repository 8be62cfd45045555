use bevy::math::Vec2;
use bevy::prelude::Resource;
use pm_player::{ActorShape, DEFAULT_FEET_HEIGHT, DEFAULT_SPEED, DEFAULT_SPRITE_SIZE};
use pm_tilemap::MapId;
use serde::{Deserialize, Serialize};

/// Frames during which portals are ignored after a map switch.
pub const DEFAULT_PORTAL_COOLDOWN: u32 = 30;

/// Landing position used when a spawn point cannot be found.
pub const FALLBACK_SPAWN: (f32, f32) = (100.0, 100.0);

/// Game settings, loadable from `assets/config.ron`.
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Resource, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Window title.
    pub title: String,
    /// Window size in logical pixels.
    pub window_size: (f32, f32),
    /// Camera magnification (2.0 draws every map pixel as 2x2).
    pub zoom: f32,
    /// Fixed simulation rate.
    pub tick_rate_hz: f64,
    /// Directory holding the map assets.
    pub maps_dir: String,
    /// Map loaded at startup.
    pub start_map: String,
    /// Spawn point used on the start map.
    pub start_spawn: String,
    /// Pixels moved per tick.
    pub player_speed: f32,
    pub portal_cooldown_frames: u32,
    pub fallback_spawn: (f32, f32),
    /// Sprite size in pixels.
    pub sprite_size: (f32, f32),
    pub feet_height: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Paimon - Adventure".to_string(),
            window_size: (800.0, 600.0),
            zoom: 2.0,
            tick_rate_hz: 60.0,
            maps_dir: "assets/maps".to_string(),
            start_map: "carte.ron".to_string(),
            start_spawn: "player".to_string(),
            player_speed: DEFAULT_SPEED,
            portal_cooldown_frames: DEFAULT_PORTAL_COOLDOWN,
            fallback_spawn: FALLBACK_SPAWN,
            sprite_size: (DEFAULT_SPRITE_SIZE, DEFAULT_SPRITE_SIZE),
            feet_height: DEFAULT_FEET_HEIGHT,
        }
    }
}

impl GameConfig {
    pub fn start_map_id(&self) -> MapId {
        MapId::from(self.start_map.as_str())
    }

    pub fn fallback_position(&self) -> Vec2 {
        Vec2::new(self.fallback_spawn.0, self.fallback_spawn.1)
    }

    pub fn actor_shape(&self) -> ActorShape {
        ActorShape::new(Vec2::new(self.sprite_size.0, self.sprite_size.1), self.feet_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_game() {
        let config = GameConfig::default();
        assert_eq!(config.start_map_id(), MapId::from("carte.ron"));
        assert_eq!(config.start_spawn, "player");
        assert_eq!(config.portal_cooldown_frames, 30);
        assert_eq!(config.fallback_position(), Vec2::new(100.0, 100.0));
        assert_eq!(config.player_speed, 3.0);
    }

    #[test]
    fn actor_shape_from_config() {
        let config = GameConfig {
            sprite_size: (20.0, 40.0),
            feet_height: 6.0,
            ..Default::default()
        };
        let shape = config.actor_shape();
        assert_eq!(shape.size, Vec2::new(20.0, 40.0));
        assert_eq!(shape.feet_size, Vec2::new(10.0, 6.0));
    }
}
