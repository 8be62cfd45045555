//! Serializable map asset.
//!
//! A map asset mirrors a Tiled object layer: a flat list of rectangles and
//! points carrying a `kind` and free-form string properties. Loading turns
//! that list into a typed [`TileMap`] once, so nothing downstream probes
//! property dictionaries at runtime.

use bevy::math::Vec2;
use pm_core::PixelRect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::map::{MapId, Portal, SpawnPoint, SpawnPoints, TileMap, Wall, DEFAULT_SPAWN};
use crate::source::MapLoadError;

/// Object kind marking wall geometry.
pub const COLLISION_KIND: &str = "collision";
/// Object kind marking a portal.
pub const PORTAL_KIND: &str = "portal";
/// Portal property naming the destination map.
pub const TARGET_MAP_PROPERTY: &str = "target_map";
/// Portal property naming the destination spawn point.
pub const TARGET_SPAWN_PROPERTY: &str = "target_spawn";

fn default_background() -> [u8; 3] {
    [34, 32, 52]
}

/// On-disk description of one map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapAsset {
    /// Map width in pixels.
    pub width: f32,
    /// Map height in pixels.
    pub height: f32,
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    #[serde(default)]
    pub objects: Vec<MapObject>,
}

impl Default for MapAsset {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            background: default_background(),
            objects: Vec::new(),
        }
    }
}

/// One authored object: a rectangle, or a point when width and height are 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MapObject {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl MapObject {
    pub fn collision(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            kind: COLLISION_KIND.to_string(),
            x,
            y,
            width,
            height,
            ..Default::default()
        }
    }

    pub fn portal(name: &str, rect: PixelRect, target_map: &str, target_spawn: &str) -> Self {
        let mut properties = BTreeMap::new();
        properties.insert(TARGET_MAP_PROPERTY.to_string(), target_map.to_string());
        properties.insert(TARGET_SPAWN_PROPERTY.to_string(), target_spawn.to_string());
        Self {
            name: name.to_string(),
            kind: PORTAL_KIND.to_string(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            properties,
        }
    }

    pub fn point(name: &str, x: f32, y: f32) -> Self {
        Self {
            name: name.to_string(),
            x,
            y,
            ..Default::default()
        }
    }

    pub fn rect(&self) -> PixelRect {
        PixelRect::new(self.x, self.y, self.width, self.height)
    }

    pub fn is_collision(&self) -> bool {
        self.kind == COLLISION_KIND
    }

    pub fn is_portal(&self) -> bool {
        self.kind == PORTAL_KIND || self.properties.contains_key(TARGET_MAP_PROPERTY)
    }

    fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn to_portal(&self) -> Portal {
        Portal {
            name: self.name.clone(),
            rect: self.rect(),
            target_map: self.property(TARGET_MAP_PROPERTY).map(MapId::from),
            target_spawn: self
                .property(TARGET_SPAWN_PROPERTY)
                .unwrap_or(DEFAULT_SPAWN)
                .to_string(),
        }
    }
}

impl MapAsset {
    /// Classify the authored objects into a typed map.
    ///
    /// Declaration order is kept for walls, portals and spawn points.
    pub fn into_map(self, id: MapId) -> Result<TileMap, MapLoadError> {
        if self.width < 0.0 || self.height < 0.0 {
            return Err(MapLoadError::Invalid {
                map: id,
                reason: format!("negative map size {}x{}", self.width, self.height),
            });
        }

        let mut walls = Vec::new();
        let mut portals = Vec::new();
        let mut spawns = Vec::new();

        for (index, object) in self.objects.iter().enumerate() {
            if object.width < 0.0 || object.height < 0.0 {
                return Err(MapLoadError::Invalid {
                    map: id,
                    reason: format!(
                        "object #{} '{}' has negative size {}x{}",
                        index, object.name, object.width, object.height
                    ),
                });
            }

            if object.is_collision() {
                walls.push(Wall { rect: object.rect() });
            } else if object.is_portal() {
                portals.push(object.to_portal());
            } else if !object.name.is_empty() {
                spawns.push(SpawnPoint::new(object.name.clone(), object.x, object.y));
            }
        }

        Ok(TileMap {
            id,
            size: Vec2::new(self.width, self.height),
            background: self.background,
            walls,
            portals,
            spawn_points: SpawnPoints::new(spawns),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(objects: Vec<MapObject>) -> MapAsset {
        MapAsset {
            objects,
            ..Default::default()
        }
    }

    #[test]
    fn classifies_objects() {
        let map = asset(vec![
            MapObject::collision(0.0, 0.0, 32.0, 32.0),
            MapObject::portal("enter_house", PixelRect::new(64.0, 64.0, 16.0, 8.0), "house.ron", "spawn_house"),
            MapObject::point("player", 100.0, 120.0),
            MapObject::collision(32.0, 0.0, 32.0, 32.0),
        ])
        .into_map(MapId::from("carte.ron"))
        .unwrap();

        assert_eq!(map.walls.len(), 2);
        assert_eq!(map.walls[1].rect, PixelRect::new(32.0, 0.0, 32.0, 32.0));
        assert_eq!(map.portals.len(), 1);
        assert_eq!(map.portals[0].target_map, Some(MapId::from("house.ron")));
        assert_eq!(map.portals[0].target_spawn, "spawn_house");
        assert_eq!(map.spawn("player"), Some(Vec2::new(100.0, 120.0)));
    }

    #[test]
    fn missing_target_spawn_defaults() {
        let mut object = MapObject::portal("door", PixelRect::new(0.0, 0.0, 8.0, 8.0), "b.ron", "x");
        object.properties.remove(TARGET_SPAWN_PROPERTY);
        let map = asset(vec![object]).into_map(MapId::from("a.ron")).unwrap();
        assert_eq!(map.portals[0].target_spawn, DEFAULT_SPAWN);
    }

    #[test]
    fn missing_target_map_is_none() {
        let mut object = MapObject::portal("door", PixelRect::new(0.0, 0.0, 8.0, 8.0), "  ", "x");
        object.kind = PORTAL_KIND.to_string();
        let map = asset(vec![object]).into_map(MapId::from("a.ron")).unwrap();
        assert_eq!(map.portals.len(), 1);
        assert_eq!(map.portals[0].target_map, None);
    }

    #[test]
    fn target_map_property_makes_a_portal() {
        let mut object = MapObject::point("trapdoor", 4.0, 4.0);
        object.width = 8.0;
        object.height = 8.0;
        object
            .properties
            .insert(TARGET_MAP_PROPERTY.to_string(), "cellar.ron".to_string());
        let map = asset(vec![object]).into_map(MapId::from("a.ron")).unwrap();
        assert_eq!(map.portals.len(), 1);
        assert!(map.spawn_points.is_empty());
    }

    #[test]
    fn unnamed_points_are_ignored() {
        let map = asset(vec![MapObject::point("", 1.0, 1.0)])
            .into_map(MapId::from("a.ron"))
            .unwrap();
        assert!(map.spawn_points.is_empty());
        assert!(map.walls.is_empty());
    }

    #[test]
    fn negative_object_size_is_rejected() {
        let result = asset(vec![MapObject::collision(0.0, 0.0, -4.0, 4.0)]).into_map(MapId::from("a.ron"));
        assert!(matches!(result, Err(MapLoadError::Invalid { .. })));
    }
}
