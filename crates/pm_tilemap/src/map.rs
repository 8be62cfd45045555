use bevy::math::Vec2;
use pm_core::PixelRect;
use std::fmt;

/// Spawn name used when a portal does not name one.
pub const DEFAULT_SPAWN: &str = "default";

/// Identifier of a map asset, e.g. `"carte.ron"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MapId(pub String);

impl MapId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MapId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for MapId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Static collision geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wall {
    pub rect: PixelRect,
}

/// Trigger region that moves the actor to a spawn point on another map.
#[derive(Clone, Debug, PartialEq)]
pub struct Portal {
    pub name: String,
    pub rect: PixelRect,
    /// `None` when the asset did not name a target; such a portal never fires.
    pub target_map: Option<MapId>,
    pub target_spawn: String,
}

impl Portal {
    pub fn new(
        name: impl Into<String>,
        rect: PixelRect,
        target_map: impl Into<MapId>,
        target_spawn: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            rect,
            target_map: Some(target_map.into()),
            target_spawn: target_spawn.into(),
        }
    }
}

/// Named landing position.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnPoint {
    pub name: String,
    pub x: f32,
    pub y: f32,
}

impl SpawnPoint {
    pub fn new(name: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Spawn points of one map, in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpawnPoints(Vec<SpawnPoint>);

impl SpawnPoints {
    pub fn new(points: Vec<SpawnPoint>) -> Self {
        Self(points)
    }

    /// First point declared with this name.
    pub fn get(&self, name: &str) -> Option<&SpawnPoint> {
        self.0.iter().find(|p| p.name == name)
    }

    pub fn position(&self, name: &str) -> Option<Vec2> {
        self.get(name).map(SpawnPoint::position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpawnPoint> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One loaded map: collision geometry, portals and spawn points.
///
/// A `TileMap` is never edited after loading. Switching maps replaces it
/// as a whole.
#[derive(Clone, Debug, PartialEq)]
pub struct TileMap {
    pub id: MapId,
    /// Pixel size of the whole map.
    pub size: Vec2,
    /// Clear colour the frontend paints behind the map.
    pub background: [u8; 3],
    pub walls: Vec<Wall>,
    pub portals: Vec<Portal>,
    pub spawn_points: SpawnPoints,
}

impl TileMap {
    /// Empty map of the given size, mostly useful for tests and tools.
    pub fn new(id: impl Into<MapId>, size: Vec2) -> Self {
        Self {
            id: id.into(),
            size,
            background: [0, 0, 0],
            walls: Vec::new(),
            portals: Vec::new(),
            spawn_points: SpawnPoints::default(),
        }
    }

    pub fn with_wall(mut self, rect: PixelRect) -> Self {
        self.walls.push(Wall { rect });
        self
    }

    pub fn with_portal(mut self, portal: Portal) -> Self {
        self.portals.push(portal);
        self
    }

    pub fn with_spawn(mut self, name: &str, x: f32, y: f32) -> Self {
        self.spawn_points.0.push(SpawnPoint::new(name, x, y));
        self
    }

    pub fn spawn(&self, name: &str) -> Option<Vec2> {
        self.spawn_points.position(name)
    }

    /// Portals overlapping `rect`, in declaration order.
    pub fn portals_touching<'a>(
        &'a self,
        rect: &'a PixelRect,
    ) -> impl Iterator<Item = (usize, &'a Portal)> + 'a {
        self.portals
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.rect.intersects(rect))
    }

    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0.0, 0.0, self.size.x, self.size.y)
    }
}
