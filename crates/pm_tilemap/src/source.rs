use std::collections::HashMap;
use std::fmt;

use crate::map::{MapId, TileMap};

/// Error type for map loading.
#[derive(Debug)]
pub enum MapLoadError {
    /// No asset exists under this id.
    NotFound(MapId),
    /// The asset was read but describes an impossible map.
    Invalid { map: MapId, reason: String },
    /// The storage backend failed (I/O, parse errors).
    Backend {
        map: MapId,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl MapLoadError {
    pub fn map(&self) -> &MapId {
        match self {
            Self::NotFound(map) => map,
            Self::Invalid { map, .. } => map,
            Self::Backend { map, .. } => map,
        }
    }
}

impl fmt::Display for MapLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(map) => write!(f, "map '{}' not found", map),
            Self::Invalid { map, reason } => write!(f, "map '{}' is invalid: {}", map, reason),
            Self::Backend { map, source } => write!(f, "failed to load map '{}': {}", map, source),
        }
    }
}

impl std::error::Error for MapLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Backend { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Anything that can turn a map id into a loaded map.
///
/// Loading is synchronous; callers treat it as one uninterruptible step.
pub trait MapSource {
    fn load(&self, id: &MapId) -> Result<TileMap, MapLoadError>;
}

impl<S: MapSource + ?Sized> MapSource for &S {
    fn load(&self, id: &MapId) -> Result<TileMap, MapLoadError> {
        (**self).load(id)
    }
}

/// Maps held in memory, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMaps {
    maps: HashMap<MapId, TileMap>,
}

impl InMemoryMaps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a map under its own id, replacing any previous one.
    pub fn insert(&mut self, map: TileMap) {
        self.maps.insert(map.id.clone(), map);
    }

    pub fn with(mut self, map: TileMap) -> Self {
        self.insert(map);
        self
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

impl MapSource for InMemoryMaps {
    fn load(&self, id: &MapId) -> Result<TileMap, MapLoadError> {
        self.maps
            .get(id)
            .cloned()
            .ok_or_else(|| MapLoadError::NotFound(id.clone()))
    }
}
