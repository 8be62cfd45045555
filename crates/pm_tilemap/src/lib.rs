pub mod asset;
pub mod map;
pub mod source;

pub use asset::{MapAsset, MapObject, COLLISION_KIND, PORTAL_KIND, TARGET_MAP_PROPERTY, TARGET_SPAWN_PROPERTY};
pub use map::{MapId, Portal, SpawnPoint, SpawnPoints, TileMap, Wall, DEFAULT_SPAWN};
pub use source::{InMemoryMaps, MapLoadError, MapSource};
