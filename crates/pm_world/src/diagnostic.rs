use bevy::log::warn;
use bevy::math::Vec2;
use pm_tilemap::MapId;
use std::fmt;

/// Non-fatal problem found while running. The game keeps going.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// A spawn point was missing; the actor was placed at `fallback`.
    SpawnNotFound {
        map: MapId,
        spawn: String,
        fallback: Vec2,
    },
    /// A portal names no target map and cannot fire.
    PortalWithoutTarget { map: MapId, portal: String },
    /// A portal's target map failed to load; no transition happened.
    TargetLoadFailed {
        map: MapId,
        portal: String,
        target: MapId,
        reason: String,
    },
}

impl Diagnostic {
    /// Emit the diagnostic on the `warn` log level.
    pub fn log(&self) {
        warn!("{}", self);
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpawnNotFound { map, spawn, fallback } => write!(
                f,
                "spawn point '{}' not found in {}, using ({}, {})",
                spawn, map, fallback.x, fallback.y
            ),
            Self::PortalWithoutTarget { map, portal } => {
                write!(f, "portal '{}' in {} has no target map", portal, map)
            }
            Self::TargetLoadFailed {
                map,
                portal,
                target,
                reason,
            } => write!(
                f,
                "portal '{}' in {} could not load {}: {}",
                portal, map, target, reason
            ),
        }
    }
}
