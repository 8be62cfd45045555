//! Portal-driven map switching.
//!
//! Each frame the controller either counts down its cooldown or looks for
//! the first portal under the actor's feet. Taking a portal loads the target
//! map, replaces the current one, drops the actor on the target spawn point
//! and starts the cooldown.

use bevy::math::Vec2;
use pm_player::Actor;
use pm_tilemap::{MapId, MapSource, TileMap};

use crate::diagnostic::Diagnostic;

/// A completed map switch.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub from: MapId,
    pub to: MapId,
    pub portal: String,
    pub spawn: String,
    /// Where the actor landed.
    pub position: Vec2,
    /// Set when the spawn point was missing and the fallback was used.
    pub diagnostic: Option<Diagnostic>,
}

/// What one evaluation did.
#[derive(Clone, Debug, PartialEq)]
pub enum TransitionOutcome {
    /// Cooldown was running; portals were not checked.
    Cooling { remaining: u32 },
    /// No usable portal under the feet.
    Idle,
    /// The map was switched.
    Transitioned(Transition),
    /// A portal was hit but could not be taken. The map is unchanged.
    Blocked(Diagnostic),
}

#[derive(Clone, Debug)]
pub struct TransitionController {
    cooldown: u32,
    cooldown_frames: u32,
    fallback_spawn: Vec2,
    /// Portal whose target failed; skipped until the feet leave it.
    suppressed: Option<usize>,
}

impl TransitionController {
    pub fn new(cooldown_frames: u32, fallback_spawn: Vec2) -> Self {
        Self {
            cooldown: 0,
            cooldown_frames,
            fallback_spawn,
            suppressed: None,
        }
    }

    /// Frames left before portals are checked again.
    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn suppressed_portal(&self) -> Option<usize> {
        self.suppressed
    }

    /// Run one frame of portal handling.
    ///
    /// At most one transition happens per call. When several portals
    /// overlap the feet, the one declared first in the map wins.
    pub fn evaluate(
        &mut self,
        actor: &mut Actor,
        current_map: &mut TileMap,
        maps: &dyn MapSource,
    ) -> TransitionOutcome {
        if self.cooldown > 0 {
            self.cooldown -= 1;
            return TransitionOutcome::Cooling {
                remaining: self.cooldown,
            };
        }

        let feet = actor.feet_box();

        if let Some(index) = self.suppressed {
            let still_inside = current_map
                .portals
                .get(index)
                .is_some_and(|p| p.rect.intersects(&feet));
            if !still_inside {
                self.suppressed = None;
            }
        }

        let suppressed = self.suppressed;
        let Some((index, portal)) = current_map
            .portals_touching(&feet)
            .find(|(i, _)| Some(*i) != suppressed)
            .map(|(i, p)| (i, p.clone()))
        else {
            return TransitionOutcome::Idle;
        };

        let Some(target) = portal.target_map.clone() else {
            self.suppressed = Some(index);
            return TransitionOutcome::Blocked(Diagnostic::PortalWithoutTarget {
                map: current_map.id.clone(),
                portal: portal.name,
            });
        };

        let next = match maps.load(&target) {
            Ok(map) => map,
            Err(err) => {
                self.suppressed = Some(index);
                self.cooldown = 0;
                return TransitionOutcome::Blocked(Diagnostic::TargetLoadFailed {
                    map: current_map.id.clone(),
                    portal: portal.name,
                    target,
                    reason: err.to_string(),
                });
            }
        };

        let (position, diagnostic) = match next.spawn(&portal.target_spawn) {
            Some(position) => (position, None),
            None => (
                self.fallback_spawn,
                Some(Diagnostic::SpawnNotFound {
                    map: next.id.clone(),
                    spawn: portal.target_spawn.clone(),
                    fallback: self.fallback_spawn,
                }),
            ),
        };

        let from = std::mem::replace(current_map, next).id;
        actor.teleport(position);
        self.cooldown = self.cooldown_frames;
        self.suppressed = None;

        TransitionOutcome::Transitioned(Transition {
            from,
            to: target,
            portal: portal.name,
            spawn: portal.target_spawn,
            position,
            diagnostic,
        })
    }
}
