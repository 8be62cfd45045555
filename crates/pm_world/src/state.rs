use bevy::log::{debug, info};
use bevy::prelude::Resource;
use pm_core::{DirectionKeys, Facing, RunState};
use pm_player::{apply_movement, resolve, Actor};
use pm_tilemap::{MapLoadError, MapSource, TileMap};

use crate::config::GameConfig;
use crate::diagnostic::Diagnostic;
use crate::game_loop::RenderFrame;
use crate::transition::{Transition, TransitionController, TransitionOutcome};

/// How many diagnostics the state keeps for overlays.
const RECENT_DIAGNOSTICS: usize = 8;

/// Input sampled from the presentation layer for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub keys: DirectionKeys,
    /// A window close or quit key was seen.
    pub quit: bool,
}

impl FrameInput {
    pub fn keys(keys: DirectionKeys) -> Self {
        Self { keys, quit: false }
    }

    pub fn quit() -> Self {
        Self {
            keys: DirectionKeys::empty(),
            quit: true,
        }
    }
}

/// Everything that happened during one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub frame: u64,
    /// Direction applied this tick.
    pub moved: Option<Facing>,
    /// The actor walked into a wall and was rolled back.
    pub blocked: bool,
    pub transition: Option<Transition>,
    pub diagnostics: Vec<Diagnostic>,
    /// The loop stopped during this tick.
    pub stopped: bool,
}

/// The whole mutable game: one actor, one map, portal bookkeeping.
///
/// Owned by the loop and only changed through [`GameState::tick`].
#[derive(Resource)]
pub struct GameState {
    actor: Actor,
    map: TileMap,
    transitions: TransitionController,
    run_state: RunState,
    frame: u64,
    speed: f32,
    recent: Vec<Diagnostic>,
}

impl GameState {
    /// Load the start map and place the actor on the start spawn.
    ///
    /// Failing to load the start map is fatal. A missing start spawn is not:
    /// the actor is placed at the fallback position instead.
    pub fn new(config: &GameConfig, maps: &dyn MapSource) -> Result<Self, MapLoadError> {
        let map = maps.load(&config.start_map_id())?;
        let fallback = config.fallback_position();

        let mut recent = Vec::new();
        let position = match map.spawn(&config.start_spawn) {
            Some(position) => position,
            None => {
                let diagnostic = Diagnostic::SpawnNotFound {
                    map: map.id.clone(),
                    spawn: config.start_spawn.clone(),
                    fallback,
                };
                diagnostic.log();
                recent.push(diagnostic);
                fallback
            }
        };

        info!(
            "Starting on {} at ({}, {}) with {} walls, {} portals",
            map.id,
            position.x,
            position.y,
            map.walls.len(),
            map.portals.len()
        );

        Ok(Self {
            actor: Actor::new(position, config.actor_shape()),
            map,
            transitions: TransitionController::new(config.portal_cooldown_frames, fallback),
            run_state: RunState::Running,
            frame: 0,
            speed: config.player_speed,
            recent,
        })
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn cooldown(&self) -> u32 {
        self.transitions.cooldown()
    }

    pub fn transitions(&self) -> &TransitionController {
        &self.transitions
    }

    /// Most recent diagnostics, oldest first.
    pub fn recent_diagnostics(&self) -> &[Diagnostic] {
        &self.recent
    }

    pub fn stop(&mut self) {
        if self.run_state.is_running() {
            info!("Stopping after {} frames", self.frame);
        }
        self.run_state = RunState::Stopped;
    }

    /// Advance one frame: quit check, movement, wall rollback, portals.
    ///
    /// A stopped state ignores further ticks.
    pub fn tick(&mut self, input: FrameInput, maps: &dyn MapSource) -> TickReport {
        let mut report = TickReport {
            frame: self.frame,
            ..Default::default()
        };

        if !self.run_state.is_running() {
            report.stopped = true;
            return report;
        }
        if input.quit {
            self.stop();
            report.stopped = true;
            return report;
        }

        self.actor.save_location();
        report.moved = apply_movement(&mut self.actor, input.keys, self.speed);
        report.blocked = resolve(&mut self.actor, &self.map.walls);
        if report.blocked {
            debug!("Blocked by a wall at {:?}", self.actor.position());
        }

        match self
            .transitions
            .evaluate(&mut self.actor, &mut self.map, maps)
        {
            TransitionOutcome::Transitioned(transition) => {
                info!(
                    "Map: {} -> {} via '{}' (spawn '{}')",
                    transition.from, transition.to, transition.portal, transition.spawn
                );
                if let Some(diagnostic) = &transition.diagnostic {
                    report.diagnostics.push(diagnostic.clone());
                }
                report.transition = Some(transition);
            }
            TransitionOutcome::Blocked(diagnostic) => report.diagnostics.push(diagnostic),
            TransitionOutcome::Cooling { .. } | TransitionOutcome::Idle => {}
        }

        for diagnostic in &report.diagnostics {
            diagnostic.log();
            self.remember(diagnostic.clone());
        }

        self.frame += 1;
        report
    }

    /// Snapshot handed to the presentation layer after a tick.
    pub fn render_frame(&self) -> RenderFrame {
        let bounding_box = self.actor.bounding_box();
        RenderFrame {
            map_id: self.map.id.clone(),
            actor_box: bounding_box,
            feet_box: self.actor.feet_box(),
            facing: self.actor.facing(),
            camera_center: bounding_box.center(),
        }
    }

    fn remember(&mut self, diagnostic: Diagnostic) {
        if self.recent.len() == RECENT_DIAGNOSTICS {
            self.recent.remove(0);
        }
        self.recent.push(diagnostic);
    }
}
