use crate::transform::{QUARTER_TURN, roll_transform};
use rollcube_common::{CubeConfig, Direction, GridPos, Transform};
use serde::{Deserialize, Serialize};

/// An event record produced by every transition of the engine.
///
/// The log lets hosts trace the cube's path without polling state each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RollEvent {
    /// A quarter turn began from a resting cell.
    TurnStarted { direction: Direction, from: GridPos },
    /// A quarter turn finished and the grid position was committed.
    TurnCompleted {
        direction: Direction,
        from: GridPos,
        to: GridPos,
    },
    /// The cube came to rest with nothing queued.
    Rested { at: GridPos },
}

impl RollEvent {
    /// Reconstruct the final grid position from `start` and a sequence of events.
    pub fn replay(start: GridPos, events: &[RollEvent]) -> GridPos {
        events.iter().fold(start, |grid, event| match event {
            RollEvent::TurnCompleted { direction, .. } => grid.stepped(*direction),
            _ => grid,
        })
    }
}

/// Coarse state of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Resting,
    Rotating(Direction),
}

/// The rolling cube: grid position, in-progress quarter turn and the
/// transform derived from them.
///
/// All mutations go through [`update`](Self::update), called once per frame
/// by the host with the frame's elapsed time and the direction the player is
/// currently asking for.
#[derive(Debug, Clone)]
pub struct RollingCube {
    config: CubeConfig,
    grid: GridPos,
    direction: Direction,
    /// Degrees rotated so far in the current quarter turn.
    angle: f32,
    frame: u64,
    turns_completed: u64,
    transform: Transform,
    /// Append-only log of transitions since the last drain.
    event_log: Vec<RollEvent>,
}

impl Default for RollingCube {
    fn default() -> Self {
        Self::new(CubeConfig::default())
    }
}

impl RollingCube {
    /// A cube resting on the origin cell.
    pub fn new(config: CubeConfig) -> Self {
        Self::with_grid(config, GridPos::ORIGIN)
    }

    /// A cube resting on `grid`.
    pub fn with_grid(config: CubeConfig, grid: GridPos) -> Self {
        Self {
            config,
            grid,
            direction: Direction::None,
            angle: 0.0,
            frame: 0,
            turns_completed: 0,
            transform: roll_transform(&config, grid, Direction::None, 0.0),
            event_log: Vec::new(),
        }
    }

    /// Resting cell; during a turn this is the cell the turn started from.
    pub fn grid(&self) -> GridPos {
        self.grid
    }

    /// Direction being animated, `None` at rest.
    pub fn active_direction(&self) -> Direction {
        self.direction
    }

    /// Degrees rotated so far in the current quarter turn.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Raw progress through the current quarter turn, before easing.
    pub fn progress(&self) -> f32 {
        self.angle / QUARTER_TURN
    }

    pub fn phase(&self) -> Phase {
        match self.direction {
            Direction::None => Phase::Resting,
            d => Phase::Rotating(d),
        }
    }

    pub fn is_resting(&self) -> bool {
        self.direction.is_none()
    }

    /// Number of `update` calls so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn turns_completed(&self) -> u64 {
        self.turns_completed
    }

    /// Transform computed by the last update.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[RollEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<RollEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Advance the cube by one frame.
    ///
    /// `delta_seconds` is wall-clock time since the previous frame; negative or
    /// non-finite values, and deltas whose rotation overflows `f32`, are
    /// treated as zero. `pending` is the direction the input host currently
    /// has queued.
    ///
    /// At most one quarter turn completes per call. Any angle left over after
    /// the completion carries into the next turn when one is queued.
    pub fn update(&mut self, delta_seconds: f32, pending: Direction) -> Transform {
        self.frame += 1;

        let dt = if delta_seconds.is_finite() && delta_seconds > 0.0 {
            delta_seconds
        } else {
            if delta_seconds != 0.0 {
                tracing::debug!(delta_seconds, "clamping bad frame delta to zero");
            }
            0.0
        };

        if self.direction.is_none() {
            if pending.is_none() {
                return self.transform;
            }
            self.start_turn(pending);
        }

        let step = dt * self.config.degrees_per_second();
        if step.is_finite() {
            self.angle += step;
        } else {
            tracing::debug!(dt, "rotation step overflowed, treating as zero");
        }
        if self.angle >= QUARTER_TURN {
            self.finish_turn(pending);
        }

        self.transform = roll_transform(&self.config, self.grid, self.direction, self.angle);
        self.transform
    }

    fn start_turn(&mut self, direction: Direction) {
        self.direction = direction;
        self.angle = 0.0;
        tracing::debug!(%direction, from = %self.grid, "turn started");
        self.event_log.push(RollEvent::TurnStarted {
            direction,
            from: self.grid,
        });
    }

    fn finish_turn(&mut self, pending: Direction) {
        let direction = self.direction;
        let from = self.grid;
        self.grid = from.stepped(direction);
        self.turns_completed += 1;
        tracing::debug!(%direction, %from, to = %self.grid, "turn completed");
        self.event_log.push(RollEvent::TurnCompleted {
            direction,
            from,
            to: self.grid,
        });

        if pending.is_none() {
            self.direction = Direction::None;
            self.angle = 0.0;
            tracing::debug!(at = %self.grid, "cube at rest");
            self.event_log.push(RollEvent::Rested { at: self.grid });
        } else {
            self.direction = pending;
            self.angle %= QUARTER_TURN;
            tracing::debug!(direction = %pending, carried = self.angle, "chained turn");
            self.event_log.push(RollEvent::TurnStarted {
                direction: pending,
                from: self.grid,
            });
        }
    }
}
