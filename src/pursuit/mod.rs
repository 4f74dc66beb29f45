//! # Pursuit Module
//!
//! Advances an adversary one cell at a time toward a moving target along a
//! periodically refreshed shortest path.
//!
//! The controller is driven by the external game loop, which calls
//! [`PursuitController::advance`] once per frame with the elapsed wall-clock
//! delta and the target's current cell. All timing lives in explicit
//! countdowns owned by the controller (armed delay, freeze), so ending a
//! level via [`PursuitController::cancel`] deterministically clears every
//! pending transition instead of relying on ambient timers.

use crate::grid::{Maze, Position};
use crate::pathfinding::find_path;
use log::debug;
use serde::{Deserialize, Serialize};

/// Timing parameters for pursuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PursuitConfig {
    /// Step interval at level 1, in milliseconds
    pub base_step_interval_ms: f64,
    /// Multiplier applied to the interval per level above 1
    pub speedup_per_level: f64,
    /// Floor on the step interval
    pub min_step_interval_ms: f64,
    /// Default warm-up window before pursuit begins
    pub armed_delay_ms: f64,
}

impl PursuitConfig {
    /// Creates the standard pursuit configuration.
    pub fn new() -> Self {
        Self {
            base_step_interval_ms: crate::config::BASE_STEP_INTERVAL_MS,
            speedup_per_level: crate::config::SPEEDUP_PER_LEVEL,
            min_step_interval_ms: crate::config::MIN_STEP_INTERVAL_MS,
            armed_delay_ms: crate::config::ARMED_DELAY_MS,
        }
    }

    /// Step interval for a 1-based level: the base interval shrinks
    /// geometrically per level and clamps to the floor, so pursuit speeds up
    /// 20% per level but never outruns the update tick.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::PursuitConfig;
    ///
    /// let config = PursuitConfig::new();
    /// assert_eq!(config.step_interval_for_level(1), 400.0);
    /// assert_eq!(config.step_interval_for_level(2), 320.0);
    /// assert_eq!(config.step_interval_for_level(50), 50.0);
    /// ```
    pub fn step_interval_for_level(&self, level: u32) -> f64 {
        let shrink = self
            .speedup_per_level
            .powi(level.saturating_sub(1) as i32);
        (self.base_step_interval_ms * shrink).max(self.min_step_interval_ms)
    }
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle phase of the pursuit controller.
///
/// Frozen is not a phase: it is an orthogonal overlay tracked separately, so
/// thawing resumes exactly where stepping left off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PursuitPhase {
    /// Adversary inactive; does not move or capture
    Dormant,
    /// Warm-up countdown running; pursuit begins when it expires
    Armed,
    /// Stepping along the current path toward the target
    Active,
    /// Level over; nothing may resume
    Terminal,
}

/// Per-tick result of [`PursuitController::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PursuitUpdate {
    /// Adversary position after this tick
    pub position: Position,
    /// Whether capture was signaled on this tick
    pub captured_target: bool,
}

/// Drives one adversary through the Dormant → Armed → Active lifecycle.
///
/// The adversary spawns at the target's own starting position for the level,
/// so the target's head start is exactly the armed-delay window of time, not
/// a head start in distance.
///
/// # Examples
///
/// ```
/// use warren::{generate_maze, Position, PursuitConfig, PursuitController, PursuitPhase};
///
/// let maze = generate_maze(10, 10, 1, 4).unwrap();
/// let mut pursuit = PursuitController::new(PursuitConfig::new(), 1, Position::origin());
/// pursuit.arm(5000.0);
///
/// let update = pursuit.advance(&maze, 16.0, Position::new(9, 9), false);
/// assert_eq!(update.position, Position::origin());
/// assert_eq!(pursuit.phase(), PursuitPhase::Armed);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PursuitController {
    config: PursuitConfig,
    phase: PursuitPhase,
    position: Position,
    path: Vec<Position>,
    path_index: usize,
    step_interval_ms: f64,
    accumulated_ms: f64,
    arm_remaining_ms: f64,
    freeze_remaining_ms: Option<f64>,
    capture_latched: bool,
}

impl PursuitController {
    /// Creates a dormant controller for the given 1-based level, spawned at
    /// the target's starting position.
    pub fn new(config: PursuitConfig, level: u32, spawn: Position) -> Self {
        let step_interval_ms = config.step_interval_for_level(level);
        Self {
            config,
            phase: PursuitPhase::Dormant,
            position: spawn,
            path: Vec::new(),
            path_index: 0,
            step_interval_ms,
            accumulated_ms: 0.0,
            arm_remaining_ms: 0.0,
            freeze_remaining_ms: None,
            capture_latched: false,
        }
    }

    /// Starts the warm-up countdown. Only meaningful from Dormant; calls in
    /// any other phase are ignored.
    pub fn arm(&mut self, after_ms: f64) {
        if self.phase != PursuitPhase::Dormant {
            return;
        }
        self.phase = PursuitPhase::Armed;
        self.arm_remaining_ms = after_ms.max(0.0);
    }

    /// Starts the warm-up countdown with the configured default delay.
    pub fn arm_default(&mut self) {
        let delay = self.config.armed_delay_ms;
        self.arm(delay);
    }

    /// Suspends stepping for the given duration.
    ///
    /// Step time does not accumulate while frozen; on expiry the controller
    /// resumes with the same path, index, and accumulator. The armed
    /// countdown is not paused (freeze suspends stepping only). Re-freezing
    /// restarts the countdown at the new duration.
    pub fn freeze(&mut self, for_ms: f64) {
        match self.phase {
            PursuitPhase::Armed | PursuitPhase::Active => {
                self.freeze_remaining_ms = Some(for_ms.max(0.0));
            }
            PursuitPhase::Dormant | PursuitPhase::Terminal => {}
        }
    }

    /// Ends pursuit for good: clears the armed countdown, any pending freeze
    /// expiry, and the current path. Nothing bleeds into the next level.
    pub fn cancel(&mut self) {
        self.phase = PursuitPhase::Terminal;
        self.arm_remaining_ms = 0.0;
        self.freeze_remaining_ms = None;
        self.accumulated_ms = 0.0;
        self.path.clear();
        self.path_index = 0;
    }

    /// Advances pursuit by one external frame tick.
    ///
    /// `target` is the target's current cell, polled fresh each tick;
    /// `target_exempt` is the collaborator-owned invulnerability flag.
    /// Capture is signaled once per coincidence: the latch re-arms only after
    /// adversary and target separate.
    pub fn advance(
        &mut self,
        maze: &Maze,
        delta_ms: f64,
        target: Position,
        target_exempt: bool,
    ) -> PursuitUpdate {
        match self.phase {
            PursuitPhase::Dormant | PursuitPhase::Terminal => return self.idle_update(),
            PursuitPhase::Armed | PursuitPhase::Active => {}
        }

        let mut step_budget_ms = delta_ms;

        if self.phase == PursuitPhase::Armed {
            if self.arm_remaining_ms > delta_ms {
                self.arm_remaining_ms -= delta_ms;
                return self.idle_update();
            }
            step_budget_ms = delta_ms - self.arm_remaining_ms;
            self.arm_remaining_ms = 0.0;
            self.phase = PursuitPhase::Active;
            self.recompute_path(maze, target);
            debug!("pursuit active from {:?}", self.position);
        }

        // Frozen overlay: tick time is swallowed until the countdown runs
        // out; any leftover past expiry flows back into stepping.
        if let Some(remaining) = self.freeze_remaining_ms {
            if remaining > step_budget_ms {
                self.freeze_remaining_ms = Some(remaining - step_budget_ms);
                return self.idle_update();
            }
            step_budget_ms -= remaining;
            self.freeze_remaining_ms = None;
        }

        self.accumulated_ms += step_budget_ms;
        if self.accumulated_ms >= self.step_interval_ms {
            self.accumulated_ms = 0.0;
            self.step(maze, target);
        }

        let captured = self.update_capture_latch(target, target_exempt);
        PursuitUpdate {
            position: self.position,
            captured_target: captured,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> PursuitPhase {
        self.phase
    }

    /// Adversary's current grid position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The path currently being walked (empty until pursuit activates or when
    /// the target is unreachable).
    pub fn current_path(&self) -> &[Position] {
        &self.path
    }

    /// Whether the frozen overlay is in effect.
    pub fn is_frozen(&self) -> bool {
        self.freeze_remaining_ms.is_some()
    }

    /// Step time accumulated toward the next move, in milliseconds.
    pub fn accumulated_ms(&self) -> f64 {
        self.accumulated_ms
    }

    /// Effective step interval for this level, in milliseconds.
    pub fn step_interval_ms(&self) -> f64 {
        self.step_interval_ms
    }

    fn idle_update(&self) -> PursuitUpdate {
        PursuitUpdate {
            position: self.position,
            captured_target: false,
        }
    }

    /// Moves one cell along the current path, then recomputes the route when
    /// the index sits at either end of it. Recomputing against the target's
    /// *current* position is what makes pursuit react to movement instead of
    /// beelining toward a stale destination.
    fn step(&mut self, maze: &Maze, target: Position) {
        if self.path_index + 1 < self.path.len() {
            self.path_index += 1;
            self.position = self.path[self.path_index];
        }

        let at_start = self.path_index == 0;
        let at_end = self.path_index + 1 >= self.path.len();
        if at_start || at_end {
            self.recompute_path(maze, target);
        }
    }

    fn recompute_path(&mut self, maze: &Maze, target: Position) {
        self.path = find_path(maze, self.position, target);
        self.path_index = 0;
        if self.path.is_empty() {
            // Transient: hold position this tick and retry at the next step
            // boundary.
            debug!("no path from {:?} to {:?}, holding", self.position, target);
        }
    }

    fn update_capture_latch(&mut self, target: Position, target_exempt: bool) -> bool {
        if self.position == target {
            if !target_exempt && !self.capture_latched {
                self.capture_latched = true;
                debug!("capture signaled at {:?}", self.position);
                return true;
            }
        } else {
            self.capture_latched = false;
        }
        false
    }
}
