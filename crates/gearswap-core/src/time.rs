//! Simulation time for the gearswap engine
//!
//! Handles the signed simulation clock (negative time is pre-pull), the
//! simulation context handed to every scheduled action, and the timers and
//! cooldowns hung off it.

use std::fmt;
use std::ops::{Add, Sub};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

/// A point on the simulation clock in milliseconds.
///
/// Time zero is the encounter's first timed action; anything before it is
/// pre-pull.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTime(i64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);
    /// Earliest representable time; an idle timer reads as ready
    pub const UNSET: SimTime = SimTime(i64::MIN);
    /// Latest representable time; a timer set to it never comes due
    pub const NEVER: SimTime = SimTime(i64::MAX);

    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub fn from_secs_f64(secs: f64) -> Self {
        Self((secs * 1000.0).round() as i64)
    }

    pub const fn millis(self) -> i64 {
        self.0
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Whether this time lies before the encounter start
    pub const fn is_prepull(self) -> bool {
        self.0 < 0
    }
}

impl Add<Duration> for SimTime {
    type Output = SimTime;

    fn add(self, rhs: Duration) -> SimTime {
        SimTime(self.0.saturating_add(i64::try_from(rhs.as_millis()).unwrap_or(i64::MAX)))
    }
}

impl Sub<Duration> for SimTime {
    type Output = SimTime;

    fn sub(self, rhs: Duration) -> SimTime {
        SimTime(self.0.saturating_sub(i64::try_from(rhs.as_millis()).unwrap_or(i64::MAX)))
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.as_secs_f64())
    }
}

/// Opaque handle for an encounter target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetId(pub u32);

/// Errors that can occur while driving the simulation clock
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClockError {
    #[error("Cannot move the clock backwards from {current} to {requested}")]
    Backwards { current: SimTime, requested: SimTime },
}

/// Configuration for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// How long before the pull each iteration starts, in seconds
    #[serde(default = "default_prepull")]
    pub prepull_secs: f64,
    /// Whether the log sink is enabled
    #[serde(default)]
    pub log: bool,
    /// Number of targets in the encounter
    #[serde(default = "default_target_count")]
    pub target_count: u32,
}

fn default_prepull() -> f64 {
    2.0
}

fn default_target_count() -> u32 {
    1
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            prepull_secs: default_prepull(),
            log: false,
            target_count: default_target_count(),
        }
    }
}

/// The simulation context passed to every action.
///
/// Exposes the current time, a logging sink and the encounter's target list.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Configuration
    pub config: SimConfig,
    current_time: SimTime,
    targets: Vec<TargetId>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl Simulation {
    /// Create a simulation positioned at the pre-pull start
    pub fn new(config: SimConfig) -> Self {
        let targets = (0..config.target_count).map(TargetId).collect();
        let mut sim = Self {
            config,
            current_time: SimTime::ZERO,
            targets,
        };
        sim.reset();
        sim
    }

    pub fn current_time(&self) -> SimTime {
        self.current_time
    }

    pub fn is_prepull(&self) -> bool {
        self.current_time.is_prepull()
    }

    /// Active encounter targets
    pub fn targets(&self) -> &[TargetId] {
        &self.targets
    }

    pub fn log_enabled(&self) -> bool {
        self.config.log
    }

    /// Rewind the clock to the pre-pull start of a fresh iteration
    pub fn reset(&mut self) {
        self.current_time = SimTime::from_secs_f64(-self.config.prepull_secs.max(0.0));
    }

    /// Move the clock forward to `time`
    pub fn advance_to(&mut self, time: SimTime) -> Result<(), ClockError> {
        if time < self.current_time {
            return Err(ClockError::Backwards {
                current: self.current_time,
                requested: time,
            });
        }
        self.current_time = time;
        Ok(())
    }

    /// Emit a log line stamped with the current time if the sink is enabled
    pub fn log(&self, args: fmt::Arguments<'_>) {
        if self.config.log {
            info!(time = %self.current_time, "{}", args);
        }
    }
}

/// A single ready-at timer (global delay, swing timers, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    ready_at: SimTime,
}

impl Default for Timer {
    fn default() -> Self {
        Self {
            ready_at: SimTime::UNSET,
        }
    }
}

impl Timer {
    pub fn ready_at(&self) -> SimTime {
        self.ready_at
    }

    /// Idle once the clock has reached `ready_at`
    pub fn is_ready(&self, sim: &Simulation) -> bool {
        self.ready_at <= sim.current_time()
    }

    pub fn set(&mut self, ready_at: SimTime) {
        self.ready_at = ready_at;
    }

    /// A timer that never comes due
    pub fn never() -> Self {
        Self {
            ready_at: SimTime::NEVER,
        }
    }

    pub fn reset(&mut self) {
        self.ready_at = SimTime::UNSET;
    }
}

/// A timer with a fixed duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    pub timer: Timer,
    pub duration: Duration,
}

impl Cooldown {
    pub fn new(duration: Duration) -> Self {
        Self {
            timer: Timer::default(),
            duration,
        }
    }

    pub fn is_ready(&self, sim: &Simulation) -> bool {
        self.timer.is_ready(sim)
    }

    pub fn ready_at(&self) -> SimTime {
        self.timer.ready_at()
    }

    pub fn set(&mut self, ready_at: SimTime) {
        self.timer.set(ready_at);
    }

    /// Start the full duration from now
    pub fn use_now(&mut self, sim: &Simulation) {
        self.timer.set(sim.current_time() + self.duration);
    }

    pub fn reset(&mut self) {
        self.timer.reset();
    }
}
