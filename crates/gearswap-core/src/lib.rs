//! Gearswap Core - Simulation primitives for the gearswap engine
//!
//! This crate provides the foundational types used by the combat simulator:
//! - Signed simulation time (negative time is pre-pull)
//! - The simulation context, timers and cooldowns
//! - Stat-vector arithmetic

pub mod stats;
pub mod time;

pub use stats::{Stat, Stats, STAT_COUNT};
pub use time::{ClockError, Cooldown, SimConfig, SimTime, Simulation, TargetId, Timer};
