//! Auto-attack state
//!
//! Holds the weapons the character swings with and the next-swing timers.

use serde::{Deserialize, Serialize};
use tracing::debug;

use gearswap_core::{SimTime, Simulation, Timer};

use super::ppm::{PpmManager, ProcMask};
use super::weapon::Weapon;

/// Which auto-attacks a character performs, and its crit multipliers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoAttackConfig {
    pub melee: bool,
    pub ranged: bool,
    pub mh_crit_multiplier: f64,
    pub oh_crit_multiplier: f64,
    pub ranged_crit_multiplier: f64,
}

impl Default for AutoAttackConfig {
    fn default() -> Self {
        Self {
            melee: true,
            ranged: false,
            mh_crit_multiplier: 2.0,
            oh_crit_multiplier: 2.0,
            ranged_crit_multiplier: 2.0,
        }
    }
}

/// Auto-attack weapons and swing timers.
///
/// Swing timers that are not running are held at [`SimTime::NEVER`].
#[derive(Debug, Clone)]
pub struct AutoAttacks {
    pub auto_swing_melee: bool,
    pub auto_swing_ranged: bool,
    pub is_dual_wielding: bool,
    mh: Weapon,
    oh: Weapon,
    ranged: Weapon,
    mh_swing: Timer,
    oh_swing: Timer,
    ranged_swing: Timer,
}

impl Default for AutoAttacks {
    fn default() -> Self {
        Self::new(false, false)
    }
}

impl AutoAttacks {
    pub fn new(melee: bool, ranged: bool) -> Self {
        Self {
            auto_swing_melee: melee,
            auto_swing_ranged: ranged,
            is_dual_wielding: false,
            mh: Weapon::default(),
            oh: Weapon::default(),
            ranged: Weapon::default(),
            mh_swing: Timer::never(),
            oh_swing: Timer::never(),
            ranged_swing: Timer::never(),
        }
    }

    pub fn mh(&self) -> &Weapon {
        &self.mh
    }

    pub fn oh(&self) -> &Weapon {
        &self.oh
    }

    pub fn ranged(&self) -> &Weapon {
        &self.ranged
    }

    pub fn set_mh(&mut self, weapon: Weapon) {
        self.mh = weapon;
    }

    pub fn set_oh(&mut self, weapon: Weapon) {
        self.oh = weapon;
    }

    pub fn set_ranged(&mut self, weapon: Weapon) {
        self.ranged = weapon;
    }

    /// When the next main-hand swing lands
    pub fn next_mh_swing(&self) -> SimTime {
        self.mh_swing.ready_at()
    }

    /// When the next off-hand swing lands
    pub fn next_oh_swing(&self) -> SimTime {
        self.oh_swing.ready_at()
    }

    pub fn next_ranged_shot(&self) -> SimTime {
        self.ranged_swing.ready_at()
    }

    /// Begin swinging at `start`
    pub fn start_melee(&mut self, start: SimTime) {
        self.mh_swing.set(start);
        if self.is_dual_wielding {
            self.oh_swing.set(start);
        }
    }

    /// Interrupt melee swings and restart the swing timers from `until`
    pub fn stop_melee_until(&mut self, sim: &Simulation, until: SimTime) {
        self.mh_swing.set(until + self.mh.swing_duration());
        if self.is_dual_wielding {
            self.oh_swing.set(until + self.oh.swing_duration());
        } else {
            self.oh_swing = Timer::never();
        }
        debug!(
            time = %sim.current_time(),
            next_mh = %self.mh_swing.ready_at(),
            "melee swing timer restarted"
        );
    }

    /// Build a PPM manager from the current weapons
    pub fn new_ppm_manager(&self, ppm: f64, mask: ProcMask) -> PpmManager {
        PpmManager::new(ppm, mask, &self.mh, &self.oh, &self.ranged)
    }

    /// Stop all swing timers between iterations
    pub fn reset(&mut self) {
        self.mh_swing = Timer::never();
        self.oh_swing = Timer::never();
        self.ranged_swing = Timer::never();
    }
}
