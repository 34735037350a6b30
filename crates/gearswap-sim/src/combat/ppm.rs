//! Proc masks and proc-per-minute managers

use bitflags::bitflags;

use super::weapon::Weapon;

bitflags! {
    /// Which auto-attack weapons a proc can trigger from.
    ///
    /// The empty mask means "unknown": the effect is not on any weapon.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ProcMask: u8 {
        const MELEE_MH = 1 << 0;
        const MELEE_OH = 1 << 1;
        const RANGED   = 1 << 2;

        const MELEE = Self::MELEE_MH.bits() | Self::MELEE_OH.bits();
    }
}

/// Index of a PPM manager registered on a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PpmHandle(pub(crate) usize);

/// Per-weapon proc chance derived from a procs-per-minute rate
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PpmManager {
    ppm: f64,
    mask: ProcMask,
    mh_chance: f64,
    oh_chance: f64,
    ranged_chance: f64,
}

impl PpmManager {
    /// Build from the current weapons. Weapons outside `mask` get no chance.
    pub fn new(ppm: f64, mask: ProcMask, mh: &Weapon, oh: &Weapon, ranged: &Weapon) -> Self {
        let chance = |bit: ProcMask, weapon: &Weapon| {
            if mask.contains(bit) {
                ppm * weapon.swing_speed / 60.0
            } else {
                0.0
            }
        };

        Self {
            ppm,
            mask,
            mh_chance: chance(ProcMask::MELEE_MH, mh),
            oh_chance: chance(ProcMask::MELEE_OH, oh),
            ranged_chance: chance(ProcMask::RANGED, ranged),
        }
    }

    pub fn ppm(&self) -> f64 {
        self.ppm
    }

    pub fn mask(&self) -> ProcMask {
        self.mask
    }

    /// Proc chance for the first weapon in `mask` (main hand, off hand, ranged)
    pub fn chance(&self, mask: ProcMask) -> f64 {
        if mask.contains(ProcMask::MELEE_MH) && self.mh_chance > 0.0 {
            self.mh_chance
        } else if mask.contains(ProcMask::MELEE_OH) && self.oh_chance > 0.0 {
            self.oh_chance
        } else if mask.contains(ProcMask::RANGED) {
            self.ranged_chance
        } else {
            0.0
        }
    }
}
