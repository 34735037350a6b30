//! Auras
//!
//! On/off effects registered on a unit. Swap listeners toggle them when the
//! gear that grants them comes and goes.

use tracing::debug;

use gearswap_core::{Cooldown, Simulation};

use super::spell::ActionId;

/// Index of an aura registered on a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AuraHandle(pub(crate) usize);

/// A toggleable aura
#[derive(Debug, Clone)]
pub struct Aura {
    pub label: String,
    /// Action this aura belongs to, if any (used to find on-use buffs)
    pub action_id: Option<ActionId>,
    /// Internal cooldown consumed when a swap re-activates the aura
    pub icd: Option<Cooldown>,
    active: bool,
    activations: u32,
}

impl Aura {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action_id: None,
            icd: None,
            active: false,
            activations: 0,
        }
    }

    pub fn with_action(mut self, action_id: ActionId) -> Self {
        self.action_id = Some(action_id);
        self
    }

    pub fn with_icd(mut self, icd: Cooldown) -> Self {
        self.icd = Some(icd);
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// How many times the aura went from inactive to active
    pub fn activations(&self) -> u32 {
        self.activations
    }

    pub fn activate(&mut self, sim: &Simulation) {
        if self.active {
            return;
        }
        self.active = true;
        self.activations += 1;
        debug!(aura = %self.label, time = %sim.current_time(), "aura activated");
    }

    pub fn deactivate(&mut self, sim: &Simulation) {
        if !self.active {
            return;
        }
        self.active = false;
        debug!(aura = %self.label, time = %sim.current_time(), "aura deactivated");
    }

    /// Clear state between iterations
    pub fn reset(&mut self) {
        self.active = false;
        if let Some(icd) = &mut self.icd {
            icd.reset();
        }
    }
}
