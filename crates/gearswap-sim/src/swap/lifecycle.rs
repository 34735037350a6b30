//! Encounter and iteration hooks

use tracing::debug;

use gearswap_core::Simulation;

use crate::character::Unit;

use super::ItemSwap;

impl ItemSwap {
    /// Restore the baseline loadout before a new encounter.
    ///
    /// Swapped slots are exchanged back without the phase filter or any
    /// timing side effects. Afterwards every swappable slot's listeners fire
    /// so gear-dependent effects start from a clean state.
    pub fn reset_for_encounter(&mut self, sim: &Simulation, unit: &mut Unit) {
        if !self.is_enabled() {
            return;
        }

        if self.is_swapped() {
            let swapped = self.swapped;
            let (restored, delta) = self.exchange_slots(sim, unit, swapped, false);
            unit.add_stats_dynamic(sim, delta);
            debug!(unit = %unit.name, ?restored, "baseline loadout restored");
        }

        for slot in self.enabled_mask().slots() {
            self.listeners.fire(sim, unit, slot, &self.benched[slot]);
        }
    }

    /// Hook run after each iteration
    pub fn end_of_iteration(&mut self, sim: &Simulation) {
        if !self.is_enabled() {
            return;
        }
        debug!(time = %sim.current_time(), swapped = ?self.swapped, "iteration finished");
    }
}
