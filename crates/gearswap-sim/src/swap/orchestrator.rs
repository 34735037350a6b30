//! The swap operation

use std::time::Duration;

use tracing::debug;

use gearswap_core::{SimTime, Simulation, Stats};

use crate::character::Unit;
use crate::combat::ItemSlot;

use super::rebind::rebind_weapon;
use super::{ItemSwap, SlotMask};

/// Global delay consumed by a swap that doesn't ride on another action
pub const SWAP_GLOBAL_DELAY: Duration = Duration::from_millis(1500);

impl ItemSwap {
    /// Exchange worn and benched items for `slots`.
    ///
    /// Slots are processed in canonical order whatever order they are passed
    /// in. Once the encounter has started only the melee weapon slots are
    /// exchanged; before that any swappable slot is. A two-handed main hand
    /// on either side of the exchange takes the off hand with it.
    ///
    /// After the exchange the summed stat change is applied to the unit and
    /// the melee swing timer restarts if a melee weapon changed mid-fight.
    /// Every call on an enabled swap starts a global delay if none is
    /// running, even when no slot ended up changing.
    pub fn swap_items(&mut self, sim: &Simulation, unit: &mut Unit, slots: &[ItemSlot]) {
        if !self.is_enabled() {
            return;
        }

        let requested = SlotMask::from_slots(slots.iter().copied()) & self.enabled_mask();
        let (changed, delta) = self.exchange_slots(sim, unit, requested, !sim.is_prepull());
        let now = sim.current_time();

        if changed.is_empty() {
            debug!(unit = %unit.name, ?requested, "swap request changed no slot");
        } else {
            sim.log(format_args!("Item Swap Stats: {}", delta.flat_string()));
            unit.add_stats_dynamic(sim, delta);

            if unit.auto_attacks.auto_swing_melee
                && changed.intersects(SlotMask::MELEE_WEAPONS)
                && now > SimTime::ZERO
            {
                unit.auto_attacks.stop_melee_until(sim, now);
            }
        }

        if unit.gcd.is_ready(sim) {
            unit.set_gcd_timer(sim, now + SWAP_GLOBAL_DELAY);
        }
    }

    /// Exchange every slot in `requested`, firing listeners as each slot
    /// settles. Returns the slots that changed and their summed stat delta.
    pub(super) fn exchange_slots(
        &mut self,
        sim: &Simulation,
        unit: &mut Unit,
        requested: SlotMask,
        weapons_only: bool,
    ) -> (SlotMask, Stats) {
        let bundled = self.benched[ItemSlot::MainHand].is_two_handed()
            || unit.item_in(ItemSlot::MainHand).is_two_handed();

        let mut changed = SlotMask::empty();
        let mut delta = Stats::new();
        for slot in requested.slots() {
            if weapons_only && !slot.is_melee_weapon() {
                continue;
            }
            // Handled together with the main hand
            if bundled && slot == ItemSlot::OffHand {
                continue;
            }

            delta += self.exchange_single(unit, slot);
            changed |= SlotMask::from_slot(slot);

            if bundled && slot == ItemSlot::MainHand {
                delta += self.exchange_single(unit, ItemSlot::OffHand);
                changed |= SlotMask::OFF_HAND;
                self.listeners.fire(sim, unit, slot, &self.benched[slot]);
                self.listeners
                    .fire(sim, unit, ItemSlot::OffHand, &self.benched[ItemSlot::OffHand]);
            } else {
                self.listeners.fire(sim, unit, slot, &self.benched[slot]);
            }
        }

        self.swapped ^= changed & self.enabled_mask();
        (changed, delta)
    }

    /// Swap one slot's worn and benched items and rebind its weapon
    fn exchange_single(&mut self, unit: &mut Unit, slot: ItemSlot) -> Stats {
        std::mem::swap(&mut unit.equipment[slot], &mut self.benched[slot]);
        let delta = unit.item_stats(unit.item_in(slot)) - unit.item_stats(&self.benched[slot]);
        rebind_weapon(unit, slot, self.crit);
        debug!(
            unit = %unit.name,
            slot = slot.name(),
            equipped = %unit.item_in(slot).name,
            benched = %self.benched[slot].name,
            "slot exchanged"
        );
        delta
    }
}
