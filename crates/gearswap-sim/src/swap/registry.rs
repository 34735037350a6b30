//! Per-slot listener registry

use std::fmt;
use std::rc::Rc;

use gearswap_core::Simulation;

use crate::character::Unit;
use crate::combat::{
    AuraHandle, Item, ItemId, ItemSlot, PpmHandle, ProcMask, SpellHandle, NUM_SLOTS,
};

use super::listener::{ProcSource, SwapListener};
use super::ItemSwap;

/// Ordered listeners per slot. Listeners live as long as the character.
#[derive(Default)]
pub struct ListenerRegistry {
    per_slot: [Vec<Rc<SwapListener>>; NUM_SLOTS],
}

impl ListenerRegistry {
    /// Append `listener` to every listed slot's queue
    pub fn register(&mut self, slots: &[ItemSlot], listener: SwapListener) {
        let listener = Rc::new(listener);
        for slot in slots {
            self.per_slot[slot.index()].push(Rc::clone(&listener));
        }
    }

    pub fn len(&self, slot: ItemSlot) -> usize {
        self.per_slot[slot.index()].len()
    }

    pub fn is_empty(&self) -> bool {
        self.per_slot.iter().all(Vec::is_empty)
    }

    /// Invoke the slot's listeners in registration order
    pub(crate) fn fire(&self, sim: &Simulation, unit: &mut Unit, slot: ItemSlot, benched: &Item) {
        for listener in &self.per_slot[slot.index()] {
            listener.on_swap(sim, unit, slot, benched);
        }
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                ItemSlot::ALL
                    .iter()
                    .filter(|slot| self.len(**slot) > 0)
                    .map(|slot| (slot.name(), self.len(*slot))),
            )
            .finish()
    }
}

const WEAPON_HANDS: [ItemSlot; 2] = [ItemSlot::MainHand, ItemSlot::OffHand];

impl ItemSwap {
    /// Register a listener on `slots`. Does nothing when swapping is disabled.
    pub fn register_on_item_swap(&mut self, slots: &[ItemSlot], listener: SwapListener) {
        if !self.is_enabled() {
            return;
        }
        self.listeners.register(slots, listener);
    }

    /// Number of listeners queued on `slot`
    pub fn listener_count(&self, slot: ItemSlot) -> usize {
        self.listeners.len(slot)
    }

    /// Rebuild an enchant's PPM manager on weapon swaps and toggle its aura
    pub fn register_enchant_ppm_rebind(
        &mut self,
        effect_id: i32,
        ppm: f64,
        manager: PpmHandle,
        aura: AuraHandle,
    ) {
        self.register_on_item_swap(
            &WEAPON_HANDS,
            SwapListener::ProcRateRebind {
                ppm,
                source: ProcSource::Enchant(effect_id),
                manager,
                aura: Some(aura),
            },
        );
    }

    /// Rebuild a fixed-mask PPM manager on weapon swaps
    pub fn register_ppm_rebind(&mut self, proc_mask: ProcMask, ppm: f64, manager: PpmHandle) {
        self.register_on_item_swap(
            &WEAPON_HANDS,
            SwapListener::ProcRateRebind {
                ppm,
                source: ProcSource::Mask(proc_mask),
                manager,
                aura: None,
            },
        );
    }

    pub fn register_item_proc_aura(&mut self, item_id: ItemId, aura: AuraHandle, slots: &[ItemSlot]) {
        self.register_on_item_swap(slots, SwapListener::ItemProcAura { item_id, aura });
    }

    pub fn register_enchant_proc_aura(&mut self, effect_id: i32, aura: AuraHandle, slots: &[ItemSlot]) {
        self.register_on_item_swap(slots, SwapListener::EnchantProcAura { effect_id, aura });
    }

    pub fn register_item_on_use(&mut self, item_id: ItemId, slots: &[ItemSlot]) {
        self.register_on_item_swap(slots, SwapListener::ItemOnUse { item_id });
    }

    pub fn register_enchant_on_use(&mut self, spell: SpellHandle, slots: &[ItemSlot]) {
        self.register_on_item_swap(slots, SwapListener::EnchantOnUse { spell });
    }
}
