//! Swap listeners
//!
//! A listener reacts to a slot's content changing. The built-in variants
//! cover the effect families that depend on worn gear; `Custom` takes any
//! caller-supplied function.

use std::fmt;
use std::time::Duration;

use tracing::debug;

use gearswap_core::Simulation;

use crate::character::Unit;
use crate::combat::{
    ActionId, AuraHandle, Item, ItemId, ItemSlot, PpmHandle, ProcMask, Spell, SpellFlags,
    SpellHandle,
};

/// Cooldown placed on an on-use effect whose item was just equipped
pub const ON_USE_SWAP_COOLDOWN: Duration = Duration::from_secs(30);

/// Caller-supplied listener
pub type SwapCallback = Box<dyn Fn(&Simulation, &mut Unit, ItemSlot)>;

/// Where a proc-rate rebind takes its weapon mask from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcSource {
    /// A fixed set of weapons
    Mask(ProcMask),
    /// Whichever weapons carry this enchant
    Enchant(i32),
}

/// A handler invoked after a slot's content changed
pub enum SwapListener {
    /// Rebuild a PPM manager; toggle `aura` on the new proc chance when given
    ProcRateRebind {
        ppm: f64,
        source: ProcSource,
        manager: PpmHandle,
        aura: Option<AuraHandle>,
    },
    /// Keep an item's proc aura active only while the item is worn
    ItemProcAura { item_id: ItemId, aura: AuraHandle },
    /// Keep an enchant's proc aura active only while a weapon carries it
    EnchantProcAura { effect_id: i32, aura: AuraHandle },
    /// Put an item's on-use spell on cooldown when it is equipped
    ItemOnUse { item_id: ItemId },
    /// Put an enchant's on-use spell on cooldown when its slot changes
    EnchantOnUse { spell: SpellHandle },
    Custom(SwapCallback),
}

impl SwapListener {
    pub fn custom(callback: impl Fn(&Simulation, &mut Unit, ItemSlot) + 'static) -> Self {
        Self::Custom(Box::new(callback))
    }

    /// Run the listener. `benched` is the item that just left `slot`.
    pub(crate) fn on_swap(&self, sim: &Simulation, unit: &mut Unit, slot: ItemSlot, benched: &Item) {
        match self {
            Self::ProcRateRebind {
                ppm,
                source,
                manager,
                aura,
            } => {
                let mask = match *source {
                    ProcSource::Mask(mask) => mask,
                    ProcSource::Enchant(effect_id) => unit.proc_mask_for_enchant(effect_id),
                };
                let rebuilt = unit.auto_attacks.new_ppm_manager(*ppm, mask);
                let chance = rebuilt.chance(mask);
                *unit.ppm_manager_mut(*manager) = rebuilt;

                if let Some(aura) = aura {
                    if chance == 0.0 {
                        unit.aura_mut(*aura).deactivate(sim);
                    } else {
                        unit.aura_mut(*aura).activate(sim);
                    }
                }
            }
            Self::ItemProcAura { item_id, aura } => {
                let worn = unit.equipment.is_worn(*item_id);
                let aura = unit.aura_mut(*aura);
                if !worn {
                    aura.deactivate(sim);
                } else if !aura.is_active() {
                    aura.activate(sim);
                    if let Some(icd) = &mut aura.icd {
                        icd.use_now(sim);
                    }
                }
            }
            Self::EnchantProcAura { effect_id, aura } => {
                if unit.proc_mask_for_enchant(*effect_id).is_empty() {
                    unit.aura_mut(*aura).deactivate(sim);
                } else {
                    unit.aura_mut(*aura).activate(sim);
                }
            }
            Self::ItemOnUse { item_id } => {
                let Some(handle) = unit.spell_by_action(ActionId::Item(*item_id)) else {
                    return;
                };
                if let Some(aura) = unit.aura_by_action(ActionId::Item(*item_id)) {
                    unit.aura_mut(aura).deactivate(sim);
                }

                let equipped = unit.item_in(slot).id;
                let spell = unit.spell_mut(handle);
                if equipped != *item_id {
                    spell.flags.insert(SpellFlags::SWAPPED);
                    return;
                }
                spell.flags.remove(SpellFlags::SWAPPED);
                apply_equip_cooldown(sim, spell, benched.id, equipped);
            }
            Self::EnchantOnUse { spell } => {
                let equipped = unit.item_in(slot).id;
                apply_equip_cooldown(sim, unit.spell_mut(*spell), benched.id, equipped);
            }
            Self::Custom(callback) => callback(sim, unit, slot),
        }
    }
}

/// A fresh item always starts on cooldown; re-equipping the same item only
/// does so if the cooldown isn't already running.
fn apply_equip_cooldown(sim: &Simulation, spell: &mut Spell, benched: ItemId, equipped: ItemId) {
    if benched != equipped || spell.cd.is_ready(sim) {
        spell.cd.set(sim.current_time() + ON_USE_SWAP_COOLDOWN);
        debug!(spell = %spell.label, ready_at = %spell.cd.ready_at(), "on-use cooldown set by swap");
    }
}

impl fmt::Debug for SwapListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProcRateRebind { ppm, source, .. } => f
                .debug_struct("ProcRateRebind")
                .field("ppm", ppm)
                .field("source", source)
                .finish_non_exhaustive(),
            Self::ItemProcAura { item_id, .. } => {
                f.debug_struct("ItemProcAura").field("item_id", item_id).finish_non_exhaustive()
            }
            Self::EnchantProcAura { effect_id, .. } => f
                .debug_struct("EnchantProcAura")
                .field("effect_id", effect_id)
                .finish_non_exhaustive(),
            Self::ItemOnUse { item_id } => f.debug_struct("ItemOnUse").field("item_id", item_id).finish(),
            Self::EnchantOnUse { spell } => f.debug_struct("EnchantOnUse").field("spell", spell).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
