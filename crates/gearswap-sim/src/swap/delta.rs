//! Stat delta preview

use gearswap_core::Stats;

use crate::character::Unit;
use crate::combat::ItemSlot;

use super::{ItemSwap, SlotMask};

impl ItemSwap {
    /// Net stat change of exchanging `slots` right now: benched item stats
    /// minus worn item stats, summed. Slots that are not swappable are
    /// ignored; a disabled swap yields zero.
    pub fn calc_stat_changes(&self, unit: &Unit, slots: &[ItemSlot]) -> Stats {
        let requested = SlotMask::from_slots(slots.iter().copied()) & self.enabled_mask();
        requested.slots().fold(Stats::new(), |acc, slot| {
            acc + unit.item_stats(&self.benched[slot]) - unit.item_stats(unit.item_in(slot))
        })
    }
}
