//! Weapon rebinding
//!
//! Rebuilds the auto-attack weapon for a weapon slot once its item changed.

use tracing::debug;

use crate::character::Unit;
use crate::combat::ItemSlot;

use super::CritMultipliers;

/// Rebuild the weapon derived from `slot`. Non-weapon slots are ignored.
pub(crate) fn rebind_weapon(unit: &mut Unit, slot: ItemSlot, crit: CritMultipliers) {
    match slot {
        ItemSlot::MainHand if unit.auto_attacks.auto_swing_melee => {
            let weapon = unit.weapon_from_main_hand(crit.main_hand);
            unit.auto_attacks.set_mh(weapon);
        }
        ItemSlot::OffHand if unit.auto_attacks.auto_swing_melee => {
            let weapon = unit.weapon_from_off_hand(crit.off_hand);
            unit.auto_attacks.is_dual_wielding = weapon.can_swing();
            unit.auto_attacks.set_oh(weapon);
            unit.pseudo_stats.can_block = unit.off_hand().is_shield();
        }
        ItemSlot::Ranged if unit.auto_attacks.auto_swing_ranged => {
            let weapon = unit.weapon_from_ranged(crit.ranged);
            unit.auto_attacks.set_ranged(weapon);
        }
        _ => return,
    }
    debug!(unit = %unit.name, slot = slot.name(), "weapon rebound");
}
