//! Swap configuration and enablement
//!
//! Decides which slots may be exchanged from the supplied alternate gear and
//! seeds the benched items.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::combat::{AutoAttackConfig, DatabaseError, Equipment, ItemDatabase, ItemSlot, ItemSpec};

use super::{ItemSwap, ListenerRegistry, SlotMask};

/// Alternate gear, one optional entry per swappable slot.
///
/// A missing entry or a zero id means "no alternate for this slot".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemSwapSpec {
    pub hands: Option<ItemSpec>,
    pub main_hand: Option<ItemSpec>,
    pub off_hand: Option<ItemSpec>,
    pub ranged: Option<ItemSpec>,
    pub trinket_1: Option<ItemSpec>,
    pub trinket_2: Option<ItemSpec>,
}

impl ItemSwapSpec {
    /// Entries paired with their slot
    pub fn entries(&self) -> [(ItemSlot, Option<&ItemSpec>); 6] {
        [
            (ItemSlot::Hands, self.hands.as_ref()),
            (ItemSlot::MainHand, self.main_hand.as_ref()),
            (ItemSlot::OffHand, self.off_hand.as_ref()),
            (ItemSlot::Ranged, self.ranged.as_ref()),
            (ItemSlot::Trinket1, self.trinket_1.as_ref()),
            (ItemSlot::Trinket2, self.trinket_2.as_ref()),
        ]
    }
}

/// Which weapon slots the character currently fills
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeaponOccupancy {
    pub has_main_hand: bool,
    pub has_off_hand: bool,
}

/// Crit multipliers used when rebuilding swapped weapons
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CritMultipliers {
    pub main_hand: f64,
    pub off_hand: f64,
    pub ranged: f64,
}

impl Default for CritMultipliers {
    fn default() -> Self {
        Self::from(&AutoAttackConfig::default())
    }
}

impl From<&AutoAttackConfig> for CritMultipliers {
    fn from(config: &AutoAttackConfig) -> Self {
        Self {
            main_hand: config.mh_crit_multiplier,
            off_hand: config.oh_crit_multiplier,
            ranged: config.ranged_crit_multiplier,
        }
    }
}

impl ItemSwap {
    /// Build the swap state from alternate gear.
    ///
    /// Returns a disabled swap when no slot ends up enabled.
    pub fn from_spec(
        spec: &ItemSwapSpec,
        occupancy: WeaponOccupancy,
        crit: CritMultipliers,
        database: &ItemDatabase,
    ) -> Result<Self, DatabaseError> {
        let mut benched = Equipment::new();
        for (slot, entry) in spec.entries() {
            if let Some(entry) = entry {
                benched[slot] = database.new_item(entry)?;
            }
        }

        let has = |slot: ItemSlot| !benched[slot].is_empty();
        let has_2h = benched[ItemSlot::MainHand].is_two_handed();

        let mut slots = Vec::new();
        if has(ItemSlot::Hands) {
            slots.push(ItemSlot::Hands);
        }
        // A lone off-hand alternate next to a worn main hand drags the main hand along
        if has(ItemSlot::MainHand) || (has(ItemSlot::OffHand) && occupancy.has_main_hand) {
            slots.push(ItemSlot::MainHand);
        }
        // A two-handed alternate displaces a worn off hand
        if has(ItemSlot::OffHand) || (has_2h && occupancy.has_off_hand) {
            slots.push(ItemSlot::OffHand);
        }
        if has(ItemSlot::Ranged) {
            slots.push(ItemSlot::Ranged);
        }
        if has(ItemSlot::Trinket1) {
            slots.push(ItemSlot::Trinket1);
        }
        if has(ItemSlot::Trinket2) {
            slots.push(ItemSlot::Trinket2);
        }

        slots.sort();

        if slots.is_empty() {
            info!("No alternate gear supplied, item swap disabled");
            return Ok(Self::default());
        }

        info!(
            "Item swap enabled for {:?}",
            slots.iter().map(|s| s.name()).collect::<Vec<_>>()
        );

        Ok(Self {
            crit,
            slots,
            benched,
            swapped: SlotMask::empty(),
            listeners: ListenerRegistry::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{HandType, ItemId, ItemTemplate, WeaponStats, WeaponType};
    use gearswap_core::Stats;

    fn template(id: i32, hand_type: HandType) -> ItemTemplate {
        ItemTemplate {
            id: ItemId(id),
            name: format!("Item {}", id),
            hand_type,
            weapon_type: if hand_type == HandType::None {
                WeaponType::Unknown
            } else {
                WeaponType::Sword
            },
            weapon: (hand_type != HandType::None).then(|| WeaponStats::new(100.0, 200.0, 2.6)),
            stats: Stats::new(),
        }
    }

    fn make_db() -> ItemDatabase {
        let mut db = ItemDatabase::new();
        db.add_item(template(1, HandType::OneHand));
        db.add_item(template(2, HandType::TwoHand));
        db.add_item(template(3, HandType::None));
        db
    }

    fn enable(spec: ItemSwapSpec, occupancy: WeaponOccupancy) -> ItemSwap {
        ItemSwap::from_spec(&spec, occupancy, CritMultipliers::default(), &make_db()).unwrap()
    }

    #[test]
    fn test_no_alternates_disables() {
        let swap = enable(ItemSwapSpec::default(), WeaponOccupancy::default());
        assert!(!swap.is_enabled());
        assert!(swap.enabled_slots().is_empty());
    }

    #[test]
    fn test_zero_id_counts_as_absent() {
        let spec = ItemSwapSpec {
            trinket_1: Some(ItemSpec::new(0)),
            ..Default::default()
        };
        assert!(!enable(spec, WeaponOccupancy::default()).is_enabled());
    }

    #[test]
    fn test_trinkets_enable_their_slots() {
        let spec = ItemSwapSpec {
            trinket_1: Some(ItemSpec::new(3)),
            trinket_2: Some(ItemSpec::new(3)),
            ..Default::default()
        };
        let swap = enable(spec, WeaponOccupancy::default());
        assert_eq!(swap.enabled_slots(), &[ItemSlot::Trinket1, ItemSlot::Trinket2]);
        assert_eq!(swap.benched_item(ItemSlot::Trinket1).id, ItemId(3));
    }

    #[test]
    fn test_off_hand_alternate_pulls_in_main_hand() {
        let spec = ItemSwapSpec {
            off_hand: Some(ItemSpec::new(1)),
            ..Default::default()
        };
        let worn_mh = WeaponOccupancy {
            has_main_hand: true,
            has_off_hand: false,
        };
        let swap = enable(spec.clone(), worn_mh);
        assert_eq!(swap.enabled_slots(), &[ItemSlot::MainHand, ItemSlot::OffHand]);

        let swap = enable(spec, WeaponOccupancy::default());
        assert_eq!(swap.enabled_slots(), &[ItemSlot::OffHand]);
    }

    #[test]
    fn test_two_hander_displaces_worn_off_hand() {
        let spec = ItemSwapSpec {
            main_hand: Some(ItemSpec::new(2)),
            ..Default::default()
        };
        let dual_wield = WeaponOccupancy {
            has_main_hand: true,
            has_off_hand: true,
        };
        let swap = enable(spec.clone(), dual_wield);
        assert_eq!(swap.enabled_slots(), &[ItemSlot::MainHand, ItemSlot::OffHand]);

        let swap = enable(spec, WeaponOccupancy::default());
        assert_eq!(swap.enabled_slots(), &[ItemSlot::MainHand]);
    }

    #[test]
    fn test_unknown_item_is_an_error() {
        let spec = ItemSwapSpec {
            hands: Some(ItemSpec::new(404)),
            ..Default::default()
        };
        let result = ItemSwap::from_spec(
            &spec,
            WeaponOccupancy::default(),
            CritMultipliers::default(),
            &make_db(),
        );
        assert_eq!(result.err(), Some(DatabaseError::UnknownItem(404)));
    }
}
