//! Characters
//!
//! A [`Character`] pairs a unit's combat state with its item-swap state.
//! The two are separate values so swap operations can borrow the unit
//! mutably while reading their own configuration.

mod unit;

pub use unit::{PseudoStats, Unit};

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use gearswap_core::{Simulation, Stats};

use crate::combat::{AutoAttackConfig, DatabaseError, Equipment, ItemDatabase, ItemSlot, ItemSpec};
use crate::swap::{CritMultipliers, ItemSwap, ItemSwapSpec, SwapListener, WeaponOccupancy};

/// Serializable character setup, as found in loadout files
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    pub name: String,
    pub base_stats: Stats,
    pub auto_attacks: AutoAttackConfig,
    /// Worn gear per slot; unlisted slots are empty
    pub gear: BTreeMap<ItemSlot, ItemSpec>,
    /// Alternate gear for swapping
    pub item_swap: ItemSwapSpec,
}

/// A simulated character
#[derive(Debug)]
pub struct Character {
    pub unit: Unit,
    pub item_swap: ItemSwap,
}

impl Character {
    /// Wrap a unit with swapping disabled
    pub fn new(unit: Unit) -> Self {
        Self {
            unit,
            item_swap: ItemSwap::default(),
        }
    }

    /// Build a character, resolving its gear and alternates against `database`
    pub fn from_config(config: &CharacterConfig, database: Arc<ItemDatabase>) -> Result<Self, DatabaseError> {
        let items = config
            .gear
            .iter()
            .map(|(slot, spec)| Ok((*slot, database.new_item(spec)?)))
            .collect::<Result<Vec<_>, DatabaseError>>()?;

        let unit = Unit::new(
            config.name.clone(),
            database,
            Equipment::from_items(items),
            config.base_stats,
            config.auto_attacks,
        );
        info!("Created character '{}' with stats {}", unit.name, unit.stats().flat_string());

        let mut character = Self::new(unit);
        character.enable_item_swap(&config.item_swap)?;
        Ok(character)
    }

    /// Configure swapping from alternate gear, using the currently worn weapons
    pub fn enable_item_swap(&mut self, spec: &ItemSwapSpec) -> Result<(), DatabaseError> {
        let occupancy = WeaponOccupancy {
            has_main_hand: self.unit.has_mh_weapon(),
            has_off_hand: self.unit.has_oh_weapon(),
        };
        let crit = CritMultipliers::from(&self.unit.attack_config);
        self.item_swap = ItemSwap::from_spec(spec, occupancy, crit, &self.unit.database)?;
        Ok(())
    }

    pub fn register_on_item_swap(&mut self, slots: &[ItemSlot], listener: SwapListener) {
        self.item_swap.register_on_item_swap(slots, listener);
    }

    pub fn swap_items(&mut self, sim: &Simulation, slots: &[ItemSlot]) {
        self.item_swap.swap_items(sim, &mut self.unit, slots);
    }

    pub fn calc_stat_changes(&self, slots: &[ItemSlot]) -> Stats {
        self.item_swap.calc_stat_changes(&self.unit, slots)
    }

    /// Prepare for a new encounter
    pub fn reset(&mut self, sim: &Simulation) {
        self.unit.reset();
        self.item_swap.reset_for_encounter(sim, &mut self.unit);
    }

    pub fn done_iteration(&mut self, sim: &Simulation) {
        self.item_swap.end_of_iteration(sim);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use gearswap_core::{Cooldown, SimTime, Stat};

    use crate::combat::{
        ActionId, Aura, HandType, ItemId, ItemTemplate, ProcMask, Spell, WeaponStats, WeaponType,
    };

    const AXE: i32 = 1;
    const BLADE: i32 = 2;
    const GREATSWORD: i32 = 3;
    const DAGGER: i32 = 4;
    const TRINKET_CRIT: i32 = 5;
    const TRINKET_HASTE: i32 = 6;
    const SHIELD: i32 = 7;
    const SHORTBOW: i32 = 8;
    const LONGBOW: i32 = 10;
    const BERSERKING: i32 = 9;

    fn weapon(id: i32, name: &str, hand_type: HandType, weapon_type: WeaponType, speed: f64, ap: f64) -> ItemTemplate {
        ItemTemplate {
            id: ItemId(id),
            name: name.to_string(),
            hand_type,
            weapon_type,
            weapon: Some(WeaponStats::new(100.0, 200.0, speed)),
            stats: Stats::new().with(Stat::AttackPower, ap),
        }
    }

    fn armor(id: i32, name: &str, weapon_type: WeaponType, stats: Stats) -> ItemTemplate {
        ItemTemplate {
            id: ItemId(id),
            name: name.to_string(),
            hand_type: HandType::None,
            weapon_type,
            weapon: None,
            stats,
        }
    }

    fn make_db() -> Arc<ItemDatabase> {
        let mut db = ItemDatabase::new();
        db.add_item(weapon(AXE, "Axe A", HandType::OneHand, WeaponType::Axe, 2.6, 10.0));
        db.add_item(weapon(BLADE, "Blade B", HandType::OneHand, WeaponType::Sword, 1.8, 25.0));
        db.add_item(weapon(GREATSWORD, "Greatsword", HandType::TwoHand, WeaponType::Sword, 3.3, 60.0));
        db.add_item(weapon(DAGGER, "Dagger", HandType::OneHand, WeaponType::Dagger, 1.6, 5.0));
        db.add_item(armor(
            TRINKET_CRIT,
            "Crit Trinket",
            WeaponType::Unknown,
            Stats::new().with(Stat::CritRating, 50.0),
        ));
        db.add_item(armor(
            TRINKET_HASTE,
            "Haste Trinket",
            WeaponType::Unknown,
            Stats::new().with(Stat::HasteRating, 80.0),
        ));
        db.add_item(armor(SHIELD, "Tower Shield", WeaponType::Shield, Stats::new().with(Stat::Stamina, 30.0)));
        db.add_item(weapon(SHORTBOW, "Shortbow", HandType::Ranged, WeaponType::Bow, 2.9, 0.0));
        db.add_item(weapon(LONGBOW, "Longbow", HandType::Ranged, WeaponType::Bow, 3.1, 0.0));
        db.add_enchant(BERSERKING, Stats::new());
        Arc::new(db)
    }

    fn spec(id: i32) -> Option<ItemSpec> {
        Some(ItemSpec::new(id))
    }

    fn make_character(gear: &[(ItemSlot, ItemSpec)], item_swap: ItemSwapSpec) -> Character {
        make_character_with(gear, item_swap, AutoAttackConfig::default())
    }

    fn make_character_with(
        gear: &[(ItemSlot, ItemSpec)],
        item_swap: ItemSwapSpec,
        auto_attacks: AutoAttackConfig,
    ) -> Character {
        let config = CharacterConfig {
            name: "Tester".to_string(),
            base_stats: Stats::new(),
            auto_attacks,
            gear: gear.iter().cloned().collect(),
            item_swap,
        };
        Character::from_config(&config, make_db()).unwrap()
    }

    fn sim_at(millis: i64) -> Simulation {
        let mut sim = Simulation::default();
        sim.advance_to(SimTime::from_millis(millis)).unwrap();
        sim
    }

    fn ap(character: &Character) -> f64 {
        character.unit.stats()[Stat::AttackPower]
    }

    /// Records listener invocations by label
    fn recorder(
        character: &mut Character,
        slot: ItemSlot,
        label: &'static str,
    ) -> Rc<RefCell<Vec<&'static str>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        character.register_on_item_swap(
            &[slot],
            SwapListener::custom(move |_, _, _| sink.borrow_mut().push(label)),
        );
        log
    }

    #[test]
    fn test_attack_power_swap_and_back() {
        let mut character = make_character(
            &[(ItemSlot::MainHand, ItemSpec::new(AXE))],
            ItemSwapSpec {
                main_hand: spec(BLADE),
                ..Default::default()
            },
        );
        assert_eq!(ap(&character), 10.0);
        assert_eq!(character.calc_stat_changes(&[ItemSlot::MainHand])[Stat::AttackPower], 15.0);

        let sim = sim_at(5_000);
        character.swap_items(&sim, &[ItemSlot::MainHand]);
        assert_eq!(character.unit.item_in(ItemSlot::MainHand).id, ItemId(BLADE));
        assert_eq!(character.item_swap.benched_item(ItemSlot::MainHand).id, ItemId(AXE));
        assert_eq!(ap(&character), 25.0);
        assert!(character.item_swap.is_swapped());
        assert!(character.item_swap.is_fully_swapped());

        character.swap_items(&sim, &[ItemSlot::MainHand]);
        assert_eq!(character.unit.item_in(ItemSlot::MainHand).id, ItemId(AXE));
        assert_eq!(character.item_swap.benched_item(ItemSlot::MainHand).id, ItemId(BLADE));
        assert_eq!(ap(&character), 10.0);
        assert!(!character.item_swap.is_swapped());
    }

    #[test]
    fn test_round_trip_restores_state() {
        let mut character = make_character(
            &[
                (ItemSlot::MainHand, ItemSpec::new(AXE)),
                (ItemSlot::OffHand, ItemSpec::new(DAGGER)),
                (ItemSlot::Trinket1, ItemSpec::new(TRINKET_CRIT)),
            ],
            ItemSwapSpec {
                main_hand: spec(BLADE),
                off_hand: spec(AXE),
                trinket_1: spec(TRINKET_HASTE),
                ..Default::default()
            },
        );
        let equipment = character.unit.equipment.clone();
        let stats = character.unit.stats();
        let benched: Vec<_> = ItemSlot::ALL
            .iter()
            .map(|slot| character.item_swap.benched_item(*slot).clone())
            .collect();
        let slots = character.item_swap.enabled_slots().to_vec();
        assert_eq!(slots, vec![ItemSlot::Trinket1, ItemSlot::MainHand, ItemSlot::OffHand]);

        let sim = sim_at(-1_000);
        let first = character.calc_stat_changes(&slots);
        character.swap_items(&sim, &slots);
        assert_ne!(character.unit.equipment, equipment);
        assert_eq!(character.unit.stats(), stats + first);

        let second = character.calc_stat_changes(&slots);
        character.swap_items(&sim, &slots);
        assert!((first + second).is_zero());
        assert_eq!(character.unit.equipment, equipment);
        assert_eq!(character.unit.stats(), stats);
        for (slot, item) in ItemSlot::ALL.iter().zip(&benched) {
            assert_eq!(character.item_swap.benched_item(*slot), item);
        }
    }

    #[test]
    fn test_two_hander_takes_off_hand_along() {
        let mut character = make_character(
            &[
                (ItemSlot::MainHand, ItemSpec::new(AXE)),
                (ItemSlot::OffHand, ItemSpec::new(DAGGER)),
            ],
            ItemSwapSpec {
                main_hand: spec(GREATSWORD),
                ..Default::default()
            },
        );
        assert_eq!(character.item_swap.enabled_slots(), &[ItemSlot::MainHand, ItemSlot::OffHand]);
        assert!(character.unit.auto_attacks.is_dual_wielding);
        let sim = sim_at(1_000);

        // The off hand alone never moves while a two-hander is involved
        let before = character.unit.equipment.clone();
        let stats = character.unit.stats();
        character.swap_items(&sim, &[ItemSlot::OffHand]);
        assert_eq!(character.unit.equipment, before);
        assert_eq!(character.unit.stats(), stats);
        assert!(!character.item_swap.is_swapped());
        assert_eq!(character.unit.gcd.ready_at(), SimTime::from_millis(2_500));

        character.swap_items(&sim, &[ItemSlot::MainHand]);
        assert_eq!(character.unit.item_in(ItemSlot::MainHand).id, ItemId(GREATSWORD));
        assert!(character.unit.item_in(ItemSlot::OffHand).is_empty());
        assert_eq!(character.item_swap.benched_item(ItemSlot::OffHand).id, ItemId(DAGGER));
        assert!(!character.unit.auto_attacks.is_dual_wielding);
        assert_eq!(ap(&character), 60.0);
        assert!(character.item_swap.is_fully_swapped());

        character.swap_items(&sim, &[ItemSlot::MainHand]);
        assert_eq!(character.unit.equipment, before);
        assert!(character.unit.auto_attacks.is_dual_wielding);
        assert_eq!(ap(&character), 15.0);
    }

    #[test]
    fn test_worn_two_hander_swaps_to_dual_wield() {
        let mut character = make_character(
            &[(ItemSlot::MainHand, ItemSpec::new(GREATSWORD))],
            ItemSwapSpec {
                main_hand: spec(AXE),
                off_hand: spec(DAGGER),
                ..Default::default()
            },
        );
        let sim = sim_at(1_000);
        character.swap_items(&sim, &[ItemSlot::MainHand]);
        assert_eq!(character.unit.item_in(ItemSlot::MainHand).id, ItemId(AXE));
        assert_eq!(character.unit.item_in(ItemSlot::OffHand).id, ItemId(DAGGER));
        assert!(character.unit.auto_attacks.is_dual_wielding);
        assert!(character.item_swap.is_fully_swapped());
    }

    #[test]
    fn test_disabled_swap_is_inert() {
        let mut character = make_character(&[(ItemSlot::MainHand, ItemSpec::new(AXE))], ItemSwapSpec::default());
        assert!(!character.item_swap.is_enabled());

        let log = recorder(&mut character, ItemSlot::MainHand, "never");
        assert_eq!(character.item_swap.listener_count(ItemSlot::MainHand), 0);

        let equipment = character.unit.equipment.clone();
        let stats = character.unit.stats();
        let sim = sim_at(1_000);
        character.unit.gcd.set(SimTime::from_millis(1_200));

        character.swap_items(&sim, &[ItemSlot::MainHand]);
        character.item_swap.reset_for_encounter(&sim, &mut character.unit);
        character.done_iteration(&sim);

        assert_eq!(character.unit.equipment, equipment);
        assert_eq!(character.unit.stats(), stats);
        assert_eq!(character.unit.gcd.ready_at(), SimTime::from_millis(1_200));
        assert!(character.calc_stat_changes(&ItemSlot::ALL).is_zero());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_trinkets_only_swap_before_the_pull() {
        let gear = [
            (ItemSlot::MainHand, ItemSpec::new(AXE)),
            (ItemSlot::Trinket1, ItemSpec::new(TRINKET_CRIT)),
        ];
        let alternates = ItemSwapSpec {
            main_hand: spec(BLADE),
            trinket_1: spec(TRINKET_HASTE),
            ..Default::default()
        };
        let slots = [ItemSlot::Trinket1, ItemSlot::MainHand];

        let mut prepull = make_character(&gear, alternates.clone());
        prepull.swap_items(&sim_at(-1_000), &slots);
        assert_eq!(prepull.unit.item_in(ItemSlot::Trinket1).id, ItemId(TRINKET_HASTE));
        assert_eq!(prepull.unit.item_in(ItemSlot::MainHand).id, ItemId(BLADE));
        assert!(prepull.item_swap.is_fully_swapped());

        let mut in_combat = make_character(&gear, alternates);
        in_combat.swap_items(&sim_at(0), &slots);
        assert_eq!(in_combat.unit.item_in(ItemSlot::Trinket1).id, ItemId(TRINKET_CRIT));
        assert_eq!(in_combat.unit.item_in(ItemSlot::MainHand).id, ItemId(BLADE));
        assert!(in_combat.item_swap.is_swapped());
        assert!(!in_combat.item_swap.is_fully_swapped());
        assert_eq!(in_combat.item_swap.swapped_slots(), crate::swap::SlotMask::MAIN_HAND);
        assert_eq!(in_combat.unit.stats()[Stat::CritRating], 50.0);
    }

    #[test]
    fn test_filtered_trinket_request_still_starts_global_delay() {
        let mut character = make_character(
            &[(ItemSlot::Trinket1, ItemSpec::new(TRINKET_CRIT))],
            ItemSwapSpec {
                trinket_1: spec(TRINKET_HASTE),
                ..Default::default()
            },
        );
        let stats = character.unit.stats();
        let sim = sim_at(3_000);
        character.swap_items(&sim, &[ItemSlot::Trinket1]);
        assert_eq!(character.unit.item_in(ItemSlot::Trinket1).id, ItemId(TRINKET_CRIT));
        assert_eq!(character.unit.stats(), stats);
        assert!(!character.item_swap.is_swapped());
        assert_eq!(character.unit.gcd.ready_at(), SimTime::from_millis(4_500));
    }

    #[test]
    fn test_ranged_swaps_only_before_the_pull() {
        let hunter = AutoAttackConfig {
            ranged: true,
            ranged_crit_multiplier: 2.5,
            ..Default::default()
        };
        let gear = [(ItemSlot::Ranged, ItemSpec::new(SHORTBOW))];
        let alternates = ItemSwapSpec {
            ranged: spec(LONGBOW),
            ..Default::default()
        };

        let mut prepull = make_character_with(&gear, alternates.clone(), hunter);
        assert_eq!(prepull.item_swap.enabled_slots(), &[ItemSlot::Ranged]);
        assert_eq!(prepull.unit.auto_attacks.ranged().swing_speed, 2.9);

        prepull.swap_items(&sim_at(-1_000), &[ItemSlot::Ranged]);
        assert_eq!(prepull.unit.item_in(ItemSlot::Ranged).id, ItemId(LONGBOW));
        let ranged = prepull.unit.auto_attacks.ranged();
        assert_eq!(ranged.swing_speed, 3.1);
        assert_eq!(ranged.normalized_swing_speed, 2.8);
        assert_eq!(ranged.crit_multiplier, 2.5);
        assert!(prepull.item_swap.is_fully_swapped());

        let mut in_combat = make_character_with(&gear, alternates, hunter);
        in_combat.swap_items(&sim_at(5_000), &[ItemSlot::Ranged]);
        assert_eq!(in_combat.unit.item_in(ItemSlot::Ranged).id, ItemId(SHORTBOW));
        assert_eq!(in_combat.unit.auto_attacks.ranged().swing_speed, 2.9);
        assert!(!in_combat.item_swap.is_swapped());
    }

    #[test]
    fn test_ranged_weapon_not_rebuilt_without_ranged_attacks() {
        let mut character = make_character(
            &[(ItemSlot::Ranged, ItemSpec::new(SHORTBOW))],
            ItemSwapSpec {
                ranged: spec(LONGBOW),
                ..Default::default()
            },
        );
        character.swap_items(&sim_at(-1_000), &[ItemSlot::Ranged]);
        assert_eq!(character.unit.item_in(ItemSlot::Ranged).id, ItemId(LONGBOW));
        assert!(!character.unit.auto_attacks.ranged().can_swing());
    }

    #[test]
    fn test_melee_weapons_not_rebuilt_without_melee_attacks() {
        let caster = AutoAttackConfig {
            melee: false,
            ..Default::default()
        };
        let mut character = make_character_with(
            &[(ItemSlot::MainHand, ItemSpec::new(AXE))],
            ItemSwapSpec {
                main_hand: spec(BLADE),
                ..Default::default()
            },
            caster,
        );
        let idle = *character.unit.auto_attacks.mh();
        assert!(!idle.can_swing());

        character.swap_items(&sim_at(4_000), &[ItemSlot::MainHand]);
        assert_eq!(character.unit.item_in(ItemSlot::MainHand).id, ItemId(BLADE));
        assert_eq!(ap(&character), 25.0);
        assert_eq!(*character.unit.auto_attacks.mh(), idle);
        assert!(!character.unit.auto_attacks.is_dual_wielding);
        assert_eq!(character.unit.auto_attacks.next_mh_swing(), SimTime::NEVER);
    }

    #[test]
    fn test_listeners_fire_in_registration_order() {
        let mut character = make_character(
            &[(ItemSlot::MainHand, ItemSpec::new(AXE))],
            ItemSwapSpec {
                main_hand: spec(BLADE),
                ..Default::default()
            },
        );
        let log = Rc::new(RefCell::new(Vec::new()));
        for label in ["L1", "L2"] {
            let sink = Rc::clone(&log);
            character.register_on_item_swap(
                &[ItemSlot::MainHand],
                SwapListener::custom(move |_, unit, slot| {
                    // The new item is already worn and its weapon rebuilt
                    assert_eq!(unit.item_in(slot).id, ItemId(BLADE));
                    assert_eq!(unit.auto_attacks.mh().swing_speed, 1.8);
                    sink.borrow_mut().push(label);
                }),
            );
        }
        assert_eq!(character.item_swap.listener_count(ItemSlot::MainHand), 2);

        character.swap_items(&sim_at(500), &[ItemSlot::MainHand]);
        assert_eq!(*log.borrow(), vec!["L1", "L2"]);
    }

    #[test]
    fn test_bundled_off_hand_listeners_follow_main_hand() {
        let mut character = make_character(
            &[
                (ItemSlot::MainHand, ItemSpec::new(AXE)),
                (ItemSlot::OffHand, ItemSpec::new(DAGGER)),
            ],
            ItemSwapSpec {
                main_hand: spec(GREATSWORD),
                ..Default::default()
            },
        );
        let log = Rc::new(RefCell::new(Vec::new()));
        for (slot, label) in [(ItemSlot::OffHand, "oh"), (ItemSlot::MainHand, "mh")] {
            let sink = Rc::clone(&log);
            character.register_on_item_swap(
                &[slot],
                SwapListener::custom(move |_, _, _| sink.borrow_mut().push(label)),
            );
        }
        character.swap_items(&sim_at(500), &[ItemSlot::OffHand, ItemSlot::MainHand]);
        assert_eq!(*log.borrow(), vec!["mh", "oh"]);
    }

    #[test]
    fn test_swap_starts_global_delay_only_when_idle() {
        let alternates = ItemSwapSpec {
            main_hand: spec(BLADE),
            ..Default::default()
        };
        let gear = [(ItemSlot::MainHand, ItemSpec::new(AXE))];
        let sim = sim_at(1_000);

        let mut idle = make_character(&gear, alternates.clone());
        idle.swap_items(&sim, &[ItemSlot::MainHand]);
        assert_eq!(idle.unit.gcd.ready_at(), SimTime::from_millis(2_500));

        let mut busy = make_character(&gear, alternates);
        busy.unit.gcd.set(SimTime::from_millis(1_800));
        busy.swap_items(&sim, &[ItemSlot::MainHand]);
        assert_eq!(busy.unit.gcd.ready_at(), SimTime::from_millis(1_800));
        assert_eq!(busy.unit.item_in(ItemSlot::MainHand).id, ItemId(BLADE));
    }

    #[test]
    fn test_melee_swing_restarts_mid_fight() {
        let gear = [
            (ItemSlot::MainHand, ItemSpec::new(AXE)),
            (ItemSlot::OffHand, ItemSpec::new(DAGGER)),
        ];
        let alternates = ItemSwapSpec {
            main_hand: spec(BLADE),
            ..Default::default()
        };

        let mut character = make_character(&gear, alternates.clone());
        character.unit.auto_attacks.start_melee(SimTime::ZERO);
        character.swap_items(&sim_at(10_000), &[ItemSlot::MainHand]);
        assert_eq!(character.unit.auto_attacks.next_mh_swing(), SimTime::from_millis(11_800));
        assert_eq!(character.unit.auto_attacks.next_oh_swing(), SimTime::from_millis(11_600));

        // Swapping exactly at the pull leaves the swing timer alone
        let mut at_pull = make_character(&gear, alternates);
        at_pull.swap_items(&sim_at(0), &[ItemSlot::MainHand]);
        assert_eq!(at_pull.unit.item_in(ItemSlot::MainHand).id, ItemId(BLADE));
        assert_eq!(at_pull.unit.auto_attacks.next_mh_swing(), SimTime::NEVER);
    }

    #[test]
    fn test_off_hand_rebind_updates_block_and_dual_wield() {
        let mut character = make_character(
            &[
                (ItemSlot::MainHand, ItemSpec::new(AXE)),
                (ItemSlot::OffHand, ItemSpec::new(SHIELD)),
            ],
            ItemSwapSpec {
                main_hand: spec(BLADE),
                off_hand: spec(DAGGER),
                ..Default::default()
            },
        );
        assert!(character.unit.pseudo_stats.can_block);
        assert!(!character.unit.auto_attacks.is_dual_wielding);

        character.swap_items(&sim_at(2_000), &[ItemSlot::MainHand, ItemSlot::OffHand]);
        assert!(!character.unit.pseudo_stats.can_block);
        assert!(character.unit.auto_attacks.is_dual_wielding);
        assert_eq!(character.unit.auto_attacks.mh().swing_speed, 1.8);
        assert_eq!(character.unit.auto_attacks.oh().swing_speed, 1.6);
        assert_eq!(character.unit.auto_attacks.oh().normalized_swing_speed, 1.7);
        assert_eq!(character.unit.auto_attacks.mh().crit_multiplier, 2.0);
    }

    #[test]
    fn test_reset_restores_baseline_and_refires_listeners() {
        let mut character = make_character(
            &[
                (ItemSlot::MainHand, ItemSpec::new(AXE)),
                (ItemSlot::Trinket1, ItemSpec::new(TRINKET_CRIT)),
            ],
            ItemSwapSpec {
                main_hand: spec(BLADE),
                trinket_1: spec(TRINKET_HASTE),
                ..Default::default()
            },
        );
        let log = recorder(&mut character, ItemSlot::MainHand, "mh");
        let equipment = character.unit.equipment.clone();
        let stats = character.unit.stats();

        let mut sim = sim_at(1_000);
        character.swap_items(&sim, &[ItemSlot::MainHand]);
        assert_eq!(log.borrow().len(), 1);

        sim.reset();
        character.reset(&sim);
        assert_eq!(character.unit.equipment, equipment);
        assert_eq!(character.unit.stats(), stats);
        assert!(!character.item_swap.is_swapped());
        assert_eq!(character.unit.gcd.ready_at(), SimTime::UNSET);
        // once for the restore, once for the refresh
        assert_eq!(log.borrow().len(), 3);

        // An unswapped reset still refreshes every slot
        character.reset(&sim);
        assert_eq!(log.borrow().len(), 4);
        assert_eq!(character.unit.equipment, equipment);
    }

    #[test]
    fn test_item_on_use_cooldowns() {
        let mut character = make_character(
            &[(ItemSlot::Trinket1, ItemSpec::new(TRINKET_CRIT))],
            ItemSwapSpec {
                trinket_1: spec(TRINKET_HASTE),
                ..Default::default()
            },
        );
        let two_minutes = Cooldown::new(Duration::from_secs(120));
        let crit = character.unit.register_spell(Spell::new(
            ActionId::Item(ItemId(TRINKET_CRIT)),
            "Crit Trinket",
            two_minutes,
        ));
        let haste = character.unit.register_spell(Spell::new(
            ActionId::Item(ItemId(TRINKET_HASTE)),
            "Haste Trinket",
            two_minutes,
        ));
        let buff = character
            .unit
            .register_aura(Aura::new("Crit Trinket").with_action(ActionId::Item(ItemId(TRINKET_CRIT))));
        character.item_swap.register_item_on_use(ItemId(TRINKET_CRIT), &[ItemSlot::Trinket1]);
        character.item_swap.register_item_on_use(ItemId(TRINKET_HASTE), &[ItemSlot::Trinket1]);

        let sim = sim_at(-1_500);
        character.unit.aura_mut(buff).activate(&sim);
        character.swap_items(&sim, &[ItemSlot::Trinket1]);

        assert!(!character.unit.aura(buff).is_active());
        assert!(character.unit.spell(crit).is_swapped_out());
        assert!(!character.unit.spell(haste).is_swapped_out());
        assert_eq!(character.unit.spell(haste).cd.ready_at(), SimTime::from_millis(28_500));

        // Swapping back re-arms the crit trinket
        let later = sim_at(40_000);
        character.item_swap.reset_for_encounter(&later, &mut character.unit);
        assert!(!character.unit.spell(crit).is_swapped_out());
        assert!(character.unit.spell(haste).is_swapped_out());
        assert_eq!(character.unit.spell(crit).cd.ready_at(), SimTime::from_millis(70_000));
    }

    #[test]
    fn test_same_item_refresh_keeps_running_cooldown() {
        let mut character = make_character(
            &[(ItemSlot::Trinket1, ItemSpec::new(TRINKET_CRIT))],
            ItemSwapSpec {
                trinket_1: spec(TRINKET_CRIT),
                ..Default::default()
            },
        );
        let crit = character.unit.register_spell(Spell::new(
            ActionId::Item(ItemId(TRINKET_CRIT)),
            "Crit Trinket",
            Cooldown::new(Duration::from_secs(120)),
        ));
        character.item_swap.register_item_on_use(ItemId(TRINKET_CRIT), &[ItemSlot::Trinket1]);

        let sim = sim_at(0);
        character.unit.spell_mut(crit).cd.use_now(&sim);
        character.item_swap.reset_for_encounter(&sim, &mut character.unit);
        assert_eq!(character.unit.spell(crit).cd.ready_at(), SimTime::from_millis(120_000));

        // With the cooldown idle, a refresh starts the swap cooldown
        character.unit.spell_mut(crit).cd.reset();
        character.item_swap.reset_for_encounter(&sim, &mut character.unit);
        assert_eq!(character.unit.spell(crit).cd.ready_at(), SimTime::from_millis(30_000));
    }

    #[test]
    fn test_enchant_proc_rebind_follows_weapon() {
        let mut character = make_character(
            &[(
                ItemSlot::MainHand,
                ItemSpec {
                    id: ItemId(AXE),
                    enchant: BERSERKING,
                    ..Default::default()
                },
            )],
            ItemSwapSpec {
                main_hand: spec(BLADE),
                ..Default::default()
            },
        );
        let unit = &mut character.unit;
        let mask = unit.proc_mask_for_enchant(BERSERKING);
        assert_eq!(mask, ProcMask::MELEE_MH);
        let manager = unit.register_ppm_manager(unit.auto_attacks.new_ppm_manager(1.0, mask));
        let proc_aura = unit.register_aura(Aura::new("Berserking"));
        let effect_aura = unit.register_aura(Aura::new("Berserking Enchant"));
        character
            .item_swap
            .register_enchant_ppm_rebind(BERSERKING, 1.0, manager, proc_aura);
        character.item_swap.register_enchant_proc_aura(
            BERSERKING,
            effect_aura,
            &[ItemSlot::MainHand, ItemSlot::OffHand],
        );

        let sim = sim_at(1_000);
        character.unit.aura_mut(proc_aura).activate(&sim);
        character.unit.aura_mut(effect_aura).activate(&sim);

        character.swap_items(&sim, &[ItemSlot::MainHand]);
        assert!(!character.unit.aura(proc_aura).is_active());
        assert!(!character.unit.aura(effect_aura).is_active());
        assert_eq!(character.unit.ppm_manager(manager).chance(ProcMask::MELEE), 0.0);

        character.swap_items(&sim, &[ItemSlot::MainHand]);
        assert!(character.unit.aura(proc_aura).is_active());
        assert!(character.unit.aura(effect_aura).is_active());
        let chance = character.unit.ppm_manager(manager).chance(ProcMask::MELEE_MH);
        assert!((chance - 2.6 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_fixed_mask_rebind_tracks_swing_speed() {
        let mut character = make_character(
            &[(ItemSlot::MainHand, ItemSpec::new(AXE))],
            ItemSwapSpec {
                main_hand: spec(BLADE),
                ..Default::default()
            },
        );
        let manager = character
            .unit
            .register_ppm_manager(character.unit.auto_attacks.new_ppm_manager(3.0, ProcMask::MELEE_MH));
        character.item_swap.register_ppm_rebind(ProcMask::MELEE_MH, 3.0, manager);

        character.swap_items(&sim_at(1_000), &[ItemSlot::MainHand]);
        let chance = character.unit.ppm_manager(manager).chance(ProcMask::MELEE_MH);
        assert!((chance - 3.0 * 1.8 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_item_proc_aura_tracks_worn_trinket() {
        let mut character = make_character(
            &[(ItemSlot::Trinket1, ItemSpec::new(TRINKET_CRIT))],
            ItemSwapSpec {
                trinket_1: spec(TRINKET_HASTE),
                ..Default::default()
            },
        );
        let aura = character
            .unit
            .register_aura(Aura::new("Crit Proc").with_icd(Cooldown::new(Duration::from_secs(45))));
        character
            .item_swap
            .register_item_proc_aura(ItemId(TRINKET_CRIT), aura, &[ItemSlot::Trinket1]);

        let sim = sim_at(-2_000);
        character.unit.aura_mut(aura).activate(&sim);

        character.swap_items(&sim, &[ItemSlot::Trinket1]);
        assert!(!character.unit.aura(aura).is_active());

        character.swap_items(&sim, &[ItemSlot::Trinket1]);
        let aura = character.unit.aura(aura);
        assert!(aura.is_active());
        assert_eq!(aura.activations(), 2);
        assert_eq!(aura.icd.map(|icd| icd.ready_at()), Some(SimTime::from_millis(43_000)));
    }

    #[test]
    fn test_enchant_on_use_cooldown() {
        let mut character = make_character(
            &[(ItemSlot::Hands, ItemSpec::new(TRINKET_CRIT))],
            ItemSwapSpec {
                hands: spec(TRINKET_HASTE),
                ..Default::default()
            },
        );
        let rockets = character.unit.register_spell(Spell::new(
            ActionId::Spell(82174),
            "Synapse Springs",
            Cooldown::new(Duration::from_secs(60)),
        ));
        character.item_swap.register_enchant_on_use(rockets, &[ItemSlot::Hands]);

        character.swap_items(&sim_at(-1_000), &[ItemSlot::Hands]);
        assert_eq!(character.unit.spell(rockets).cd.ready_at(), SimTime::from_millis(29_000));
    }

    #[test]
    fn test_from_config_rejects_unknown_gear() {
        let config = CharacterConfig {
            gear: [(ItemSlot::Head, ItemSpec::new(999))].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(
            Character::from_config(&config, make_db()).err(),
            Some(DatabaseError::UnknownItem(999))
        );
    }
}
