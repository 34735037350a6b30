//! Unit combat state
//!
//! Everything the swap subsystem reads or mutates on a character apart from
//! the swap state itself: worn gear, running stat totals, auto-attacks,
//! timers, auras, spells and proc managers.

use std::sync::Arc;

use tracing::debug;

use gearswap_core::{SimTime, Simulation, Stats, Timer};

use crate::combat::{
    ActionId, Aura, AuraHandle, AutoAttackConfig, AutoAttacks, Equipment, Item, ItemDatabase,
    ItemId, ItemSlot, PpmHandle, PpmManager, ProcMask, Spell, SpellHandle, Weapon,
};

/// Flags derived from gear rather than stored on it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PseudoStats {
    pub can_block: bool,
}

/// A unit's mutable combat state
#[derive(Debug)]
pub struct Unit {
    pub name: String,
    pub database: Arc<ItemDatabase>,
    pub equipment: Equipment,
    pub auto_attacks: AutoAttacks,
    pub pseudo_stats: PseudoStats,
    /// Global action delay
    pub gcd: Timer,
    /// Crit multipliers used when rebuilding weapons
    pub attack_config: AutoAttackConfig,
    base_stats: Stats,
    stats: Stats,
    auras: Vec<Aura>,
    spells: Vec<Spell>,
    ppm_managers: Vec<PpmManager>,
}

impl Unit {
    /// Create a unit wearing `equipment`, with weapons built from it
    pub fn new(
        name: impl Into<String>,
        database: Arc<ItemDatabase>,
        equipment: Equipment,
        base_stats: Stats,
        attack_config: AutoAttackConfig,
    ) -> Self {
        let mut unit = Self {
            name: name.into(),
            database,
            equipment,
            auto_attacks: AutoAttacks::new(attack_config.melee, attack_config.ranged),
            pseudo_stats: PseudoStats::default(),
            gcd: Timer::default(),
            attack_config,
            base_stats,
            stats: Stats::new(),
            auras: Vec::new(),
            spells: Vec::new(),
            ppm_managers: Vec::new(),
        };
        unit.stats = unit.base_stats + unit.equipment_stats();
        unit.rebuild_weapons();
        unit
    }

    /// Running stat totals
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Stats the item contributes while worn
    pub fn item_stats(&self, item: &Item) -> Stats {
        self.database.item_equipment_stats(item)
    }

    /// Sum of all worn item stats
    pub fn equipment_stats(&self) -> Stats {
        self.equipment
            .iter()
            .map(|(_, item)| self.item_stats(item))
            .fold(Stats::new(), |acc, s| acc + s)
    }

    /// Apply a stat change mid-encounter
    pub fn add_stats_dynamic(&mut self, sim: &Simulation, delta: Stats) {
        self.stats += delta;
        debug!(unit = %self.name, time = %sim.current_time(), delta = %delta.flat_string(), "stats changed");
    }

    pub fn has_mh_weapon(&self) -> bool {
        self.equipment.has_mh_weapon()
    }

    pub fn has_oh_weapon(&self) -> bool {
        self.equipment.has_oh_weapon()
    }

    pub fn off_hand(&self) -> &Item {
        self.equipment.off_hand()
    }

    pub fn weapon_from_main_hand(&self, crit_multiplier: f64) -> Weapon {
        Weapon::from_item(self.equipment.main_hand(), crit_multiplier)
    }

    pub fn weapon_from_off_hand(&self, crit_multiplier: f64) -> Weapon {
        Weapon::from_item(self.equipment.off_hand(), crit_multiplier)
    }

    pub fn weapon_from_ranged(&self, crit_multiplier: f64) -> Weapon {
        Weapon::from_item(self.equipment.ranged(), crit_multiplier)
    }

    fn rebuild_weapons(&mut self) {
        let config = self.attack_config;
        if self.auto_attacks.auto_swing_melee {
            let mh = self.weapon_from_main_hand(config.mh_crit_multiplier);
            let oh = self.weapon_from_off_hand(config.oh_crit_multiplier);
            self.auto_attacks.is_dual_wielding = oh.can_swing();
            self.auto_attacks.set_mh(mh);
            self.auto_attacks.set_oh(oh);
        }
        if self.auto_attacks.auto_swing_ranged {
            let ranged = self.weapon_from_ranged(config.ranged_crit_multiplier);
            self.auto_attacks.set_ranged(ranged);
        }
        self.pseudo_stats.can_block = self.off_hand().is_shield();
    }

    /// Start a global delay ending at `ready_at`
    pub fn set_gcd_timer(&mut self, sim: &Simulation, ready_at: SimTime) {
        self.gcd.set(ready_at);
        debug!(unit = %self.name, time = %sim.current_time(), ready_at = %ready_at, "global delay started");
    }

    pub fn register_aura(&mut self, aura: Aura) -> AuraHandle {
        self.auras.push(aura);
        AuraHandle(self.auras.len() - 1)
    }

    pub fn aura(&self, handle: AuraHandle) -> &Aura {
        &self.auras[handle.0]
    }

    pub fn aura_mut(&mut self, handle: AuraHandle) -> &mut Aura {
        &mut self.auras[handle.0]
    }

    /// The aura tied to an action, if one was registered
    pub fn aura_by_action(&self, action_id: ActionId) -> Option<AuraHandle> {
        self.auras
            .iter()
            .position(|a| a.action_id == Some(action_id))
            .map(AuraHandle)
    }

    pub fn register_spell(&mut self, spell: Spell) -> SpellHandle {
        self.spells.push(spell);
        SpellHandle(self.spells.len() - 1)
    }

    pub fn spell(&self, handle: SpellHandle) -> &Spell {
        &self.spells[handle.0]
    }

    pub fn spell_mut(&mut self, handle: SpellHandle) -> &mut Spell {
        &mut self.spells[handle.0]
    }

    pub fn spell_by_action(&self, action_id: ActionId) -> Option<SpellHandle> {
        self.spells
            .iter()
            .position(|s| s.action_id == action_id)
            .map(SpellHandle)
    }

    pub fn register_ppm_manager(&mut self, manager: PpmManager) -> PpmHandle {
        self.ppm_managers.push(manager);
        PpmHandle(self.ppm_managers.len() - 1)
    }

    pub fn ppm_manager(&self, handle: PpmHandle) -> &PpmManager {
        &self.ppm_managers[handle.0]
    }

    pub fn ppm_manager_mut(&mut self, handle: PpmHandle) -> &mut PpmManager {
        &mut self.ppm_managers[handle.0]
    }

    fn proc_mask_for(&self, matches: impl Fn(&Item) -> bool) -> ProcMask {
        let mut mask = ProcMask::empty();
        if matches(self.equipment.main_hand()) {
            mask |= ProcMask::MELEE_MH;
        }
        if matches(self.equipment.off_hand()) {
            mask |= ProcMask::MELEE_OH;
        }
        if matches(self.equipment.ranged()) {
            mask |= ProcMask::RANGED;
        }
        mask
    }

    /// Weapons currently holding `item_id`; empty when it isn't a worn weapon
    pub fn proc_mask_for_item(&self, item_id: ItemId) -> ProcMask {
        if item_id.is_none() {
            return ProcMask::empty();
        }
        self.proc_mask_for(|item| item.id == item_id)
    }

    /// Weapons currently carrying enchant `effect_id`
    pub fn proc_mask_for_enchant(&self, effect_id: i32) -> ProcMask {
        if effect_id == 0 {
            return ProcMask::empty();
        }
        self.proc_mask_for(|item| !item.is_empty() && item.enchant == effect_id)
    }

    pub fn item_in(&self, slot: ItemSlot) -> &Item {
        &self.equipment[slot]
    }

    /// Clear per-iteration timers and aura state
    pub fn reset(&mut self) {
        self.gcd.reset();
        self.auto_attacks.reset();
        for aura in &mut self.auras {
            aura.reset();
        }
        for spell in &mut self.spells {
            spell.cd.reset();
        }
    }
}
