//! Item database: templates and augment tables
//!
//! Resolves an [`ItemSpec`] into an [`Item`] and computes the stats an item
//! contributes while equipped: base and random suffix (reforged), plus gems
//! and enchant.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use gearswap_core::{Stat, Stats};

use super::item::{HandType, Item, ItemId, ItemSpec};
use super::weapon::{WeaponStats, WeaponType};

/// Fraction of the source stat moved by a reforge
pub const REFORGE_FRACTION: f64 = 0.4;

/// Errors raised when a spec references something the database lacks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatabaseError {
    #[error("Unknown item id {0}")]
    UnknownItem(i32),

    #[error("Unknown gem id {gem} on item {item}")]
    UnknownGem { item: i32, gem: i32 },

    #[error("Unknown enchant id {enchant} on item {item}")]
    UnknownEnchant { item: i32, enchant: i32 },

    #[error("Unknown random suffix id {suffix} on item {item}")]
    UnknownRandomSuffix { item: i32, suffix: i32 },

    #[error("Unknown reforge id {reforge} on item {item}")]
    UnknownReforge { item: i32, reforge: i32 },
}

/// Static description of an item before augments are applied
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub hand_type: HandType,
    #[serde(default)]
    pub weapon_type: WeaponType,
    #[serde(default)]
    pub weapon: Option<WeaponStats>,
    #[serde(default)]
    pub stats: Stats,
}

/// A reforge moves part of one stat into another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reforge {
    pub from: Stat,
    pub to: Stat,
}

/// A stat-granting augment entry (gem, enchant, random suffix)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AugmentEntry {
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stats: Stats,
}

/// A reforge table entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReforgeEntry {
    pub id: i32,
    #[serde(flatten)]
    pub reforge: Reforge,
}

/// Serializable database contents, as found in loadout files
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub items: Vec<ItemTemplate>,
    pub gems: Vec<AugmentEntry>,
    pub enchants: Vec<AugmentEntry>,
    pub random_suffixes: Vec<AugmentEntry>,
    pub reforges: Vec<ReforgeEntry>,
}

/// Lookup tables for items and their augments
#[derive(Debug, Clone, Default)]
pub struct ItemDatabase {
    items: HashMap<ItemId, ItemTemplate>,
    gems: HashMap<i32, Stats>,
    enchants: HashMap<i32, Stats>,
    random_suffixes: HashMap<i32, Stats>,
    reforges: HashMap<i32, Reforge>,
}

impl From<DatabaseConfig> for ItemDatabase {
    fn from(config: DatabaseConfig) -> Self {
        let mut db = ItemDatabase::default();
        for item in config.items {
            db.add_item(item);
        }
        for gem in config.gems {
            db.add_gem(gem.id, gem.stats);
        }
        for enchant in config.enchants {
            db.add_enchant(enchant.id, enchant.stats);
        }
        for suffix in config.random_suffixes {
            db.add_random_suffix(suffix.id, suffix.stats);
        }
        for entry in config.reforges {
            db.add_reforge(entry.id, entry.reforge);
        }
        db
    }
}

impl ItemDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, template: ItemTemplate) {
        self.items.insert(template.id, template);
    }

    pub fn add_gem(&mut self, id: i32, stats: Stats) {
        self.gems.insert(id, stats);
    }

    pub fn add_enchant(&mut self, id: i32, stats: Stats) {
        self.enchants.insert(id, stats);
    }

    pub fn add_random_suffix(&mut self, id: i32, stats: Stats) {
        self.random_suffixes.insert(id, stats);
    }

    pub fn add_reforge(&mut self, id: i32, reforge: Reforge) {
        self.reforges.insert(id, reforge);
    }

    pub fn template(&self, id: ItemId) -> Option<&ItemTemplate> {
        self.items.get(&id)
    }

    /// Resolve a spec into an item. Unconfigured specs yield the empty item.
    pub fn new_item(&self, spec: &ItemSpec) -> Result<Item, DatabaseError> {
        if !spec.is_configured() {
            return Ok(Item::default());
        }

        let item_id = spec.id.0;
        let template = self
            .items
            .get(&spec.id)
            .ok_or(DatabaseError::UnknownItem(item_id))?;

        if let Some(&gem) = spec.gems.iter().find(|g| **g != 0 && !self.gems.contains_key(*g)) {
            return Err(DatabaseError::UnknownGem { item: item_id, gem });
        }
        if spec.enchant != 0 && !self.enchants.contains_key(&spec.enchant) {
            return Err(DatabaseError::UnknownEnchant {
                item: item_id,
                enchant: spec.enchant,
            });
        }
        if spec.random_suffix != 0 && !self.random_suffixes.contains_key(&spec.random_suffix) {
            return Err(DatabaseError::UnknownRandomSuffix {
                item: item_id,
                suffix: spec.random_suffix,
            });
        }
        if spec.reforging != 0 && !self.reforges.contains_key(&spec.reforging) {
            return Err(DatabaseError::UnknownReforge {
                item: item_id,
                reforge: spec.reforging,
            });
        }

        Ok(Item {
            id: template.id,
            name: template.name.clone(),
            hand_type: template.hand_type,
            weapon_type: template.weapon_type,
            weapon: template.weapon,
            stats: template.stats,
            gems: spec.gems.clone(),
            enchant: spec.enchant,
            random_suffix: spec.random_suffix,
            reforging: spec.reforging,
        })
    }

    /// Stats the item contributes while equipped. Empty items give nothing.
    pub fn item_equipment_stats(&self, item: &Item) -> Stats {
        if item.is_empty() {
            return Stats::new();
        }

        let mut stats = item.stats;
        if let Some(suffix) = self.random_suffixes.get(&item.random_suffix) {
            stats += *suffix;
        }

        // Reforging only sees the item's own stats, not gems or enchants
        if let Some(reforge) = self.reforges.get(&item.reforging) {
            let amount = (stats[reforge.from] * REFORGE_FRACTION).floor();
            stats[reforge.from] -= amount;
            stats[reforge.to] += amount;
        }

        for gem in &item.gems {
            if let Some(gem_stats) = self.gems.get(gem) {
                stats += *gem_stats;
            }
        }
        if let Some(enchant) = self.enchants.get(&item.enchant) {
            stats += *enchant;
        }
        stats
    }
}
