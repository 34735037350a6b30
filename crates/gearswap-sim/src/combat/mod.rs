//! Combat system module
//!
//! Provides items, weapons, the item database, equipment, auto-attacks,
//! auras, spells and proc-rate managers.

pub mod aura;
pub mod auto_attack;
pub mod database;
pub mod equipment;
pub mod item;
pub mod ppm;
pub mod spell;
pub mod weapon;

pub use aura::{Aura, AuraHandle};
pub use auto_attack::{AutoAttackConfig, AutoAttacks};
pub use database::{
    AugmentEntry, DatabaseConfig, DatabaseError, ItemDatabase, ItemTemplate, Reforge, ReforgeEntry,
    REFORGE_FRACTION,
};
pub use equipment::{Equipment, ItemSlot, SlotError, NUM_SLOTS};
pub use item::{HandType, Item, ItemId, ItemSpec};
pub use ppm::{PpmHandle, PpmManager, ProcMask};
pub use spell::{ActionId, Spell, SpellFlags, SpellHandle};
pub use weapon::{Weapon, WeaponStats, WeaponType};
