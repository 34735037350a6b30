//! Gearswap Sim - Characters and mid-encounter item swapping
//!
//! Provides the character model (gear, stats, auto-attacks, auras, spells)
//! and the item-swap subsystem built on top of it.

pub mod character;
pub mod combat;
pub mod swap;

pub use character::{Character, CharacterConfig, PseudoStats, Unit};

// Combat system re-exports
pub use combat::{
    ActionId, Aura, AuraHandle, AutoAttackConfig, AutoAttacks, DatabaseConfig, DatabaseError,
    Equipment, HandType, Item, ItemDatabase, ItemId, ItemSlot, ItemSpec, ItemTemplate, PpmHandle,
    PpmManager, ProcMask, SlotError, Spell, SpellHandle, Weapon, WeaponStats, WeaponType,
};

// Item swap re-exports
pub use swap::{
    CritMultipliers, ItemSwap, ItemSwapSpec, ProcSource, SlotMask, SwapListener, WeaponOccupancy,
    SWAP_GLOBAL_DELAY,
};
