//! Mid-encounter item swapping
//!
//! A character may exchange worn items for a configured set of alternates at
//! runtime. The swap keeps weapons, stat totals and gear-dependent effects in
//! step with what is actually worn:
//!
//! - [`config`] decides which slots are swappable and seeds the benched items
//! - [`registry`] holds the per-slot listeners fired after a slot changes
//! - [`delta`] previews the stat change of a swap
//! - [`rebind`] rebuilds auto-attack weapons after a weapon slot changes
//! - [`orchestrator`] performs the swap itself
//! - [`lifecycle`] restores the baseline loadout between iterations
//!
//! Swap state is kept per slot, so exchanging a subset of the configured
//! slots never desynchronizes the summary queries.

pub mod config;
pub mod delta;
pub mod lifecycle;
pub mod listener;
pub mod mask;
pub mod orchestrator;
pub mod rebind;
pub mod registry;

pub use config::{CritMultipliers, ItemSwapSpec, WeaponOccupancy};
pub use listener::{ProcSource, SwapCallback, SwapListener, ON_USE_SWAP_COOLDOWN};
pub use mask::SlotMask;
pub use orchestrator::SWAP_GLOBAL_DELAY;
pub use registry::ListenerRegistry;

use crate::combat::{Equipment, Item, ItemSlot};

/// Per-character swap state.
///
/// Owned alongside the character's [`Unit`](crate::character::Unit) and
/// handed the unit explicitly by every operation. The default value is a
/// disabled swap: every operation on it is a no-op.
#[derive(Debug, Default)]
pub struct ItemSwap {
    crit: CritMultipliers,
    /// Swappable slots in canonical order
    slots: Vec<ItemSlot>,
    /// Items not currently worn; empty outside the swappable slots
    benched: Equipment,
    /// Slots currently holding their alternate
    swapped: SlotMask,
    listeners: ListenerRegistry,
}

impl ItemSwap {
    /// Whether any slot was configured for swapping
    pub fn is_enabled(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Whether at least one slot currently holds its alternate
    pub fn is_swapped(&self) -> bool {
        !self.swapped.is_empty()
    }

    /// Whether every swappable slot currently holds its alternate
    pub fn is_fully_swapped(&self) -> bool {
        self.is_enabled() && self.swapped.contains(self.enabled_mask())
    }

    pub fn swapped_slots(&self) -> SlotMask {
        self.swapped
    }

    pub fn enabled_slots(&self) -> &[ItemSlot] {
        &self.slots
    }

    pub fn enabled_mask(&self) -> SlotMask {
        SlotMask::from_slots(self.slots.iter().copied())
    }

    /// The item held out of `slot`; empty for slots that are not swappable
    pub fn benched_item(&self, slot: ItemSlot) -> &Item {
        &self.benched[slot]
    }

    pub fn crit_multipliers(&self) -> CritMultipliers {
        self.crit
    }
}
