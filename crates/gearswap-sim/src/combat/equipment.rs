//! Equipment system with 17 slots
//!
//! Tracks the item worn in every slot and answers weapon-occupancy
//! questions for the rest of the simulator.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use super::item::{Item, ItemId};

/// Number of equipment slots
pub const NUM_SLOTS: usize = 17;

/// The 17 equipment slots, in canonical processing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSlot {
    Head,
    Neck,
    Shoulder,
    Back,
    Chest,
    Wrist,
    Hands,
    Waist,
    Legs,
    Feet,
    Finger1,
    Finger2,
    Trinket1,
    Trinket2,
    MainHand,
    OffHand,
    Ranged,
}

/// Error when converting a raw slot tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotError {
    #[error("Slot tag {0} is outside the 17 equipment slots")]
    OutOfRange(i32),
}

impl ItemSlot {
    /// All slot variants
    pub const ALL: [ItemSlot; NUM_SLOTS] = [
        Self::Head,
        Self::Neck,
        Self::Shoulder,
        Self::Back,
        Self::Chest,
        Self::Wrist,
        Self::Hands,
        Self::Waist,
        Self::Legs,
        Self::Feet,
        Self::Finger1,
        Self::Finger2,
        Self::Trinket1,
        Self::Trinket2,
        Self::MainHand,
        Self::OffHand,
        Self::Ranged,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Head => "Head",
            Self::Neck => "Neck",
            Self::Shoulder => "Shoulder",
            Self::Back => "Back",
            Self::Chest => "Chest",
            Self::Wrist => "Wrist",
            Self::Hands => "Hands",
            Self::Waist => "Waist",
            Self::Legs => "Legs",
            Self::Feet => "Feet",
            Self::Finger1 => "Finger 1",
            Self::Finger2 => "Finger 2",
            Self::Trinket1 => "Trinket 1",
            Self::Trinket2 => "Trinket 2",
            Self::MainHand => "Main Hand",
            Self::OffHand => "Off Hand",
            Self::Ranged => "Ranged",
        }
    }

    /// Main hand or off hand
    pub fn is_melee_weapon(self) -> bool {
        matches!(self, Self::MainHand | Self::OffHand)
    }

    /// Any slot that produces an auto-attack weapon
    pub fn is_weapon(self) -> bool {
        matches!(self, Self::MainHand | Self::OffHand | Self::Ranged)
    }
}

impl TryFrom<i32> for ItemSlot {
    type Error = SlotError;

    fn try_from(tag: i32) -> Result<Self, SlotError> {
        usize::try_from(tag)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(SlotError::OutOfRange(tag))
    }
}

/// The items worn by a character, exactly one per slot.
///
/// An empty [`Item`] stands for "nothing equipped".
#[derive(Debug, Clone, PartialEq)]
pub struct Equipment([Item; NUM_SLOTS]);

impl Default for Equipment {
    fn default() -> Self {
        Self(std::array::from_fn(|_| Item::default()))
    }
}

impl Equipment {
    /// Create an empty equipment set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(slot, item)` pairs; unlisted slots stay empty
    pub fn from_items(items: impl IntoIterator<Item = (ItemSlot, Item)>) -> Self {
        let mut equipment = Self::default();
        for (slot, item) in items {
            equipment[slot] = item;
        }
        equipment
    }

    /// Put `item` into `slot`, returning what was there
    pub fn replace(&mut self, slot: ItemSlot, item: Item) -> Item {
        std::mem::replace(&mut self[slot], item)
    }

    /// Iterate `(slot, item)` in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (ItemSlot, &Item)> {
        ItemSlot::ALL.into_iter().zip(self.0.iter())
    }

    pub fn main_hand(&self) -> &Item {
        &self[ItemSlot::MainHand]
    }

    pub fn off_hand(&self) -> &Item {
        &self[ItemSlot::OffHand]
    }

    pub fn ranged(&self) -> &Item {
        &self[ItemSlot::Ranged]
    }

    /// Whether a main-hand weapon is worn
    pub fn has_mh_weapon(&self) -> bool {
        self.main_hand().is_weapon()
    }

    /// Whether an off-hand weapon is worn (shields and held items don't count)
    pub fn has_oh_weapon(&self) -> bool {
        self.off_hand().is_weapon()
    }

    /// Whether `item_id` is worn in any slot
    pub fn is_worn(&self, item_id: ItemId) -> bool {
        !item_id.is_none() && self.0.iter().any(|item| item.id == item_id)
    }
}

impl Index<ItemSlot> for Equipment {
    type Output = Item;

    fn index(&self, slot: ItemSlot) -> &Item {
        &self.0[slot.index()]
    }
}

impl IndexMut<ItemSlot> for Equipment {
    fn index_mut(&mut self, slot: ItemSlot) -> &mut Item {
        &mut self.0[slot.index()]
    }
}
