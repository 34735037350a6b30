//! Spells and action identifiers

use bitflags::bitflags;

use gearswap_core::Cooldown;

use super::item::ItemId;

/// What an action is keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionId {
    Spell(i32),
    Item(ItemId),
}

bitflags! {
    /// Spell state flags
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct SpellFlags: u8 {
        /// The item granting this spell is currently benched
        const SWAPPED = 1 << 0;
    }
}

/// Index of a spell registered on a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpellHandle(pub(crate) usize);

/// A castable action with a cooldown
#[derive(Debug, Clone)]
pub struct Spell {
    pub action_id: ActionId,
    pub label: String,
    pub flags: SpellFlags,
    pub cd: Cooldown,
}

impl Spell {
    pub fn new(action_id: ActionId, label: impl Into<String>, cd: Cooldown) -> Self {
        Self {
            action_id,
            label: label.into(),
            flags: SpellFlags::empty(),
            cd,
        }
    }

    pub fn is_swapped_out(&self) -> bool {
        self.flags.contains(SpellFlags::SWAPPED)
    }
}
