use bitflags::bitflags;

use crate::combat::ItemSlot;

bitflags! {
    /// A set of equipment slots, one bit per [`ItemSlot`].
    ///
    /// Used to track which slots currently hold their alternate item.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct SlotMask: u32 {
        const HEAD      = 1 << 0;
        const NECK      = 1 << 1;
        const SHOULDER  = 1 << 2;
        const BACK      = 1 << 3;
        const CHEST     = 1 << 4;
        const WRIST     = 1 << 5;
        const HANDS     = 1 << 6;
        const WAIST     = 1 << 7;
        const LEGS      = 1 << 8;
        const FEET      = 1 << 9;
        const FINGER1   = 1 << 10;
        const FINGER2   = 1 << 11;
        const TRINKET1  = 1 << 12;
        const TRINKET2  = 1 << 13;
        const MAIN_HAND = 1 << 14;
        const OFF_HAND  = 1 << 15;
        const RANGED    = 1 << 16;

        const MELEE_WEAPONS = Self::MAIN_HAND.bits() | Self::OFF_HAND.bits();
    }
}

impl SlotMask {
    pub fn from_slot(slot: ItemSlot) -> Self {
        Self::from_bits_truncate(1 << slot.index())
    }

    pub fn from_slots(slots: impl IntoIterator<Item = ItemSlot>) -> Self {
        slots
            .into_iter()
            .fold(Self::empty(), |mask, slot| mask | Self::from_slot(slot))
    }

    pub fn contains_slot(self, slot: ItemSlot) -> bool {
        self.contains(Self::from_slot(slot))
    }

    /// Member slots in canonical order
    pub fn slots(self) -> impl Iterator<Item = ItemSlot> {
        ItemSlot::ALL
            .into_iter()
            .filter(move |slot| self.contains_slot(*slot))
    }
}

impl From<ItemSlot> for SlotMask {
    fn from(slot: ItemSlot) -> Self {
        Self::from_slot(slot)
    }
}
