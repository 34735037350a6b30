//! Item data model
//!
//! Items with augments (gems, enchant, random suffix, reforge) and a
//! hand-type classification used for weapon-slot coupling.

use serde::{Deserialize, Serialize};

use gearswap_core::Stats;

use super::weapon::{WeaponStats, WeaponType};

/// Item identifier; zero means "no item"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i32);

impl ItemId {
    pub const NONE: ItemId = ItemId(0);

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

/// How an item is held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandType {
    #[default]
    None,
    OneHand,
    TwoHand,
    Ranged,
}

/// An externally supplied item reference plus its augments.
///
/// Zero in any id field means "none".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemSpec {
    pub id: ItemId,
    pub gems: Vec<i32>,
    pub enchant: i32,
    pub random_suffix: i32,
    pub reforging: i32,
}

impl ItemSpec {
    pub fn new(id: i32) -> Self {
        Self {
            id: ItemId(id),
            ..Default::default()
        }
    }

    /// Whether this spec names an actual item
    pub fn is_configured(&self) -> bool {
        !self.id.is_none()
    }
}

/// An immutable item value as worn or benched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub hand_type: HandType,
    pub weapon_type: WeaponType,
    /// Damage and speed (only for weapons)
    pub weapon: Option<WeaponStats>,
    /// Base stats on the item itself
    pub stats: Stats,
    /// Socketed gem ids
    pub gems: Vec<i32>,
    pub enchant: i32,
    pub random_suffix: i32,
    pub reforging: i32,
}

impl Item {
    /// The "nothing equipped" value
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
    }

    /// Whether this item can swing
    pub fn is_weapon(&self) -> bool {
        self.weapon.as_ref().is_some_and(|w| w.swing_speed > 0.0)
    }

    pub fn is_two_handed(&self) -> bool {
        self.hand_type == HandType::TwoHand
    }

    pub fn is_shield(&self) -> bool {
        self.weapon_type == WeaponType::Shield
    }
}
