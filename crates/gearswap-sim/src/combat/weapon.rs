//! Weapon types and auto-attack weapons
//!
//! Raw weapon stats live on items; [`Weapon`] is the derived object the
//! auto-attack system swings with.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::item::{HandType, Item};

/// Weapon classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponType {
    #[default]
    Unknown,
    Sword,
    Axe,
    Mace,
    Dagger,
    Fist,
    Polearm,
    Staff,
    Bow,
    Gun,
    Crossbow,
    Wand,
    Thrown,
    Shield,
    OffHand,
}

impl WeaponType {
    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Sword => "Sword",
            Self::Axe => "Axe",
            Self::Mace => "Mace",
            Self::Dagger => "Dagger",
            Self::Fist => "Fist Weapon",
            Self::Polearm => "Polearm",
            Self::Staff => "Staff",
            Self::Bow => "Bow",
            Self::Gun => "Gun",
            Self::Crossbow => "Crossbow",
            Self::Wand => "Wand",
            Self::Thrown => "Thrown",
            Self::Shield => "Shield",
            Self::OffHand => "Held In Off-hand",
        }
    }
}

/// Damage and speed carried by a weapon item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    pub min_damage: f64,
    pub max_damage: f64,
    /// Seconds between swings
    pub swing_speed: f64,
}

impl WeaponStats {
    pub fn new(min_damage: f64, max_damage: f64, swing_speed: f64) -> Self {
        Self {
            min_damage,
            max_damage,
            swing_speed,
        }
    }
}

/// An auto-attack weapon built from an equipped item.
///
/// A zero swing speed means the slot cannot attack.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Weapon {
    pub base_damage_min: f64,
    pub base_damage_max: f64,
    pub swing_speed: f64,
    pub normalized_swing_speed: f64,
    pub crit_multiplier: f64,
}

impl Weapon {
    /// Build from an item; non-weapons yield an idle weapon
    pub fn from_item(item: &Item, crit_multiplier: f64) -> Self {
        let Some(stats) = item.weapon.filter(|w| w.swing_speed > 0.0) else {
            return Self {
                crit_multiplier,
                ..Default::default()
            };
        };

        let normalized_swing_speed = match (item.hand_type, item.weapon_type) {
            (_, WeaponType::Dagger) => 1.7,
            (HandType::TwoHand, _) => 3.3,
            (HandType::Ranged, _) => 2.8,
            _ => 2.4,
        };

        Self {
            base_damage_min: stats.min_damage,
            base_damage_max: stats.max_damage,
            swing_speed: stats.swing_speed,
            normalized_swing_speed,
            crit_multiplier,
        }
    }

    pub fn can_swing(&self) -> bool {
        self.swing_speed > 0.0
    }

    /// Swing interval, rounded to whole milliseconds
    pub fn swing_duration(&self) -> Duration {
        Duration::from_millis((self.swing_speed.max(0.0) * 1000.0).round() as u64)
    }

    pub fn average_damage(&self) -> f64 {
        (self.base_damage_min + self.base_damage_max) / 2.0
    }
}
