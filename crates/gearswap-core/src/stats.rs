//! Stat-vector arithmetic
//!
//! A dense, fixed-size vector of character stats. Every item, gem, enchant
//! and running character total is expressed as one of these.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::ops::{Add, AddAssign, Index, IndexMut, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Number of tracked stats
pub const STAT_COUNT: usize = 16;

/// The tracked stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Strength,
    Agility,
    Stamina,
    Intellect,
    Spirit,
    HitRating,
    CritRating,
    HasteRating,
    ExpertiseRating,
    MasteryRating,
    DodgeRating,
    ParryRating,
    AttackPower,
    RangedAttackPower,
    SpellPower,
    Armor,
}

impl Stat {
    /// All stat variants, in vector order
    pub const ALL: [Stat; STAT_COUNT] = [
        Self::Strength,
        Self::Agility,
        Self::Stamina,
        Self::Intellect,
        Self::Spirit,
        Self::HitRating,
        Self::CritRating,
        Self::HasteRating,
        Self::ExpertiseRating,
        Self::MasteryRating,
        Self::DodgeRating,
        Self::ParryRating,
        Self::AttackPower,
        Self::RangedAttackPower,
        Self::SpellPower,
        Self::Armor,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Agility => "Agility",
            Self::Stamina => "Stamina",
            Self::Intellect => "Intellect",
            Self::Spirit => "Spirit",
            Self::HitRating => "Hit Rating",
            Self::CritRating => "Crit Rating",
            Self::HasteRating => "Haste Rating",
            Self::ExpertiseRating => "Expertise Rating",
            Self::MasteryRating => "Mastery Rating",
            Self::DodgeRating => "Dodge Rating",
            Self::ParryRating => "Parry Rating",
            Self::AttackPower => "Attack Power",
            Self::RangedAttackPower => "Ranged Attack Power",
            Self::SpellPower => "Spell Power",
            Self::Armor => "Armor",
        }
    }
}

/// A full stat vector.
///
/// Serializes as a sparse `stat -> value` map so config files only list
/// the stats they care about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Stat, f64>", into = "BTreeMap<Stat, f64>")]
pub struct Stats([f64; STAT_COUNT]);

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vector from a few `(stat, value)` pairs
    pub fn from_pairs(pairs: &[(Stat, f64)]) -> Self {
        let mut stats = Self::default();
        for &(stat, value) in pairs {
            stats[stat] += value;
        }
        stats
    }

    /// Builder-style setter
    pub fn with(mut self, stat: Stat, value: f64) -> Self {
        self[stat] = value;
        self
    }

    pub fn get(&self, stat: Stat) -> f64 {
        self.0[stat.index()]
    }

    /// Whether every entry is zero
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|v| *v == 0.0)
    }

    /// Multiply every entry by `factor`
    pub fn scaled(&self, factor: f64) -> Stats {
        let mut result = *self;
        for v in &mut result.0 {
            *v *= factor;
        }
        result
    }

    /// Nonzero entries only, e.g. `{Attack Power: 15, Strength: -3}`
    pub fn flat_string(&self) -> String {
        let mut out = String::from("{");
        let mut first = true;
        for stat in Stat::ALL {
            let value = self[stat];
            if value == 0.0 {
                continue;
            }
            if !first {
                out.push_str(", ");
            }
            first = false;
            let _ = write!(out, "{}: {}", stat.name(), value);
        }
        out.push('}');
        out
    }
}

impl Index<Stat> for Stats {
    type Output = f64;

    fn index(&self, stat: Stat) -> &f64 {
        &self.0[stat.index()]
    }
}

impl IndexMut<Stat> for Stats {
    fn index_mut(&mut self, stat: Stat) -> &mut f64 {
        &mut self.0[stat.index()]
    }
}

impl Add for Stats {
    type Output = Stats;

    fn add(mut self, rhs: Stats) -> Stats {
        self += rhs;
        self
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, rhs: Stats) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a += b;
        }
    }
}

impl Sub for Stats {
    type Output = Stats;

    fn sub(mut self, rhs: Stats) -> Stats {
        self -= rhs;
        self
    }
}

impl SubAssign for Stats {
    fn sub_assign(&mut self, rhs: Stats) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a -= b;
        }
    }
}

impl Neg for Stats {
    type Output = Stats;

    fn neg(self) -> Stats {
        self.scaled(-1.0)
    }
}

impl From<BTreeMap<Stat, f64>> for Stats {
    fn from(map: BTreeMap<Stat, f64>) -> Self {
        let mut stats = Stats::default();
        for (stat, value) in map {
            stats[stat] = value;
        }
        stats
    }
}

impl From<Stats> for BTreeMap<Stat, f64> {
    fn from(stats: Stats) -> Self {
        Stat::ALL
            .into_iter()
            .filter(|s| stats[*s] != 0.0)
            .map(|s| (s, stats[s]))
            .collect()
    }
}
