//! Weapon catalog: categories and their gameplay stats.
//!
//! The stats table is a fixed literal built once behind a `LazyLock`; it is
//! never mutated at runtime and never loaded from external config. If
//! data-driven tuning is ever needed, this table is the single extension
//! point.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Weapon categories available in the armory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponCategory {
    Dagger,
    ShortSword,
    LongSword,
    Axe,
    BattleAxe,
    Spear,
    Mace,
    WarHammer,
    Staff,
    Bow,
    Club,
    Scythe,
}

impl WeaponCategory {
    /// Stable enumeration order, used for UI population
    pub const ALL: [WeaponCategory; 12] = [
        WeaponCategory::Dagger,
        WeaponCategory::ShortSword,
        WeaponCategory::LongSword,
        WeaponCategory::Axe,
        WeaponCategory::BattleAxe,
        WeaponCategory::Spear,
        WeaponCategory::Mace,
        WeaponCategory::WarHammer,
        WeaponCategory::Staff,
        WeaponCategory::Bow,
        WeaponCategory::Club,
        WeaponCategory::Scythe,
    ];

    /// Canonical identifier, used as the generated root node's name
    pub fn ident(self) -> &'static str {
        match self {
            WeaponCategory::Dagger => "Dagger",
            WeaponCategory::ShortSword => "ShortSword",
            WeaponCategory::LongSword => "LongSword",
            WeaponCategory::Axe => "Axe",
            WeaponCategory::BattleAxe => "BattleAxe",
            WeaponCategory::Spear => "Spear",
            WeaponCategory::Mace => "Mace",
            WeaponCategory::WarHammer => "WarHammer",
            WeaponCategory::Staff => "Staff",
            WeaponCategory::Bow => "Bow",
            WeaponCategory::Club => "Club",
            WeaponCategory::Scythe => "Scythe",
        }
    }
}

/// Gameplay stats for one weapon category.
///
/// `reach` and `two_handed` are informational for combat/animation systems;
/// the geometry forge never reads or mutates them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeaponStats {
    pub name: &'static str,
    pub damage_bonus: f32,
    /// 1.0 = baseline; <1 slower/heavier, >1 faster/lighter
    pub speed_modifier: f32,
    /// Meters; projectile range for the bow
    pub reach: f32,
    pub two_handed: bool,
}

/// Returned by [`stats_of`] if the table were ever incomplete for a
/// category. Tests enforce completeness, so this is unreachable in practice.
pub const UNKNOWN_STATS: WeaponStats = WeaponStats {
    name: "Unknown",
    damage_bonus: 0.0,
    speed_modifier: 1.0,
    reach: 2.0,
    two_handed: false,
};

static STATS: LazyLock<HashMap<WeaponCategory, WeaponStats>> = LazyLock::new(|| {
    use WeaponCategory::*;
    HashMap::from([
        (
            Dagger,
            WeaponStats {
                name: "Dagger",
                damage_bonus: 5.0,
                speed_modifier: 1.4,
                reach: 1.5,
                two_handed: false,
            },
        ),
        (
            ShortSword,
            WeaponStats {
                name: "Short Sword",
                damage_bonus: 10.0,
                speed_modifier: 1.1,
                reach: 2.0,
                two_handed: false,
            },
        ),
        (
            LongSword,
            WeaponStats {
                name: "Long Sword",
                damage_bonus: 15.0,
                speed_modifier: 0.9,
                reach: 2.5,
                two_handed: true,
            },
        ),
        (
            Axe,
            WeaponStats {
                name: "Axe",
                damage_bonus: 12.0,
                speed_modifier: 0.95,
                reach: 2.0,
                two_handed: false,
            },
        ),
        (
            BattleAxe,
            WeaponStats {
                name: "Battle Axe",
                damage_bonus: 20.0,
                speed_modifier: 0.7,
                reach: 2.5,
                two_handed: true,
            },
        ),
        (
            Spear,
            WeaponStats {
                name: "Spear",
                damage_bonus: 12.0,
                speed_modifier: 1.0,
                reach: 3.5,
                two_handed: true,
            },
        ),
        (
            Mace,
            WeaponStats {
                name: "Mace",
                damage_bonus: 14.0,
                speed_modifier: 0.85,
                reach: 2.0,
                two_handed: false,
            },
        ),
        (
            WarHammer,
            WeaponStats {
                name: "War Hammer",
                damage_bonus: 22.0,
                speed_modifier: 0.6,
                reach: 2.5,
                two_handed: true,
            },
        ),
        (
            Staff,
            WeaponStats {
                name: "Staff",
                damage_bonus: 8.0,
                speed_modifier: 1.05,
                reach: 3.0,
                two_handed: true,
            },
        ),
        (
            Bow,
            WeaponStats {
                name: "Bow",
                damage_bonus: 10.0,
                speed_modifier: 1.0,
                reach: 20.0,
                two_handed: true,
            },
        ),
        (
            Club,
            WeaponStats {
                name: "Club",
                damage_bonus: 6.0,
                speed_modifier: 1.0,
                reach: 2.0,
                two_handed: false,
            },
        ),
        (
            Scythe,
            WeaponStats {
                name: "Scythe",
                damage_bonus: 16.0,
                speed_modifier: 0.8,
                reach: 2.8,
                two_handed: true,
            },
        ),
    ])
});

/// All categories in stable order
pub fn list_categories() -> &'static [WeaponCategory] {
    &WeaponCategory::ALL
}

/// Stats for a category. Total: falls back to [`UNKNOWN_STATS`] rather than
/// failing if the table misses an entry.
pub fn stats_of(category: WeaponCategory) -> &'static WeaponStats {
    STATS.get(&category).unwrap_or(&UNKNOWN_STATS)
}

/// Case-insensitive lookup by display name. Unmatched names fall back to
/// `ShortSword`: a policy choice for tolerant shop/inventory input, not a
/// crash path.
pub fn category_from_name(name: &str) -> WeaponCategory {
    let wanted = name.trim();
    WeaponCategory::ALL
        .iter()
        .copied()
        .find(|&c| stats_of(c).name.eq_ignore_ascii_case(wanted))
        .unwrap_or_else(|| {
            debug!("unknown weapon name '{wanted}', defaulting to ShortSword");
            WeaponCategory::ShortSword
        })
}
