//! Data models and structures for Soulmax.
//!
//! This module contains all the core data structures used throughout the
//! application: shikigami base stats, souls and the six-slot soul catalog,
//! the soul-type taxonomy, attribute constraints, and search results.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Base stats for a shikigami, the character whose build is optimized.
///
/// One fixed instance is selected per run from the built-in registry.
///
/// # Example
///
/// ```
/// use soulmax::models::Shikigami;
///
/// let onikiri = Shikigami::by_name("Onikiri").unwrap();
/// assert_eq!(onikiri.atk, 3350.0);
/// assert_eq!(onikiri.spd, 117);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shikigami {
    /// Base attack value
    pub atk: f64,
    /// Base critical-hit rate, a fraction in [0, 1]
    pub crit: f64,
    /// Base critical-hit damage multiplier, >= 1
    pub crit_dmg: f64,
    /// Base speed
    pub spd: i32,
}

impl Shikigami {
    /// Looks up a shikigami's base stats by name, case-insensitively.
    ///
    /// Returns `None` for names not in the registry.
    pub fn by_name(name: &str) -> Option<Shikigami> {
        match name.to_lowercase().as_str() {
            "onikiri" => Some(Shikigami {
                atk: 3350.0,
                crit: 0.11,
                crit_dmg: 1.6,
                spd: 117,
            }),
            "ibaraki doji" => Some(Shikigami {
                atk: 3216.0,
                crit: 0.10,
                crit_dmg: 1.5,
                spd: 112,
            }),
            "ubume" => Some(Shikigami {
                atk: 3082.0,
                crit: 0.10,
                crit_dmg: 1.5,
                spd: 113,
            }),
            "kamikui" => Some(Shikigami {
                atk: 1741.0,
                crit: 0.08,
                crit_dmg: 1.5,
                spd: 118,
            }),
            "shuten doji" => Some(Shikigami {
                atk: 3136.0,
                crit: 0.10,
                crit_dmg: 1.5,
                spd: 113,
            }),
            _ => None,
        }
    }
}

/// A single equippable soul.
///
/// Every stat except the type is optional in catalog files and defaults
/// to 0. The type must be a key of the [`Taxonomy`] in use; the loader
/// validates this before any search runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Soul {
    /// Soul type name (e.g. "Namazu", "Tomb Guard")
    #[serde(rename = "Type")]
    pub soul_type: String,
    /// Flat attack contribution
    #[serde(rename = "ATK", default)]
    pub atk: f64,
    /// Attack bonus as a fraction of the shikigami's base attack
    #[serde(rename = "ATKBonus", default)]
    pub atk_bonus: f64,
    /// Critical-hit rate contribution, a fraction
    #[serde(rename = "Crit", default)]
    pub crit: f64,
    /// Critical-hit damage multiplier contribution
    #[serde(rename = "CritDMG", default)]
    pub crit_dmg: f64,
    /// Speed contribution
    #[serde(rename = "SPD", default)]
    pub spd: i32,
}

/// The full soul catalog: six independent, ordered slot collections.
///
/// No invariant links souls across slots; any soul may appear anywhere
/// within its own slot's list. Catalog files must contain exactly the
/// keys `Slot1` through `Slot6`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoulDb {
    #[serde(rename = "Slot1")]
    pub slot1: Vec<Soul>,
    #[serde(rename = "Slot2")]
    pub slot2: Vec<Soul>,
    #[serde(rename = "Slot3")]
    pub slot3: Vec<Soul>,
    #[serde(rename = "Slot4")]
    pub slot4: Vec<Soul>,
    #[serde(rename = "Slot5")]
    pub slot5: Vec<Soul>,
    #[serde(rename = "Slot6")]
    pub slot6: Vec<Soul>,
}

impl SoulDb {
    /// Returns the six slot catalogs in slot order.
    pub fn slots(&self) -> [&[Soul]; 6] {
        [
            &self.slot1,
            &self.slot2,
            &self.slot3,
            &self.slot4,
            &self.slot5,
            &self.slot6,
        ]
    }

    /// Total number of souls across all slots.
    pub fn len(&self) -> usize {
        self.slots().iter().map(|s| s.len()).sum()
    }

    /// Whether every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes a winning build's souls from the catalog, one per slot.
    ///
    /// Used in team mode so that souls assigned to one member are no
    /// longer available to the next. Each slot drops the first soul
    /// equal to the one chosen for it; a build shorter than six souls
    /// (the empty sentinel) removes nothing.
    pub fn remove_build(&mut self, build: &[Soul]) {
        fn remove_first(souls: &mut Vec<Soul>, chosen: &Soul) {
            if let Some(i) = souls.iter().position(|s| s == chosen) {
                souls.remove(i);
            }
        }

        if build.len() != 6 {
            return;
        }
        remove_first(&mut self.slot1, &build[0]);
        remove_first(&mut self.slot2, &build[1]);
        remove_first(&mut self.slot3, &build[2]);
        remove_first(&mut self.slot4, &build[3]);
        remove_first(&mut self.slot5, &build[4]);
        remove_first(&mut self.slot6, &build[5]);
    }
}

/// Category of a soul type, deciding which 2-piece stacking bonus applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoulCategory {
    /// Two souls of the same type grant +15% attack bonus
    AttackBonus,
    /// Two souls of the same type grant +15% crit rate
    Crit,
    /// No 2-piece stat bonus; set effects are handled individually
    Variable,
}

/// Mapping from soul-type name to its [`SoulCategory`].
///
/// Injected into the optimizer rather than compiled in, so synthetic
/// taxonomies can be used in tests. [`Taxonomy::standard`] carries the
/// game's actual table.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    categories: HashMap<String, SoulCategory>,
}

impl Taxonomy {
    /// Builds a taxonomy from (type name, category) pairs.
    pub fn new<I, S>(entries: I) -> Taxonomy
    where
        I: IntoIterator<Item = (S, SoulCategory)>,
        S: Into<String>,
    {
        Taxonomy {
            categories: entries
                .into_iter()
                .map(|(name, cat)| (name.into(), cat))
                .collect(),
        }
    }

    /// The standard soul-type table.
    pub fn standard() -> Taxonomy {
        use SoulCategory::*;
        Taxonomy::new([
            ("Harpy", AttackBonus),
            ("Watcher", AttackBonus),
            ("House Imp", AttackBonus),
            ("Scarlet", AttackBonus),
            ("Soultaker", AttackBonus),
            ("Nightwing", AttackBonus),
            ("Kyoukotsu", AttackBonus),
            ("Tomb Guard", Crit),
            ("Shadow", Crit),
            ("Fenikkusu", Crit),
            ("Claws", Crit),
            ("Samisen", Crit),
            ("Seductress", Crit),
            ("Namazu", Variable),
            ("Odokuro", Variable),
            ("Tsuchigumo", Variable),
            ("Ghostly Songstress", Variable),
        ])
    }

    /// Returns the category of a soul type, or `None` for unknown types.
    pub fn category_of(&self, soul_type: &str) -> Option<SoulCategory> {
        self.categories.get(soul_type).copied()
    }

    /// Whether the taxonomy recognizes the given soul type.
    pub fn contains(&self, soul_type: &str) -> bool {
        self.categories.contains_key(soul_type)
    }
}

/// An inclusive numeric range restricting a build attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    pub low: f64,
    pub high: f64,
}

impl Constraint {
    /// A range covering exactly one value.
    pub fn exact(value: f64) -> Constraint {
        Constraint {
            low: value,
            high: value,
        }
    }

    /// A range with inclusive bounds.
    pub fn range(low: f64, high: f64) -> Constraint {
        Constraint { low, high }
    }

    /// Whether the value falls inside the range, bounds included.
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

/// Optional constraints on a candidate build's speed and crit rate.
///
/// An absent attribute is unconstrained. These are the only two
/// attributes the search can filter on; anything else is rejected at
/// parse time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Constraints {
    pub crit: Option<Constraint>,
    pub spd: Option<Constraint>,
}

impl Constraints {
    /// Whether a total speed passes the SPD constraint, if any.
    pub fn speed_ok(&self, speed: i32) -> bool {
        match self.spd {
            Some(c) => c.contains(speed as f64),
            None => true,
        }
    }

    /// Whether a crit rate passes the Crit constraint, if any.
    pub fn crit_ok(&self, crit: f64) -> bool {
        match self.crit {
            Some(c) => c.contains(crit),
            None => true,
        }
    }
}

/// The best build found by a search.
///
/// When no candidate satisfies the constraints and the 4-piece main
/// soul rule, the result is the sentinel: damage 0 and an empty soul
/// list.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildResult {
    /// Damage of the winning build
    pub damage: f64,
    /// The six chosen souls in slot order, or empty if none qualified
    pub souls: Vec<Soul>,
    /// Total speed of the winning build
    pub speed: i32,
    /// Crit rate of the winning build
    pub crit: f64,
}

impl BuildResult {
    /// The sentinel result: nothing found yet.
    pub fn none() -> BuildResult {
        BuildResult {
            damage: 0.0,
            souls: Vec::new(),
            speed: 0,
            crit: 0.0,
        }
    }

    /// Whether the search found a qualifying build.
    pub fn found(&self) -> bool {
        !self.souls.is_empty()
    }
}

/// Counters describing how a search spent its time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchStats {
    /// Candidates enumerated from the Cartesian product
    pub candidates: u64,
    /// Candidates dropped by the SPD constraint before crit was computed
    pub pruned_speed: u64,
    /// Candidates dropped by the Crit constraint before damage was computed
    pub pruned_crit: u64,
    /// Candidates that reached the damage computation
    pub evaluated: u64,
}

// ============================================================================
// Input Row Structures
// ============================================================================

/// CSV row structure for soul catalogs.
///
/// Stat columns may be left empty; they default to 0.
#[derive(Debug, Deserialize)]
pub struct SoulRow {
    /// Slot name, one of `Slot1` through `Slot6`
    pub slot: String,
    /// Soul type name
    #[serde(rename = "type")]
    pub soul_type: String,
    /// Flat attack (optional)
    pub atk: Option<f64>,
    /// Attack bonus fraction (optional)
    pub atk_bonus: Option<f64>,
    /// Crit rate fraction (optional)
    pub crit: Option<f64>,
    /// Crit damage multiplier (optional)
    pub crit_dmg: Option<f64>,
    /// Speed (optional)
    pub spd: Option<i32>,
}

/// A team-file entry: one shikigami to optimize.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeamMember {
    /// Shikigami name, resolved against the registry
    pub name: String,
    /// Main soul type required four times in the build
    pub primary: String,
    /// Constraint expressions keyed by attribute, e.g. {"SPD": "117-127"}
    #[serde(default)]
    pub constraints: HashMap<String, String>,
}
