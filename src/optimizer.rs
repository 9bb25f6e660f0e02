//! Damage model and exhaustive build search for Soulmax.
//!
//! This module contains the core logic: the crit/damage formulas and the
//! exhaustive enumeration over the Cartesian product of the six slot
//! catalogs, with constraint pruning and best-candidate tracking.

use std::collections::HashMap;

use crate::models::{
    BuildResult, Constraints, SearchStats, Shikigami, Soul, SoulCategory, SoulDb, Taxonomy,
};

/// Crit or attack bonus granted per stacked soul type (2-piece set effect).
const STACK_BONUS: f64 = 0.15;

/// Soul type whose 2-piece effect multiplies damage by 1.1.
const ODOKURO: &str = "Odokuro";

/// Soul type whose 4-piece effect adds 1.2 x crit x attack to damage.
const SEDUCTRESS: &str = "Seductress";

/// Number of main-type souls required to activate a build.
const MAIN_SOUL_PIECES: u32 = 4;

/// Counts how many souls of each type appear in a build.
///
/// Computed once per candidate and threaded through the crit and damage
/// computations.
pub fn type_counts<'a>(build: &[&'a Soul]) -> HashMap<&'a str, u32> {
    let mut counts = HashMap::new();
    for soul in build {
        *counts.entry(soul.soul_type.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Counts distinct soul types of the given category with at least two
/// occurrences in the build. Both stacking bonuses (attack and crit) use
/// this rule.
fn stacked_type_count(
    counts: &HashMap<&str, u32>,
    taxonomy: &Taxonomy,
    category: SoulCategory,
) -> u32 {
    counts
        .iter()
        .filter(|&(name, &n)| n >= 2 && taxonomy.category_of(name) == Some(category))
        .count() as u32
}

/// Computes the critical-hit rate of a build, clamped to 1.0.
///
/// The rate is the shikigami's base crit plus each soul's crit field,
/// plus 0.15 for every Crit-category type with at least two souls in the
/// build. With `ignore_crit` the rate is 0, which models fights where
/// crits are negated.
///
/// # Example
///
/// ```
/// use soulmax::models::{Shikigami, Soul, Taxonomy};
/// use soulmax::optimizer::{compute_crit, type_counts};
///
/// let onikiri = Shikigami::by_name("Onikiri").unwrap();
/// let soul = Soul {
///     soul_type: "Namazu".to_string(),
///     atk: 0.0,
///     atk_bonus: 0.0,
///     crit: 0.05,
///     crit_dmg: 0.0,
///     spd: 0,
/// };
/// let build = [&soul; 6];
/// let counts = type_counts(&build);
/// let crit = compute_crit(&onikiri, &build, &counts, &Taxonomy::standard(), false);
/// assert!((crit - 0.41).abs() < 1e-9);
/// ```
pub fn compute_crit(
    shikigami: &Shikigami,
    build: &[&Soul],
    counts: &HashMap<&str, u32>,
    taxonomy: &Taxonomy,
    ignore_crit: bool,
) -> f64 {
    if ignore_crit {
        return 0.0;
    }

    let soul_crit: f64 = build.iter().map(|s| s.crit).sum();
    let stacked = stacked_type_count(counts, taxonomy, SoulCategory::Crit);
    let crit = shikigami.crit + soul_crit + STACK_BONUS * f64::from(stacked);
    crit.min(1.0)
}

/// Computes the damage of a build.
///
/// Returns 0 unless the build contains at least four souls of
/// `main_soul`; that activation gate dominates everything else. The crit
/// rate and type counts are passed in so each candidate computes them
/// exactly once.
///
/// # Arguments
///
/// * `shikigami` - Base stats of the character
/// * `build` - The six candidate souls
/// * `counts` - Type counts from [`type_counts`] over the same build
/// * `crit` - Crit rate from [`compute_crit`] over the same build
/// * `taxonomy` - Soul-type classification in effect
/// * `main_soul` - The soul type required four times
pub fn damage(
    shikigami: &Shikigami,
    build: &[&Soul],
    counts: &HashMap<&str, u32>,
    crit: f64,
    taxonomy: &Taxonomy,
    main_soul: &str,
) -> f64 {
    if counts.get(main_soul).copied().unwrap_or(0) < MAIN_SOUL_PIECES {
        return 0.0;
    }

    let soul_atk: f64 = build.iter().map(|s| s.atk).sum();
    let stacked = stacked_type_count(counts, taxonomy, SoulCategory::AttackBonus);
    let atk_bonus: f64 =
        build.iter().map(|s| s.atk_bonus).sum::<f64>() + STACK_BONUS * f64::from(stacked);
    let atk = shikigami.atk + soul_atk + shikigami.atk * atk_bonus;

    let crit_dmg: f64 = shikigami.crit_dmg + build.iter().map(|s| s.crit_dmg).sum::<f64>();

    let mut dmg = atk * (crit * crit_dmg + (1.0 - crit));
    if counts.get(ODOKURO).copied().unwrap_or(0) >= 2 {
        dmg *= 1.1;
    }
    if counts.get(SEDUCTRESS).copied().unwrap_or(0) >= 4 {
        dmg += 1.2 * crit * atk;
    }
    dmg
}

/// Advances a slot index vector to the next candidate, slot 6 varying
/// fastest. Returns `false` once the product is exhausted.
fn advance(indices: &mut [usize; 6], lens: &[usize; 6]) -> bool {
    for slot in (0..6).rev() {
        indices[slot] += 1;
        if indices[slot] < lens[slot] {
            return true;
        }
        indices[slot] = 0;
    }
    false
}

/// Finds the damage-maximizing assignment of one soul per slot.
///
/// Enumerates the full Cartesian product of the six slot catalogs with
/// slot 1 outermost and slot 6 varying fastest; that fixed order makes
/// ties deterministic (the first candidate to reach the maximum wins,
/// replacement requires strictly greater damage). Each candidate is
/// checked cheapest-first: total speed against the SPD constraint, then
/// crit against the Crit constraint, and only then the damage formula.
///
/// # Arguments
///
/// * `db` - The validated six-slot soul catalog
/// * `shikigami` - Base stats of the character
/// * `taxonomy` - Soul-type classification; every catalog type must be a key
/// * `main_soul` - Soul type required four times to activate a build
/// * `constraints` - Optional inclusive ranges on speed and crit
/// * `ignore_crit` - Treat crit as worthless when computing damage
///
/// # Returns
///
/// The best [`BuildResult`] together with [`SearchStats`] counters. If no
/// candidate produces positive damage inside the constraints, the result
/// is the sentinel (damage 0, empty soul list).
///
/// # Example
///
/// ```
/// use soulmax::models::{Constraints, Shikigami, Soul, SoulDb, Taxonomy};
/// use soulmax::optimizer::find_best_build;
///
/// let namazu = Soul {
///     soul_type: "Namazu".to_string(),
///     atk: 200.0,
///     atk_bonus: 0.0,
///     crit: 0.0,
///     crit_dmg: 0.0,
///     spd: 0,
/// };
/// let db = SoulDb {
///     slot1: vec![namazu.clone()],
///     slot2: vec![namazu.clone()],
///     slot3: vec![namazu.clone()],
///     slot4: vec![namazu.clone()],
///     slot5: vec![namazu.clone()],
///     slot6: vec![namazu.clone()],
/// };
/// let onikiri = Shikigami::by_name("Onikiri").unwrap();
/// let (result, _) = find_best_build(
///     &db,
///     &onikiri,
///     &Taxonomy::standard(),
///     "Namazu",
///     &Constraints::default(),
///     false,
/// );
/// assert!(result.found());
/// assert_eq!(result.speed, 117);
/// ```
pub fn find_best_build(
    db: &SoulDb,
    shikigami: &Shikigami,
    taxonomy: &Taxonomy,
    main_soul: &str,
    constraints: &Constraints,
    ignore_crit: bool,
) -> (BuildResult, SearchStats) {
    let slots = db.slots();
    let mut stats = SearchStats::default();
    let mut best = BuildResult::none();

    // An empty slot makes the product empty.
    if slots.iter().any(|slot| slot.is_empty()) {
        return (best, stats);
    }

    let lens = [
        slots[0].len(),
        slots[1].len(),
        slots[2].len(),
        slots[3].len(),
        slots[4].len(),
        slots[5].len(),
    ];
    let mut indices = [0usize; 6];

    loop {
        let build = [
            &slots[0][indices[0]],
            &slots[1][indices[1]],
            &slots[2][indices[2]],
            &slots[3][indices[3]],
            &slots[4][indices[4]],
            &slots[5][indices[5]],
        ];
        stats.candidates += 1;

        let speed = shikigami.spd + build.iter().map(|s| s.spd).sum::<i32>();
        if !constraints.speed_ok(speed) {
            stats.pruned_speed += 1;
        } else {
            let counts = type_counts(&build);
            let crit = compute_crit(shikigami, &build, &counts, taxonomy, ignore_crit);
            if !constraints.crit_ok(crit) {
                stats.pruned_crit += 1;
            } else {
                stats.evaluated += 1;
                let dmg = damage(shikigami, &build, &counts, crit, taxonomy, main_soul);
                if dmg > best.damage {
                    best = BuildResult {
                        damage: dmg,
                        souls: build.iter().map(|&s| s.clone()).collect(),
                        speed,
                        crit,
                    };
                }
            }
        }

        if !advance(&mut indices, &lens) {
            break;
        }
    }

    (best, stats)
}
