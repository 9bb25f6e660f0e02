//! Display and formatting utilities for Soulmax.
//!
//! This module provides functions for formatting the winning build and
//! search statistics into readable text or JSON.

use crate::models::{BuildResult, SearchStats, Soul};

/// Formats the six chosen souls as an aligned table.
///
/// # Example
///
/// ```
/// use soulmax::display::souls_table;
/// use soulmax::models::Soul;
///
/// let soul = Soul {
///     soul_type: "Namazu".to_string(),
///     atk: 200.0,
///     atk_bonus: 0.0,
///     crit: 0.0,
///     crit_dmg: 0.0,
///     spd: 0,
/// };
/// let table = souls_table(&[soul]);
/// assert!(table.contains("Namazu"));
/// ```
pub fn souls_table(souls: &[Soul]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<6} {:<20} {:>8} {:>9} {:>7} {:>8} {:>5}\n",
        "Slot", "Type", "ATK", "ATKBonus", "Crit", "CritDMG", "SPD"
    ));
    out.push_str(&"-".repeat(68));
    out.push('\n');
    for (i, soul) in souls.iter().enumerate() {
        out.push_str(&format!(
            "{:<6} {:<20} {:>8.0} {:>9.2} {:>7.2} {:>8.2} {:>5}\n",
            i + 1,
            soul.soul_type,
            soul.atk,
            soul.atk_bonus,
            soul.crit,
            soul.crit_dmg,
            soul.spd
        ));
    }
    out
}

/// Renders the chosen souls as pretty-printed JSON under a `Souls` key,
/// suitable for feeding back into other tooling.
pub fn souls_to_json(souls: &[Soul]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({ "Souls": souls }))
}

/// Displays the result of one search to stdout.
///
/// Prints the damage/speed/crit summary, the soul table (or a warning
/// when no build qualified), and the enumeration counters.
pub fn display_result(name: &str, result: &BuildResult, stats: &SearchStats) {
    println!();
    println!("================================================================");
    println!("  {}", name);
    println!("================================================================");

    if !result.found() {
        println!();
        println!("[WARNING] No build includes 4 of the main soul and satisfies the constraints.");
    } else {
        println!();
        println!("  Damage:  {:.1}", result.damage);
        println!("  Speed:   {}", result.speed);
        println!("  Crit:    {:.3}", result.crit);
        println!();
        print!("{}", souls_table(&result.souls));
    }

    println!();
    println!(
        "  Searched {} builds ({} evaluated, {} pruned by SPD, {} pruned by Crit)",
        stats.candidates, stats.evaluated, stats.pruned_speed, stats.pruned_crit
    );
}
