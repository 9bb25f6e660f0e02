//! Data loading functionality for Soulmax.
//!
//! This module handles loading the soul catalog from JSON or CSV files,
//! loading team files, validating everything against the taxonomy, and
//! parsing constraint expressions. All validation happens here, before
//! the optimizer runs; the core assumes well-formed inputs.

use csv::ReaderBuilder;
use std::error::Error;
use std::fs::File;
use std::path::Path;

use crate::models::{Constraint, Constraints, Soul, SoulDb, SoulRow, Taxonomy, TeamMember};

/// Parses a constraint expression: a single number `N` (shorthand for
/// the range [N, N]) or an inclusive range `M-N`.
///
/// # Example
///
/// ```
/// use soulmax::data::parse_constraint;
///
/// let c = parse_constraint("117-127").unwrap();
/// assert_eq!(c.low, 117.0);
/// assert_eq!(c.high, 127.0);
///
/// let c = parse_constraint("1.0").unwrap();
/// assert_eq!(c.low, c.high);
/// ```
pub fn parse_constraint(text: &str) -> Result<Constraint, Box<dyn Error>> {
    let parts: Vec<&str> = text.split('-').collect();
    if parts.len() > 2 {
        return Err(format!(
            "Illegal constraint {}, must be a number N or range of the form M-N",
            text
        )
        .into());
    }

    let mut bounds = Vec::with_capacity(2);
    for part in &parts {
        let value: f64 = part.parse().map_err(|_| {
            format!("{} could not be parsed as a number in constraint {}", part, text)
        })?;
        bounds.push(value);
    }

    Ok(if bounds.len() == 1 {
        Constraint::exact(bounds[0])
    } else {
        Constraint::range(bounds[0], bounds[1])
    })
}

/// Parses `<attribute>=<range>` expressions into a [`Constraints`] set.
///
/// Only the `Crit` and `SPD` attributes are supported (case-insensitive);
/// anything else is a validation error. Expressions are exactly the form
/// accepted on the command line and in team files, e.g. `SPD=117-127` or
/// `Crit=1.0`.
pub fn parse_constraint_args<I, S>(args: I) -> Result<Constraints, Box<dyn Error>>
where
    I: IntoIterator<Item = (S, S)>,
    S: AsRef<str>,
{
    let mut constraints = Constraints::default();
    for (attr, range) in args {
        let constraint = parse_constraint(range.as_ref())?;
        match attr.as_ref().to_lowercase().as_str() {
            "crit" => constraints.crit = Some(constraint),
            "spd" => constraints.spd = Some(constraint),
            other => {
                return Err(format!("Unsupported attribute constraint {}", other).into());
            }
        }
    }
    Ok(constraints)
}

/// Splits a command-line constraint argument `Attr=range` into its parts.
pub fn split_constraint_arg(arg: &str) -> Result<(&str, &str), Box<dyn Error>> {
    let mut parts = arg.splitn(2, '=');
    match (parts.next(), parts.next()) {
        (Some(attr), Some(range)) if !attr.is_empty() && !range.is_empty() => Ok((attr, range)),
        _ => Err(format!(
            "Unknown argument {}, must be of the form <attribute>=<range>, such as SPD=117-127 or Crit=1.0",
            arg
        )
        .into()),
    }
}

/// Checks that every soul's type is known to the taxonomy.
///
/// Reports all offending souls at once rather than stopping at the first.
pub fn validate_souls(db: &SoulDb, taxonomy: &Taxonomy) -> Result<(), Box<dyn Error>> {
    let mut unknown = Vec::new();
    for (slot, souls) in db.slots().iter().enumerate() {
        for soul in souls.iter() {
            if !taxonomy.contains(&soul.soul_type) {
                unknown.push(format!("Slot{}: {}", slot + 1, soul.soul_type));
            }
        }
    }
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(format!("Unexpected soul types: {}", unknown.join(", ")).into())
    }
}

/// Loads a soul catalog from a JSON file.
///
/// The file must be an object with exactly the keys `Slot1` through
/// `Slot6`, each an array of souls. Unknown keys and unknown soul
/// attributes are rejected.
///
/// # JSON Format
///
/// ```json
/// {
///   "Slot1": [{"Type": "Namazu", "ATK": 200}],
///   "Slot2": [], "Slot3": [], "Slot4": [], "Slot5": [], "Slot6": []
/// }
/// ```
pub fn load_souls_json(path: &Path) -> Result<SoulDb, Box<dyn Error>> {
    let file = File::open(path)?;
    let db = serde_json::from_reader(file)?;
    Ok(db)
}

/// Loads a soul catalog from a CSV file.
///
/// # CSV Format
///
/// Expected columns: `slot, type, atk, atk_bonus, crit, crit_dmg, spd`.
/// The `slot` column must be one of `Slot1` through `Slot6`; empty stat
/// cells default to 0.
pub fn load_souls_csv(path: &Path) -> Result<SoulDb, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let mut db = SoulDb::default();
    for result in rdr.deserialize() {
        let row: SoulRow = result?;
        let soul = Soul {
            soul_type: row.soul_type,
            atk: row.atk.unwrap_or(0.0),
            atk_bonus: row.atk_bonus.unwrap_or(0.0),
            crit: row.crit.unwrap_or(0.0),
            crit_dmg: row.crit_dmg.unwrap_or(0.0),
            spd: row.spd.unwrap_or(0),
        };
        match row.slot.as_str() {
            "Slot1" => db.slot1.push(soul),
            "Slot2" => db.slot2.push(soul),
            "Slot3" => db.slot3.push(soul),
            "Slot4" => db.slot4.push(soul),
            "Slot5" => db.slot5.push(soul),
            "Slot6" => db.slot6.push(soul),
            other => {
                return Err(format!(
                    "Unknown slot {}, expected Slot1 through Slot6",
                    other
                )
                .into());
            }
        }
    }
    Ok(db)
}

/// Loads and validates a soul catalog, picking the format by extension.
///
/// Files ending in `.csv` use the CSV format; everything else is parsed
/// as JSON. Every soul type is checked against the taxonomy before the
/// catalog is returned.
///
/// # Example
///
/// ```no_run
/// use soulmax::data::load_souls;
/// use soulmax::models::Taxonomy;
/// use std::path::Path;
///
/// let db = load_souls(Path::new("souls.json"), &Taxonomy::standard()).unwrap();
/// println!("Loaded {} souls", db.len());
/// ```
pub fn load_souls(path: &Path, taxonomy: &Taxonomy) -> Result<SoulDb, Box<dyn Error>> {
    let db = match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => load_souls_csv(path)?,
        _ => load_souls_json(path)?,
    };
    validate_souls(&db, taxonomy)?;
    Ok(db)
}

/// Loads a team file: a JSON array of members to optimize in order.
///
/// # JSON Format
///
/// ```json
/// [
///   {"name": "Onikiri", "primary": "Namazu", "constraints": {"SPD": "117-127"}},
///   {"name": "Ubume", "primary": "Odokuro"}
/// ]
/// ```
pub fn load_team(path: &Path) -> Result<Vec<TeamMember>, Box<dyn Error>> {
    let file = File::open(path)?;
    let team: Vec<TeamMember> = serde_json::from_reader(file)?;
    if team.is_empty() {
        return Err(format!("Team file {} lists no members", path.display()).into());
    }
    Ok(team)
}
