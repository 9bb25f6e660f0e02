//! Soulmax - Command Line Interface
//!
//! This is the main entry point for the soul optimization tool.
//! Run with `--help` to see all available options.

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::process;

use soulmax::{
    data::{load_souls, load_team, parse_constraint_args, split_constraint_arg},
    display::{display_result, souls_to_json},
    models::{Constraints, Shikigami, Taxonomy},
    optimizer::find_best_build,
};

/// Command-line arguments for Soulmax.
#[derive(Parser, Debug)]
#[command(name = "soulmax")]
#[command(author, version, about = "Find the highest-damage soul build for a shikigami", long_about = None)]
struct Args {
    /// Name of the shikigami to optimize (e.g. "Onikiri")
    #[arg(required_unless_present = "team")]
    shikigami: Option<String>,

    /// Main soul type that must appear at least 4 times in the build
    #[arg(required_unless_present = "team")]
    main_soul: Option<String>,

    /// Attribute constraints of the form SPD=117-127 or Crit=1.0
    constraints: Vec<String>,

    /// A JSON or CSV file describing your souls
    #[arg(short, long, default_value = "souls.json")]
    souls: PathBuf,

    /// Optimize a whole team from a JSON file; each member's winning
    /// souls are removed from the catalog before the next member runs
    #[arg(short, long, conflicts_with_all = ["shikigami", "main_soul", "constraints"])]
    team: Option<PathBuf>,

    /// Ignore crit when calculating damage, useful for fights that negate crit
    #[arg(long)]
    ignore_crit: bool,

    /// Also print each winning build as JSON
    #[arg(long)]
    json: bool,
}

/// One shikigami to optimize, with its inputs fully resolved.
struct Member {
    name: String,
    shikigami: Shikigami,
    main_soul: String,
    constraints: Constraints,
}

/// Resolves a name/primary/constraints triple against the registry and
/// taxonomy, exiting with a message on any validation failure.
fn resolve_member(
    name: &str,
    main_soul: &str,
    constraints: Result<Constraints, Box<dyn Error>>,
    taxonomy: &Taxonomy,
) -> Member {
    let shikigami = Shikigami::by_name(name).unwrap_or_else(|| {
        eprintln!("Unknown shikigami {}", name);
        process::exit(1);
    });
    if !taxonomy.contains(main_soul) {
        eprintln!("Unknown main soul type {}", main_soul);
        process::exit(1);
    }
    let constraints = constraints.unwrap_or_else(|err| {
        eprintln!("{}", err);
        process::exit(1);
    });
    Member {
        name: name.to_string(),
        shikigami,
        main_soul: main_soul.to_string(),
        constraints,
    }
}

fn main() {
    let args = Args::parse();
    let taxonomy = Taxonomy::standard();

    let members: Vec<Member> = if let Some(ref team_path) = args.team {
        let team = load_team(team_path).unwrap_or_else(|err| {
            eprintln!("Error reading {}: {}", team_path.display(), err);
            process::exit(1);
        });
        team.iter()
            .map(|m| {
                resolve_member(
                    &m.name,
                    &m.primary,
                    parse_constraint_args(m.constraints.iter()),
                    &taxonomy,
                )
            })
            .collect()
    } else {
        // Both positionals are present when --team is absent; clap
        // enforces required_unless_present.
        let name = args.shikigami.as_deref().unwrap_or_default();
        let main_soul = args.main_soul.as_deref().unwrap_or_default();
        let constraints = args
            .constraints
            .iter()
            .map(|arg| split_constraint_arg(arg))
            .collect::<Result<Vec<_>, _>>()
            .and_then(parse_constraint_args);
        vec![resolve_member(name, main_soul, constraints, &taxonomy)]
    };

    let mut db = load_souls(&args.souls, &taxonomy).unwrap_or_else(|err| {
        eprintln!("Error reading {}: {}", args.souls.display(), err);
        process::exit(1);
    });

    for member in &members {
        println!("Finding best souls for {}", member.name);
        let (result, stats) = find_best_build(
            &db,
            &member.shikigami,
            &taxonomy,
            &member.main_soul,
            &member.constraints,
            args.ignore_crit,
        );
        display_result(&member.name, &result, &stats);

        if args.json && result.found() {
            match souls_to_json(&result.souls) {
                Ok(json) => println!("{}", json),
                Err(err) => {
                    eprintln!("Unable to render souls as JSON: {}", err);
                    process::exit(1);
                }
            }
        }

        if !result.found() && members.len() > 1 {
            eprintln!("Unable to find souls that include 4 of the primary soul and satisfy constraints");
            process::exit(1);
        }

        db.remove_build(&result.souls);
    }
}
