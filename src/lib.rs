//! # Soulmax
//!
//! A command-line tool and library for finding the damage-maximizing
//! assignment of six souls, one per slot, to a shikigami.
//!
//! Given a catalog of souls per slot, a shikigami's base stats, the
//! soul-type taxonomy, and optional speed/crit constraints, the crate
//! exhaustively enumerates every possible build and returns the one with
//! the highest damage:
//!
//! - A build is only active when at least four of its souls share the
//!   chosen main soul type.
//! - Two souls of the same AttackBonus-category type add +15% attack;
//!   two of the same Crit-category type add +15% crit rate.
//! - Odokuro and Seductress carry their own set effects on top.
//!
//! ## Modules
//!
//! - [`models`] - Core data structures for shikigami, souls, taxonomy,
//!   constraints, and results
//! - [`data`] - Catalog/team loading, validation, and constraint parsing
//! - [`optimizer`] - The damage model and the exhaustive build search
//! - [`display`] - Output formatting utilities
//!
//! ## Example Usage
//!
//! ```no_run
//! use soulmax::{
//!     data::load_souls,
//!     display::display_result,
//!     models::{Constraints, Shikigami, Taxonomy},
//!     optimizer::find_best_build,
//! };
//! use std::path::Path;
//!
//! let taxonomy = Taxonomy::standard();
//! let db = load_souls(Path::new("souls.json"), &taxonomy).unwrap();
//! let shikigami = Shikigami::by_name("Onikiri").unwrap();
//!
//! let (result, stats) = find_best_build(
//!     &db,
//!     &shikigami,
//!     &taxonomy,
//!     "Namazu",
//!     &Constraints::default(),
//!     false,
//! );
//! display_result("Onikiri", &result, &stats);
//! ```
//!
//! The search is a pure, read-only sweep: the catalog, shikigami,
//! taxonomy, and constraints are never mutated once it starts, and
//! candidates outside the constraints are skipped before the more
//! expensive crit and damage computations run.

pub mod data;
pub mod display;
pub mod models;
pub mod optimizer;
