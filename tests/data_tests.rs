//! Tests for data loading, validation, and constraint parsing.

use soulmax::data::{
    load_souls, load_team, parse_constraint, parse_constraint_args, split_constraint_arg,
};
use soulmax::models::Taxonomy;
use std::fs;
use std::path::PathBuf;

/// Writes `contents` to a uniquely named temp file and returns its path.
fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("soulmax_test_{}_{}", std::process::id(), name));
    fs::write(&path, contents).expect("write temp file");
    path
}

const VALID_CATALOG: &str = r#"{
  "Slot1": [{"Type": "Namazu", "ATK": 200}],
  "Slot2": [{"Type": "Harpy", "ATKBonus": 0.05}],
  "Slot3": [{"Type": "Shadow", "Crit": 0.1}],
  "Slot4": [{"Type": "Namazu", "CritDMG": 0.3}],
  "Slot5": [{"Type": "Namazu", "SPD": 12}],
  "Slot6": [{"Type": "Namazu"}]
}"#;

#[test]
fn test_load_json_catalog_with_defaults() {
    let path = temp_file("valid.json", VALID_CATALOG);
    let db = load_souls(&path, &Taxonomy::standard()).expect("valid catalog");
    fs::remove_file(&path).ok();

    assert_eq!(db.len(), 6);
    assert_eq!(db.slot1[0].soul_type, "Namazu");
    assert_eq!(db.slot1[0].atk, 200.0);
    // Unspecified stats default to 0.
    assert_eq!(db.slot1[0].crit, 0.0);
    assert_eq!(db.slot6[0].atk, 0.0);
    assert_eq!(db.slot5[0].spd, 12);
}

#[test]
fn test_load_json_rejects_unknown_soul_attribute() {
    let path = temp_file(
        "badattr.json",
        r#"{
          "Slot1": [{"Type": "Namazu", "Luck": 3}],
          "Slot2": [], "Slot3": [], "Slot4": [], "Slot5": [], "Slot6": []
        }"#,
    );
    let result = load_souls(&path, &Taxonomy::standard());
    fs::remove_file(&path).ok();
    assert!(result.is_err());
}

#[test]
fn test_load_json_requires_all_six_slots() {
    let path = temp_file(
        "missingslot.json",
        r#"{"Slot1": [], "Slot2": [], "Slot3": [], "Slot4": [], "Slot5": []}"#,
    );
    let result = load_souls(&path, &Taxonomy::standard());
    fs::remove_file(&path).ok();
    assert!(result.is_err());
}

#[test]
fn test_load_json_rejects_extra_slots() {
    let path = temp_file(
        "extraslot.json",
        r#"{
          "Slot1": [], "Slot2": [], "Slot3": [], "Slot4": [], "Slot5": [],
          "Slot6": [], "Slot7": []
        }"#,
    );
    let result = load_souls(&path, &Taxonomy::standard());
    fs::remove_file(&path).ok();
    assert!(result.is_err());
}

#[test]
fn test_load_rejects_unknown_soul_type() {
    let path = temp_file(
        "badtype.json",
        r#"{
          "Slot1": [{"Type": "Dragon"}],
          "Slot2": [], "Slot3": [], "Slot4": [], "Slot5": [], "Slot6": []
        }"#,
    );
    let result = load_souls(&path, &Taxonomy::standard());
    fs::remove_file(&path).ok();

    let err = result.expect_err("unknown type must fail validation");
    assert!(err.to_string().contains("Dragon"));
}

#[test]
fn test_load_csv_catalog() {
    let path = temp_file(
        "souls.csv",
        "slot,type,atk,atk_bonus,crit,crit_dmg,spd\n\
         Slot1,Namazu,200,,,,\n\
         Slot1,Harpy,,0.05,,,\n\
         Slot2,Namazu,150,,,,8\n\
         Slot3,Shadow,,,0.1,,\n\
         Slot4,Namazu,,,,,\n\
         Slot5,Namazu,,,,,\n\
         Slot6,Namazu,,,0.04,0.2,\n",
    );
    let db = load_souls(&path, &Taxonomy::standard()).expect("valid csv catalog");
    fs::remove_file(&path).ok();

    assert_eq!(db.slot1.len(), 2);
    assert_eq!(db.slot1[0].atk, 200.0);
    assert_eq!(db.slot1[1].atk_bonus, 0.05);
    assert_eq!(db.slot2[0].spd, 8);
    assert_eq!(db.slot6[0].crit_dmg, 0.2);
    // Empty cells default to 0.
    assert_eq!(db.slot4[0].atk, 0.0);
}

#[test]
fn test_load_csv_rejects_unknown_slot() {
    let path = temp_file(
        "badslot.csv",
        "slot,type,atk,atk_bonus,crit,crit_dmg,spd\n\
         Slot9,Namazu,,,,,\n",
    );
    let result = load_souls(&path, &Taxonomy::standard());
    fs::remove_file(&path).ok();

    let err = result.expect_err("unknown slot must fail");
    assert!(err.to_string().contains("Slot9"));
}

#[test]
fn test_parse_constraint_range() {
    let c = parse_constraint("117-127").unwrap();
    assert_eq!(c.low, 117.0);
    assert_eq!(c.high, 127.0);
}

#[test]
fn test_parse_constraint_single_value_is_exact() {
    let c = parse_constraint("1.0").unwrap();
    assert_eq!(c.low, 1.0);
    assert_eq!(c.high, 1.0);
}

#[test]
fn test_parse_constraint_rejects_malformed_input() {
    assert!(parse_constraint("1-2-3").is_err());
    assert!(parse_constraint("fast").is_err());
    assert!(parse_constraint("").is_err());
}

#[test]
fn test_split_constraint_arg() {
    assert_eq!(split_constraint_arg("SPD=117-127").unwrap(), ("SPD", "117-127"));
    assert_eq!(split_constraint_arg("Crit=1.0").unwrap(), ("Crit", "1.0"));

    assert!(split_constraint_arg("SPD").is_err());
    assert!(split_constraint_arg("=117").is_err());
    assert!(split_constraint_arg("SPD=").is_err());
}

#[test]
fn test_parse_constraint_args_supported_attributes() {
    let constraints =
        parse_constraint_args([("SPD", "117-127"), ("crit", "0.5-1.0")]).unwrap();

    let spd = constraints.spd.expect("spd constraint");
    assert_eq!(spd.low, 117.0);
    assert_eq!(spd.high, 127.0);

    let crit = constraints.crit.expect("crit constraint");
    assert_eq!(crit.low, 0.5);
    assert_eq!(crit.high, 1.0);
}

#[test]
fn test_parse_constraint_args_rejects_unsupported_attribute() {
    let err = parse_constraint_args([("ATK", "100-200")]).expect_err("unsupported attribute");
    assert!(err.to_string().contains("atk"));
}

#[test]
fn test_load_team() {
    let path = temp_file(
        "team.json",
        r#"[
          {"name": "Onikiri", "primary": "Namazu", "constraints": {"SPD": "117-127"}},
          {"name": "Ubume", "primary": "Odokuro"}
        ]"#,
    );
    let team = load_team(&path).expect("valid team file");
    fs::remove_file(&path).ok();

    assert_eq!(team.len(), 2);
    assert_eq!(team[0].name, "Onikiri");
    assert_eq!(team[0].primary, "Namazu");
    assert_eq!(team[0].constraints.get("SPD").map(String::as_str), Some("117-127"));
    assert!(team[1].constraints.is_empty());
}

#[test]
fn test_load_team_rejects_empty_team() {
    let path = temp_file("emptyteam.json", "[]");
    let result = load_team(&path);
    fs::remove_file(&path).ok();
    assert!(result.is_err());
}
