//! End-to-end tests: normalize, export, import and sort the roster.

use serde_json::{json, Value};
use stark::{
    dataset, normalize_collection, read_csv, read_json, restore_collection, sort_ascending,
    sort_descending, write_csv, write_json, FieldValue, Record, SanitizeError, Session,
    SessionConfig,
};
use std::io::Cursor;
use tempfile::tempdir;

fn records(values: Vec<Value>) -> Vec<Record> {
    values
        .into_iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect()
}

#[test]
fn normalize_then_sort_by_height() {
    let mut roster = records(vec![
        json!({"nombre": "A", "altura": "1.8"}),
        json!({"nombre": "B", "altura": "1.6"}),
    ]);

    normalize_collection(&mut roster);
    sort_ascending(&mut roster, "altura");

    assert_eq!(roster[0]["nombre"], json!("B"));
    assert_eq!(roster[1]["nombre"], json!("A"));
}

#[test]
fn csv_round_trip_keeps_strings_and_field_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("heroes.csv");
    let roster = dataset::builtin().unwrap();

    write_csv(&path, &roster).unwrap();
    let back = read_csv(&path).unwrap();

    assert_eq!(back, roster);
    let keys: Vec<_> = back[0].keys().collect();
    let expected: Vec<_> = roster[0].keys().collect();
    assert_eq!(keys, expected);
}

#[test]
fn csv_round_trip_of_normalized_roster_renormalizes_equal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("heroes.csv");
    let mut roster = dataset::builtin().unwrap();
    normalize_collection(&mut roster);

    write_csv(&path, &roster).unwrap();
    let mut back = read_csv(&path).unwrap();
    restore_collection(&mut back);

    for (a, b) in roster.iter().zip(&back) {
        for key in ["altura", "peso", "fuerza", "color_ojos", "color_pelo", "inteligencia"] {
            assert_eq!(FieldValue::from(&a[key]), FieldValue::from(&b[key]), "{}", key);
        }
    }
}

#[test]
fn csv_round_trip_keeps_rejection_kinds() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("heroes.csv");
    let mut roster = records(vec![
        json!({"nombre": "A", "altura": "abc", "peso": "-70", "fuerza": "99999999999999999999999", "color_ojos": "", "color_pelo": "No Hair"}),
        json!({"nombre": "B", "altura": "1.6", "peso": "80", "fuerza": "10", "color_ojos": "Blue", "color_pelo": "-"}),
    ]);
    normalize_collection(&mut roster);
    assert_eq!(roster[0]["altura"], json!(-1));
    assert_eq!(roster[0]["peso"], json!(-2));
    assert_eq!(roster[0]["fuerza"], json!(-3));
    assert_eq!(roster[1]["color_pelo"], json!("N/A"));

    write_csv(&path, &roster).unwrap();
    let mut back = read_csv(&path).unwrap();
    restore_collection(&mut back);

    assert_eq!(
        FieldValue::from(&back[0]["altura"]),
        FieldValue::Invalid(SanitizeError::NonNumeric)
    );
    assert_eq!(
        FieldValue::from(&back[0]["peso"]),
        FieldValue::Invalid(SanitizeError::Negative)
    );
    assert_eq!(
        FieldValue::from(&back[0]["fuerza"]),
        FieldValue::Invalid(SanitizeError::ConversionFailure)
    );
    assert_eq!(back[0]["color_ojos"], json!("-"));
    assert_eq!(back[0]["color_pelo"], json!("N/A"));
    assert_eq!(back, roster);
}

#[test]
fn json_round_trip_is_structurally_equal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("heroes.json");
    let mut roster = dataset::builtin().unwrap();
    normalize_collection(&mut roster);

    write_json(&path, &roster, "heroes").unwrap();
    assert_eq!(read_json(&path, "heroes").unwrap(), roster);
}

#[test]
fn builtin_roster_normalizes_with_known_quirks() {
    let mut roster = dataset::builtin().unwrap();
    normalize_collection(&mut roster);

    let find = |name: &str| roster.iter().find(|h| h["nombre"] == json!(name)).unwrap();

    // Empty intelligence falls back to the default marker
    assert_eq!(find("Howard the Duck")["inteligencia"], json!("-"));
    // Multi-word values are not purely alphabetic
    assert_eq!(
        FieldValue::from(&find("Vision")["color_pelo"]),
        FieldValue::Invalid(SanitizeError::NotApplicable)
    );
    assert_eq!(find("Mystique")["color_pelo"], json!("N/A"));
    assert_eq!(find("Hulk")["fuerza"], json!(160));
    assert_eq!(find("Storm")["color_pelo"], json!("white"));
}

#[test]
fn json_listing_sorted_by_weight_desc() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("heroes.json");
    let mut roster = dataset::builtin().unwrap();
    normalize_collection(&mut roster);
    write_json(&path, &roster, "heroes").unwrap();

    let mut back = read_json(&path, "heroes").unwrap();
    sort_descending(&mut back, "peso");
    assert_eq!(back[0]["nombre"], json!("Sasquatch"));
    assert_eq!(back.last().unwrap()["nombre"], json!("Howard the Duck"));
}

#[test]
fn menu_session_full_walkthrough() {
    let dir = tempdir().unwrap();
    let config = SessionConfig::default().in_dir(dir.path());
    let mut session = Session::new(dataset::builtin().unwrap(), config);

    let mut input = Cursor::new(b"1\n2\n3\n4\n5\n6\nasc\n7\n".to_vec());
    let mut output = Vec::new();
    session.run(&mut input, &mut output).unwrap();
    let out = String::from_utf8(output).unwrap();

    assert!(dir.path().join("heroes.csv").exists());
    assert!(dir.path().join("heroes.json").exists());
    assert!(out.contains("Data normalized."));
    assert!(out.contains("Name: Howard the Duck - altura: 79.35"));
    assert!(out.contains("Name: Sasquatch - peso: 900.0"));
    assert!(out.contains("Name: Hulk - fuerza: 160"));

    // Option 3 lists shortest first
    let howard = out.find("Name: Howard the Duck - altura").unwrap();
    let sasquatch = out.find("Name: Sasquatch - altura").unwrap();
    assert!(howard < sasquatch);

    // Option 6 sorted the session roster in place
    let strengths: Vec<_> = session
        .roster()
        .iter()
        .map(|h| h["fuerza"].as_i64().unwrap())
        .collect();
    assert!(strengths.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn menu_reports_wrong_list_key() {
    let dir = tempdir().unwrap();
    let config = SessionConfig::default().in_dir(dir.path());
    let json_path = config.json_path.clone();
    write_json(&json_path, &dataset::builtin().unwrap(), "villains").unwrap();

    let mut session = Session::new(dataset::builtin().unwrap(), config);
    let mut input = Cursor::new(b"1\n5\n7\n".to_vec());
    let mut output = Vec::new();
    session.run(&mut input, &mut output).unwrap();
    let out = String::from_utf8(output).unwrap();

    assert!(out.contains("List 'heroes' was not found in the JSON file"));
}
