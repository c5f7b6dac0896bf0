use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use super::*;
use crate::entity::EntityType;

const DEMONYMS: &str = "Country,Adjectival,Demonym\n\
Russian Federation,Russian,\"Russians, Russian\"\n\
Ukraine,Ukrainian,Ukrainians\n\
Netherlands,Dutch,\"Dutch, Netherlanders\"\n";

const SUBSTITUTIONS: &str = "name,replacement\n\
UK,United Kingdom of Great Britain and Northern Ireland\n\
Dutch,Kingdom of the Netherlands\n";

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_demonyms_expand_both_lists() {
    let table = read_demonyms(DEMONYMS.as_bytes(), Path::new("demonyms.csv")).unwrap();

    assert_eq!(table.get("russian").map(String::as_str), Some("Russian Federation"));
    assert_eq!(table.get("russians").map(String::as_str), Some("Russian Federation"));
    assert_eq!(table.get("ukrainians").map(String::as_str), Some("Ukraine"));
    assert_eq!(table.get("netherlanders").map(String::as_str), Some("Netherlands"));
}

#[test]
fn test_substitutions_missing_column() {
    let err = read_substitutions("name,canonical\nUK,Britain\n".as_bytes(), Path::new("subs.csv"))
        .unwrap_err();

    assert!(matches!(err, AliasError::MissingColumn { column: "replacement", .. }));
}

#[test]
fn test_curated_wins_on_collision() {
    let subs = read_substitutions(SUBSTITUTIONS.as_bytes(), Path::new("subs.csv")).unwrap();
    let demonyms = read_demonyms(DEMONYMS.as_bytes(), Path::new("demonyms.csv")).unwrap();

    let table = AliasTable::from_maps(subs, demonyms);

    assert_eq!(table.lookup("Dutch"), Some("Kingdom of the Netherlands"));
    assert_eq!(table.lookup("Netherlanders"), Some("Netherlands"));
}

#[test]
fn test_lookup_is_case_insensitive_and_trimmed() {
    let table = AliasTable::from_maps(
        HashMap::from([("UK".to_string(), "United Kingdom".to_string())]),
        HashMap::new(),
    );

    assert_eq!(table.lookup("uk"), Some("United Kingdom"));
    assert_eq!(table.lookup("  Uk "), Some("United Kingdom"));
    assert_eq!(table.lookup("Ukraine"), None);
}

#[test]
fn test_apply_records_original_text() {
    let table = AliasTable::from_maps(
        HashMap::from([("uk".to_string(), "United Kingdom".to_string())]),
        HashMap::new(),
    );
    let mut entities = vec![
        GeoEntity::new("UK", EntityType::CountryOrRegion, 0, 2),
        GeoEntity::new("Paris", EntityType::CountryOrRegion, 10, 15),
    ];

    assert_eq!(table.apply_all(&mut entities), 1);
    assert_eq!(entities[0].text, "United Kingdom");
    assert_eq!(entities[0].original_text.as_deref(), Some("UK"));
    assert!(!entities[1].is_substituted());
}

#[test]
fn test_load_from_files() {
    let subs = write_temp(SUBSTITUTIONS);
    let demonyms = write_temp(DEMONYMS);

    let table = AliasTable::load(subs.path(), demonyms.path()).unwrap();

    assert_eq!(table.lookup("uk"), Some("United Kingdom of Great Britain and Northern Ireland"));
    assert_eq!(table.lookup("Russians"), Some("Russian Federation"));
    assert!(table.len() >= 6);
}

#[test]
fn test_load_header_only_file_is_empty_error() {
    let subs = write_temp("name,replacement\n");
    let demonyms = write_temp(DEMONYMS);

    let err = AliasTable::load(subs.path(), demonyms.path()).unwrap_err();
    assert!(matches!(err, AliasError::Empty { .. }));
}

#[test]
fn test_load_missing_file() {
    let demonyms = write_temp(DEMONYMS);

    let err = AliasTable::load(Path::new("/nonexistent/subs.csv"), demonyms.path()).unwrap_err();
    assert!(matches!(err, AliasError::Read { .. }));
}

#[test]
fn test_shipped_tables_load() {
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let table = AliasTable::load(
        &data.join("custom-substitutions.csv"),
        &data.join("demonyms.csv"),
    )
    .unwrap();

    assert_eq!(table.lookup("UK"), Some("United Kingdom of Great Britain and Northern Ireland"));
    assert_eq!(table.lookup("Russians"), Some("Russian Federation"));
    assert_eq!(table.lookup("Ukrainian"), Some("Ukraine"));
}
