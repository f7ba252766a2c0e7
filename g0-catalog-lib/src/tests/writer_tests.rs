use super::*;
use g0_catalog_core::{CATALOG_SCHEMA_VERSION, CatalogStats, KeyFrequency, MissingSourceFields};
use tempfile::TempDir;

fn catalog(stamp: &str, total: usize) -> Catalog {
    Catalog {
        schema_version: CATALOG_SCHEMA_VERSION.to_string(),
        generated_at: stamp.to_string(),
        total_games: total,
        games: Vec::new(),
        stats: CatalogStats {
            total_source_files: total,
            missing_source_fields: MissingSourceFields::default(),
            duplicate_source_game_ids: 0,
            top_level_key_frequency: vec![KeyFrequency {
                key: "id".into(),
                count: total,
            }],
        },
    }
}

#[test]
fn generated_at_has_millis_and_z() {
    let at = Utc.with_ymd_and_hms(2026, 3, 1, 8, 15, 0).unwrap();
    assert_eq!(format_generated_at(at), "2026-03-01T08:15:00.000Z");
}

#[test]
fn flag_wins_over_source_date_epoch() {
    let at = resolve_generated_at(Some("2026-01-02T03:04:05+01:00"), Some("0")).unwrap();
    assert_eq!(format_generated_at(at), "2026-01-02T02:04:05.000Z");

    let at = resolve_generated_at(None, Some("86400")).unwrap();
    assert_eq!(format_generated_at(at), "1970-01-02T00:00:00.000Z");
}

#[test]
fn invalid_timestamp_is_rejected() {
    let err = resolve_generated_at(Some("yesterday"), None).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidTimestamp(v) if v == "yesterday"));
}

#[test]
fn blank_override_falls_through_to_now() {
    let before = Utc::now();
    let at = resolve_generated_at(Some(""), Some("  ")).unwrap();
    assert!(at >= before);
}

#[test]
fn render_is_pretty_with_trailing_newline() {
    let text = render_catalog(&catalog("2026-01-01T00:00:00.000Z", 1)).unwrap();
    assert!(text.ends_with("}\n"));
    assert!(text.starts_with("{\n  \"schemaVersion\": \"g0-catalog/v1\",\n  \"generatedAt\""));
}

#[test]
fn write_creates_parent_dirs() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("out/meta/catalog.json");
    let outcome = write_catalog(&path, &catalog("2026-01-01T00:00:00.000Z", 2)).unwrap();
    assert_eq!(outcome, WriteOutcome::Written);
    let back: Catalog = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(back.total_games, 2);
    assert!(!path.with_file_name("catalog.json.tmp").exists());
}

#[test]
fn rewrite_with_new_timestamp_only_is_unchanged() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("catalog.json");
    write_catalog(&path, &catalog("2026-01-01T00:00:00.000Z", 2)).unwrap();
    let before = std::fs::read(&path).unwrap();

    let outcome = write_catalog(&path, &catalog("2026-06-01T00:00:00.000Z", 2)).unwrap();
    assert_eq!(outcome, WriteOutcome::Unchanged);
    assert_eq!(std::fs::read(&path).unwrap(), before);

    let outcome = write_catalog(&path, &catalog("2026-06-01T00:00:00.000Z", 3)).unwrap();
    assert_eq!(outcome, WriteOutcome::Written);
}

#[test]
fn garbage_target_is_overwritten() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("catalog.json");
    std::fs::write(&path, "not json").unwrap();
    let outcome = write_catalog(&path, &catalog("2026-01-01T00:00:00.000Z", 0)).unwrap();
    assert_eq!(outcome, WriteOutcome::Written);
}

#[test]
fn write_atomic_needs_a_file_name() {
    let err = write_atomic(Path::new("/"), "{}").unwrap_err();
    assert!(matches!(err, PipelineError::Other(_)));
}
