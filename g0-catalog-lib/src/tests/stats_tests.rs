use super::*;
use g0_catalog_core::{GameMetadata, GameRepo, GameSource};

fn game(id: &str, path: &str, keys: &[&str], missing: &[SourceField]) -> NormalizedGame {
    NormalizedGame {
        schema_version: g0_catalog_core::GAME_SCHEMA_VERSION.to_string(),
        game_id: id.to_string(),
        source_game_id: id.to_string(),
        source: GameSource {
            json_path: path.to_string(),
            json_sha1: String::new(),
            json_bytes: 0,
        },
        repo: GameRepo {
            teil: None,
            folder_path: String::new(),
            html_path: None,
            script_path: None,
        },
        metadata: GameMetadata {
            title: id.to_string(),
            subtitle: None,
            legacy_id: None,
            top_level_keys: keys.iter().map(|k| k.to_string()).collect(),
            has_meta: !missing.contains(&SourceField::Meta),
            missing_source_fields: missing.to_vec(),
        },
        content: None,
    }
}

#[test]
fn missing_lists_are_exact_and_ordered() {
    let games = vec![
        game("a", "d/a.json", &["id"], &[SourceField::Meta, SourceField::Title]),
        game("b", "d/b.json", &["id", "title", "meta"], &[]),
        game("c", "d/c.json", &["title"], &[SourceField::Id, SourceField::Meta]),
    ];
    let stats = aggregate(&games);
    assert_eq!(stats.by_game_id.title, vec!["a"]);
    assert_eq!(stats.by_game_id.id, vec!["c"]);
    assert_eq!(stats.by_game_id.meta, vec!["a", "c"]);
    assert_eq!(stats.by_path.meta, vec!["d/a.json", "d/c.json"]);
    assert_eq!(stats.by_path.total(), 4);
}

#[test]
fn every_flagged_game_appears_once_per_field() {
    let games = vec![game(
        "x",
        "d/x.json",
        &[],
        &[SourceField::Id, SourceField::Meta, SourceField::Title],
    )];
    let stats = aggregate(&games);
    for field in SourceField::ALL {
        assert_eq!(stats.by_game_id.get(field), ["x".to_string()]);
    }
}

#[test]
fn key_frequency_sorted_by_count_then_key() {
    let games = vec![
        game("a", "1", &["b", "id"], &[]),
        game("b", "2", &["a", "id"], &[]),
        game("c", "3", &["id", "z"], &[]),
    ];
    let rows = key_frequency(&games);
    let pairs: Vec<(&str, usize)> = rows.iter().map(|r| (r.key.as_str(), r.count)).collect();
    assert_eq!(pairs, vec![("id", 3), ("a", 1), ("b", 1), ("z", 1)]);
}

#[test]
fn empty_input_gives_empty_stats() {
    assert_eq!(aggregate(&[]), CorpusStats::default());
}
