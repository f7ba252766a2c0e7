use super::*;
use g0_catalog_core::{GameMetadata, GameRepo, GameSource};

fn game(source_id: &str, path: &str) -> NormalizedGame {
    NormalizedGame {
        schema_version: g0_catalog_core::GAME_SCHEMA_VERSION.to_string(),
        game_id: source_id.to_string(),
        source_game_id: source_id.to_string(),
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
            title: "T".to_string(),
            subtitle: None,
            legacy_id: None,
            top_level_keys: Vec::new(),
            has_meta: false,
            missing_source_fields: Vec::new(),
        },
        content: None,
    }
}

fn ids(games: &[NormalizedGame]) -> Vec<&str> {
    games.iter().map(|g| g.game_id.as_str()).collect()
}

#[test]
fn first_occurrence_keeps_its_id() {
    let mut games = vec![game("leasing", "a/_g0_x.json"), game("leasing", "b/_g0_y.json")];
    let dups = resolve_ids(&mut games);
    assert_eq!(ids(&games), vec!["leasing", "leasing_2"]);
    assert_eq!(games[1].source_game_id, "leasing");
    assert_eq!(
        dups,
        vec![DuplicateRecord {
            game_id: "leasing".into(),
            count: 2
        }]
    );
}

#[test]
fn three_way_collision_counts_up() {
    let mut games = vec![game("q", "1"), game("q", "2"), game("q", "3")];
    resolve_ids(&mut games);
    assert_eq!(ids(&games), vec!["q", "q_2", "q_3"]);
}

#[test]
fn suffix_collision_with_existing_id_is_skipped() {
    let mut games = vec![game("leasing_2", "1"), game("leasing", "2"), game("leasing", "3")];
    let dups = resolve_ids(&mut games);
    assert_eq!(ids(&games), vec!["leasing_2", "leasing", "leasing_3"]);
    assert_eq!(dups.len(), 1);

    let mut games = vec![game("leasing", "1"), game("leasing", "2"), game("leasing_2", "3")];
    resolve_ids(&mut games);
    assert_eq!(ids(&games), vec!["leasing", "leasing_2", "leasing_2_2"]);
}

#[test]
fn suffix_renames_are_reported_separately() {
    let mut games = vec![game("leasing", "1"), game("leasing", "2"), game("leasing_2", "3")];
    let dups = resolve_ids(&mut games);
    assert_eq!(dups.len(), 1);
    assert_eq!(dups[0].game_id, "leasing");

    let renamed = suffix_renames(&games);
    assert_eq!(renamed.len(), 1);
    assert_eq!(renamed[0].source_game_id, "leasing_2");
    assert_eq!(renamed[0].game_id, "leasing_2_2");
    assert_eq!(renamed[0].source.json_path, "3");

    let mut plain = vec![game("q", "1"), game("q", "2")];
    resolve_ids(&mut plain);
    assert!(suffix_renames(&plain).is_empty());
}

#[test]
fn duplicates_sorted_by_count_then_id() {
    let mut games = vec![
        game("b", "1"),
        game("b", "2"),
        game("a", "3"),
        game("a", "4"),
        game("c", "5"),
        game("c", "6"),
        game("c", "7"),
        game("solo", "8"),
    ];
    let dups = resolve_ids(&mut games);
    let order: Vec<(&str, usize)> = dups.iter().map(|d| (d.game_id.as_str(), d.count)).collect();
    assert_eq!(order, vec![("c", 3), ("a", 2), ("b", 2)]);
}

#[test]
fn no_collisions_no_duplicates() {
    let mut games = vec![game("a", "1"), game("b", "2")];
    assert!(resolve_ids(&mut games).is_empty());
    assert_eq!(ids(&games), vec!["a", "b"]);
}

#[test]
fn allocator_tracks_every_id() {
    let mut alloc = IdAllocator::new();
    assert!(alloc.is_empty());
    assert_eq!(alloc.allocate("x"), "x");
    assert_eq!(alloc.allocate("x"), "x_2");
    assert_eq!(alloc.len(), 2);
}
