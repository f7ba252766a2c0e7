//! Data-quality aggregation over normalized games.

use std::collections::HashMap;

use g0_catalog_core::{KeyFrequency, MissingSourceFields, NormalizedGame, SourceField};

/// Aggregated findings, in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusStats {
    /// Missing fields keyed by final `gameId` (catalog side).
    pub by_game_id: MissingSourceFields,
    /// Missing fields keyed by `jsonPath` (report side).
    pub by_path: MissingSourceFields,
    pub key_frequency: Vec<KeyFrequency>,
}

/// Count how many documents carry each top-level key.
///
/// Sorted by count descending, then key ascending.
pub fn key_frequency(games: &[NormalizedGame]) -> Vec<KeyFrequency> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for game in games {
        for key in &game.metadata.top_level_keys {
            *counts.entry(key.as_str()).or_default() += 1;
        }
    }
    let mut rows: Vec<KeyFrequency> = counts
        .into_iter()
        .map(|(key, count)| KeyFrequency {
            key: key.to_string(),
            count,
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    rows
}

pub fn aggregate(games: &[NormalizedGame]) -> CorpusStats {
    let mut stats = CorpusStats::default();
    for game in games {
        for field in SourceField::ALL {
            if game.is_missing(field) {
                stats.by_game_id.push(field, game.game_id.as_str());
                stats.by_path.push(field, game.source.json_path.as_str());
            }
        }
    }
    stats.key_frequency = key_frequency(games);
    stats
}

#[cfg(test)]
#[path = "tests/stats_tests.rs"]
mod tests;
