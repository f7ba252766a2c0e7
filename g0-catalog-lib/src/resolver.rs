//! Collision-free `gameId` assignment.
//!
//! Records are visited in canonical order. The first record that wants an
//! id gets it; later ones get the smallest free `<id>_<n>` with `n >= 2`.

use std::collections::{BTreeMap, HashMap, HashSet};

use g0_catalog_core::{DuplicateRecord, NormalizedGame};

/// Hands out unique ids in allocation order.
#[derive(Debug, Default)]
pub struct IdAllocator {
    assigned: HashSet<String>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `desired`, or the smallest free `desired_<n>` if it is taken.
    pub fn allocate(&mut self, desired: &str) -> String {
        if self.assigned.insert(desired.to_string()) {
            return desired.to_string();
        }
        let mut n = 2usize;
        loop {
            let candidate = format!("{desired}_{n}");
            if self.assigned.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

/// Assign unique `gameId`s in place and report colliding source ids.
///
/// Duplicates are sorted by count (descending), then id (ascending).
pub fn resolve_ids(games: &mut [NormalizedGame]) -> Vec<DuplicateRecord> {
    let mut allocator = IdAllocator::new();
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    for game in games.iter_mut() {
        *counts.entry(game.source_game_id.clone()).or_default() += 1;
        game.game_id = allocator.allocate(&game.source_game_id);
        if game.game_id != game.source_game_id {
            log::debug!(
                "Renamed {} to {} ({})",
                game.source_game_id,
                game.game_id,
                game.source.json_path
            );
        }
    }

    for game in suffix_renames(games) {
        log::warn!(
            "{} renamed to {}: id already taken by a generated suffix ({})",
            game.source_game_id,
            game.game_id,
            game.source.json_path
        );
    }

    let mut duplicates: Vec<DuplicateRecord> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(game_id, count)| DuplicateRecord { game_id, count })
        .collect();
    duplicates.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.game_id.cmp(&b.game_id)));
    duplicates
}

/// Games renamed although their `sourceGameId` is unique.
///
/// Happens when an explicit id equals a suffix handed out earlier, e.g. a
/// source with id `leasing_2` after two `leasing` sources. These renames do
/// not show up as duplicate records.
pub fn suffix_renames(games: &[NormalizedGame]) -> Vec<&NormalizedGame> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for game in games {
        *counts.entry(game.source_game_id.as_str()).or_default() += 1;
    }
    games
        .iter()
        .filter(|g| g.game_id != g.source_game_id && counts[g.source_game_id.as_str()] == 1)
        .collect()
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
