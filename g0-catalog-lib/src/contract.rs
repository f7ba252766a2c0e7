//! Contract checks on normalized output and the combined validation report.

use std::collections::HashMap;

use g0_catalog_core::{
    DuplicateRecord, MissingSourceFields, NormalizedGame, ParseError, REQUIRED_GAME_KEYS,
};
use serde::Serialize;
use serde_json::Value;

use crate::archetype::ArchetypeReport;
use crate::error::PipelineError;
use crate::pipeline::CatalogBuild;

/// A normalized game lacking required top-level keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractIssue {
    /// The game's id, or `<index:N>` if it has none.
    pub game_id: String,
    pub missing: Vec<String>,
}

/// Check every serialized game for the required top-level keys.
pub fn check_games(games: &[Value]) -> Vec<ContractIssue> {
    games
        .iter()
        .enumerate()
        .filter_map(|(index, game)| {
            let fields = game.as_object();
            let missing: Vec<String> = REQUIRED_GAME_KEYS
                .iter()
                .filter(|key| !fields.is_some_and(|f| f.contains_key(**key)))
                .map(|key| key.to_string())
                .collect();
            if missing.is_empty() {
                return None;
            }
            let game_id = game
                .get("gameId")
                .and_then(Value::as_str)
                .filter(|id| !id.is_empty())
                .map_or_else(|| format!("<index:{index}>"), String::from);
            Some(ContractIssue { game_id, missing })
        })
        .collect()
}

/// `gameId`s that occur more than once in the output, sorted like duplicates.
pub fn repeated_game_ids(games: &[Value]) -> Vec<DuplicateRecord> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for id in games.iter().filter_map(|g| g.get("gameId").and_then(Value::as_str)) {
        *counts.entry(id).or_default() += 1;
    }
    let mut repeated: Vec<DuplicateRecord> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, count)| DuplicateRecord {
            game_id: id.to_string(),
            count,
        })
        .collect();
    repeated.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.game_id.cmp(&b.game_id)));
    repeated
}

/// Serialize games the way they are written to disk.
pub fn games_as_values(games: &[NormalizedGame]) -> Result<Vec<Value>, PipelineError> {
    games
        .iter()
        .map(|g| serde_json::to_value(g).map_err(PipelineError::from))
        .collect()
}

/// Categories that make a validation run fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureClass {
    ParseErrors,
    DuplicateSourceIds,
    ContractViolations,
    RepeatedGameIds,
    /// Only under strict mode.
    MissingSourceFields,
    ArchetypeViolations,
}

impl FailureClass {
    pub fn describe(self) -> &'static str {
        match self {
            FailureClass::ParseErrors => "source files failed to parse",
            FailureClass::DuplicateSourceIds => "source game ids collide",
            FailureClass::ContractViolations => "normalized records violate the contract",
            FailureClass::RepeatedGameIds => "normalized game ids are not unique",
            FailureClass::MissingSourceFields => {
                "strict mode: source files are not fully standardized"
            }
            FailureClass::ArchetypeViolations => "bundles violate archetype rules",
        }
    }
}

/// Everything a `validate` run found, untruncated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub strict_source: bool,
    pub file_count: usize,
    pub total_games: usize,
    pub parse_errors: Vec<ParseError>,
    pub duplicate_source_game_ids: Vec<DuplicateRecord>,
    pub contract_issues: Vec<ContractIssue>,
    pub repeated_game_ids: Vec<DuplicateRecord>,
    /// Json paths per missing field.
    pub missing_source_fields: MissingSourceFields,
    pub key_variants: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archetypes: Option<ArchetypeReport>,
}

impl ValidationReport {
    pub fn failures(&self) -> Vec<FailureClass> {
        let mut failures = Vec::new();
        if !self.parse_errors.is_empty() {
            failures.push(FailureClass::ParseErrors);
        }
        if !self.duplicate_source_game_ids.is_empty() {
            failures.push(FailureClass::DuplicateSourceIds);
        }
        if !self.contract_issues.is_empty() {
            failures.push(FailureClass::ContractViolations);
        }
        if !self.repeated_game_ids.is_empty() {
            failures.push(FailureClass::RepeatedGameIds);
        }
        if self.strict_source && !self.missing_source_fields.is_empty() {
            failures.push(FailureClass::MissingSourceFields);
        }
        if self.archetypes.as_ref().is_some_and(|a| !a.passed()) {
            failures.push(FailureClass::ArchetypeViolations);
        }
        failures
    }

    pub fn passed(&self) -> bool {
        self.failures().is_empty()
    }
}

/// Validate a finished build, optionally folding in a bundle report.
pub fn validate_build(
    build: &CatalogBuild,
    strict_source: bool,
    archetypes: Option<ArchetypeReport>,
) -> Result<ValidationReport, PipelineError> {
    let games = games_as_values(&build.catalog.games)?;
    Ok(ValidationReport {
        strict_source,
        file_count: build.report.file_count,
        total_games: build.catalog.total_games,
        parse_errors: build.report.parse_errors.clone(),
        duplicate_source_game_ids: build.report.duplicate_source_game_ids.clone(),
        contract_issues: check_games(&games),
        repeated_game_ids: repeated_game_ids(&games),
        missing_source_fields: build.report.missing_source_fields.clone(),
        key_variants: build.catalog.stats.top_level_key_frequency.len(),
        archetypes,
    })
}

#[cfg(test)]
#[path = "tests/contract_tests.rs"]
mod tests;
