//! Data model types for the normalized game catalog.
//!
//! Raw source documents are kept as opaque `serde_json::Value` bags; the
//! canonical output (`NormalizedGame`, `Catalog`) is strictly typed and its
//! field declaration order is the serialized key order.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Schema identifier written into every catalog document.
pub const CATALOG_SCHEMA_VERSION: &str = "g0-catalog/v1";

/// Schema identifier written into every normalized game record.
pub const GAME_SCHEMA_VERSION: &str = "g0-normalized/v1";

/// Top-level keys every normalized game must carry.
pub const REQUIRED_GAME_KEYS: [&str; 6] = [
    "schemaVersion",
    "gameId",
    "sourceGameId",
    "source",
    "repo",
    "metadata",
];

// ── Source side ─────────────────────────────────────────────────────────────

/// One successfully parsed source file.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    /// Absolute path on disk.
    pub file_path: PathBuf,
    /// POSIX path relative to the workspace root (e.g. `databases/Teil01/_g0_x.json`).
    pub rel_path: String,
    /// POSIX path of the containing folder, relative to the workspace root.
    pub folder_rel_path: String,
    pub file_name: String,
    pub raw_json: Value,
    /// Sorted top-level keys of `raw_json` (empty when the root is not an object).
    pub top_level_keys: Vec<String>,
    /// Lowercase hex SHA-1 of the file bytes.
    pub sha1: String,
    pub byte_len: u64,
    /// Names of the regular files next to this one, sorted.
    pub sibling_names: Vec<String>,
}

impl SourceRecord {
    /// The document root as a field map, if it is a JSON object.
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        self.raw_json.as_object()
    }
}

/// A source file that could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseError {
    pub json_path: String,
    pub message: String,
}

/// Optional source fields whose absence is tracked as a data-quality signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceField {
    Id,
    Meta,
    Title,
}

impl SourceField {
    /// All tracked fields in reporting order.
    pub const ALL: [SourceField; 3] = [SourceField::Title, SourceField::Id, SourceField::Meta];

    pub fn as_str(self) -> &'static str {
        match self {
            SourceField::Id => "id",
            SourceField::Meta => "meta",
            SourceField::Title => "title",
        }
    }
}

impl std::fmt::Display for SourceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Normalized side ─────────────────────────────────────────────────────────

/// Canonical record for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedGame {
    pub schema_version: String,
    /// Globally unique id after collision resolution.
    pub game_id: String,
    /// Provisional id derived from the source; may collide across files.
    pub source_game_id: String,
    pub source: GameSource,
    pub repo: GameRepo,
    pub metadata: GameMetadata,
    /// The raw source document, kept for full catalog builds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSource {
    pub json_path: String,
    pub json_sha1: String,
    pub json_bytes: u64,
}

/// Where the game lives in the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRepo {
    /// Section folder directly below the content root, if any.
    pub teil: Option<String>,
    pub folder_path: String,
    pub html_path: Option<String>,
    pub script_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMetadata {
    pub title: String,
    pub subtitle: Option<String>,
    /// The explicit `id` from the source, untouched.
    pub legacy_id: Option<String>,
    pub top_level_keys: Vec<String>,
    pub has_meta: bool,
    /// Sorted list of tracked fields the source lacked.
    pub missing_source_fields: Vec<SourceField>,
}

impl NormalizedGame {
    pub fn is_missing(&self, field: SourceField) -> bool {
        self.metadata.missing_source_fields.contains(&field)
    }
}

/// One `sourceGameId` produced by more than one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateRecord {
    pub game_id: String,
    pub count: usize,
}

/// How many source documents carry a given top-level key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFrequency {
    pub key: String,
    pub count: usize,
}

/// Per-field lists of affected entries (game ids or json paths).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingSourceFields {
    pub title: Vec<String>,
    pub id: Vec<String>,
    pub meta: Vec<String>,
}

impl MissingSourceFields {
    pub fn get(&self, field: SourceField) -> &[String] {
        match field {
            SourceField::Title => &self.title,
            SourceField::Id => &self.id,
            SourceField::Meta => &self.meta,
        }
    }

    pub fn push(&mut self, field: SourceField, entry: impl Into<String>) {
        let list = match field {
            SourceField::Title => &mut self.title,
            SourceField::Id => &mut self.id,
            SourceField::Meta => &mut self.meta,
        };
        list.push(entry.into());
    }

    /// Total number of (entry, field) pairs.
    pub fn total(&self) -> usize {
        self.title.len() + self.id.len() + self.meta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

// ── Catalog ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_source_files: usize,
    /// Game ids per missing field.
    pub missing_source_fields: MissingSourceFields,
    /// Number of colliding source ids (see `Report` for the records).
    pub duplicate_source_game_ids: usize,
    pub top_level_key_frequency: Vec<KeyFrequency>,
}

/// The canonical catalog document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub schema_version: String,
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub generated_at: String,
    pub total_games: usize,
    pub games: Vec<NormalizedGame>,
    pub stats: CatalogStats,
}

/// Diagnostics returned alongside a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub file_count: usize,
    pub parse_errors: Vec<ParseError>,
    pub duplicate_source_game_ids: Vec<DuplicateRecord>,
    /// Json paths per missing field.
    pub missing_source_fields: MissingSourceFields,
}
