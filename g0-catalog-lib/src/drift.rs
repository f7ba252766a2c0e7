//! Key-signature drift detection for `_gjson_*.json` data files.
//!
//! A snapshot records the top-level key set of every indexed file. The
//! snapshot can be stored as a baseline and later compared against a fresh
//! one to surface files whose key set changed, appeared or disappeared.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use g0_catalog_core::archetype::{is_gjson_file, is_numbered_g_file};
use g0_catalog_core::paths::{relative_posix, to_posix};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PipelineError;
use crate::parser::parse_document;
use crate::scanner::walk_matching;
use crate::writer::write_atomic;

pub const SNAPSHOT_VERSION: u32 = 1;

/// Which file family the snapshot indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexMode {
    #[serde(rename = "gjson")]
    Gjson,
    /// No `_gjson_` files exist; `_g<N>_*.json` files are indexed instead.
    #[serde(rename = "g-fallback")]
    GFallback,
}

impl IndexMode {
    pub fn pattern(self) -> &'static str {
        match self {
            IndexMode::Gjson => "_gjson_*.json",
            IndexMode::GFallback => "_g*.json (fallback)",
        }
    }

    /// Uniform signatures are enforced by default only for `_gjson_` files.
    pub fn enforces_uniform(self, strict_uniform: Option<bool>) -> bool {
        strict_uniform.unwrap_or(self == IndexMode::Gjson)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedFile {
    /// POSIX path relative to the workspace root.
    pub path: String,
    /// Top-level keys in document order.
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureCount {
    pub signature: String,
    pub count: usize,
    pub sample_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftParseError {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: u32,
    pub generated_at: String,
    pub mode: IndexMode,
    pub pattern: String,
    pub file_count: usize,
    pub parse_errors: Vec<DriftParseError>,
    pub files: Vec<IndexedFile>,
    pub signature_frequency: Vec<SignatureCount>,
    pub uniform_signature: Option<String>,
}

/// Stored baseline. Only `files` is required when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Baseline {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub generated_at: String,
    #[serde(default)]
    pub mode: Option<IndexMode>,
    #[serde(default)]
    pub pattern: String,
    #[serde(default)]
    pub file_count: usize,
    #[serde(default)]
    pub uniform_signature: Option<String>,
    #[serde(default)]
    pub signature_frequency: Vec<SignatureCount>,
    pub files: Vec<IndexedFile>,
}

impl From<&Snapshot> for Baseline {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            version: snapshot.version,
            generated_at: snapshot.generated_at.clone(),
            mode: Some(snapshot.mode),
            pattern: snapshot.pattern.clone(),
            file_count: snapshot.file_count,
            uniform_signature: snapshot.uniform_signature.clone(),
            signature_frequency: snapshot.signature_frequency.clone(),
            files: snapshot.files.clone(),
        }
    }
}

impl Baseline {
    /// Signature every file must carry under uniform enforcement.
    pub fn expected_uniform(&self) -> Option<&str> {
        self.uniform_signature
            .as_deref()
            .or_else(|| self.signature_frequency.first().map(|r| r.signature.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangedFile {
    pub path: String,
    pub before: Vec<String>,
    pub after: Vec<String>,
    pub missing: Vec<String>,
    pub extra: Vec<String>,
}

impl ChangedFile {
    /// Same key set in a different order.
    pub fn is_order_only(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftDiff {
    pub removed: Vec<String>,
    pub added: Vec<IndexedFile>,
    pub changed: Vec<ChangedFile>,
    pub uniform_violations: Vec<IndexedFile>,
}

impl DriftDiff {
    pub fn has_changes(&self) -> bool {
        !self.removed.is_empty() || !self.added.is_empty() || !self.changed.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_changes() && self.uniform_violations.is_empty()
    }
}

/// Sorted keys joined with `|`.
pub fn signature_of(keys: &[String]) -> String {
    let mut sorted: Vec<&str> = keys.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.join("|")
}

/// Signatures by count descending, then signature ascending. The sample is
/// the first file (in index order) carrying the signature.
pub fn signature_frequency(files: &[IndexedFile]) -> Vec<SignatureCount> {
    let mut rows: Vec<SignatureCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for file in files {
        match index.get(file.signature.as_str()).copied() {
            Some(i) => rows[i].count += 1,
            None => {
                index.insert(&file.signature, rows.len());
                rows.push(SignatureCount {
                    signature: file.signature.clone(),
                    count: 1,
                    sample_path: file.path.clone(),
                });
            }
        }
    }
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.signature.cmp(&b.signature)));
    rows
}

fn index_file(path: &Path, rel: String) -> Result<IndexedFile, DriftParseError> {
    let fail = |message: String| DriftParseError {
        path: rel.clone(),
        message,
    };
    let bytes = std::fs::read(path).map_err(|e| fail(format!("read failed: {e}")))?;
    let value = parse_document(&bytes).map_err(fail)?;
    let Value::Object(map) = value else {
        return Err(fail("Root must be a JSON object".to_string()));
    };
    let keys: Vec<String> = map.keys().cloned().collect();
    let signature = signature_of(&keys);
    Ok(IndexedFile {
        path: rel,
        keys,
        signature,
    })
}

/// Index every `_gjson_*.json` below the workspace root, or every
/// `_g<N>_*.json` if there are none.
pub fn create_snapshot(
    workspace_root: &Path,
    ignored_dirs: &[String],
    generated_at: String,
) -> Result<Snapshot, PipelineError> {
    let candidates = walk_matching(workspace_root, ignored_dirs, |name| {
        is_gjson_file(name) || is_numbered_g_file(name)
    })?;
    let is_gjson = |p: &Path| {
        p.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(is_gjson_file)
    };

    let has_gjson = candidates.iter().any(|p| is_gjson(p.as_path()));
    let (mode, selected): (IndexMode, Vec<_>) = if has_gjson {
        (
            IndexMode::Gjson,
            candidates.into_iter().filter(|p| is_gjson(p.as_path())).collect(),
        )
    } else {
        (IndexMode::GFallback, candidates)
    };
    log::debug!("Indexing {} files in {:?} mode", selected.len(), mode);

    let mut files = Vec::new();
    let mut parse_errors = Vec::new();
    for path in &selected {
        let rel = relative_posix(workspace_root, path).unwrap_or_else(|| to_posix(path));
        match index_file(path, rel) {
            Ok(file) => files.push(file),
            Err(err) => parse_errors.push(err),
        }
    }

    let frequency = signature_frequency(&files);
    let uniform_signature = match frequency.as_slice() {
        [only] => Some(only.signature.clone()),
        _ => None,
    };
    Ok(Snapshot {
        version: SNAPSHOT_VERSION,
        generated_at,
        mode,
        pattern: mode.pattern().to_string(),
        file_count: files.len(),
        parse_errors,
        files,
        signature_frequency: frequency,
        uniform_signature,
    })
}

pub fn write_baseline(path: &Path, snapshot: &Snapshot) -> Result<(), PipelineError> {
    let mut text = serde_json::to_string_pretty(&Baseline::from(snapshot))?;
    text.push('\n');
    write_atomic(path, &text)
}

pub fn read_baseline(path: &Path) -> Result<Baseline, PipelineError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| PipelineError::invalid_baseline(path, e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| PipelineError::invalid_baseline(path, e.to_string()))
}

/// Keys of `expected` absent from `actual`, and the reverse, in list order.
fn diff_keys(expected: &[String], actual: &[String]) -> (Vec<String>, Vec<String>) {
    let expected_set: HashSet<&String> = expected.iter().collect();
    let actual_set: HashSet<&String> = actual.iter().collect();
    let missing = expected
        .iter()
        .filter(|k| !actual_set.contains(k))
        .cloned()
        .collect();
    let extra = actual
        .iter()
        .filter(|k| !expected_set.contains(k))
        .cloned()
        .collect();
    (missing, extra)
}

/// Compare a fresh snapshot with a stored baseline.
pub fn compare(baseline: &Baseline, current: &Snapshot, enforce_uniform: bool) -> DriftDiff {
    let current_by_path: HashMap<&str, &IndexedFile> =
        current.files.iter().map(|f| (f.path.as_str(), f)).collect();
    let baseline_paths: HashSet<&str> = baseline.files.iter().map(|f| f.path.as_str()).collect();

    let mut diff = DriftDiff::default();
    for before in &baseline.files {
        let Some(after) = current_by_path.get(before.path.as_str()) else {
            diff.removed.push(before.path.clone());
            continue;
        };
        if before.signature != after.signature {
            let (missing, extra) = diff_keys(&before.keys, &after.keys);
            diff.changed.push(ChangedFile {
                path: before.path.clone(),
                before: before.keys.clone(),
                after: after.keys.clone(),
                missing,
                extra,
            });
        }
    }

    diff.added = current
        .files
        .iter()
        .filter(|f| !baseline_paths.contains(f.path.as_str()))
        .cloned()
        .collect();

    if enforce_uniform && let Some(expected) = baseline.expected_uniform() {
        diff.uniform_violations = current
            .files
            .iter()
            .filter(|f| f.signature != expected)
            .cloned()
            .collect();
    }
    diff
}

#[cfg(test)]
#[path = "tests/drift_tests.rs"]
mod tests;
