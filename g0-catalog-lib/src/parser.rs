//! Source document loading with per-file error isolation.
//!
//! Every candidate path produces exactly one [`ParseOutcome`]. Read, UTF-8
//! and JSON failures are captured as [`ParseError`] values at the file they
//! belong to; nothing here returns `Err`.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use g0_catalog_core::paths::{relative_posix, to_posix};
use g0_catalog_core::{ParseError, SourceRecord};
use serde_json::Value;
use sha1::{Digest, Sha1};

/// Result of loading one candidate file.
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Parsed(SourceRecord),
    Failed(ParseError),
}

impl ParseOutcome {
    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseOutcome::Parsed(_))
    }
}

/// Location facts about a candidate, derived from its path alone.
#[derive(Debug, Clone)]
struct Candidate {
    file_path: PathBuf,
    rel_path: String,
    folder_rel_path: String,
    file_name: String,
}

impl Candidate {
    fn new(workspace_root: &Path, file_path: PathBuf) -> Self {
        let rel_path =
            relative_posix(workspace_root, &file_path).unwrap_or_else(|| to_posix(&file_path));
        let folder_rel_path = match rel_path.rsplit_once('/') {
            Some((folder, _)) => folder.to_string(),
            None => String::new(),
        };
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            file_path,
            rel_path,
            folder_rel_path,
            file_name,
        }
    }

    fn fail(&self, message: impl Into<String>) -> ParseOutcome {
        ParseOutcome::Failed(ParseError {
            json_path: self.rel_path.clone(),
            message: message.into(),
        })
    }
}

/// Sorted top-level keys of a document; empty unless the root is an object.
pub fn top_level_keys(value: &Value) -> Vec<String> {
    let mut keys: Vec<String> = value
        .as_object()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default();
    keys.sort();
    keys
}

/// Lowercase hex SHA-1 of `bytes`.
pub fn sha1_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha1::digest(bytes))
}

/// Parse raw file bytes into a JSON document.
///
/// A leading UTF-8 byte-order mark is tolerated.
pub fn parse_document(bytes: &[u8]) -> Result<Value, String> {
    let text = std::str::from_utf8(bytes).map_err(|e| format!("invalid UTF-8: {e}"))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    serde_json::from_str(text).map_err(|e| e.to_string())
}

fn build_outcome(candidate: Candidate, bytes: &[u8], sibling_names: Vec<String>) -> ParseOutcome {
    let raw_json = match parse_document(bytes) {
        Ok(v) => v,
        Err(message) => return candidate.fail(message),
    };
    ParseOutcome::Parsed(SourceRecord {
        top_level_keys: top_level_keys(&raw_json),
        sha1: sha1_hex(bytes),
        byte_len: bytes.len() as u64,
        raw_json,
        sibling_names,
        file_path: candidate.file_path,
        rel_path: candidate.rel_path,
        folder_rel_path: candidate.folder_rel_path,
        file_name: candidate.file_name,
    })
}

async fn sibling_names(folder: &Path) -> Vec<String> {
    let mut names = Vec::new();
    let mut entries = match tokio::fs::read_dir(folder).await {
        Ok(e) => e,
        Err(e) => {
            log::debug!("Cannot list {}: {}", folder.display(), e);
            return names;
        }
    };
    while let Ok(Some(entry)) = entries.next_entry().await {
        let is_file = entry
            .file_type()
            .await
            .map(|t| t.is_file())
            .unwrap_or(false);
        if is_file && let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    names
}

/// Load and parse one source file.
pub async fn load_source(workspace_root: &Path, file_path: PathBuf) -> ParseOutcome {
    let candidate = Candidate::new(workspace_root, file_path);
    let bytes = match tokio::fs::read(&candidate.file_path).await {
        Ok(b) => b,
        Err(e) => return candidate.fail(format!("read failed: {e}")),
    };
    let siblings = match candidate.file_path.parent() {
        Some(folder) => sibling_names(folder).await,
        None => Vec::new(),
    };
    build_outcome(candidate, &bytes, siblings)
}

/// Load all candidates with at most `concurrency` reads in flight.
///
/// Outcomes come back in the order of `paths`, independent of which read
/// finishes first. `on_loaded` is called once per outcome, in that order.
pub async fn parse_sources<F>(
    workspace_root: &Path,
    paths: Vec<PathBuf>,
    concurrency: usize,
    mut on_loaded: F,
) -> Vec<ParseOutcome>
where
    F: FnMut(&ParseOutcome),
{
    let mut outcomes = Vec::with_capacity(paths.len());
    let mut stream = futures::stream::iter(paths)
        .map(|path| load_source(workspace_root, path))
        .buffered(concurrency.max(1));

    while let Some(outcome) = stream.next().await {
        if let ParseOutcome::Failed(err) = &outcome {
            log::debug!("Parse failure in {}: {}", err.json_path, err.message);
        }
        on_loaded(&outcome);
        outcomes.push(outcome);
    }
    outcomes
}

#[cfg(test)]
#[path = "tests/parser_tests.rs"]
mod tests;
