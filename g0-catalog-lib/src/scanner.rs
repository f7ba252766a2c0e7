//! Deterministic content-tree traversal.
//!
//! Walks a root without following symlinks, skipping hidden entries and
//! ignored directory names. Every returned path lies inside the scanned root
//! and the output order is the canonical traversal order used downstream.

use std::path::{Path, PathBuf};

use g0_catalog_core::archetype::is_source_file;
use g0_catalog_core::fold_for_sort;
use g0_catalog_core::paths::{is_within, to_posix};
use walkdir::{DirEntry, WalkDir};

use crate::error::PipelineError;

/// Sort key for a root-relative POSIX path: folded text first, raw text as tie-breaker.
pub fn sort_key(rel_path: &str) -> (String, String) {
    (fold_for_sort(rel_path), rel_path.to_string())
}

fn entry_name(entry: &DirEntry) -> &str {
    entry.file_name().to_str().unwrap_or("")
}

fn is_skipped(entry: &DirEntry, ignored_dirs: &[String]) -> bool {
    let name = entry_name(entry);
    if name.starts_with('.') {
        return true;
    }
    entry.file_type().is_dir() && ignored_dirs.iter().any(|d| d == name)
}

/// Collect files below `root` whose file name satisfies `matches`, sorted.
///
/// A missing root is not an error: it yields an empty list and a warning.
pub fn walk_matching<F>(
    root: &Path,
    ignored_dirs: &[String],
    matches: F,
) -> Result<Vec<PathBuf>, PipelineError>
where
    F: Fn(&str) -> bool,
{
    if !root.is_dir() {
        log::warn!("Content root not found: {}", root.display());
        return Ok(Vec::new());
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped(e, ignored_dirs));

    let mut found: Vec<(String, PathBuf)> = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| PipelineError::walk(root, e))?;
        if !entry.file_type().is_file() || !matches(entry_name(&entry)) {
            continue;
        }
        let path = entry.into_path();
        if !is_within(root, &path) {
            log::debug!("Skipping path outside scan root: {}", path.display());
            continue;
        }
        let rel = path
            .strip_prefix(root)
            .map(to_posix)
            .unwrap_or_else(|_| to_posix(&path));
        found.push((rel, path));
    }

    found.sort_by_cached_key(|(rel, _)| sort_key(rel));
    Ok(found.into_iter().map(|(_, path)| path).collect())
}

/// Find every `_g0*.json` source file below the content root.
pub fn scan_source_files(
    content_root: &Path,
    ignored_dirs: &[String],
) -> Result<Vec<PathBuf>, PipelineError> {
    let files = walk_matching(content_root, ignored_dirs, is_source_file)?;
    log::debug!("Found {} source files under {}", files.len(), content_root.display());
    Ok(files)
}

/// Find bundle directories (name starts with `prefix`) below `root`, sorted.
///
/// The walk does not descend into a bundle once found.
pub fn find_bundles(
    root: &Path,
    prefix: &str,
    ignored_dirs: &[String],
) -> Result<Vec<PathBuf>, PipelineError> {
    if !root.is_dir() {
        log::warn!("Content root not found: {}", root.display());
        return Ok(Vec::new());
    }

    let mut walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped(e, ignored_dirs));

    let mut bundles: Vec<(String, PathBuf)> = Vec::new();
    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|e| PipelineError::walk(root, e))?;
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            continue;
        }
        if entry_name(&entry).starts_with(prefix) {
            walker.skip_current_dir();
            let path = entry.into_path();
            let rel = path
                .strip_prefix(root)
                .map(to_posix)
                .unwrap_or_else(|_| to_posix(&path));
            bundles.push((rel, path));
        }
    }

    bundles.sort_by_cached_key(|(rel, _)| sort_key(rel));
    Ok(bundles.into_iter().map(|(_, path)| path).collect())
}

/// Names of the regular files directly inside `dir`, sorted.
pub fn list_files(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names: Vec<String> = std::fs::read_dir(dir)?
        .flatten()
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|e| e.file_name().to_str().map(String::from))
        .collect();
    names.sort();
    Ok(names)
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod tests;
