//! Catalog serialization and on-disk persistence.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use g0_catalog_core::Catalog;

use crate::error::PipelineError;

/// What `write_catalog` did with the target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The file already held the same catalog (ignoring `generatedAt`).
    Unchanged,
}

/// `2026-03-01T08:15:00.000Z`
pub fn format_generated_at(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    value
        .parse::<i64>()
        .ok()
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
}

/// Pick the catalog timestamp: explicit flag, then `SOURCE_DATE_EPOCH`, then now.
///
/// Both overrides accept RFC 3339 or Unix seconds.
pub fn resolve_generated_at(
    flag: Option<&str>,
    source_date_epoch: Option<&str>,
) -> Result<DateTime<Utc>, PipelineError> {
    for value in [flag, source_date_epoch].into_iter().flatten() {
        if value.trim().is_empty() {
            continue;
        }
        return parse_timestamp(value)
            .ok_or_else(|| PipelineError::InvalidTimestamp(value.to_string()));
    }
    Ok(Utc::now())
}

/// Pretty-printed catalog with a trailing newline.
pub fn render_catalog(catalog: &Catalog) -> Result<String, PipelineError> {
    let mut text = serde_json::to_string_pretty(catalog)?;
    text.push('\n');
    Ok(text)
}

/// Whether `existing` is `catalog` rendered with some other `generatedAt`.
fn same_except_timestamp(existing: &str, catalog: &Catalog) -> Result<bool, PipelineError> {
    let old_stamp = match serde_json::from_str::<serde_json::Value>(existing) {
        Ok(value) => match value.get("generatedAt").and_then(|v| v.as_str()) {
            Some(stamp) => stamp.to_string(),
            None => return Ok(false),
        },
        Err(_) => return Ok(false),
    };
    let mut restamped = catalog.clone();
    restamped.generated_at = old_stamp;
    Ok(render_catalog(&restamped)? == existing)
}

/// Write the catalog atomically unless the target already holds it.
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<WriteOutcome, PipelineError> {
    if let Ok(existing) = std::fs::read_to_string(path)
        && same_except_timestamp(&existing, catalog)?
    {
        log::debug!("Catalog unchanged: {}", path.display());
        return Ok(WriteOutcome::Unchanged);
    }

    let text = render_catalog(catalog)?;
    write_atomic(path, &text)?;
    Ok(WriteOutcome::Written)
}

/// Write `text` via a sibling temp file and rename it over `path`,
/// creating parent directories as needed.
pub fn write_atomic(path: &Path, text: &str) -> Result<(), PipelineError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| PipelineError::other(format!("{} is not a file path", path.display())))?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
    }

    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);
    let mut tmp = std::fs::File::create(&tmp_path).map_err(|e| PipelineError::io(&tmp_path, e))?;
    tmp.write_all(text.as_bytes())
        .and_then(|_| tmp.flush())
        .map_err(|e| PipelineError::io(&tmp_path, e))?;
    drop(tmp);

    std::fs::rename(&tmp_path, path).map_err(|e| PipelineError::io(path, e))?;
    log::debug!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}

#[cfg(test)]
#[path = "tests/writer_tests.rs"]
mod tests;
