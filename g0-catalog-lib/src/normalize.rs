//! Mapping of raw source documents onto the canonical game schema.
//!
//! Normalization never fails: absent or mistyped fields are recorded in
//! `metadata.missingSourceFields` and replaced with derived values.

use g0_catalog_core::{
    GAME_SCHEMA_VERSION, GameMetadata, GameRepo, GameSource, NormalizedGame, SourceField,
    SourceRecord, slugify, source_suffix, title_from_file_name,
};
use serde_json::{Map, Value};

/// Fallback id when neither the explicit id nor the path yield a slug.
pub const FALLBACK_GAME_ID: &str = "game";

#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// First path segment of the content tree, used to detect the section (`teil`).
    pub content_dir: String,
    /// Keep the raw document under `content`.
    pub include_content: bool,
}

/// First candidate that is a non-blank string, trimmed.
fn pick_first_string<'a>(
    candidates: impl IntoIterator<Item = Option<&'a Value>>,
) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
}

/// The `meta` block if it is a non-empty object.
fn meta_block(fields: Option<&Map<String, Value>>) -> Option<&Map<String, Value>> {
    fields
        .and_then(|f| f.get("meta"))
        .and_then(Value::as_object)
        .filter(|m| !m.is_empty())
}

/// Provisional identifier: slug of the explicit id, else of the path without `.json`.
pub fn source_game_id(explicit_id: Option<&str>, rel_path: &str) -> String {
    if let Some(slug) = explicit_id.map(slugify).filter(|s| !s.is_empty()) {
        return slug;
    }
    let stem = rel_path
        .len()
        .checked_sub(5)
        .filter(|&idx| {
            rel_path.is_char_boundary(idx) && rel_path[idx..].eq_ignore_ascii_case(".json")
        })
        .map_or(rel_path, |idx| &rel_path[..idx]);
    let slug = slugify(stem);
    if slug.is_empty() {
        FALLBACK_GAME_ID.to_string()
    } else {
        slug
    }
}

/// Section folder directly below the content root, e.g. `Teil01 Grundlagen`.
///
/// Only set when the source lies at least one folder below the section.
pub fn detect_teil(rel_path: &str, content_dir: &str) -> Option<String> {
    let rest = rel_path
        .strip_prefix(content_dir.trim_end_matches('/'))?
        .strip_prefix('/')?;
    let (teil, remainder) = rest.split_once('/')?;
    if teil.is_empty() || remainder.is_empty() {
        return None;
    }
    Some(teil.to_string())
}

/// Which sibling file to link from a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingKind {
    Markup,
    Script,
}

impl SiblingKind {
    fn extension(self) -> &'static str {
        match self {
            SiblingKind::Markup => ".html",
            SiblingKind::Script => ".js",
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            SiblingKind::Markup => "_ghtml_",
            SiblingKind::Script => "_gjs_",
        }
    }
}

/// Pick the markup or script file that belongs to a source document.
///
/// Preference: `_ghtml_<suffix>` / `_gjs_<suffix>`, `game_<suffix>`,
/// `<suffix>`, any name containing the suffix, any `_ghtml_`/`_gjs_` name,
/// any `game_` name, then the first candidate.
pub fn resolve_sibling<'a>(
    names: &'a [String],
    suffix: &str,
    kind: SiblingKind,
) -> Option<&'a str> {
    let ext = kind.extension();
    let candidates: Vec<(&str, String)> = names
        .iter()
        .map(|n| (n.as_str(), n.to_lowercase()))
        .filter(|(_, lower)| lower.ends_with(ext))
        .collect();
    let first = candidates.first()?.0;

    let suffix = suffix.to_lowercase();
    let preferred = [
        format!("{}{suffix}{ext}", kind.prefix()),
        format!("game_{suffix}{ext}"),
        format!("{suffix}{ext}"),
    ];
    for wanted in &preferred {
        if let Some(name) = find_name(&candidates, |lower| lower == wanted.as_str()) {
            return Some(name);
        }
    }

    if !suffix.is_empty()
        && let Some(name) = find_name(&candidates, |lower| lower.contains(suffix.as_str()))
    {
        return Some(name);
    }
    find_name(&candidates, |lower| lower.starts_with(kind.prefix()))
        .or_else(|| find_name(&candidates, |lower| lower.starts_with("game_")))
        .or(Some(first))
}

fn find_name<'a>(
    candidates: &[(&'a str, String)],
    pred: impl Fn(&str) -> bool,
) -> Option<&'a str> {
    candidates
        .iter()
        .find(|(_, lower)| pred(lower))
        .map(|(name, _)| *name)
}

fn join_folder(folder: &str, name: &str) -> String {
    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{folder}/{name}")
    }
}

/// Normalize one source record. `gameId` starts out equal to `sourceGameId`;
/// the id resolver makes it unique afterwards.
pub fn normalize_record(record: &SourceRecord, options: &NormalizeOptions) -> NormalizedGame {
    let fields = record.fields();
    let get = |key: &str| fields.and_then(|f| f.get(key));
    let meta = meta_block(fields);
    let meta_get = |key: &str| meta.and_then(|m| m.get(key));

    let source_title = pick_first_string([get("title"), meta_get("title")]);
    let explicit_id = pick_first_string([get("id")]);
    let subtitle = pick_first_string([get("subtitle"), meta_get("subtitle")]);

    let mut missing = Vec::new();
    if explicit_id.is_none() {
        missing.push(SourceField::Id);
    }
    if meta.is_none() {
        missing.push(SourceField::Meta);
    }
    if source_title.is_none() {
        missing.push(SourceField::Title);
    }

    let suffix = source_suffix(&record.file_name);
    let html = resolve_sibling(&record.sibling_names, suffix, SiblingKind::Markup);
    let script = resolve_sibling(&record.sibling_names, suffix, SiblingKind::Script);

    let provisional_id = source_game_id(explicit_id, &record.rel_path);

    NormalizedGame {
        schema_version: GAME_SCHEMA_VERSION.to_string(),
        game_id: provisional_id.clone(),
        source_game_id: provisional_id,
        source: GameSource {
            json_path: record.rel_path.clone(),
            json_sha1: record.sha1.clone(),
            json_bytes: record.byte_len,
        },
        repo: GameRepo {
            teil: detect_teil(&record.rel_path, &options.content_dir),
            folder_path: record.folder_rel_path.clone(),
            html_path: html.map(|n| join_folder(&record.folder_rel_path, n)),
            script_path: script.map(|n| join_folder(&record.folder_rel_path, n)),
        },
        metadata: GameMetadata {
            title: source_title
                .map(String::from)
                .unwrap_or_else(|| title_from_file_name(&record.file_name)),
            subtitle: subtitle.map(String::from),
            legacy_id: explicit_id.map(String::from),
            top_level_keys: record.top_level_keys.clone(),
            has_meta: meta.is_some(),
            missing_source_fields: missing,
        },
        content: options.include_content.then(|| record.raw_json.clone()),
    }
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
