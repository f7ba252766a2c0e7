//! File-name classification for source documents and bundle contents.
//!
//! All predicates are case-insensitive and look at the bare file name only.

use std::sync::LazyLock;

use regex::Regex;

static SOURCE_FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^_g0.+\.json$").expect("static pattern"));
static MARKUP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:_?game_|_ghtml_).+\.html$").expect("static pattern"));
static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:_?game_|_gjs_).+\.js$").expect("static pattern"));
static DATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:_?game_|_gjs_|_gg?\d+_).+\.json$").expect("static pattern")
});
static GJSON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^_gjson_.+\.json$").expect("static pattern"));
static NUMBERED_G_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^_g\d+_.+\.json$").expect("static pattern"));

/// The role a file plays inside a content bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BundleFile {
    /// `game_*.html` / `_ghtml_*.html`
    Markup,
    /// `game_*.js` / `_gjs_*.js`
    Script,
    /// `game_*.json` / `_gjs_*.json` / `_g<N>_*.json`
    Data,
}

impl BundleFile {
    pub fn classify(name: &str) -> Option<Self> {
        if is_markup_entry(name) {
            Some(BundleFile::Markup)
        } else if is_behavior_script(name) {
            Some(BundleFile::Script)
        } else if is_data_file(name) {
            Some(BundleFile::Data)
        } else {
            None
        }
    }
}

/// Per-game source document picked up by the catalog build.
pub fn is_source_file(name: &str) -> bool {
    SOURCE_FILE_RE.is_match(name)
}

pub fn is_markup_entry(name: &str) -> bool {
    MARKUP_RE.is_match(name)
}

pub fn is_behavior_script(name: &str) -> bool {
    SCRIPT_RE.is_match(name)
}

pub fn is_data_file(name: &str) -> bool {
    DATA_RE.is_match(name)
}

/// `_gjson_*.json` documents indexed by the key-signature drift check.
pub fn is_gjson_file(name: &str) -> bool {
    GJSON_RE.is_match(name)
}

/// `_g<digits>_*.json`, the drift check's fallback when no `_gjson_` files exist.
pub fn is_numbered_g_file(name: &str) -> bool {
    NUMBERED_G_RE.is_match(name)
}

/// Script names accepted as the counterpart of a markup entry point,
/// preferred name first.
///
/// `_ghtml_x.html` pairs with `_gjs_x.js` only; `game_x.html` pairs with
/// `game_x.js` or `_game_x.js` (and the reverse for `_game_x.html`).
/// Returned names are lower-cased.
pub fn paired_script_names(markup_name: &str) -> Vec<String> {
    let lower = markup_name.to_lowercase();
    let stem = lower.strip_suffix(".html").unwrap_or(&lower);
    if let Some(rest) = stem.strip_prefix("_ghtml_") {
        return vec![format!("_gjs_{rest}.js")];
    }
    let primary = format!("{stem}.js");
    let alternate = match primary.strip_prefix("_game_") {
        Some(rest) => format!("game_{rest}"),
        None => format!("_{primary}"),
    };
    vec![primary, alternate]
}

#[cfg(test)]
#[path = "tests/archetype_tests.rs"]
mod tests;
