//! Identifier slugging and file-name derived labels.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Title used when a file name carries nothing but the source prefix.
pub const UNTITLED: &str = "Unbenanntes Spiel";

/// Fold a string for comparison: NFKD, combining marks removed, lower-cased.
///
/// `"Übersicht"` and `"ubersicht"` fold to the same key.
pub fn fold_for_sort(value: &str) -> String {
    value
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Deterministic identifier slug.
///
/// Diacritics are stripped, the result is lower-cased and every run of
/// characters outside `[a-z0-9]` collapses to a single `_`. Leading and
/// trailing separators are dropped, so the result may be empty.
pub fn slugify(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_separator = false;
    for c in fold_for_sort(value).chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.push(c);
        } else {
            pending_separator = true;
        }
    }
    out
}

/// Strip a trailing `.json` (any case).
fn strip_json_ext(name: &str) -> &str {
    let len = name.len();
    if len >= 5 && name.is_char_boundary(len - 5) && name[len - 5..].eq_ignore_ascii_case(".json") {
        &name[..len - 5]
    } else {
        name
    }
}

/// The part of a source file name after the `_g0<digits>_` prefix, without `.json`.
///
/// `_g0_lease_calc.json` → `lease_calc`, `_g01_quiz.json` → `quiz`.
pub fn source_suffix(file_name: &str) -> &str {
    let base = strip_json_ext(file_name);
    let bytes = base.as_bytes();
    if bytes.len() < 3 || !bytes[..3].eq_ignore_ascii_case(b"_g0") {
        return base;
    }
    let mut idx = 3;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }
    if idx < bytes.len() && bytes[idx] == b'_' {
        idx += 1;
    }
    &base[idx..]
}

/// Human-readable title derived from a source file name.
///
/// `_g0_lease_calc.json` → `"Lease Calc"`.
pub fn title_from_file_name(file_name: &str) -> String {
    let words: Vec<String> = source_suffix(file_name)
        .split(['_', '-'])
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect();
    if words.is_empty() {
        UNTITLED.to_string()
    } else {
        words.join(" ")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "tests/slug_tests.rs"]
mod tests;
