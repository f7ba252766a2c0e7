//! Structural rules for content bundles (`__02_doing_*` folders).
//!
//! Every bundle is checked against all four rules; a violation of one rule
//! never hides another. Violations are data, collected in an
//! [`ArchetypeReport`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use g0_catalog_core::BundleFile;
use g0_catalog_core::archetype::paired_script_names;
use g0_catalog_core::paths::{is_within, join_link, relative_posix, to_posix};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::error::PipelineError;
use crate::scanner::{find_bundles, list_files};
use crate::settings::Settings;

static SCRIPT_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<script\b[^>]*\ssrc\s*=\s*["']([^"']+)["']"#).expect("static pattern")
});
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)(?:src|href)\s*=\s*["']([^"']+)["']"#).expect("static pattern")
});
static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.-]*):").expect("static pattern"));

/// Where a `src`/`href` value points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    /// Relative or root-relative path, resolved against the bundle.
    Local,
    /// Any other scheme (`http:`, `data:`, `mailto:`, ...), `//host` or `#fragment`.
    External,
    /// `file:` URL; always outside the content root.
    FileUrl,
}

/// Classify a link value from markup.
pub fn link_target(link: &str) -> LinkTarget {
    if link.is_empty() || link.starts_with("//") || link.starts_with('#') {
        return LinkTarget::External;
    }
    match SCHEME_RE.captures(link).and_then(|c| c.get(1)) {
        Some(scheme) if scheme.as_str().eq_ignore_ascii_case("file") => LinkTarget::FileUrl,
        Some(_) => LinkTarget::External,
        None => LinkTarget::Local,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    /// Playable or data-only file mix.
    Shape,
    /// Markup loads a local script and links stay inside the content root.
    LinkSafety,
    /// Data files parse to non-empty structures.
    DataIntegrity,
    /// Every markup entry has its behavior script.
    Pairing,
}

impl Rule {
    pub const ALL: [Rule; 4] = [
        Rule::Shape,
        Rule::LinkSafety,
        Rule::DataIntegrity,
        Rule::Pairing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Rule::Shape => "shape",
            Rule::LinkSafety => "link-safety",
            Rule::DataIntegrity => "data-integrity",
            Rule::Pairing => "pairing",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleViolation {
    /// Bundle path relative to the workspace root.
    pub bundle: String,
    pub rule: Rule,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchetypeReport {
    pub bundle_count: usize,
    pub playable_count: usize,
    pub data_only_count: usize,
    pub violations: Vec<BundleViolation>,
}

impl ArchetypeReport {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violation counts per rule, in rule order; rules without findings are omitted.
    pub fn count_by_rule(&self) -> BTreeMap<Rule, usize> {
        let mut counts = BTreeMap::new();
        for v in &self.violations {
            *counts.entry(v.rule).or_insert(0) += 1;
        }
        counts
    }
}

/// Archetype a bundle was recognized as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleKind {
    /// Has a markup entry point.
    Playable,
    /// Only data files.
    DataOnly,
    Unrecognized,
}

#[derive(Debug, Clone)]
pub struct BundleResult {
    pub kind: BundleKind,
    pub violations: Vec<BundleViolation>,
}

#[derive(Debug, Clone)]
pub struct BundleOptions {
    pub content_dir: String,
    pub prefix: String,
    pub ignored_dirs: Vec<String>,
}

impl BundleOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            content_dir: settings.content_dir.clone(),
            prefix: settings.bundle_prefix.clone(),
            ignored_dirs: settings.ignored_dirs.clone(),
        }
    }
}

/// Files of one bundle, split by role.
#[derive(Debug, Default)]
struct BundleFiles {
    markup: Vec<String>,
    scripts: Vec<String>,
    data: Vec<String>,
}

impl BundleFiles {
    fn classify(names: &[String]) -> Self {
        let mut files = Self::default();
        for name in names {
            match BundleFile::classify(name) {
                Some(BundleFile::Markup) => files.markup.push(name.clone()),
                Some(BundleFile::Script) => files.scripts.push(name.clone()),
                Some(BundleFile::Data) => files.data.push(name.clone()),
                None => {}
            }
        }
        files
    }

    fn is_playable(&self) -> bool {
        !self.markup.is_empty()
    }

    fn is_data_only(&self) -> bool {
        self.markup.is_empty() && self.scripts.is_empty() && !self.data.is_empty()
    }
}

fn link_values<'h>(re: &'static Regex, html: &'h str) -> impl Iterator<Item = &'h str> {
    re.captures_iter(html)
        .filter_map(|c| c.get(1).map(|m| m.as_str().trim()))
}

/// Local `<script src>` targets in a markup document.
pub fn local_script_sources(html: &str) -> Vec<&str> {
    link_values(&SCRIPT_SRC_RE, html)
        .filter(|src| link_target(src) == LinkTarget::Local)
        .collect()
}

/// Every local `src`/`href` target in a markup document.
pub fn local_links(html: &str) -> Vec<&str> {
    link_values(&LINK_RE, html)
        .filter(|link| link_target(link) == LinkTarget::Local)
        .collect()
}

/// Every `file:` URL referenced from a markup document.
pub fn file_url_links(html: &str) -> Vec<&str> {
    link_values(&LINK_RE, html)
        .filter(|link| link_target(link) == LinkTarget::FileUrl)
        .collect()
}

/// A non-empty array or non-empty object.
pub fn has_content_shape(value: &Value) -> bool {
    match value {
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        _ => false,
    }
}

struct BundleCheck<'a> {
    bundle: String,
    dir: &'a Path,
    content_root: &'a Path,
    violations: Vec<BundleViolation>,
}

impl BundleCheck<'_> {
    fn flag(&mut self, rule: Rule, message: impl Into<String>) {
        self.violations.push(BundleViolation {
            bundle: self.bundle.clone(),
            rule,
            message: message.into(),
        });
    }

    fn check_shape(&mut self, files: &BundleFiles) {
        if files.is_playable() {
            if files.scripts.is_empty() {
                self.flag(Rule::Shape, "playable bundle has no behavior script");
            }
            if files.data.is_empty() {
                self.flag(Rule::Shape, "playable bundle has no data file");
            }
        } else if !files.is_data_only() {
            self.flag(Rule::Shape, "bundle is neither playable nor data-only");
        }
    }

    fn check_links(&mut self, files: &BundleFiles) {
        for name in &files.markup {
            let path = self.dir.join(name);
            let html = match std::fs::read(&path) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    self.flag(Rule::LinkSafety, format!("{name}: cannot read markup: {e}"));
                    continue;
                }
            };
            if local_script_sources(&html).is_empty() {
                self.flag(Rule::LinkSafety, format!("{name}: no local script src"));
            }
            for link in local_links(&html) {
                let target = join_link(self.dir, link);
                if !is_within(self.content_root, &target) {
                    self.flag(
                        Rule::LinkSafety,
                        format!("{name}: link escapes content root: {link}"),
                    );
                }
            }
            for link in file_url_links(&html) {
                self.flag(
                    Rule::LinkSafety,
                    format!("{name}: link escapes content root: {link}"),
                );
            }
        }
    }

    fn check_data(&mut self, files: &BundleFiles) {
        for name in &files.data {
            let path = self.dir.join(name);
            let parsed = std::fs::read(&path)
                .map_err(|e| e.to_string())
                .and_then(|bytes| crate::parser::parse_document(&bytes));
            match parsed {
                Ok(value) if has_content_shape(&value) => {}
                Ok(_) => self.flag(Rule::DataIntegrity, format!("{name}: empty or scalar data")),
                Err(message) => {
                    self.flag(Rule::DataIntegrity, format!("{name}: invalid JSON: {message}"))
                }
            }
        }
    }

    fn check_pairing(&mut self, files: &BundleFiles) {
        let scripts: Vec<String> = files.scripts.iter().map(|s| s.to_lowercase()).collect();
        for name in &files.markup {
            let accepted = paired_script_names(name);
            if !accepted.iter().any(|n| scripts.contains(n)) {
                self.flag(
                    Rule::Pairing,
                    format!("{name}: missing sibling script {}", accepted[0]),
                );
            }
        }
    }
}

/// Run all rules against one bundle directory.
///
/// An unlistable directory is reported as a shape violation of that bundle.
pub fn check_bundle(workspace_root: &Path, content_root: &Path, dir: &Path) -> BundleResult {
    let bundle = relative_posix(workspace_root, dir).unwrap_or_else(|| to_posix(dir));
    let mut check = BundleCheck {
        bundle,
        dir,
        content_root,
        violations: Vec::new(),
    };

    let names = match list_files(dir) {
        Ok(names) => names,
        Err(e) => {
            check.flag(Rule::Shape, format!("cannot list bundle: {e}"));
            return BundleResult {
                kind: BundleKind::Unrecognized,
                violations: check.violations,
            };
        }
    };
    let files = BundleFiles::classify(&names);
    check.check_shape(&files);
    check.check_links(&files);
    check.check_data(&files);
    check.check_pairing(&files);

    let kind = if files.is_playable() {
        BundleKind::Playable
    } else if files.is_data_only() {
        BundleKind::DataOnly
    } else {
        BundleKind::Unrecognized
    };
    BundleResult {
        kind,
        violations: check.violations,
    }
}

/// Find and check every bundle under the content root.
pub fn validate_bundles(
    workspace_root: &Path,
    options: &BundleOptions,
) -> Result<ArchetypeReport, PipelineError> {
    let content_root: PathBuf = workspace_root.join(&options.content_dir);
    let bundles = find_bundles(&content_root, &options.prefix, &options.ignored_dirs)?;
    if bundles.is_empty() {
        log::warn!(
            "No {}* bundles found under {}",
            options.prefix,
            content_root.display()
        );
    }

    let mut report = ArchetypeReport {
        bundle_count: bundles.len(),
        ..ArchetypeReport::default()
    };
    for dir in &bundles {
        let result = check_bundle(workspace_root, &content_root, dir);
        match result.kind {
            BundleKind::Playable => report.playable_count += 1,
            BundleKind::DataOnly => report.data_only_count += 1,
            BundleKind::Unrecognized => {}
        }
        if !result.violations.is_empty() {
            log::debug!("{} violations in {}", result.violations.len(), dir.display());
        }
        report.violations.extend(result.violations);
    }
    Ok(report)
}

#[cfg(test)]
#[path = "tests/archetype_tests.rs"]
mod tests;
