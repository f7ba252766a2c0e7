//! Pipeline settings and workspace-root resolution.
//!
//! Settings come from the first file found in this chain, with serde
//! defaults filling any key the file leaves out:
//!
//! 1. `<workspace>/g0-catalog.toml`
//! 2. `~/.config/g0-catalog/settings.toml`
//! 3. Built-in defaults
//!
//! The workspace root itself is resolved as CLI flag, then
//! `workspace_root` from the user settings file, then the current directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the per-workspace settings file.
pub const PROJECT_SETTINGS_FILE: &str = "g0-catalog.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Only honored in the user settings file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_root: Option<PathBuf>,
    /// Content tree below the workspace root that holds sources and bundles.
    pub content_dir: String,
    /// Catalog artifact, relative to the workspace root.
    pub output_path: String,
    /// Directory names never descended into (hidden directories are always skipped).
    pub ignored_dirs: Vec<String>,
    /// Directory-name prefix that marks a content bundle.
    pub bundle_prefix: String,
    /// Source files read concurrently.
    pub concurrency: usize,
    /// Examples printed per finding category before the ellipsis marker.
    pub show_limit: usize,
    /// Key-signature baseline, relative to the workspace root.
    pub drift_baseline: String,
    /// Directories skipped by the key-signature index.
    pub drift_ignored_dirs: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workspace_root: None,
            content_dir: "databases".to_string(),
            output_path: "__agent_dont_push/metadata/g0-catalog.normalized.json".to_string(),
            ignored_dirs: vec!["node_modules".to_string()],
            bundle_prefix: "__02_doing_".to_string(),
            concurrency: 16,
            show_limit: crate::preview::DEFAULT_SHOW_LIMIT,
            drift_baseline: "databases/metadata/gjson-index.baseline.json".to_string(),
            drift_ignored_dirs: [".git", ".idea", ".vscode", "node_modules", "output"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Settings {
    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.concurrency == 0 {
            return Err(SettingsError::Invalid("concurrency must be at least 1".into()));
        }
        if self.show_limit == 0 {
            return Err(SettingsError::Invalid("show_limit must be at least 1".into()));
        }
        if self.content_dir.trim().is_empty() {
            return Err(SettingsError::Invalid("content_dir must not be empty".into()));
        }
        if self.bundle_prefix.is_empty() {
            return Err(SettingsError::Invalid("bundle_prefix must not be empty".into()));
        }
        Ok(())
    }

    pub fn output_file(&self, workspace_root: &Path) -> PathBuf {
        workspace_root.join(&self.output_path)
    }

    pub fn baseline_file(&self, workspace_root: &Path) -> PathBuf {
        workspace_root.join(&self.drift_baseline)
    }
}

/// Which file the active settings were read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    Project(PathBuf),
    User(PathBuf),
    Defaults,
}

impl std::fmt::Display for SettingsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsSource::Project(p) => write!(f, "project ({})", p.display()),
            SettingsSource::User(p) => write!(f, "user ({})", p.display()),
            SettingsSource::Defaults => f.write_str("built-in defaults"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub workspace_root: PathBuf,
    pub settings: Settings,
    pub source: SettingsSource,
}

/// Canonical path to the user settings file: `~/.config/g0-catalog/settings.toml`.
pub fn user_settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("g0-catalog").join("settings.toml")
}

/// Per-workspace settings file path.
pub fn project_settings_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(PROJECT_SETTINGS_FILE)
}

/// Read one settings file. Missing keys take their defaults.
pub fn load_settings_file(path: &Path) -> Result<Settings, SettingsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| SettingsError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    toml::from_str(&contents).map_err(|e| SettingsError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Resolve workspace root and settings using the user settings file.
pub fn resolve_settings(cli_root: Option<PathBuf>) -> Result<ResolvedSettings, SettingsError> {
    resolve_settings_with(cli_root, &user_settings_path())
}

/// Resolve workspace root and settings against an explicit user settings path.
pub fn resolve_settings_with(
    cli_root: Option<PathBuf>,
    user_path: &Path,
) -> Result<ResolvedSettings, SettingsError> {
    let user = if user_path.is_file() {
        Some(load_settings_file(user_path)?)
    } else {
        None
    };

    let workspace_root = cli_root
        .or_else(|| user.as_ref().and_then(|s| s.workspace_root.clone()))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    let project_path = project_settings_path(&workspace_root);
    let (settings, source) = if project_path.is_file() {
        let mut settings = load_settings_file(&project_path)?;
        settings.workspace_root = None;
        (settings, SettingsSource::Project(project_path))
    } else if let Some(settings) = user {
        (settings, SettingsSource::User(user_path.to_path_buf()))
    } else {
        (Settings::default(), SettingsSource::Defaults)
    };

    settings.validate()?;
    log::debug!("Settings loaded from {}", source);

    Ok(ResolvedSettings {
        workspace_root,
        settings,
        source,
    })
}

/// Render settings as TOML for display.
pub fn settings_to_toml(settings: &Settings) -> Result<String, SettingsError> {
    toml::to_string_pretty(settings).map_err(|e| SettingsError::Invalid(e.to_string()))
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
