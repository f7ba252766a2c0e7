pub(crate) mod build;
pub(crate) mod bundles;
pub(crate) mod config;
pub(crate) mod drift;
pub(crate) mod validate;

use std::path::{Path, PathBuf};

use g0_catalog_core::paths::relative_posix;
use g0_catalog_lib::ResolvedSettings;
use g0_catalog_lib::preview::render_list;
use indicatif::{ProgressBar, ProgressStyle};
use log::Level;

use crate::CliError;

/// Whether a command's checks passed. Maps to exit codes 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Pass,
    Fail,
}

impl Outcome {
    pub(crate) fn from_passed(passed: bool) -> Self {
        if passed { Outcome::Pass } else { Outcome::Fail }
    }

    pub(crate) fn exit_code(self) -> i32 {
        match self {
            Outcome::Pass => 0,
            Outcome::Fail => 1,
        }
    }
}

/// State shared by all commands of one invocation.
pub(crate) struct CommandContext {
    pub resolved: ResolvedSettings,
    pub show_limit: usize,
    pub quiet: bool,
}

impl CommandContext {
    pub(crate) fn root(&self) -> &Path {
        &self.resolved.workspace_root
    }

    /// Anchor a user-supplied path at the workspace root unless absolute.
    pub(crate) fn resolve_path(&self, path: PathBuf) -> PathBuf {
        if path.is_absolute() {
            path
        } else {
            self.root().join(path)
        }
    }

    /// Path relative to the workspace root for display.
    pub(crate) fn display_path(&self, path: &Path) -> String {
        relative_posix(self.root(), path).unwrap_or_else(|| path.display().to_string())
    }

    /// Log a bounded list at `level`: count, up to `show_limit` examples, `- ...`.
    pub(crate) fn print_list<T>(
        &self,
        level: Level,
        title: &str,
        items: &[T],
        format: impl Fn(&T) -> String,
    ) {
        for line in render_list(title, items, self.show_limit, format) {
            log::log!(level, "{line}");
        }
    }

    pub(crate) fn spinner(&self, msg: &str) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("  {spinner:.cyan} {msg}")
                .expect("static pattern")
                .tick_chars("/-\\|"),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    pub(crate) fn progress_bar(&self, len: u64) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::with_template("  {bar:30.cyan/blue} {pos}/{len} {msg}")
                .expect("static pattern")
                .progress_chars("=> "),
        );
        pb
    }
}

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use g0_catalog_lib::{Settings, SettingsSource};

    fn context(root: &str) -> CommandContext {
        CommandContext {
            resolved: ResolvedSettings {
                workspace_root: PathBuf::from(root),
                settings: Settings::default(),
                source: SettingsSource::Defaults,
            },
            show_limit: 2,
            quiet: true,
        }
    }

    #[test]
    fn outcome_exit_codes() {
        assert_eq!(Outcome::from_passed(true).exit_code(), 0);
        assert_eq!(Outcome::from_passed(false).exit_code(), 1);
    }

    #[test]
    fn relative_paths_anchor_at_root() {
        let ctx = context("/ws");
        assert_eq!(
            ctx.resolve_path(PathBuf::from("out/catalog.json")),
            PathBuf::from("/ws/out/catalog.json")
        );
        assert_eq!(
            ctx.resolve_path(PathBuf::from("/abs/catalog.json")),
            PathBuf::from("/abs/catalog.json")
        );
    }

    #[test]
    fn display_path_is_root_relative() {
        let ctx = context("/ws");
        assert_eq!(
            ctx.display_path(Path::new("/ws/databases/x.json")),
            "databases/x.json"
        );
        assert_eq!(ctx.display_path(Path::new("/elsewhere/x.json")), "/elsewhere/x.json");
    }
}
