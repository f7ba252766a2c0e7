use g0_catalog_lib::settings::{project_settings_path, settings_to_toml, user_settings_path};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use super::{CommandContext, Outcome};
use crate::CliError;

/// Show the active settings and their source.
pub(crate) fn run_config_show(ctx: &CommandContext) -> Result<Outcome, CliError> {
    log::info!(
        "{}",
        "g0-catalog Configuration".if_supports_color(Stderr, |t| t.bold()),
    );
    crate::log_blank();
    log::info!(
        "  Workspace root: {}",
        ctx.root().display().if_supports_color(Stderr, |t| t.cyan()),
    );
    log::info!("  Loaded from:    {}", ctx.resolved.source);
    log::info!("  Show limit:     {}", ctx.show_limit);
    crate::log_blank();

    let text = settings_to_toml(&ctx.resolved.settings)?;
    for line in text.lines() {
        log::info!("  {line}");
    }
    Ok(Outcome::Pass)
}

/// Print the settings file locations, marking which exist.
pub(crate) fn run_config_path(ctx: &CommandContext) -> Result<Outcome, CliError> {
    for (label, path) in [
        ("Project", project_settings_path(ctx.root())),
        ("User", user_settings_path()),
    ] {
        let status = if path.is_file() {
            "(exists)"
                .if_supports_color(Stderr, |t| t.green())
                .to_string()
        } else {
            "(not found)"
                .if_supports_color(Stderr, |t| t.dimmed())
                .to_string()
        };
        log::info!("{label:<8} {} {status}", path.display());
    }
    Ok(Outcome::Pass)
}
