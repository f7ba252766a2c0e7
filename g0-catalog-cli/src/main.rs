//! g0-catalog CLI
//!
//! Command-line interface for building and validating the normalized g0
//! game catalog.

mod cli_types;
mod commands;
mod error;
mod logging;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use commands::{CommandContext, Outcome};
pub(crate) use error::CliError;
pub(crate) use logging::log_blank;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{e}");
        std::process::exit(2);
    }

    let code = match run(cli) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            log::error!("{e}");
            2
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<Outcome, CliError> {
    let resolved = g0_catalog_lib::settings::resolve_settings(cli.root)?;
    let show_limit = cli
        .show_limit
        .map(|n| n as usize)
        .unwrap_or(resolved.settings.show_limit);
    let ctx = CommandContext {
        resolved,
        show_limit,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Build {
            output,
            generated_at,
            no_content,
        } => commands::build::run_build(&ctx, output, generated_at, no_content),
        Commands::Validate {
            strict_source,
            skip_bundles,
            json,
        } => commands::validate::run_validate(&ctx, strict_source, skip_bundles, json),
        Commands::Bundles { json } => commands::bundles::run_bundles(&ctx, json),
        Commands::Drift {
            baseline,
            update_baseline,
            strict_uniform,
            no_strict_uniform,
        } => {
            let strict = match (strict_uniform, no_strict_uniform) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            commands::drift::run_drift(&ctx, baseline, update_baseline, strict)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&ctx),
            ConfigAction::Path => commands::config::run_config_path(&ctx),
        },
    }
}
