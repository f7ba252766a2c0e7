use chrono::Utc;
use g0_catalog_core::SourceField;
use g0_catalog_lib::archetype::{BundleOptions, validate_bundles};
use g0_catalog_lib::contract::{ValidationReport, validate_build};
use g0_catalog_lib::{BuildOptions, build_catalog};
use log::Level;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use super::{CommandContext, Outcome, runtime};
use crate::CliError;

/// Validate sources, the normalized contract and (unless skipped) bundles.
pub(crate) fn run_validate(
    ctx: &CommandContext,
    strict_source: bool,
    skip_bundles: bool,
    json: bool,
) -> Result<Outcome, CliError> {
    let settings = &ctx.resolved.settings;
    let mut options = BuildOptions::from_settings(ctx.root(), settings, Utc::now());
    options.include_content = false;

    let pb = ctx.spinner("Loading sources");
    let rt = runtime()?;
    let mut loaded = 0usize;
    let build = rt.block_on(build_catalog(&options, |_| {
        loaded += 1;
        pb.set_message(format!("Loaded {loaded} sources"));
    }))?;
    pb.finish_and_clear();

    let archetypes = if skip_bundles {
        None
    } else {
        Some(validate_bundles(
            ctx.root(),
            &BundleOptions::from_settings(settings),
        )?)
    };
    let report = validate_build(&build, strict_source, archetypes)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(ctx, &report);
    }
    Ok(Outcome::from_passed(report.passed()))
}

fn print_report(ctx: &CommandContext, report: &ValidationReport) {
    ctx.print_list(
        Level::Error,
        "Parse errors in source JSON files",
        &report.parse_errors,
        |e| format!("{}: {}", e.json_path, e.message),
    );
    ctx.print_list(
        Level::Error,
        "Duplicate source game IDs detected",
        &report.duplicate_source_game_ids,
        |d| format!("{}: {} files", d.game_id, d.count),
    );
    ctx.print_list(
        Level::Error,
        "Normalized contract violations detected",
        &report.contract_issues,
        |i| format!("{}: missing {}", i.game_id, i.missing.join(", ")),
    );
    ctx.print_list(
        Level::Error,
        "Normalized game IDs not unique",
        &report.repeated_game_ids,
        |d| format!("{}: {} records", d.game_id, d.count),
    );

    log::info!("Checked _g0*.json files: {}", report.file_count);
    log::info!("Normalized records: {}", report.total_games);
    for field in SourceField::ALL {
        log::info!(
            "Source missing {}: {}",
            field,
            report.missing_source_fields.get(field).len()
        );
    }
    log::info!("Top-level source key variants: {}", report.key_variants);

    let example_level = if report.strict_source {
        Level::Warn
    } else {
        Level::Info
    };
    for field in SourceField::ALL {
        ctx.print_list(
            example_level,
            &format!("Examples missing {field}"),
            report.missing_source_fields.get(field),
            |p| p.clone(),
        );
    }

    if let Some(bundles) = &report.archetypes {
        crate::log_blank();
        super::bundles::print_bundle_report(ctx, bundles);
    }

    crate::log_blank();
    let failures = report.failures();
    if failures.is_empty() {
        log::info!(
            "{}",
            "Validation passed".if_supports_color(Stderr, |t| t.green()),
        );
    } else {
        for failure in failures {
            log::error!(
                "{} {}",
                "Validation failed:".if_supports_color(Stderr, |t| t.red()),
                failure.describe(),
            );
        }
    }
}
