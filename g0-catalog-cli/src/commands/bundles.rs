use g0_catalog_lib::archetype::{ArchetypeReport, BundleOptions, Rule, validate_bundles};
use log::Level;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use super::{CommandContext, Outcome};
use crate::CliError;

/// Check every bundle under the content root against the archetype rules.
pub(crate) fn run_bundles(ctx: &CommandContext, json: bool) -> Result<Outcome, CliError> {
    let settings = &ctx.resolved.settings;
    let report = validate_bundles(ctx.root(), &BundleOptions::from_settings(settings))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_bundle_report(ctx, &report);
        crate::log_blank();
        if report.passed() {
            log::info!(
                "{}",
                "All bundles match an archetype".if_supports_color(Stderr, |t| t.green()),
            );
        }
    }
    Ok(Outcome::from_passed(report.passed()))
}

pub(crate) fn print_bundle_report(ctx: &CommandContext, report: &ArchetypeReport) {
    log::info!(
        "{}",
        "Bundle archetypes".if_supports_color(Stderr, |t| t.bold()),
    );
    log::info!("  Bundles:    {:>6}", report.bundle_count);
    log::info!("  Playable:   {:>6}", report.playable_count);
    log::info!("  Data-only:  {:>6}", report.data_only_count);

    let counts = report.count_by_rule();
    for rule in Rule::ALL {
        let count = counts.get(&rule).copied().unwrap_or(0);
        if count > 0 {
            log::warn!(
                "  {:<15} {} violation(s)",
                rule.as_str(),
                count.if_supports_color(Stderr, |t| t.red()),
            );
        }
    }

    ctx.print_list(
        Level::Error,
        "Bundle violations",
        &report.violations,
        |v| format!("{} [{}] {}", v.bundle, v.rule, v.message),
    );
}
