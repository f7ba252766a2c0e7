use std::path::PathBuf;

use chrono::Utc;
use g0_catalog_lib::drift::{Snapshot, compare, create_snapshot, read_baseline, write_baseline};
use g0_catalog_lib::writer::format_generated_at;
use log::Level;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use super::{CommandContext, Outcome};
use crate::CliError;

fn print_snapshot_summary(snapshot: &Snapshot) {
    log::info!("Pattern: {}", snapshot.pattern);
    log::info!("Indexed files: {}", snapshot.file_count);
    log::info!(
        "Top-level key signatures: {}",
        snapshot.signature_frequency.len()
    );
    let uniform = if snapshot.uniform_signature.is_some() {
        "yes"
    } else {
        "no"
    };
    log::info!("Uniform signature: {uniform}");
}

fn print_signature_frequency(ctx: &CommandContext, snapshot: &Snapshot) {
    ctx.print_list(
        Level::Info,
        "Top signatures",
        &snapshot.signature_frequency,
        |row| {
            let signature = if row.signature.is_empty() {
                "(empty-object)"
            } else {
                row.signature.as_str()
            };
            format!("{}x {} [{}]", row.count, signature, row.sample_path)
        },
    );
}

/// Index key signatures and either store them or compare with the baseline.
pub(crate) fn run_drift(
    ctx: &CommandContext,
    baseline: Option<PathBuf>,
    update_baseline: bool,
    strict_uniform: Option<bool>,
) -> Result<Outcome, CliError> {
    let settings = &ctx.resolved.settings;
    let baseline_path = match baseline {
        Some(p) => ctx.resolve_path(p),
        None => settings.baseline_file(ctx.root()),
    };
    let shown_baseline = ctx.display_path(&baseline_path);

    let snapshot = create_snapshot(
        ctx.root(),
        &settings.drift_ignored_dirs,
        format_generated_at(Utc::now()),
    )?;

    if snapshot.file_count == 0 && snapshot.parse_errors.is_empty() {
        log::info!("No matching files found for _gjson_*.json or fallback _g*.json.");
        return Ok(Outcome::Pass);
    }

    if !snapshot.parse_errors.is_empty() {
        print_snapshot_summary(&snapshot);
        ctx.print_list(Level::Error, "Parse errors", &snapshot.parse_errors, |e| {
            format!("{}: {}", e.path, e.message)
        });
        return Ok(Outcome::Fail);
    }

    let enforce_uniform = snapshot.mode.enforces_uniform(strict_uniform);

    if update_baseline {
        write_baseline(&baseline_path, &snapshot)?;
        log::info!(
            "Baseline updated: {}",
            shown_baseline.if_supports_color(Stderr, |t| t.green()),
        );
        print_snapshot_summary(&snapshot);
        print_signature_frequency(ctx, &snapshot);
        return Ok(Outcome::Pass);
    }

    let stored = match read_baseline(&baseline_path) {
        Ok(b) => b,
        Err(e) => {
            log::error!("Baseline missing or invalid: {shown_baseline}");
            log::debug!("{e}");
            log::error!("Run again with --update-baseline to initialize it.");
            return Ok(Outcome::Fail);
        }
    };

    let diff = compare(&stored, &snapshot, enforce_uniform);

    print_snapshot_summary(&snapshot);
    log::info!("Baseline: {shown_baseline}");
    log::info!("Changed files: {}", diff.changed.len());
    log::info!("Added files: {}", diff.added.len());
    log::info!("Removed files: {}", diff.removed.len());
    if enforce_uniform {
        log::info!("Uniform violations: {}", diff.uniform_violations.len());
    }

    ctx.print_list(Level::Warn, "Changed", &diff.changed, |row| {
        let mut bits = Vec::new();
        if !row.missing.is_empty() {
            bits.push(format!("missing=[{}]", row.missing.join(", ")));
        }
        if !row.extra.is_empty() {
            bits.push(format!("extra=[{}]", row.extra.join(", ")));
        }
        if row.is_order_only() {
            bits.push("key-order-only".to_string());
        }
        format!("{} {}", row.path, bits.join(" "))
    });
    ctx.print_list(Level::Warn, "Added", &diff.added, |row| {
        format!("{} keys=[{}]", row.path, row.keys.join(", "))
    });
    ctx.print_list(Level::Warn, "Removed", &diff.removed, |row| row.clone());
    if enforce_uniform {
        ctx.print_list(
            Level::Warn,
            "Uniform violations",
            &diff.uniform_violations,
            |row| format!("{} keys=[{}]", row.path, row.keys.join(", ")),
        );
    }

    Ok(Outcome::from_passed(diff.is_clean()))
}
