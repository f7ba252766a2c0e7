use std::path::PathBuf;

use g0_catalog_lib::normalize::NormalizeOptions;
use g0_catalog_lib::writer::{WriteOutcome, resolve_generated_at, write_catalog};
use g0_catalog_lib::{BuildOptions, PipelineContext};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use super::{CommandContext, Outcome, runtime};
use crate::CliError;

/// Build the normalized catalog and write it to disk.
///
/// Nothing is written if any source fails to parse.
pub(crate) fn run_build(
    ctx: &CommandContext,
    output: Option<PathBuf>,
    generated_at: Option<String>,
    no_content: bool,
) -> Result<Outcome, CliError> {
    let settings = &ctx.resolved.settings;
    let epoch = std::env::var("SOURCE_DATE_EPOCH").ok();
    let stamp = resolve_generated_at(generated_at.as_deref(), epoch.as_deref())?;

    let mut options = BuildOptions::from_settings(ctx.root(), settings, stamp);
    options.include_content = !no_content;
    let output_path = match output {
        Some(p) => ctx.resolve_path(p),
        None => settings.output_file(ctx.root()),
    };

    log::info!(
        "Scanning sources in: {}",
        options
            .content_root()
            .display()
            .if_supports_color(Stderr, |t| t.cyan()),
    );

    let mut pipeline = PipelineContext::new(ctx.root());
    pipeline.scan(&options.content_root(), &options.ignored_dirs)?;

    let pb = ctx.progress_bar(pipeline.file_count as u64);
    pb.set_message("parsing");
    let rt = runtime()?;
    rt.block_on(pipeline.parse(options.concurrency, |_| pb.inc(1)));
    pb.finish_and_clear();

    if !pipeline.parse_errors.is_empty() {
        log::error!(
            "{}",
            "JSON parse errors detected in _g0*.json files:".if_supports_color(Stderr, |t| t.red()),
        );
        for issue in &pipeline.parse_errors {
            log::error!("- {}: {}", issue.json_path, issue.message);
        }
        log::error!("Catalog not written.");
        return Ok(Outcome::Fail);
    }

    pipeline.normalize(&NormalizeOptions {
        content_dir: options.content_dir.clone(),
        include_content: options.include_content,
    });
    pipeline.resolve();
    let build = pipeline.finish(options.generated_at);

    let shown_path = ctx.display_path(&output_path);
    match write_catalog(&output_path, &build.catalog)? {
        WriteOutcome::Written => log::info!(
            "Normalized catalog written: {}",
            shown_path.if_supports_color(Stderr, |t| t.green()),
        ),
        WriteOutcome::Unchanged => log::info!(
            "Normalized catalog unchanged: {}",
            shown_path.if_supports_color(Stderr, |t| t.dimmed()),
        ),
    }

    let missing = &build.catalog.stats.missing_source_fields;
    log::info!("Total _g0*.json files: {}", build.report.file_count);
    log::info!("Normalized game records: {}", build.catalog.total_games);
    log::info!(
        "Missing source fields (title/id/meta): {}/{}/{}",
        missing.title.len(),
        missing.id.len(),
        missing.meta.len(),
    );

    let duplicates = &build.report.duplicate_source_game_ids;
    if !duplicates.is_empty() {
        log::warn!(
            "{}",
            "Duplicate source game IDs were detected and auto-suffixed during normalization:"
                .if_supports_color(Stderr, |t| t.yellow()),
        );
        for row in duplicates {
            log::warn!("- {}: {} files", row.game_id, row.count);
        }
    }

    Ok(Outcome::Pass)
}
