//! End-to-end catalog build: scan, parse, normalize, resolve, aggregate.
//!
//! All accumulators live in [`PipelineContext`], which is threaded through
//! the stages in order. Each stage appends to the context; none of them
//! reorders what an earlier stage produced.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use g0_catalog_core::{
    CATALOG_SCHEMA_VERSION, Catalog, CatalogStats, DuplicateRecord, NormalizedGame, ParseError,
    Report, SourceRecord,
};

use crate::error::PipelineError;
use crate::normalize::{NormalizeOptions, normalize_record};
use crate::parser::{ParseOutcome, parse_sources};
use crate::resolver::resolve_ids;
use crate::scanner::scan_source_files;
use crate::settings::Settings;
use crate::stats::{CorpusStats, aggregate};
use crate::writer::format_generated_at;

/// Inputs of one catalog build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub workspace_root: PathBuf,
    pub content_dir: String,
    pub ignored_dirs: Vec<String>,
    /// Keep each raw source document under `content`.
    pub include_content: bool,
    pub concurrency: usize,
    pub generated_at: DateTime<Utc>,
}

impl BuildOptions {
    pub fn from_settings(
        workspace_root: &Path,
        settings: &Settings,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            workspace_root: workspace_root.to_path_buf(),
            content_dir: settings.content_dir.clone(),
            ignored_dirs: settings.ignored_dirs.clone(),
            include_content: true,
            concurrency: settings.concurrency,
            generated_at,
        }
    }

    pub fn content_root(&self) -> PathBuf {
        self.workspace_root.join(&self.content_dir)
    }
}

/// Catalog plus the diagnostics report of the same run.
#[derive(Debug, Clone)]
pub struct CatalogBuild {
    pub catalog: Catalog,
    pub report: Report,
}

/// Append-only state of one pipeline run.
#[derive(Debug, Default)]
pub struct PipelineContext {
    pub workspace_root: PathBuf,
    pub candidates: Vec<PathBuf>,
    pub file_count: usize,
    pub parse_errors: Vec<ParseError>,
    pub records: Vec<SourceRecord>,
    pub games: Vec<NormalizedGame>,
    pub duplicates: Vec<DuplicateRecord>,
}

impl PipelineContext {
    pub fn new(workspace_root: &Path) -> Self {
        Self {
            workspace_root: workspace_root.to_path_buf(),
            ..Self::default()
        }
    }

    /// Collect candidate files under `content_root`.
    pub fn scan(
        &mut self,
        content_root: &Path,
        ignored_dirs: &[String],
    ) -> Result<(), PipelineError> {
        self.candidates = scan_source_files(content_root, ignored_dirs)?;
        self.file_count = self.candidates.len();
        Ok(())
    }

    /// Load every candidate, splitting outcomes into records and parse errors.
    pub async fn parse<F>(&mut self, concurrency: usize, on_loaded: F)
    where
        F: FnMut(&ParseOutcome),
    {
        let paths = std::mem::take(&mut self.candidates);
        let outcomes = parse_sources(&self.workspace_root, paths, concurrency, on_loaded).await;
        for outcome in outcomes {
            match outcome {
                ParseOutcome::Parsed(record) => self.records.push(record),
                ParseOutcome::Failed(err) => self.parse_errors.push(err),
            }
        }
    }

    pub fn normalize(&mut self, options: &NormalizeOptions) {
        self.games = self
            .records
            .iter()
            .map(|record| normalize_record(record, options))
            .collect();
    }

    pub fn resolve(&mut self) {
        self.duplicates = resolve_ids(&mut self.games);
    }

    /// Aggregate statistics and assemble the catalog and report.
    pub fn finish(self, generated_at: DateTime<Utc>) -> CatalogBuild {
        let CorpusStats {
            by_game_id,
            by_path,
            key_frequency,
        } = aggregate(&self.games);

        let report = Report {
            file_count: self.file_count,
            parse_errors: self.parse_errors,
            duplicate_source_game_ids: self.duplicates,
            missing_source_fields: by_path,
        };
        let catalog = Catalog {
            schema_version: CATALOG_SCHEMA_VERSION.to_string(),
            generated_at: format_generated_at(generated_at),
            total_games: self.games.len(),
            stats: CatalogStats {
                total_source_files: self.file_count,
                missing_source_fields: by_game_id,
                duplicate_source_game_ids: report.duplicate_source_game_ids.len(),
                top_level_key_frequency: key_frequency,
            },
            games: self.games,
        };
        CatalogBuild { catalog, report }
    }
}

/// Run the whole pipeline. `on_loaded` observes every parse outcome in
/// traversal order (used for progress display).
pub async fn build_catalog<F>(
    options: &BuildOptions,
    on_loaded: F,
) -> Result<CatalogBuild, PipelineError>
where
    F: FnMut(&ParseOutcome),
{
    let mut ctx = PipelineContext::new(&options.workspace_root);
    ctx.scan(&options.content_root(), &options.ignored_dirs)?;
    log::debug!("Scanned {} candidate files", ctx.file_count);

    ctx.parse(options.concurrency, on_loaded).await;
    ctx.normalize(&NormalizeOptions {
        content_dir: options.content_dir.clone(),
        include_content: options.include_content,
    });
    ctx.resolve();

    let build = ctx.finish(options.generated_at);
    log::debug!(
        "Built catalog: {} games, {} parse errors, {} duplicate ids",
        build.catalog.total_games,
        build.report.parse_errors.len(),
        build.report.duplicate_source_game_ids.len()
    );
    Ok(build)
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
