//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "g0-catalog")]
#[command(about = "Build and validate the normalized g0 game catalog", long_about = None)]
pub(crate) struct Cli {
    /// Workspace root containing the content tree (defaults to current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    /// Max examples listed per finding group
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub show_limit: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Scan all _g0*.json sources and write the normalized catalog
    Build {
        /// Output file (default: from settings, relative to the root)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Catalog timestamp (RFC 3339 or Unix seconds; default: SOURCE_DATE_EPOCH or now)
        #[arg(long)]
        generated_at: Option<String>,

        /// Leave the raw source documents out of the catalog
        #[arg(long)]
        no_content: bool,
    },

    /// Check sources, the normalized contract and bundle structure
    Validate {
        /// Fail when any source lacks title, id or meta
        #[arg(long)]
        strict_source: bool,

        /// Do not check __02_doing_* bundles
        #[arg(long)]
        skip_bundles: bool,

        /// Print the full validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check __02_doing_* bundles against the archetype rules
    Bundles {
        /// Print the full bundle report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare top-level key signatures of _gjson_*.json files with a baseline
    Drift {
        /// Baseline file (default: from settings, relative to the root)
        #[arg(long)]
        baseline: Option<PathBuf>,

        /// Write the current index as the new baseline
        #[arg(long)]
        update_baseline: bool,

        /// Enforce one global key signature
        #[arg(long, conflicts_with = "no_strict_uniform")]
        strict_uniform: bool,

        /// Disable uniform enforcement even for _gjson_*.json
        #[arg(long)]
        no_strict_uniform: bool,
    },

    /// Show or locate settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the active settings and where they came from
    Show,

    /// Print the settings file paths
    Path,
}
