//! The g0 content catalog pipeline.
//!
//! Scans a content tree for `_g0*.json` source documents, normalizes them
//! into one canonical catalog and validates both the normalized output and
//! the raw bundle structure.

pub mod archetype;
pub mod contract;
pub mod drift;
pub mod error;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod preview;
pub mod resolver;
pub mod scanner;
pub mod settings;
pub mod stats;
pub mod writer;

pub use archetype::{ArchetypeReport, BundleOptions, BundleViolation, Rule, validate_bundles};
pub use contract::{FailureClass, ValidationReport, validate_build};
pub use drift::{Baseline, DriftDiff, IndexMode, Snapshot};
pub use error::PipelineError;
pub use parser::ParseOutcome;
pub use pipeline::{BuildOptions, CatalogBuild, PipelineContext, build_catalog};
pub use preview::{DEFAULT_SHOW_LIMIT, ELLIPSIS_MARKER, render_list};
pub use settings::{ResolvedSettings, Settings, SettingsError, SettingsSource};
pub use writer::{WriteOutcome, resolve_generated_at, write_catalog};
