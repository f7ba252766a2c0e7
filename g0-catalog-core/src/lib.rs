//! Shared data model and pure helpers for the g0 content catalog.
//!
//! Everything here is free of filesystem access: the canonical catalog types,
//! the identifier slugging policy, the file-archetype predicates and lexical
//! path containment. `g0-catalog-lib` builds the pipeline on top of these.

pub mod archetype;
pub mod paths;
pub mod slug;
pub mod types;

pub use archetype::BundleFile;
pub use slug::{fold_for_sort, slugify, source_suffix, title_from_file_name};
pub use types::*;
