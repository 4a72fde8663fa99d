//! Structural equivalence and diff engine for error trees.
//!
//! Compares an actual error tree against an expected one by concrete type,
//! message, annotations and, recursively, wrapped causes. Aggregates are
//! compared element by element. A mismatch yields a leveled, human-readable
//! diagnostic that lists every divergence found.
//!
//! # Key Types
//!
//! - [`ErrorTreeComparator`] / [`TreeDiff`] / [`Divergence`] -- Tree walk and its findings
//! - [`AnnotationDiff`] / [`AnnotationChange`] -- Annotation map diff
//! - [`DiffResult`] -- Match verdict plus rendered diagnostic
//! - [`Level`] -- Position labels used in diagnostics
//! - [`CompareOptions`] -- Comparator options, loadable from TOML

pub mod annotation_diff;
pub mod assert;
pub mod config;
pub mod error;
pub mod level;
pub mod result;
pub mod tree_diff;

pub use annotation_diff::{compare_maps, diff_annotations, AnnotationChange, AnnotationDiff, CountMismatch};
pub use config::{CompareOptions, DEFAULT_MAX_DEPTH};
pub use error::{ConfigError, ConfigResult};
pub use level::Level;
pub use result::DiffResult;
pub use tree_diff::{
    compare, compare_annotations, same_as, same_as_with_message, same_exception_as, Divergence,
    ElementDiff, ErrorTreeComparator, TreeDiff,
};
