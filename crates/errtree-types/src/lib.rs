//! Data model for errtree.
//!
//! Error values are trees: a [`SimpleError`] wraps at most one cause, an
//! [`AggregateError`] wraps an ordered list of parallel inner errors. Every
//! node carries an [`AnnotationMap`] of key to ordered string values.
//!
//! # Key Types
//!
//! - [`ErrorNode`] -- Closed sum over the two error shapes
//! - [`SimpleError`] / [`AggregateError`] -- The two shapes and their builders
//! - [`AnnotationMap`] -- Insertion-ordered key to multi-value map
//! - [`TypeError`] -- Construction and decoding failures

pub mod annotations;
pub mod error;
pub mod node;

pub use annotations::AnnotationMap;
pub use error::TypeError;
pub use node::{AggregateError, ErrorNode, SimpleError};
