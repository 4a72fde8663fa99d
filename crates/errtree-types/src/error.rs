use thiserror::Error;

/// Errors produced while building or decoding error trees.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("annotation key {key:?} must carry at least one value")]
    EmptyAnnotationValues { key: String },

    #[error("serialization error: {0}")]
    Serialization(String),
}
