//! Error tree nodes.
//!
//! An [`ErrorNode`] is either a [`SimpleError`] with an optional single cause
//! or an [`AggregateError`] with an ordered list of parallel inner errors.
//! Children are owned, so a tree is always finite and acyclic.

use serde::{Deserialize, Serialize};

use crate::annotations::AnnotationMap;
use crate::error::TypeError;

/// A node in an error tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ErrorNode {
    /// An error wrapping at most one cause.
    Simple(SimpleError),
    /// An error wrapping several parallel inner errors.
    Aggregate(AggregateError),
}

impl ErrorNode {
    /// The concrete type tag of this error.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Simple(e) => &e.type_name,
            Self::Aggregate(e) => &e.type_name,
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        match self {
            Self::Simple(e) => &e.message,
            Self::Aggregate(e) => &e.message,
        }
    }

    /// The annotations attached to this node.
    pub fn annotations(&self) -> &AnnotationMap {
        match self {
            Self::Simple(e) => &e.annotations,
            Self::Aggregate(e) => &e.annotations,
        }
    }

    /// Mutable access to the annotations, for building fixtures.
    pub fn annotations_mut(&mut self) -> &mut AnnotationMap {
        match self {
            Self::Simple(e) => &mut e.annotations,
            Self::Aggregate(e) => &mut e.annotations,
        }
    }

    /// The single wrapped cause.
    ///
    /// For an aggregate this is its first inner error.
    pub fn cause(&self) -> Option<&ErrorNode> {
        match self {
            Self::Simple(e) => e.cause.as_deref(),
            Self::Aggregate(e) => e.inner.first(),
        }
    }

    /// Returns `true` for the aggregate shape.
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::Aggregate(_))
    }

    /// Length of the cause chain below this node, following [`Self::cause`].
    pub fn chain_depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.cause();
        while let Some(node) = current {
            depth += 1;
            current = node.cause();
        }
        depth
    }

    /// Decode a tree from JSON.
    pub fn from_json(json: &str) -> Result<Self, TypeError> {
        serde_json::from_str(json).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    /// Encode this tree as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, TypeError> {
        serde_json::to_string_pretty(self).map_err(|e| TypeError::Serialization(e.to_string()))
    }
}

impl From<SimpleError> for ErrorNode {
    fn from(e: SimpleError) -> Self {
        Self::Simple(e)
    }
}

impl From<AggregateError> for ErrorNode {
    fn from(e: AggregateError) -> Self {
        Self::Aggregate(e)
    }
}

/// An error with an optional single cause.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleError {
    pub type_name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<Box<ErrorNode>>,
    #[serde(default, skip_serializing_if = "AnnotationMap::is_empty")]
    pub annotations: AnnotationMap,
}

impl SimpleError {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            cause: None,
            annotations: AnnotationMap::new(),
        }
    }

    /// Wrap `cause`.
    pub fn with_cause(mut self, cause: impl Into<ErrorNode>) -> Self {
        self.cause = Some(Box::new(cause.into()));
        self
    }

    /// Append one annotation value under `key`.
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.upsert(key, value);
        self
    }

    /// Replace the whole annotation map.
    pub fn with_annotations(mut self, annotations: AnnotationMap) -> Self {
        self.annotations = annotations;
        self
    }
}

/// An error holding an ordered list of parallel inner errors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateError {
    pub type_name: String,
    pub message: String,
    #[serde(default)]
    pub inner: Vec<ErrorNode>,
    #[serde(default, skip_serializing_if = "AnnotationMap::is_empty")]
    pub annotations: AnnotationMap,
}

impl AggregateError {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            inner: Vec::new(),
            annotations: AnnotationMap::new(),
        }
    }

    /// Append one inner error.
    pub fn with_inner(mut self, inner: impl Into<ErrorNode>) -> Self {
        self.inner.push(inner.into());
        self
    }

    /// Append one annotation value under `key`.
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.upsert(key, value);
        self
    }

    /// Replace the whole annotation map.
    pub fn with_annotations(mut self, annotations: AnnotationMap) -> Self {
        self.annotations = annotations;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> ErrorNode {
        SimpleError::new("StudentServiceException", "Service error occurred")
            .with_cause(
                AggregateError::new("AggregateException", "One or more errors occurred")
                    .with_inner(
                        SimpleError::new("StudentValidationException", "Invalid student")
                            .with_annotation("Id", "Id is required")
                            .with_annotation("Id", "Id is not unique"),
                    )
                    .with_inner(SimpleError::new("TimeoutException", "Timed out")),
            )
            .into()
    }

    #[test]
    fn accessors_dispatch_on_shape() {
        let tree = sample_tree();
        assert_eq!(tree.type_name(), "StudentServiceException");
        assert!(!tree.is_aggregate());

        let aggregate = tree.cause().unwrap();
        assert!(aggregate.is_aggregate());
        assert_eq!(aggregate.message(), "One or more errors occurred");
        assert_eq!(aggregate.cause().unwrap().type_name(), "StudentValidationException");
    }

    #[test]
    fn chain_depth_follows_first_inner() {
        assert_eq!(sample_tree().chain_depth(), 2);
        assert_eq!(ErrorNode::from(SimpleError::new("X", "m")).chain_depth(), 0);
    }

    #[test]
    fn empty_aggregate_has_no_cause() {
        let node = ErrorNode::from(AggregateError::new("AggregateException", ""));
        assert!(node.cause().is_none());
    }

    #[test]
    fn clone_is_structurally_equal() {
        let tree = sample_tree();
        let copy = tree.clone();
        assert_eq!(tree, copy);
    }

    #[test]
    fn node_equality_ignores_annotation_key_order() {
        let left = ErrorNode::from(SimpleError::new("X", "m").with_annotation("a", "1").with_annotation("b", "2"));
        let right = ErrorNode::from(SimpleError::new("X", "m").with_annotation("b", "2").with_annotation("a", "1"));
        assert_eq!(left, right);
    }

    #[test]
    fn json_round_trip_keeps_annotation_order() {
        let tree = sample_tree();
        let json = tree.to_json_pretty().unwrap();
        let decoded = ErrorNode::from_json(&json).unwrap();
        assert_eq!(decoded, tree);
    }

    #[test]
    fn json_shape_tag() {
        let json = r#"{
            "shape": "simple",
            "type_name": "X",
            "message": "m",
            "cause": { "shape": "aggregate", "type_name": "A", "message": "" }
        }"#;
        let node = ErrorNode::from_json(json).unwrap();
        let cause = node.cause().unwrap();
        assert!(cause.is_aggregate());
        assert!(node.annotations().is_empty());
    }

    #[test]
    fn json_error_is_reported() {
        let err = ErrorNode::from_json(r#"{"shape":"unknown"}"#).unwrap_err();
        assert!(matches!(err, TypeError::Serialization(_)));
    }

    #[test]
    fn annotations_mut_upserts() {
        let mut node = ErrorNode::from(SimpleError::new("X", "m"));
        node.annotations_mut().upsert("k", "v");
        assert_eq!(node.annotations().get("k").unwrap(), ["v".to_string()].as_slice());
    }
}
