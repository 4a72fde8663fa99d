//! Tree-level diff: walk two error trees and collect every divergence.
//!
//! At each pair the comparator checks the type tag, the message and the
//! annotations together. A pair that disagrees on any of them ends the walk
//! on that branch. A pair that agrees descends: aggregates compare their
//! inner errors index by index, everything else follows the single cause.

use std::fmt;

use errtree_types::{AggregateError, AnnotationMap, ErrorNode};
use tracing::{debug, trace};

use crate::annotation_diff::{compare_maps, diff_annotations, AnnotationDiff};
use crate::config::CompareOptions;
use crate::level::Level;
use crate::result::DiffResult;

/// Stand-in type name for an absent error.
const NULL_TYPE: &str = "null";

/// The result of comparing two error trees.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeDiff {
    /// Divergences found at the first disagreeing pair of each branch.
    pub divergences: Vec<Divergence>,
}

impl TreeDiff {
    /// Create an empty tree diff.
    pub fn new() -> Self {
        Self::default()
    }

    fn single(divergence: Divergence) -> Self {
        Self {
            divergences: vec![divergence],
        }
    }

    /// Returns `true` if the trees are equivalent.
    pub fn is_empty(&self) -> bool {
        self.divergences.is_empty()
    }

    /// Number of divergences at this level of the diff.
    pub fn len(&self) -> usize {
        self.divergences.len()
    }

    /// Render the full diagnostic, one divergence per line block.
    pub fn render(&self) -> String {
        self.divergences
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    /// Fold the diff into a verdict.
    pub fn to_result(&self) -> DiffResult {
        if self.is_empty() {
            DiffResult::matched()
        } else {
            DiffResult::mismatch(self.render())
        }
    }
}

/// One way in which a pair of errors disagrees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Divergence {
    /// Exactly one side is absent.
    NullAsymmetry {
        level: Level,
        expected: Option<String>,
        actual: Option<String>,
    },
    /// The concrete type tags differ.
    TypeMismatch {
        level: Level,
        expected: String,
        actual: String,
    },
    /// The messages differ.
    MessageMismatch {
        level: Level,
        expected: String,
        actual: String,
    },
    /// The annotation maps differ.
    Annotations { level: Level, diff: AnnotationDiff },
    /// Two aggregates hold a different number of inner errors.
    AggregateArity { expected: usize, actual: usize },
    /// Some inner errors of two aggregates differ.
    AggregateElements(Vec<ElementDiff>),
    /// The pair lies deeper than the configured bound.
    DepthLimit { level: Level, max_depth: usize },
}

impl Divergence {
    fn kind(&self) -> &'static str {
        match self {
            Self::NullAsymmetry { .. } => "null_asymmetry",
            Self::TypeMismatch { .. } => "type",
            Self::MessageMismatch { .. } => "message",
            Self::Annotations { .. } => "annotations",
            Self::AggregateArity { .. } => "aggregate_arity",
            Self::AggregateElements(_) => "aggregate_elements",
            Self::DepthLimit { .. } => "depth_limit",
        }
    }
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullAsymmetry {
                level,
                expected,
                actual,
            } => write!(
                f,
                "Expected {level} to be \"{}\", but found \"{}\"",
                expected.as_deref().unwrap_or(NULL_TYPE),
                actual.as_deref().unwrap_or(NULL_TYPE)
            ),
            Self::TypeMismatch {
                level,
                expected,
                actual,
            } => write!(f, "Expected {level} to be \"{expected}\", but found \"{actual}\""),
            Self::MessageMismatch {
                level,
                expected,
                actual,
            } => write!(
                f,
                "Expected {level} message to be \"{expected}\", but found \"{actual}\""
            ),
            Self::Annotations { level, diff } => f.write_str(&diff.render(level)),
            Self::AggregateArity { expected, actual } => write!(
                f,
                "Expected aggregate exception to contain {expected} inner exception(s), but found {actual}"
            ),
            Self::AggregateElements(elements) => {
                f.write_str("Aggregate exception differences:")?;
                for element in elements {
                    write!(
                        f,
                        "\n* Difference in inner exception at index[{}] - {}",
                        element.index,
                        element.diff.render()
                    )?;
                }
                Ok(())
            }
            Self::DepthLimit { level, max_depth } => write!(
                f,
                "Expected {level} to be within the maximum comparison depth of {max_depth}"
            ),
        }
    }
}

/// The diff of one inner error of an aggregate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementDiff {
    pub index: usize,
    pub diff: TreeDiff,
}

/// Structural comparator for error trees.
///
/// Holds only its options; every call walks its own pair of trees and
/// returns a fresh result.
#[derive(Clone, Debug, Default)]
pub struct ErrorTreeComparator {
    options: CompareOptions,
}

impl ErrorTreeComparator {
    pub fn new(options: CompareOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Compute the structured diff between two (possibly absent) trees.
    pub fn diff(&self, actual: Option<&ErrorNode>, expected: Option<&ErrorNode>) -> TreeDiff {
        self.diff_at(actual, expected, Level::ROOT)
    }

    /// Compare two trees and render the verdict.
    pub fn compare(&self, actual: Option<&ErrorNode>, expected: Option<&ErrorNode>) -> DiffResult {
        self.diff(actual, expected).to_result()
    }

    /// Returns `true` if the trees are equivalent.
    pub fn same_as(&self, actual: Option<&ErrorNode>, expected: Option<&ErrorNode>) -> bool {
        self.diff(actual, expected).is_empty()
    }

    /// Capture `expected` into a predicate over actual trees.
    ///
    /// The predicate answers like [`Self::same_as`] and can be handed to
    /// anything that filters or matches recorded errors.
    pub fn matcher<'a>(
        &'a self,
        expected: Option<&'a ErrorNode>,
    ) -> impl Fn(Option<&ErrorNode>) -> bool + 'a {
        move |actual: Option<&ErrorNode>| self.same_as(actual, expected)
    }

    /// Compare two annotation maps as if they belonged to the root pair.
    pub fn compare_annotations(&self, actual: &AnnotationMap, expected: &AnnotationMap) -> DiffResult {
        compare_maps(actual, expected, Level::ROOT)
    }

    fn diff_at(
        &self,
        actual: Option<&ErrorNode>,
        expected: Option<&ErrorNode>,
        level: Level,
    ) -> TreeDiff {
        let (actual, expected) = match (actual, expected) {
            (None, None) => return TreeDiff::new(),
            (Some(actual), Some(expected)) => (actual, expected),
            (actual, expected) => {
                return self.diverged(
                    level,
                    vec![Divergence::NullAsymmetry {
                        level,
                        expected: expected.map(|e| e.type_name().to_string()),
                        actual: actual.map(|a| a.type_name().to_string()),
                    }],
                );
            }
        };
        trace!(%level, actual = actual.type_name(), expected = expected.type_name(), "comparing error pair");

        if level.depth() > self.options.max_depth {
            return self.diverged(
                level,
                vec![Divergence::DepthLimit {
                    level,
                    max_depth: self.options.max_depth,
                }],
            );
        }

        let mut divergences = Vec::new();

        if actual.type_name() != expected.type_name() {
            divergences.push(Divergence::TypeMismatch {
                level,
                expected: expected.type_name().to_string(),
                actual: actual.type_name().to_string(),
            });
        }

        let both_aggregate = actual.is_aggregate() && expected.is_aggregate();
        if (!both_aggregate || self.options.strict_aggregate_messages)
            && actual.message() != expected.message()
        {
            divergences.push(Divergence::MessageMismatch {
                level,
                expected: expected.message().to_string(),
                actual: actual.message().to_string(),
            });
        }

        let annotations = diff_annotations(actual.annotations(), expected.annotations());
        if !annotations.is_empty() {
            divergences.push(Divergence::Annotations {
                level,
                diff: annotations,
            });
        }

        if !divergences.is_empty() {
            return self.diverged(level, divergences);
        }

        match (actual, expected) {
            (ErrorNode::Aggregate(actual), ErrorNode::Aggregate(expected)) => {
                self.diff_aggregates(actual, expected, level)
            }
            _ => self.diff_at(actual.cause(), expected.cause(), level.cause()),
        }
    }

    fn diff_aggregates(
        &self,
        actual: &AggregateError,
        expected: &AggregateError,
        level: Level,
    ) -> TreeDiff {
        if actual.inner.len() != expected.inner.len() {
            return self.diverged(
                level,
                vec![Divergence::AggregateArity {
                    expected: expected.inner.len(),
                    actual: actual.inner.len(),
                }],
            );
        }

        let elements: Vec<ElementDiff> = actual
            .inner
            .iter()
            .zip(&expected.inner)
            .enumerate()
            .filter_map(|(index, (a, e))| {
                let diff = self.diff_at(Some(a), Some(e), level.element(index));
                (!diff.is_empty()).then_some(ElementDiff { index, diff })
            })
            .collect();

        if elements.is_empty() {
            TreeDiff::new()
        } else {
            TreeDiff::single(Divergence::AggregateElements(elements))
        }
    }

    fn diverged(&self, level: Level, divergences: Vec<Divergence>) -> TreeDiff {
        for divergence in &divergences {
            debug!(%level, kind = divergence.kind(), "error pair diverged");
        }
        TreeDiff { divergences }
    }
}

/// Compare two trees with default options.
pub fn compare(actual: Option<&ErrorNode>, expected: Option<&ErrorNode>) -> DiffResult {
    ErrorTreeComparator::default().compare(actual, expected)
}

/// Returns `true` if two trees are equivalent under default options.
pub fn same_as(actual: Option<&ErrorNode>, expected: Option<&ErrorNode>) -> bool {
    ErrorTreeComparator::default().same_as(actual, expected)
}

/// Predicate matching trees equivalent to `expected` under default options.
pub fn same_exception_as(expected: Option<&ErrorNode>) -> impl Fn(Option<&ErrorNode>) -> bool + '_ {
    let comparator = ErrorTreeComparator::default();
    move |actual: Option<&ErrorNode>| comparator.same_as(actual, expected)
}

/// Compare two trees with default options, keeping the diagnostic.
pub fn same_as_with_message(actual: Option<&ErrorNode>, expected: Option<&ErrorNode>) -> DiffResult {
    compare(actual, expected)
}

/// Compare two annotation maps under the root label.
pub fn compare_annotations(actual: &AnnotationMap, expected: &AnnotationMap) -> DiffResult {
    compare_maps(actual, expected, Level::ROOT)
}
