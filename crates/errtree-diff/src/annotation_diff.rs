//! Annotation-level diff: compare two annotation maps.
//!
//! Detects a key count mismatch, keys only in the actual map (extra), keys
//! only in the expected map (missing), and shared keys whose ordered value
//! lists differ. Extra keys follow the actual map's order; missing and
//! changed keys follow the expected map's order.

use std::fmt::{self, Write};

use errtree_types::AnnotationMap;

use crate::result::DiffResult;

/// Differing key counts between two maps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountMismatch {
    pub expected: usize,
    pub actual: usize,
}

/// A single key-level divergence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnnotationChange {
    /// The key is present in the actual map only.
    Extra { key: String },
    /// The key is present in the expected map only.
    Missing { key: String, values: Vec<String> },
    /// The key is present in both maps with different value lists.
    ValueMismatch {
        key: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },
}

/// The result of comparing two annotation maps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnnotationDiff {
    /// Set when the maps hold a different number of keys.
    pub count: Option<CountMismatch>,
    /// Extra keys, then missing keys, then value mismatches.
    pub changes: Vec<AnnotationChange>,
}

impl AnnotationDiff {
    /// Create an empty annotation diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the maps are equal.
    pub fn is_empty(&self) -> bool {
        self.count.is_none() && self.changes.is_empty()
    }

    /// Number of extra keys.
    pub fn extras(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, AnnotationChange::Extra { .. }))
            .count()
    }

    /// Number of missing keys.
    pub fn missing(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, AnnotationChange::Missing { .. }))
            .count()
    }

    /// Number of shared keys with unequal values.
    pub fn value_mismatches(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, AnnotationChange::ValueMismatch { .. }))
            .count()
    }

    /// Render the diff as a block headed by `Expected <label> to:`.
    ///
    /// Returns an empty string for an empty diff.
    pub fn render(&self, label: impl fmt::Display) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut out = format!("Expected {label} to:");
        if let Some(count) = self.count {
            let _ = write!(
                out,
                "\n- have a data count of {}, but found {}",
                count.expected, count.actual
            );
        }
        for change in &self.changes {
            let _ = match change {
                AnnotationChange::Extra { key } => write!(out, "\n- NOT contain key \"{key}\""),
                AnnotationChange::Missing { key, values } => write!(
                    out,
                    "\n- contain key \"{key}\" with value(s) [{}]",
                    quote_values(values)
                ),
                AnnotationChange::ValueMismatch {
                    key,
                    expected,
                    actual,
                } => write!(
                    out,
                    "\n- have key \"{key}\" with value(s) [{}], but found value(s) [{}]",
                    quote_values(expected),
                    quote_values(actual)
                ),
            };
        }
        out
    }

    /// Fold the diff into a verdict labeled with `label`.
    pub fn to_result(&self, label: impl fmt::Display) -> DiffResult {
        if self.is_empty() {
            DiffResult::matched()
        } else {
            DiffResult::mismatch(self.render(label))
        }
    }
}

/// Compute the diff between an actual and an expected annotation map.
///
/// Value lists are compared element by element, so order and duplicates
/// matter. Lists are never joined into one string before comparing, so a
/// single value `"a,b"` differs from the two values `"a"` and `"b"`. Two
/// empty maps are equal.
pub fn diff_annotations(actual: &AnnotationMap, expected: &AnnotationMap) -> AnnotationDiff {
    let mut diff = AnnotationDiff::new();
    if actual.is_empty() && expected.is_empty() {
        return diff;
    }

    if actual.len() != expected.len() {
        diff.count = Some(CountMismatch {
            expected: expected.len(),
            actual: actual.len(),
        });
    }

    for key in actual.keys() {
        if !expected.contains_key(key) {
            diff.changes.push(AnnotationChange::Extra { key: key.to_string() });
        }
    }

    for (key, values) in expected.iter() {
        if !actual.contains_key(key) {
            diff.changes.push(AnnotationChange::Missing {
                key: key.to_string(),
                values: values.to_vec(),
            });
        }
    }

    for (key, expected_values) in expected.iter() {
        if let Some(actual_values) = actual.get(key) {
            if actual_values != expected_values {
                diff.changes.push(AnnotationChange::ValueMismatch {
                    key: key.to_string(),
                    expected: expected_values.to_vec(),
                    actual: actual_values.to_vec(),
                });
            }
        }
    }

    diff
}

/// Compare two annotation maps and render any difference under `label`.
pub fn compare_maps(
    actual: &AnnotationMap,
    expected: &AnnotationMap,
    label: impl fmt::Display,
) -> DiffResult {
    diff_annotations(actual, expected).to_result(label)
}

fn quote_values(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("'{v}'"))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    fn make_map(pairs: &[(&str, &str)]) -> AnnotationMap {
        pairs.iter().copied().collect()
    }

    #[test]
    fn empty_maps_match_without_count_line() {
        let result = compare_maps(&AnnotationMap::new(), &AnnotationMap::new(), Level::ROOT);
        assert_eq!(result, DiffResult::matched());
    }

    #[test]
    fn identical_maps_match() {
        let map = make_map(&[("Id", "Id is required"), ("Name", "a"), ("Name", "b")]);
        let diff = diff_annotations(&map.clone(), &map);
        assert!(diff.is_empty());
        assert_eq!(diff.render(Level::ROOT), "");
    }

    #[test]
    fn extra_key_reports_count_and_not_contain() {
        let expected = make_map(&[("a", "1")]);
        let actual = make_map(&[("a", "1"), ("b", "2")]);

        let result = compare_maps(&actual, &expected, Level::ROOT);
        assert!(!result.is_match);
        assert_eq!(
            result.message,
            "Expected exception to:\n\
             - have a data count of 1, but found 2\n\
             - NOT contain key \"b\""
        );
    }

    #[test]
    fn missing_key_lists_expected_values() {
        let expected = make_map(&[("a", "1"), ("b", "x"), ("b", "y")]);
        let actual = make_map(&[("a", "1")]);

        let result = compare_maps(&actual, &expected, Level::Chain(2));
        assert_eq!(
            result.message,
            "Expected inner exception (level 2) to:\n\
             - have a data count of 2, but found 1\n\
             - contain key \"b\" with value(s) ['x','y']"
        );
    }

    #[test]
    fn value_order_matters() {
        let expected = make_map(&[("k", "a"), ("k", "b")]);
        let actual = make_map(&[("k", "b"), ("k", "a")]);

        let diff = diff_annotations(&actual, &expected);
        assert!(diff.count.is_none());
        assert_eq!(diff.value_mismatches(), 1);
        assert_eq!(
            diff.render(Level::ROOT),
            "Expected exception to:\n\
             - have key \"k\" with value(s) ['a','b'], but found value(s) ['b','a']"
        );
    }

    #[test]
    fn duplicate_values_matter() {
        let expected = make_map(&[("k", "a")]);
        let actual = make_map(&[("k", "a"), ("k", "a")]);
        assert_eq!(diff_annotations(&actual, &expected).value_mismatches(), 1);
    }

    #[test]
    fn separator_inside_value_is_not_merged() {
        let expected = make_map(&[("k", "a"), ("k", "b")]);
        let actual = make_map(&[("k", "a,b")]);

        let result = compare_maps(&actual, &expected, Level::ROOT);
        assert!(!result.is_match);
        assert_eq!(
            result.message,
            "Expected exception to:\n\
             - have key \"k\" with value(s) ['a','b'], but found value(s) ['a,b']"
        );
    }

    #[test]
    fn same_count_with_swapped_keys_has_no_count_line() {
        let expected = make_map(&[("a", "1")]);
        let actual = make_map(&[("b", "1")]);

        let diff = diff_annotations(&actual, &expected);
        assert!(diff.count.is_none());
        assert_eq!(diff.extras(), 1);
        assert_eq!(diff.missing(), 1);
        assert_eq!(
            diff.render(Level::ROOT),
            "Expected exception to:\n\
             - NOT contain key \"b\"\n\
             - contain key \"a\" with value(s) ['1']"
        );
    }

    #[test]
    fn emission_follows_map_order_not_sorted() {
        let expected = make_map(&[("zeta", "1"), ("alpha", "1"), ("mid", "1")]);
        let actual = make_map(&[
            ("yank", "0"),
            ("beta", "0"),
            ("zeta", "2"),
            ("mid", "2"),
        ]);

        let diff = diff_annotations(&actual, &expected);
        assert_eq!(
            diff.changes,
            vec![
                AnnotationChange::Extra { key: "yank".into() },
                AnnotationChange::Extra { key: "beta".into() },
                AnnotationChange::Missing {
                    key: "alpha".into(),
                    values: vec!["1".into()],
                },
                AnnotationChange::ValueMismatch {
                    key: "zeta".into(),
                    expected: vec!["1".into()],
                    actual: vec!["2".into()],
                },
                AnnotationChange::ValueMismatch {
                    key: "mid".into(),
                    expected: vec!["1".into()],
                    actual: vec!["2".into()],
                },
            ]
        );
        assert_eq!(
            diff.count,
            Some(CountMismatch {
                expected: 3,
                actual: 4
            })
        );
    }

    #[test]
    fn one_side_empty() {
        let expected = make_map(&[("k", "v")]);
        let result = compare_maps(&AnnotationMap::new(), &expected, "aggregate inner exception [0]");
        assert_eq!(
            result.message,
            "Expected aggregate inner exception [0] to:\n\
             - have a data count of 1, but found 0\n\
             - contain key \"k\" with value(s) ['v']"
        );
    }
}
