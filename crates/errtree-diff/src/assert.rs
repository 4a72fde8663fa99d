//! Test assertion for error trees.

/// Assert that two error trees are equivalent.
///
/// Both arguments are `Option<&ErrorNode>`. On mismatch the macro panics
/// with the rendered diagnostic, prefixed by an optional custom message.
///
/// ```
/// use errtree_diff::assert_same_error;
/// use errtree_types::{ErrorNode, SimpleError};
///
/// let expected = ErrorNode::from(SimpleError::new("NotFound", "no such key"));
/// let actual = expected.clone();
/// assert_same_error!(Some(&actual), Some(&expected));
/// ```
#[macro_export]
macro_rules! assert_same_error {
    ($actual:expr, $expected:expr $(,)?) => {{
        let result = $crate::compare($actual, $expected);
        if !result.is_match {
            panic!("error trees differ:\n{}", result.message);
        }
    }};
    ($actual:expr, $expected:expr, $($arg:tt)+) => {{
        let result = $crate::compare($actual, $expected);
        if !result.is_match {
            panic!("{}: error trees differ:\n{}", format_args!($($arg)+), result.message);
        }
    }};
}
