//! Position labels used in diff messages.

use std::fmt;

/// Where a compared pair sits in the tree.
///
/// Depth always counts from the root pair. The cause of any node at depth
/// `d` is `Chain(d + 1)`; an element of an aggregate at depth `d` is an
/// `AggregateElement` at depth `d + 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Along a cause chain; `Chain(0)` is the root pair.
    Chain(usize),
    /// The `index`-th element of an aggregate.
    AggregateElement { index: usize, depth: usize },
}

impl Level {
    /// The root pair.
    pub const ROOT: Level = Level::Chain(0);

    /// Distance from the root pair.
    pub fn depth(&self) -> usize {
        match *self {
            Self::Chain(depth) => depth,
            Self::AggregateElement { depth, .. } => depth,
        }
    }

    /// The level of this node's cause.
    pub fn cause(&self) -> Level {
        Level::Chain(self.depth() + 1)
    }

    /// The level of this aggregate's `index`-th element.
    pub fn element(&self, index: usize) -> Level {
        Level::AggregateElement {
            index,
            depth: self.depth() + 1,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Chain(0) => f.write_str("exception"),
            Self::Chain(depth) => write!(f, "inner exception (level {depth})"),
            Self::AggregateElement { index, .. } => write!(f, "aggregate inner exception [{index}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(Level::ROOT.to_string(), "exception");
        assert_eq!(Level::Chain(3).to_string(), "inner exception (level 3)");
        assert_eq!(Level::ROOT.element(2).to_string(), "aggregate inner exception [2]");
    }

    #[test]
    fn depth_counts_from_root() {
        let element = Level::Chain(1).element(0);
        assert_eq!(element.depth(), 2);
        assert_eq!(element.cause(), Level::Chain(3));
        assert_eq!(element.cause().to_string(), "inner exception (level 3)");
    }
}
