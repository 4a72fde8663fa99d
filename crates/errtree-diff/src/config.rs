use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Default bound on how deep the comparator descends.
///
/// Owned trees cannot form cycles, so the bound only caps recursion. A tree
/// whose cause chain is longer than this does not match even its own clone
/// under the defaults; raise `max_depth` to compare such trees.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options for the error tree comparator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Compare messages of two aggregate errors as well.
    ///
    /// Off by default: aggregate messages usually summarize their inner
    /// errors and are checked through them instead.
    pub strict_aggregate_messages: bool,
    /// Pairs deeper than this are reported instead of descended into.
    ///
    /// Depth is counted from the root, which sits at depth 0. Trees past
    /// the bound always produce a depth-limit divergence, even against an
    /// identical tree.
    pub max_depth: usize,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            strict_aggregate_messages: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CompareOptions {
    /// Options that check every message, aggregates included.
    pub fn strict() -> Self {
        Self {
            strict_aggregate_messages: true,
            ..Default::default()
        }
    }

    /// Parse options from a TOML document. Missing fields take defaults.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read options from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
