use serde::Serialize;

/// Verdict of a comparison: a match, or a mismatch with its diagnostic.
///
/// `message` is empty exactly when `is_match` is `true`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiffResult {
    pub is_match: bool,
    pub message: String,
}

impl DiffResult {
    pub fn matched() -> Self {
        Self {
            is_match: true,
            message: String::new(),
        }
    }

    /// A mismatch carrying `message`, trimmed of surrounding blank lines.
    pub fn mismatch(message: impl AsRef<str>) -> Self {
        Self {
            is_match: false,
            message: message.as_ref().trim().to_string(),
        }
    }
}
