use thiserror::Error;

/// Failures raised by [`HistoryLog`] cursor operations.
///
/// Every failure is synchronous and raised before any mutation: a call
/// that returns an error leaves both the log and the target untouched.
///
/// [`HistoryLog`]: crate::HistoryLog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// `undo` was called with the cursor already at position 0.
    #[error("nothing to undo: already at the start of history")]
    AtStart,

    /// `redo` was called with the cursor already past the last entry.
    #[error("nothing to redo: already at the end of history")]
    AtEnd,

    /// `seek` was called with an index outside `[0, len]`.
    #[error("history index {index} out of range (log holds {len} entries)")]
    OutOfRange { index: usize, len: usize },
}
