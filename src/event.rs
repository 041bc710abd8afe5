use crate::action::BoxedAction;

/// A change notification emitted by [`HistoryLog`].
///
/// Events fire synchronously, on the calling thread, after the state
/// change they describe is complete. Entry payloads are borrowed from the
/// log for the duration of the callback.
///
/// [`HistoryLog`]: crate::HistoryLog
#[derive(Debug)]
pub enum HistoryEvent<'a, T> {
    /// Entries were appended to the log, starting at index `start`.
    Appended {
        start: usize,
        entries: &'a [BoxedAction<T>],
    },
    /// The log was cleared.
    Reset,
    /// The cursor moved.
    PositionChanged { old: usize, new: usize },
    /// The number of entries changed.
    CountChanged { old: usize, new: usize },
}
