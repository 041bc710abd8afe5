use std::fmt;

use tracing::{debug, trace};

use crate::action::{BoxedAction, ReversibleAction};
use crate::error::HistoryError;
use crate::event::HistoryEvent;


type Subscriber<T> = Box<dyn FnMut(&HistoryEvent<'_, T>)>;

/// An append-only log of reversible actions with a movable cursor.
///
/// Entries at indices `[0, position)` are currently applied to the target;
/// entries at `[position, len)` are the pending redo branch. The target's
/// state is always exactly the result of applying `entries[0..position]`
/// in order, starting from its state when the log was constructed empty.
///
/// Unlike a conventional two-stack history, recording a new action while
/// partway through the log does not discard the entries ahead of the
/// cursor. Their inverses are appended as new forward history first (see
/// [`HistoryLog::apply`]), so the log is a total, replayable record of
/// every action ever enacted, in the order it was enacted.
///
/// The log is not internally synchronized; callers running on multiple
/// threads must serialize access to the log/target pair themselves.
pub struct HistoryLog<T> {
    entries: Vec<BoxedAction<T>>,
    position: usize,
    subscribers: Vec<Subscriber<T>>,
}

impl<T: 'static> HistoryLog<T> {
    /// Creates an empty log with the cursor at 0.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            position: 0,
            subscribers: Vec::new(),
        }
    }

    /// Creates a log from a pre-existing sequence of actions, all treated
    /// as already applied (cursor at the end).
    pub fn from_actions(actions: Vec<BoxedAction<T>>) -> Self {
        Self {
            position: actions.len(),
            entries: actions,
            subscribers: Vec::new(),
        }
    }

    /// Returns a deep copy of this log: same entries, same cursor.
    ///
    /// Subscribers are not copied; a snapshot is a detached value, not a
    /// live view of the original.
    pub fn snapshot(&self) -> Self {
        Self {
            entries: self.entries.iter().map(|e| e.clone_action()).collect(),
            position: self.position,
            subscribers: Vec::new(),
        }
    }

    /// Registers a callback invoked synchronously for every change to the
    /// log. See [`HistoryEvent`] for what fires and when.
    pub fn subscribe(&mut self, callback: impl FnMut(&HistoryEvent<'_, T>) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// Number of entries in the log.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The cursor: how many entries, from the start, are currently applied
    /// to the target. Always in `0..=len()`.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn can_undo(&self) -> bool {
        self.position > 0
    }

    pub fn can_redo(&self) -> bool {
        self.position < self.entries.len()
    }

    /// Bounds-checked read access to an entry.
    pub fn get(&self, index: usize) -> Option<&dyn ReversibleAction<T>> {
        self.entries.get(index).map(|e| e.as_ref())
    }

    /// Whether the log contains an entry structurally equal to `action`.
    pub fn contains(&self, action: &dyn ReversibleAction<T>) -> bool {
        self.entries.iter().any(|e| e.eq_action(action))
    }

    /// Iterates over the entries in log order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ReversibleAction<T>> {
        self.entries.iter().map(|e| e.as_ref())
    }

    /// Applies `action` to the target and records it.
    ///
    /// If the cursor is partway through the log, the pending redo branch
    /// is materialized first: the inverse of every entry ahead of the
    /// cursor is appended (last pending entry first), which lands the
    /// recorded history back on the target's current state without
    /// touching the target. Then `action` is applied, appended, and the
    /// cursor moves to the end.
    ///
    /// Emits [`HistoryEvent::Appended`] for the materialized inverses (if
    /// any), [`HistoryEvent::Appended`] for `action`, then
    /// [`HistoryEvent::CountChanged`] and [`HistoryEvent::PositionChanged`].
    pub fn apply(&mut self, target: &mut T, action: BoxedAction<T>) {
        let old_len = self.entries.len();
        let old_pos = self.position;
        self.materialize();
        debug!(action = %action.describe(), "apply");
        action.apply(target);
        self.append_entry(action, old_len, old_pos);
    }

    /// Records `action` without applying it, for actions already enacted
    /// on the target by other means. Materializes the pending redo branch
    /// exactly as [`HistoryLog::apply`] does, and emits the same events.
    pub fn record(&mut self, action: BoxedAction<T>) {
        let old_len = self.entries.len();
        let old_pos = self.position;
        self.materialize();
        debug!(action = %action.describe(), "record");
        self.append_entry(action, old_len, old_pos);
    }

    /// Moves the cursor back one entry, applying the inverse of the entry
    /// just behind it to the target. Emits [`HistoryEvent::PositionChanged`].
    pub fn undo(&mut self, target: &mut T) -> Result<(), HistoryError> {
        if self.position == 0 {
            return Err(HistoryError::AtStart);
        }
        let inverse = self.entries[self.position - 1].invert();
        trace!(position = self.position, action = %inverse.describe(), "undo");
        inverse.apply(target);
        self.position -= 1;
        Self::notify(
            &mut self.subscribers,
            &HistoryEvent::PositionChanged {
                old: self.position + 1,
                new: self.position,
            },
        );
        Ok(())
    }

    /// Moves the cursor forward one entry, applying that entry to the
    /// target. Emits [`HistoryEvent::PositionChanged`].
    pub fn redo(&mut self, target: &mut T) -> Result<(), HistoryError> {
        if self.position == self.entries.len() {
            return Err(HistoryError::AtEnd);
        }
        let action = &self.entries[self.position];
        trace!(position = self.position, action = %action.describe(), "redo");
        action.apply(target);
        self.position += 1;
        Self::notify(
            &mut self.subscribers,
            &HistoryEvent::PositionChanged {
                old: self.position - 1,
                new: self.position,
            },
        );
        Ok(())
    }

    /// Moves the cursor to `index` by repeated [`HistoryLog::redo`] or
    /// [`HistoryLog::undo`] steps, so observers see every intermediate
    /// application and notification. Fails with
    /// [`HistoryError::OutOfRange`], before any mutation, if `index` is
    /// past the end of the log.
    pub fn seek(&mut self, target: &mut T, index: usize) -> Result<(), HistoryError> {
        if index > self.entries.len() {
            return Err(HistoryError::OutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        trace!(from = self.position, to = index, "seek");
        while self.position < index {
            self.redo(target)?;
        }
        while self.position > index {
            self.undo(target)?;
        }
        Ok(())
    }

    /// Removes every entry and resets the cursor to 0.
    ///
    /// Emits [`HistoryEvent::Reset`], [`HistoryEvent::CountChanged`], and
    /// (if the cursor moved) [`HistoryEvent::PositionChanged`]. A no-op
    /// with no notifications when the log is already empty.
    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let old_len = self.entries.len();
        let old_pos = self.position;
        debug!(count = old_len, "clear");
        self.entries.clear();
        self.position = 0;
        Self::notify(&mut self.subscribers, &HistoryEvent::Reset);
        Self::notify(
            &mut self.subscribers,
            &HistoryEvent::CountChanged {
                old: old_len,
                new: 0,
            },
        );
        if old_pos != 0 {
            Self::notify(
                &mut self.subscribers,
                &HistoryEvent::PositionChanged {
                    old: old_pos,
                    new: 0,
                },
            );
        }
    }

    /// Appends `action`, moves the cursor to the end, and emits the
    /// append/count/position events. Shared tail of `apply` and `record`;
    /// runs after materialization.
    fn append_entry(&mut self, action: BoxedAction<T>, old_len: usize, old_pos: usize) {
        self.entries.push(action);
        self.position = self.entries.len();
        Self::notify(
            &mut self.subscribers,
            &HistoryEvent::Appended {
                start: self.entries.len() - 1,
                entries: &self.entries[self.entries.len() - 1..],
            },
        );
        Self::notify(
            &mut self.subscribers,
            &HistoryEvent::CountChanged {
                old: old_len,
                new: self.entries.len(),
            },
        );
        Self::notify(
            &mut self.subscribers,
            &HistoryEvent::PositionChanged {
                old: old_pos,
                new: self.position,
            },
        );
    }

    /// Converts the entries ahead of the cursor into permanent forward
    /// history by appending their inverses, last pending entry first.
    ///
    /// Log-only: the pending entries were already undone on the target, so
    /// the appended inverses keep the state invariant holding without any
    /// application. This is the only place besides `append_entry` that
    /// grows `entries`; nothing anywhere rewrites or removes them short of
    /// [`HistoryLog::clear`].
    fn materialize(&mut self) {
        let end = self.entries.len();
        if self.position == end {
            return;
        }
        for i in (self.position..end).rev() {
            let inverse = self.entries[i].invert();
            self.entries.push(inverse);
        }
        self.position = self.entries.len();
        debug!(
            count = self.entries.len() - end,
            "materialized abandoned redo branch"
        );
        Self::notify(
            &mut self.subscribers,
            &HistoryEvent::Appended {
                start: end,
                entries: &self.entries[end..],
            },
        );
    }

    fn notify(subscribers: &mut [Subscriber<T>], event: &HistoryEvent<'_, T>) {
        for subscriber in subscribers.iter_mut() {
            subscriber(event);
        }
    }
}

impl<T: 'static> Default for HistoryLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for HistoryLog<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryLog")
            .field("entries", &self.entries)
            .field("position", &self.position)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
