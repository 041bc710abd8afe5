//! A generic undo/redo history log.
//!
//! [`HistoryLog`] records reversible actions applied to a caller-owned
//! target and lets the caller move freely backward and forward through
//! that history. Actions implement [`ReversibleAction`], supplying
//! `apply` and `invert`; the log owns the ordered record and a cursor,
//! and mutates the target in place as the cursor moves.
//!
//! The log is append-only. Recording a new action while partway through
//! the history does not truncate the redo branch ahead of the cursor:
//! the branch's inverses are appended as new forward history first, so
//! the log remains a total, replayable record of every action ever
//! enacted. Change notifications for UI data-binding are delivered to
//! callbacks registered with [`HistoryLog::subscribe`].

mod action;
mod error;
mod event;
mod history;

pub use action::{BoxedAction, ReversibleAction};
pub use error::HistoryError;
pub use event::HistoryEvent;
pub use history::HistoryLog;
