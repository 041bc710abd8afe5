use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An owned, type-erased reversible action.
pub type BoxedAction<T> = Box<dyn ReversibleAction<T>>;

/// Represents one atomic, reversible change to a target of type `T`.
///
/// The history log stores actions but never inspects their internals; it
/// only ever calls the operations below. Actions are value-like: they hold
/// whatever data they need to apply and invert themselves, and they never
/// retain the target handle beyond the duration of an `apply` call.
///
/// `apply` and `invert` are expected to always succeed for a well-formed
/// action. Violated domain preconditions are the implementer's problem to
/// signal (panic loudly); the log does not catch or suppress anything.
pub trait ReversibleAction<T>: fmt::Debug + Any {
    /// Mutates the target to reflect this action.
    fn apply(&self, target: &mut T);

    /// Returns the action with the opposite effect.
    ///
    /// Applying `a` then `a.invert()` must return the target to its
    /// pre-`a` state, and `a.invert().invert()` must behave identically
    /// to `a` when applied.
    fn invert(&self) -> BoxedAction<T>;

    /// Returns a boxed deep copy of this action.
    fn clone_action(&self) -> BoxedAction<T>;

    /// Structural equality across action kinds.
    ///
    /// Implementers typically downcast `other` via [`as_any`] and compare
    /// fields, returning false for a different concrete type:
    ///
    /// ```ignore
    /// fn eq_action(&self, other: &dyn ReversibleAction<T>) -> bool {
    ///     other.as_any().downcast_ref::<Self>().is_some_and(|o| self == o)
    /// }
    /// ```
    ///
    /// [`as_any`]: ReversibleAction::as_any
    fn eq_action(&self, other: &dyn ReversibleAction<T>) -> bool;

    /// Hashes this action. Must be consistent with [`eq_action`]: equal
    /// actions hash equally.
    ///
    /// [`eq_action`]: ReversibleAction::eq_action
    fn hash_action(&self, state: &mut dyn Hasher);

    /// A human-readable description of the action.
    fn describe(&self) -> String;

    /// Downcast support for [`eq_action`] implementations.
    ///
    /// [`eq_action`]: ReversibleAction::eq_action
    fn as_any(&self) -> &dyn Any;
}

impl<T: 'static> PartialEq for dyn ReversibleAction<T> {
    fn eq(&self, other: &Self) -> bool {
        self.eq_action(other)
    }
}

impl<T: 'static> Eq for dyn ReversibleAction<T> {}

impl<T: 'static> Hash for dyn ReversibleAction<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash_action(state);
    }
}
