//! Typed entity identifiers.
//!
//! Every entity kind has its own id type, `Id<Object>`, `Id<Light>` and so
//! on, so an object id can never be used to look up a light. Ids come from a
//! per-kind [`IdGenerator`] that only ever counts up: an id is acquired once
//! when an entity is created and is never handed out again in the session,
//! even after the entity is deleted.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Identifier of an entity of kind `T`.
///
/// The default value is a placeholder that no generator ever returns.
pub struct Id<T> {
    value: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    const PLACEHOLDER: u32 = u32::MAX;

    /// Wraps a raw value. Used when restoring ids from storage.
    pub const fn from_raw(value: u32) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    pub const fn raw(self) -> u32 {
        self.value
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::from_raw(Self::PLACEHOLDER)
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.value).finish()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.value)
    }
}

/// Hands out monotonically increasing ids for one entity kind.
///
/// Ids are never released or recycled.
pub struct IdGenerator<T> {
    next: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> IdGenerator<T> {
    pub const fn new() -> Self {
        Self {
            next: 0,
            _marker: PhantomData,
        }
    }

    /// Returns a fresh id.
    ///
    /// # Panics
    ///
    /// Panics once the 32-bit id space is exhausted.
    pub fn acquire(&mut self) -> Id<T> {
        assert!(
            self.next < Id::<T>::PLACEHOLDER,
            "entity id space exhausted"
        );
        let id = Id::from_raw(self.next);
        self.next += 1;
        id
    }

    /// The id the next call to [`acquire`](Self::acquire) returns.
    pub fn peek(&self) -> Id<T> {
        Id::from_raw(self.next)
    }
}

impl<T> Default for IdGenerator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for IdGenerator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator")
            .field("next", &self.next)
            .finish()
    }
}
