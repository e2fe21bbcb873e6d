//! Address-stable, fixed-capacity storage.
//!
//! [`PinnedVec<T>`] reserves room for its maximum number of elements when it
//! is created and never reallocates afterwards. Growing the collection never
//! moves existing elements, so a pointer to an element stays valid until that
//! element is removed or shifted by a removal/insertion before it. Edits that
//! remember the address of a field rely on this.
//!
//! # Example
//!
//! ```
//! use worldedit_core::pinned::PinnedVec;
//!
//! let mut values = PinnedVec::new(4);
//! values.push(1);
//! let first: *const i32 = &values[0];
//!
//! values.push(2);
//! values.push(3);
//! assert_eq!(first, &values[0] as *const i32);
//! ```

use std::ops::{Deref, DerefMut, Range};

/// A vector with a fixed maximum size and stable element addresses.
///
/// Exceeding [`max_size`](Self::max_size) is a programming error and panics;
/// callers check [`is_full`](Self::is_full) before inserting.
#[derive(Debug)]
pub struct PinnedVec<T> {
    items: Vec<T>,
    max_size: usize,
}

impl<T> PinnedVec<T> {
    /// Creates an empty collection that can hold up to `max_size` elements.
    pub fn new(max_size: usize) -> Self {
        Self {
            items: Vec::with_capacity(max_size),
            max_size,
        }
    }

    /// Appends an element.
    ///
    /// # Panics
    ///
    /// Panics if the collection is full.
    pub fn push(&mut self, value: T) {
        assert!(!self.is_full(), "PinnedVec is full ({} elements)", self.max_size);
        self.items.push(value);
    }

    /// Inserts an element at `index`, shifting later elements back.
    ///
    /// # Panics
    ///
    /// Panics if the collection is full or `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        assert!(!self.is_full(), "PinnedVec is full ({} elements)", self.max_size);
        self.items.insert(index, value);
    }

    /// Removes and returns the element at `index`, shifting later elements
    /// forward.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        self.items.remove(index)
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.max_size
    }

    /// Byte range covered by the live elements.
    pub fn address_range(&self) -> Range<usize> {
        let begin = self.items.as_ptr() as usize;
        begin..begin + std::mem::size_of_val(self.items.as_slice())
    }
}

impl<T> Deref for PinnedVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> DerefMut for PinnedVec<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<'a, T> IntoIterator for &'a PinnedVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut PinnedVec<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter_mut()
    }
}
