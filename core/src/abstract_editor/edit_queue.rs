//! Thread-safe queue for handing edits to the thread that owns the stack.
//!
//! [`EditQueue`] uses interior mutability ([`Mutex`]) so that code holding
//! only a shared reference (a background worker, a tool callback) can still
//! submit edits. The editor drains the queue between frames and applies the
//! edits through [`EditStack`](super::EditStack).

use std::fmt;

use parking_lot::Mutex;

use super::edit::{Edit, Editable};

/// A thread-safe queue of pending [`Edit`]s.
///
/// [`push()`](Self::push) only requires `&self`, so the queue can be shared
/// behind an `Arc` with any number of producers.
pub struct EditQueue<T: Editable> {
    queue: Mutex<Vec<Box<dyn Edit<T>>>>,
}

impl<T: Editable> EditQueue<T> {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(Vec::new()),
        }
    }

    /// Enqueues an edit.
    pub fn push(&self, edit: Box<dyn Edit<T>>) {
        self.queue.lock().push(edit);
    }

    /// Drains all queued edits, returning them in submission order.
    pub fn drain(&self) -> Vec<Box<dyn Edit<T>>> {
        std::mem::take(&mut *self.queue.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }
}

impl<T: Editable> Default for EditQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Editable> fmt::Debug for EditQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditQueue")
            .field("pending", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::abstract_editor::edit::EditFlags;

    struct Counter {
        value: i32,
    }
    impl Editable for Counter {}

    #[derive(Debug)]
    struct Add {
        amount: i32,
        flags: EditFlags,
    }

    fn add(amount: i32) -> Box<dyn Edit<Counter>> {
        Box::new(Add {
            amount,
            flags: EditFlags::default(),
        })
    }

    impl Edit<Counter> for Add {
        fn apply(&mut self, target: &mut Counter) {
            target.value += self.amount;
        }

        fn revert(&mut self, target: &mut Counter) {
            target.value -= self.amount;
        }

        fn description(&self) -> &str {
            "Add"
        }

        fn flags(&self) -> &EditFlags {
            &self.flags
        }

        fn flags_mut(&mut self) -> &mut EditFlags {
            &mut self.flags
        }
    }

    #[test]
    fn push_and_drain() {
        let queue = EditQueue::<Counter>::new();
        queue.push(add(1));
        queue.push(add(2));

        let edits = queue.drain();
        assert_eq!(edits.len(), 2);
        assert_eq!(edits[0].description(), "Add");
        assert!(queue.is_empty());
    }

    #[test]
    fn preserves_submission_order() {
        let queue = EditQueue::<Counter>::new();
        queue.push(add(10));
        queue.push(add(20));
        queue.push(add(30));

        let mut counter = Counter { value: 0 };
        for mut edit in queue.drain() {
            edit.apply(&mut counter);
        }
        assert_eq!(counter.value, 60);
    }

    #[test]
    fn push_from_other_threads() {
        let queue = Arc::new(EditQueue::<Counter>::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let queue = Arc::clone(&queue);
                std::thread::spawn(move || queue.push(add(i)))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(queue.len(), 4);
    }

    #[test]
    fn debug_impl() {
        let queue = EditQueue::<Counter>::new();
        queue.push(add(1));
        let debug = format!("{queue:?}");
        assert!(debug.contains("EditQueue"));
        assert!(debug.contains("pending"));
    }
}
