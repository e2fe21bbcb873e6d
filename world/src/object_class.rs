//! Reference-counted object-class handles.
//!
//! Objects refer to a shared class definition by name. The editor keeps one
//! library entry per class name alive for as long as any placed or staged
//! object refers to it. Insert, delete and creation edits call
//! [`ObjectClassLibrary::acquire`] and [`ObjectClassLibrary::free`] to keep
//! the counts balanced across undo and redo.

use std::collections::HashMap;
use std::fmt;

use parking_lot::Mutex;

const INDEX_BITS: u32 = 15;
const GENERATION_BITS: u32 = 32 - INDEX_BITS;
const INDEX_MASK: u32 = (1 << INDEX_BITS) - 1;
const GENERATION_MASK: u32 = (1 << GENERATION_BITS) - 1;

/// Maximum number of distinct classes alive at once, including the null
/// entry.
pub const MAX_OBJECT_CLASSES: usize = 1 << INDEX_BITS;

/// Handle to a library entry: a 15-bit slot index and a 17-bit generation.
///
/// [`ObjectClassHandle::NULL`] refers to the placeholder class at slot 0
/// and is returned for empty class names.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ObjectClassHandle(u32);

impl ObjectClassHandle {
    pub const NULL: Self = Self(0);

    fn pack(index: u32, generation: u32) -> Self {
        Self((index & INDEX_MASK) | ((generation & GENERATION_MASK) << INDEX_BITS))
    }

    pub fn index(self) -> u32 {
        self.0 & INDEX_MASK
    }

    pub fn generation(self) -> u32 {
        self.0 >> INDEX_BITS
    }

    pub fn is_null(self) -> bool {
        self == Self::NULL
    }
}

impl fmt::Debug for ObjectClassHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectClassHandle")
            .field("index", &self.index())
            .field("generation", &self.generation())
            .finish()
    }
}

/// Reference counting of object classes by name.
pub trait ObjectClassLibrary: Send + Sync + fmt::Debug {
    /// Takes a reference to the class named `name`, loading it on first use.
    fn acquire(&self, name: &str) -> ObjectClassHandle;

    /// Releases a reference taken by [`acquire`](Self::acquire).
    fn free(&self, handle: ObjectClassHandle);
}

/// In-process [`ObjectClassLibrary`] keeping entries in a slot pool with a
/// free list. Class names are matched case-insensitively.
#[derive(Debug, Default)]
pub struct RefCountedClassLibrary {
    pool: Mutex<ClassPool>,
}

#[derive(Debug)]
struct ClassPool {
    entries: Vec<ClassEntry>,
    index: HashMap<String, u32>,
    free_list: Vec<ObjectClassHandle>,
}

#[derive(Debug)]
struct ClassEntry {
    handle: ObjectClassHandle,
    name: String,
    ref_count: u32,
}

impl Default for ClassPool {
    fn default() -> Self {
        Self {
            entries: vec![ClassEntry {
                handle: ObjectClassHandle::NULL,
                name: String::new(),
                ref_count: 0,
            }],
            index: HashMap::new(),
            free_list: Vec::new(),
        }
    }
}

impl RefCountedClassLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current reference count of a class, 0 if it is not loaded.
    pub fn ref_count(&self, name: &str) -> u32 {
        let pool = self.pool.lock();
        pool.index
            .get(&name.to_ascii_lowercase())
            .map_or(0, |&index| pool.entries[index as usize].ref_count)
    }

    /// Name of the class a handle refers to. Stale handles resolve to `None`.
    pub fn class_name(&self, handle: ObjectClassHandle) -> Option<String> {
        let pool = self.pool.lock();
        pool.entries
            .get(handle.index() as usize)
            .filter(|entry| !handle.is_null() && entry.handle == handle)
            .map(|entry| entry.name.clone())
    }

    /// Number of classes currently referenced.
    pub fn loaded_count(&self) -> usize {
        self.pool.lock().index.len()
    }

    /// Drops every entry. Outstanding handles become stale.
    pub fn clear(&self) {
        *self.pool.lock() = ClassPool::default();
    }
}

impl ObjectClassLibrary for RefCountedClassLibrary {
    fn acquire(&self, name: &str) -> ObjectClassHandle {
        if name.is_empty() {
            return ObjectClassHandle::NULL;
        }

        let name = name.to_ascii_lowercase();
        let mut pool = self.pool.lock();

        if let Some(&index) = pool.index.get(&name) {
            let entry = &mut pool.entries[index as usize];
            if entry.ref_count == u32::MAX {
                log::warn!("reference count of object class '{name}' overflowed");
                return ObjectClassHandle::NULL;
            }
            entry.ref_count += 1;
            return entry.handle;
        }

        let handle = if let Some(freed) = pool.free_list.pop() {
            let handle = ObjectClassHandle::pack(freed.index(), freed.generation() + 1);
            pool.entries[handle.index() as usize] = ClassEntry {
                handle,
                name: name.clone(),
                ref_count: 1,
            };
            handle
        } else {
            if pool.entries.len() == MAX_OBJECT_CLASSES {
                log::warn!("object class library is full, '{name}' not loaded");
                return ObjectClassHandle::NULL;
            }
            let handle = ObjectClassHandle::pack(pool.entries.len() as u32, 0);
            pool.entries.push(ClassEntry {
                handle,
                name: name.clone(),
                ref_count: 1,
            });
            handle
        };

        log::debug!("loaded object class '{name}' as {handle:?}");
        pool.index.insert(name, handle.index());
        handle
    }

    fn free(&self, handle: ObjectClassHandle) {
        if handle.index() == 0 {
            return;
        }

        let mut pool = self.pool.lock();

        let Some(entry) = pool.entries.get_mut(handle.index() as usize) else {
            panic!("{handle:?} was never handed out by this library");
        };

        if entry.handle != handle {
            log::warn!("ignoring free of stale {handle:?}");
            return;
        }
        if entry.ref_count == 0 {
            log::warn!("ignoring double free of {handle:?}");
            return;
        }

        entry.ref_count -= 1;
        if entry.ref_count > 0 {
            return;
        }

        let name = std::mem::take(&mut entry.name);
        entry.handle = ObjectClassHandle::NULL;
        pool.index.remove(&name);
        pool.free_list.push(handle);
        log::debug!("unloaded object class '{name}'");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_null() {
        let library = RefCountedClassLibrary::new();
        assert!(library.acquire("").is_null());
        library.free(ObjectClassHandle::NULL);
        assert_eq!(library.loaded_count(), 0);
    }

    #[test]
    fn acquire_counts_references() {
        let library = RefCountedClassLibrary::new();
        let a = library.acquire("com_bldg_tower");
        let b = library.acquire("COM_BLDG_TOWER");
        assert_eq!(a, b);
        assert!(!a.is_null());
        assert_eq!(library.ref_count("com_bldg_tower"), 2);

        library.free(a);
        assert_eq!(library.ref_count("com_bldg_tower"), 1);
        library.free(b);
        assert_eq!(library.ref_count("com_bldg_tower"), 0);
        assert_eq!(library.loaded_count(), 0);
    }

    #[test]
    fn freed_slots_are_reused_with_new_generation() {
        let library = RefCountedClassLibrary::new();
        let first = library.acquire("tree");
        library.free(first);

        let second = library.acquire("rock");
        assert_eq!(second.index(), first.index());
        assert_eq!(second.generation(), first.generation() + 1);
        assert_eq!(library.class_name(second).as_deref(), Some("rock"));
        assert_eq!(library.class_name(first), None);
    }

    #[test]
    fn stale_free_is_ignored() {
        let library = RefCountedClassLibrary::new();
        let first = library.acquire("tree");
        library.free(first);
        let second = library.acquire("rock");

        library.free(first);
        assert_eq!(library.ref_count("rock"), 1);
        library.free(second);
        assert_eq!(library.ref_count("rock"), 0);
    }

    #[test]
    fn double_free_is_ignored() {
        let library = RefCountedClassLibrary::new();
        let handle = library.acquire("tree");
        library.free(handle);
        library.free(handle);
        assert_eq!(library.ref_count("tree"), 0);
    }

    #[test]
    fn handle_packing() {
        let handle = ObjectClassHandle::pack(5, 3);
        assert_eq!(handle.index(), 5);
        assert_eq!(handle.generation(), 3);

        let wrapped = ObjectClassHandle::pack(1, GENERATION_MASK + 1);
        assert_eq!(wrapped.generation(), 0);
    }

    #[test]
    fn clear_resets_pool() {
        let library = RefCountedClassLibrary::new();
        library.acquire("tree");
        library.clear();
        assert_eq!(library.loaded_count(), 0);
        assert_eq!(library.ref_count("tree"), 0);
    }
}
