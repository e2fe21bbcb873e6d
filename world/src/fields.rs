//! Named field accessors.
//!
//! A [`Field<E, T>`] names one field of type `T` inside an entity of type
//! `E` and knows how to reach it. Edits store an entity id together with a
//! field descriptor instead of a reference to the field, and resolve the
//! field through the entity's pinned collection when they run. Two
//! descriptors are the same field if their names match.
//!
//! ```ignore
//! let position = field!(Object, position: Vec3);
//! *position.get_mut(&mut object) = Vec3::new(1.0, 0.0, 0.0);
//! ```

use std::fmt;

/// Accessor pair for a field of type `T` inside `E`.
pub struct Field<E, T> {
    name: &'static str,
    get: fn(&E) -> &T,
    get_mut: fn(&mut E) -> &mut T,
}

impl<E, T> Field<E, T> {
    pub const fn new(name: &'static str, get: fn(&E) -> &T, get_mut: fn(&mut E) -> &mut T) -> Self {
        Self { name, get, get_mut }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get<'a>(&self, entity: &'a E) -> &'a T {
        (self.get)(entity)
    }

    pub fn get_mut<'a>(&self, entity: &'a mut E) -> &'a mut T {
        (self.get_mut)(entity)
    }

    /// Whether both descriptors address the same field.
    pub fn same_as(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<E, T> Clone for Field<E, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, T> Copy for Field<E, T> {}

impl<E, T> fmt::Debug for Field<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Field").field(&self.name).finish()
    }
}

/// Builds a [`Field`] for a named struct field.
///
/// `field!(Object, position: Vec3)` expands to a descriptor named
/// `"position"` reading and writing `object.position`.
#[macro_export]
macro_rules! field {
    ($entity:ty, $field:ident : $ty:ty) => {{
        fn get(entity: &$entity) -> &$ty {
            &entity.$field
        }

        fn get_mut(entity: &mut $entity) -> &mut $ty {
            &mut entity.$field
        }

        $crate::fields::Field::<$entity, $ty>::new(stringify!($field), get, get_mut)
    }};
}

#[cfg(test)]
mod tests {
    use worldedit_core::math::Vec3;

    use crate::entities::Object;

    #[test]
    fn get_and_set_through_descriptor() {
        let position = field!(Object, position: Vec3);
        let mut object = Object::default();

        *position.get_mut(&mut object) = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(object.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(*position.get(&object), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(position.name(), "position");
    }

    #[test]
    fn same_field_by_name() {
        let a = field!(Object, name: String);
        let b = field!(Object, name: String);
        let c = field!(Object, class_name: String);
        assert!(a.same_as(&b));
        assert!(!a.same_as(&c));
    }

    #[test]
    fn descriptors_are_const() {
        const HIDDEN: crate::fields::Field<Object, bool> = field!(Object, hidden: bool);
        let mut object = Object::default();
        *HIDDEN.get_mut(&mut object) = true;
        assert!(object.hidden);
    }
}
