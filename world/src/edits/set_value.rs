//! Field edits on committed entities and on the edit context.

use std::fmt;
use std::mem;

use worldedit_core::abstract_editor::{Edit, EditFlags};

use crate::context::EditContext;
use crate::entities::{PathId, PathNode};
use crate::fields::Field;
use crate::id::Id;
use crate::world::{WorldEntity, expect_entity_mut};

/// Value types a field edit can carry.
pub trait FieldValue: Clone + fmt::Debug + Send + 'static {}

impl<T: Clone + fmt::Debug + Send + 'static> FieldValue for T {}

/// Sets one field of a committed entity.
#[derive(Debug)]
pub struct SetValue<E, T> {
    id: Id<E>,
    field: Field<E, T>,
    value: T,
    original_value: T,
    flags: EditFlags,
}

impl<E: WorldEntity, T: FieldValue> SetValue<E, T> {
    pub fn new(id: Id<E>, field: Field<E, T>, value: T, original_value: T) -> Self {
        Self {
            id,
            field,
            value,
            original_value,
            flags: EditFlags::default(),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn original_value(&self) -> &T {
        &self.original_value
    }

    fn write(&self, context: &mut EditContext, value: &T) {
        let entity = expect_entity_mut(&mut context.world, self.id);
        *self.field.get_mut(entity) = value.clone();
    }
}

impl<E: WorldEntity, T: FieldValue> Edit<EditContext> for SetValue<E, T> {
    fn apply(&mut self, context: &mut EditContext) {
        self.write(context, &self.value);
    }

    fn revert(&mut self, context: &mut EditContext) {
        self.write(context, &self.original_value);
    }

    fn is_coalescable(&self, other: &dyn Edit<EditContext>) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| other.id == self.id && other.field.same_as(&self.field))
    }

    fn coalesce(&mut self, other: &mut dyn Edit<EditContext>) {
        if let Some(other) = other.as_any_mut().downcast_mut::<Self>() {
            mem::swap(&mut self.value, &mut other.value);
        }
    }

    fn description(&self) -> &str {
        self.field.name()
    }

    fn flags(&self) -> &EditFlags {
        &self.flags
    }

    fn flags_mut(&mut self) -> &mut EditFlags {
        &mut self.flags
    }
}

/// Sets one element of a `Vec` field of a committed entity, such as a
/// sector point.
#[derive(Debug)]
pub struct SetIndexedValue<E, T> {
    id: Id<E>,
    field: Field<E, Vec<T>>,
    index: usize,
    value: T,
    original_value: T,
    flags: EditFlags,
}

impl<E: WorldEntity, T: FieldValue> SetIndexedValue<E, T> {
    pub fn new(id: Id<E>, field: Field<E, Vec<T>>, index: usize, value: T, original_value: T) -> Self {
        Self {
            id,
            field,
            index,
            value,
            original_value,
            flags: EditFlags::default(),
        }
    }

    fn write(&self, context: &mut EditContext, value: &T) {
        let entity = expect_entity_mut(&mut context.world, self.id);
        let elements = self.field.get_mut(entity);
        assert!(
            self.index < elements.len(),
            "{} index {} out of range for {} {}",
            self.field.name(),
            self.index,
            E::KIND,
            self.id
        );
        elements[self.index] = value.clone();
    }
}

impl<E: WorldEntity, T: FieldValue> Edit<EditContext> for SetIndexedValue<E, T> {
    fn apply(&mut self, context: &mut EditContext) {
        self.write(context, &self.value);
    }

    fn revert(&mut self, context: &mut EditContext) {
        self.write(context, &self.original_value);
    }

    fn is_coalescable(&self, other: &dyn Edit<EditContext>) -> bool {
        other.as_any().downcast_ref::<Self>().is_some_and(|other| {
            other.id == self.id && other.field.same_as(&self.field) && other.index == self.index
        })
    }

    fn coalesce(&mut self, other: &mut dyn Edit<EditContext>) {
        if let Some(other) = other.as_any_mut().downcast_mut::<Self>() {
            mem::swap(&mut self.value, &mut other.value);
        }
    }

    fn description(&self) -> &str {
        self.field.name()
    }

    fn flags(&self) -> &EditFlags {
        &self.flags
    }

    fn flags_mut(&mut self) -> &mut EditFlags {
        &mut self.flags
    }
}

/// Sets one field of a node of a committed path.
#[derive(Debug)]
pub struct SetPathNodeValue<T> {
    id: PathId,
    node_index: usize,
    field: Field<PathNode, T>,
    value: T,
    original_value: T,
    flags: EditFlags,
}

impl<T: FieldValue> SetPathNodeValue<T> {
    pub fn new(id: PathId, node_index: usize, field: Field<PathNode, T>, value: T, original_value: T) -> Self {
        Self {
            id,
            node_index,
            field,
            value,
            original_value,
            flags: EditFlags::default(),
        }
    }

    fn write(&self, context: &mut EditContext, value: &T) {
        let path = expect_entity_mut(&mut context.world, self.id);
        let Some(node) = path.nodes.get_mut(self.node_index) else {
            panic!("path {} has no node {}", self.id, self.node_index);
        };
        *self.field.get_mut(node) = value.clone();
    }
}

impl<T: FieldValue> Edit<EditContext> for SetPathNodeValue<T> {
    fn apply(&mut self, context: &mut EditContext) {
        self.write(context, &self.value);
    }

    fn revert(&mut self, context: &mut EditContext) {
        self.write(context, &self.original_value);
    }

    fn is_coalescable(&self, other: &dyn Edit<EditContext>) -> bool {
        other.as_any().downcast_ref::<Self>().is_some_and(|other| {
            other.id == self.id
                && other.node_index == self.node_index
                && other.field.same_as(&self.field)
        })
    }

    fn coalesce(&mut self, other: &mut dyn Edit<EditContext>) {
        if let Some(other) = other.as_any_mut().downcast_mut::<Self>() {
            mem::swap(&mut self.value, &mut other.value);
        }
    }

    fn description(&self) -> &str {
        self.field.name()
    }

    fn flags(&self) -> &EditFlags {
        &self.flags
    }

    fn flags_mut(&mut self) -> &mut EditFlags {
        &mut self.flags
    }
}

/// Sets a field of the edit context itself, such as
/// [`EditContext::euler_rotation`].
#[derive(Debug)]
pub struct SetContextValue<T> {
    field: Field<EditContext, T>,
    value: T,
    original_value: T,
    flags: EditFlags,
}

impl<T: FieldValue> SetContextValue<T> {
    pub fn new(field: Field<EditContext, T>, value: T, original_value: T) -> Self {
        Self {
            field,
            value,
            original_value,
            flags: EditFlags::default(),
        }
    }

    fn write(&self, context: &mut EditContext, value: &T) {
        debug_assert!(
            context.is_value_valid(self.field.get(context)),
            "{} does not live in the edit context",
            self.field.name()
        );
        *self.field.get_mut(context) = value.clone();
    }
}

impl<T: FieldValue> Edit<EditContext> for SetContextValue<T> {
    fn apply(&mut self, context: &mut EditContext) {
        self.write(context, &self.value);
    }

    fn revert(&mut self, context: &mut EditContext) {
        self.write(context, &self.original_value);
    }

    fn is_coalescable(&self, other: &dyn Edit<EditContext>) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| other.field.same_as(&self.field))
    }

    fn coalesce(&mut self, other: &mut dyn Edit<EditContext>) {
        if let Some(other) = other.as_any_mut().downcast_mut::<Self>() {
            mem::swap(&mut self.value, &mut other.value);
        }
    }

    fn description(&self) -> &str {
        self.field.name()
    }

    fn flags(&self) -> &EditFlags {
        &self.flags
    }

    fn flags_mut(&mut self) -> &mut EditFlags {
        &mut self.flags
    }
}
