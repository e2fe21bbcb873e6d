//! Edits on the creation slot.
//!
//! Placement tools stage an entity in [`EditContext::creation_entity`] and
//! tweak it with these edits before committing it to the world. A staged
//! object holds a reference to its class like a placed one does.

use std::mem;
use std::sync::Arc;

use worldedit_core::abstract_editor::{Edit, EditFlags};
use worldedit_core::math::{Quat, Vec3};

use crate::context::EditContext;
use crate::creation::CreationEntity;
use crate::entities::{Path, PathNode};
use crate::fields::Field;
use crate::object_class::ObjectClassLibrary;
use crate::world::WorldEntity;

use super::set_value::FieldValue;

/// Replaces the staged entity. Applying and reverting both swap the slot
/// with the edit's stored entity.
#[derive(Debug)]
pub struct SetCreationEntity {
    entity: CreationEntity,
    library: Arc<dyn ObjectClassLibrary>,
    flags: EditFlags,
}

impl SetCreationEntity {
    pub fn new(entity: CreationEntity, library: Arc<dyn ObjectClassLibrary>) -> Self {
        Self {
            entity,
            library,
            flags: EditFlags::default(),
        }
    }

    fn swap(&mut self, context: &mut EditContext) {
        mem::swap(&mut context.creation_entity, &mut self.entity);

        if let CreationEntity::Object(staged) = &mut context.creation_entity {
            staged.class_handle = self.library.acquire(&staged.class_name);
        }
        if let CreationEntity::Object(unstaged) = &mut self.entity {
            self.library.free(mem::take(&mut unstaged.class_handle));
        }
    }
}

impl Edit<EditContext> for SetCreationEntity {
    fn apply(&mut self, context: &mut EditContext) {
        self.swap(context);
    }

    fn revert(&mut self, context: &mut EditContext) {
        self.swap(context);
    }

    fn description(&self) -> &str {
        "Set creation entity"
    }

    fn flags(&self) -> &EditFlags {
        &self.flags
    }

    fn flags_mut(&mut self) -> &mut EditFlags {
        &mut self.flags
    }
}

/// Sets one field of the staged entity.
///
/// # Panics
///
/// Applying panics if the slot does not hold an `E`.
#[derive(Debug)]
pub struct SetCreationValue<E, T> {
    field: Field<E, T>,
    value: T,
    original_value: T,
    flags: EditFlags,
}

impl<E: WorldEntity, T: FieldValue> SetCreationValue<E, T> {
    pub fn new(field: Field<E, T>, value: T, original_value: T) -> Self {
        Self {
            field,
            value,
            original_value,
            flags: EditFlags::default(),
        }
    }

    fn write(&self, context: &mut EditContext, value: &T) {
        *self.field.get_mut(context.creation_entity.get_mut::<E>()) = value.clone();
    }
}

impl<E: WorldEntity, T: FieldValue> Edit<EditContext> for SetCreationValue<E, T> {
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

/// A rotation, position and working euler rotation set together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub rotation: Quat,
    pub position: Vec3,
    pub euler_rotation: Vec3,
}

/// Moves the staged entity, keeping [`EditContext::euler_rotation`] in step
/// with its rotation.
#[derive(Debug)]
pub struct SetCreationLocation<E> {
    rotation: Field<E, Quat>,
    position: Field<E, Vec3>,
    location: Location,
    original_location: Location,
    flags: EditFlags,
}

impl<E: WorldEntity> SetCreationLocation<E> {
    pub fn new(
        rotation: Field<E, Quat>,
        position: Field<E, Vec3>,
        location: Location,
        original_location: Location,
    ) -> Self {
        Self {
            rotation,
            position,
            location,
            original_location,
            flags: EditFlags::default(),
        }
    }

    fn write(&self, context: &mut EditContext, location: Location) {
        let staged = context.creation_entity.get_mut::<E>();
        *self.rotation.get_mut(staged) = location.rotation;
        *self.position.get_mut(staged) = location.position;
        context.euler_rotation = location.euler_rotation;
    }
}

impl<E: WorldEntity> Edit<EditContext> for SetCreationLocation<E> {
    fn apply(&mut self, context: &mut EditContext) {
        self.write(context, self.location);
    }

    fn revert(&mut self, context: &mut EditContext) {
        self.write(context, self.original_location);
    }

    fn is_coalescable(&self, other: &dyn Edit<EditContext>) -> bool {
        other.as_any().downcast_ref::<Self>().is_some_and(|other| {
            other.rotation.same_as(&self.rotation) && other.position.same_as(&self.position)
        })
    }

    fn coalesce(&mut self, other: &mut dyn Edit<EditContext>) {
        if let Some(other) = other.as_any_mut().downcast_mut::<Self>() {
            self.location = other.location;
        }
    }

    fn description(&self) -> &str {
        "location"
    }

    fn flags(&self) -> &EditFlags {
        &self.flags
    }

    fn flags_mut(&mut self) -> &mut EditFlags {
        &mut self.flags
    }
}

/// Moves one node of a staged path.
#[derive(Debug)]
pub struct SetCreationPathNodeLocation {
    node_index: usize,
    location: Location,
    original_location: Location,
    flags: EditFlags,
}

impl SetCreationPathNodeLocation {
    pub fn new(node_index: usize, location: Location, original_location: Location) -> Self {
        Self {
            node_index,
            location,
            original_location,
            flags: EditFlags::default(),
        }
    }

    fn write(&self, context: &mut EditContext, location: Location) {
        let path = context.creation_entity.get_mut::<Path>();
        let Some(node) = path.nodes.get_mut(self.node_index) else {
            panic!("staged path has no node {}", self.node_index);
        };
        *node = PathNode {
            rotation: location.rotation,
            position: location.position,
        };
        context.euler_rotation = location.euler_rotation;
    }
}

impl Edit<EditContext> for SetCreationPathNodeLocation {
    fn apply(&mut self, context: &mut EditContext) {
        self.write(context, self.location);
    }

    fn revert(&mut self, context: &mut EditContext) {
        self.write(context, self.original_location);
    }

    fn is_coalescable(&self, other: &dyn Edit<EditContext>) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| other.node_index == self.node_index)
    }

    fn coalesce(&mut self, other: &mut dyn Edit<EditContext>) {
        if let Some(other) = other.as_any_mut().downcast_mut::<Self>() {
            self.location = other.location;
        }
    }

    fn description(&self) -> &str {
        "node location"
    }

    fn flags(&self) -> &EditFlags {
        &self.flags
    }

    fn flags_mut(&mut self) -> &mut EditFlags {
        &mut self.flags
    }
}
