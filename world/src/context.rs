//! The target every world edit runs against.

use std::mem;
use std::ops::Range;

use worldedit_core::abstract_editor::Editable;
use worldedit_core::math::Vec3;

use crate::creation::CreationEntity;
use crate::world::World;

/// The world, the creation slot and the auxiliary fields interactive
/// placement works with.
///
/// Keep the context behind a stable allocation (a `Box` owned by the
/// session) while edits referring to it are alive.
#[derive(Debug, Default)]
pub struct EditContext {
    pub world: World,
    pub creation_entity: CreationEntity,
    /// Working euler rotation of the staged entity, in radians.
    pub euler_rotation: Vec3,
    /// Working euler rotation of a staged light's region, in radians.
    pub light_region_euler_rotation: Vec3,
}

impl Editable for EditContext {}

impl EditContext {
    pub fn new(world: World) -> Self {
        Self {
            world,
            creation_entity: CreationEntity::None,
            euler_rotation: Vec3::zeros(),
            light_region_euler_rotation: Vec3::zeros(),
        }
    }

    /// Whether `size` bytes at `ptr` lie entirely inside one region whose
    /// address is stable for the lifetime of the context: the world value,
    /// the creation slot, either euler rotation field, or the live elements
    /// of an entity collection.
    pub fn is_memory_valid(&self, ptr: *const u8, size: usize) -> bool {
        let begin = ptr as usize;
        let end = begin + size;

        let fixed = [
            object_range(&self.world),
            object_range(&self.creation_entity),
            object_range(&self.euler_rotation),
            object_range(&self.light_region_euler_rotation),
        ];

        fixed
            .into_iter()
            .chain(self.world.collection_address_ranges())
            .any(|range| begin >= range.start && begin < range.end && end <= range.end)
    }

    /// [`is_memory_valid`](Self::is_memory_valid) for a typed reference.
    pub fn is_value_valid<T>(&self, value: &T) -> bool {
        self.is_memory_valid(value as *const T as *const u8, mem::size_of::<T>())
    }
}

fn object_range<T>(value: &T) -> Range<usize> {
    let begin = value as *const T as usize;
    begin..begin + mem::size_of::<T>()
}
