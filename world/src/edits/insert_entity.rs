//! Inserting entities into the world.

use std::sync::Arc;

use worldedit_core::abstract_editor::{Edit, EditFlags};

use crate::context::EditContext;
use crate::creation::CreationEntity;
use crate::entities::Object;
use crate::object_class::ObjectClassLibrary;
use crate::world::WorldEntity;

/// Appends an entity to its collection.
///
/// The entity's id must have been acquired from the world before the edit
/// is built. Reverting pops the entity again.
#[derive(Debug)]
pub struct InsertEntity<E> {
    entity: E,
    description: String,
    flags: EditFlags,
}

impl<E: WorldEntity> InsertEntity<E> {
    pub fn new(entity: E) -> Self {
        Self {
            entity,
            description: format!("Insert {}", E::KIND),
            flags: EditFlags::default(),
        }
    }
}

impl<E: WorldEntity> Edit<EditContext> for InsertEntity<E> {
    fn apply(&mut self, context: &mut EditContext) {
        E::collection_mut(&mut context.world).push(self.entity.clone());
    }

    fn revert(&mut self, context: &mut EditContext) {
        let removed = E::collection_mut(&mut context.world).pop();
        assert!(
            removed.as_ref().is_some_and(|removed| removed.id() == self.entity.id()),
            "{} {} is not the last inserted entity",
            E::KIND,
            self.entity.id()
        );
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn flags(&self) -> &EditFlags {
        &self.flags
    }

    fn flags_mut(&mut self) -> &mut EditFlags {
        &mut self.flags
    }
}

/// Appends an object and takes a reference to its class.
#[derive(Debug)]
pub struct InsertObject {
    object: Object,
    library: Arc<dyn ObjectClassLibrary>,
    flags: EditFlags,
}

impl InsertObject {
    pub fn new(object: Object, library: Arc<dyn ObjectClassLibrary>) -> Self {
        Self {
            object,
            library,
            flags: EditFlags::default(),
        }
    }
}

impl Edit<EditContext> for InsertObject {
    fn apply(&mut self, context: &mut EditContext) {
        let mut object = self.object.clone();
        object.class_handle = self.library.acquire(&object.class_name);
        context.world.objects.push(object);
    }

    fn revert(&mut self, context: &mut EditContext) {
        match context.world.objects.pop() {
            Some(removed) if removed.id == self.object.id => self.library.free(removed.class_handle),
            _ => panic!("object {} is not the last inserted entity", self.object.id),
        }
    }

    fn description(&self) -> &str {
        "Insert object"
    }

    fn flags(&self) -> &EditFlags {
        &self.flags
    }

    fn flags_mut(&mut self) -> &mut EditFlags {
        &mut self.flags
    }
}

/// Builds the insert edit for an entity of any kind. Objects get an
/// [`InsertObject`] so their class stays referenced while they exist.
///
/// Returns `None` for an empty slot.
pub fn make_insert_entity(
    entity: CreationEntity,
    library: &Arc<dyn ObjectClassLibrary>,
) -> Option<Box<dyn Edit<EditContext>>> {
    Some(match entity {
        CreationEntity::None => return None,
        CreationEntity::Object(object) => Box::new(InsertObject::new(object, Arc::clone(library))),
        CreationEntity::Light(light) => Box::new(InsertEntity::new(light)),
        CreationEntity::Path(path) => Box::new(InsertEntity::new(path)),
        CreationEntity::Region(region) => Box::new(InsertEntity::new(region)),
        CreationEntity::Sector(sector) => Box::new(InsertEntity::new(sector)),
        CreationEntity::Portal(portal) => Box::new(InsertEntity::new(portal)),
        CreationEntity::Hintnode(hintnode) => Box::new(InsertEntity::new(hintnode)),
        CreationEntity::Barrier(barrier) => Box::new(InsertEntity::new(barrier)),
        CreationEntity::PlanningHub(hub) => Box::new(InsertEntity::new(hub)),
        CreationEntity::PlanningConnection(connection) => Box::new(InsertEntity::new(connection)),
        CreationEntity::Boundary(boundary) => Box::new(InsertEntity::new(boundary)),
        CreationEntity::Measurement(measurement) => Box::new(InsertEntity::new(measurement)),
        CreationEntity::Block(block) => Box::new(InsertEntity::new(block)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Light, Region};
    use crate::object_class::RefCountedClassLibrary;
    use crate::world::{World, WorldLimits};

    fn context() -> EditContext {
        EditContext::new(World::new(WorldLimits { max_entities: 4 }))
    }

    #[test]
    fn insert_and_revert() {
        let mut context = context();
        let id = context.world.acquire_id::<Light>();
        let mut edit = InsertEntity::new(Light {
            name: "sun".into(),
            id,
            ..Default::default()
        });

        edit.apply(&mut context);
        assert_eq!(context.world.lights.len(), 1);
        assert_eq!(context.world.lights[0].name, "sun");
        assert_eq!(edit.description(), "Insert light");

        edit.revert(&mut context);
        assert!(context.world.lights.is_empty());
    }

    #[test]
    #[should_panic(expected = "region #0 is not the last inserted entity")]
    fn revert_after_foreign_push_panics() {
        let mut context = context();
        let first = context.world.acquire_id::<Region>();
        let second = context.world.acquire_id::<Region>();
        let mut edit = InsertEntity::new(Region {
            id: first,
            ..Default::default()
        });
        edit.apply(&mut context);
        context.world.regions.push(Region {
            id: second,
            ..Default::default()
        });
        edit.revert(&mut context);
    }

    #[test]
    fn insert_object_references_class() {
        let library = Arc::new(RefCountedClassLibrary::new());
        let shared: Arc<dyn ObjectClassLibrary> = library.clone();
        let mut context = context();
        let id = context.world.acquire_id::<Object>();

        let mut edit = make_insert_entity(
            Object {
                class_name: "com_bldg_tower".into(),
                id,
                ..Default::default()
            }
            .into(),
            &shared,
        )
        .unwrap();

        edit.apply(&mut context);
        assert_eq!(library.ref_count("com_bldg_tower"), 1);
        assert!(!context.world.objects[0].class_handle.is_null());

        edit.revert(&mut context);
        assert_eq!(library.ref_count("com_bldg_tower"), 0);
        assert!(context.world.objects.is_empty());

        edit.apply(&mut context);
        assert_eq!(library.ref_count("com_bldg_tower"), 1);
    }

    #[test]
    fn empty_slot_builds_nothing() {
        let library: Arc<dyn ObjectClassLibrary> = Arc::new(RefCountedClassLibrary::new());
        assert!(make_insert_entity(CreationEntity::None, &library).is_none());
    }
}
