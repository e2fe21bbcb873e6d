//! The editor's command surface over one world.
//!
//! An [`EditorSession`] owns the edit context, the hovered and selected
//! targets, the edit stack and the object-class library. UI code and tools
//! call into it; background workers hand it edits through
//! [`EditorSession::edit_queue`].

use std::sync::Arc;

use worldedit_core::abstract_editor::{ApplyFlags, Edit, EditQueue, EditStack};
use worldedit_world::edits::{
    SetCreationEntity, SetCreationValue, SetValue, make_delete_entity, make_insert_entity,
};
use worldedit_world::entities::*;
use worldedit_world::{
    CreationEntity, EditContext, Field, Id, InteractionTargets, ObjectClassLibrary,
    RefCountedClassLibrary, Selection, World, WorldEntity, find_entity, unique_name,
};

use crate::error::{EditorError, EditorResult};
use crate::settings::EditorSettings;

pub struct EditorSession {
    context: Box<EditContext>,
    targets: InteractionTargets,
    stack: EditStack<EditContext>,
    library: Arc<dyn ObjectClassLibrary>,
    queue: Arc<EditQueue<EditContext>>,
}

impl EditorSession {
    /// Creates a session over an empty world with an in-process class
    /// library.
    pub fn new(settings: &EditorSettings) -> Self {
        Self::with_library(settings, Arc::new(RefCountedClassLibrary::new()))
    }

    pub fn with_library(settings: &EditorSettings, library: Arc<dyn ObjectClassLibrary>) -> Self {
        log::info!(
            "Starting editor session (history reserve {}, {} entities per kind)",
            settings.history.reserve,
            settings.world.max_entities
        );

        Self {
            context: Box::new(EditContext::new(World::new(settings.world_limits()))),
            targets: InteractionTargets::default(),
            stack: EditStack::with_reserve(settings.history.reserve),
            library,
            queue: Arc::new(EditQueue::new()),
        }
    }

    pub fn context(&self) -> &EditContext {
        &self.context
    }

    pub fn world(&self) -> &World {
        &self.context.world
    }

    pub fn creation_entity(&self) -> &CreationEntity {
        &self.context.creation_entity
    }

    pub fn targets(&self) -> &InteractionTargets {
        &self.targets
    }

    pub fn targets_mut(&mut self) -> &mut InteractionTargets {
        &mut self.targets
    }

    pub fn selection(&self) -> &Selection {
        &self.targets.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.targets.selection
    }

    pub fn stack(&self) -> &EditStack<EditContext> {
        &self.stack
    }

    pub fn library(&self) -> &Arc<dyn ObjectClassLibrary> {
        &self.library
    }

    /// Handle for submitting edits from other threads. Queued edits are
    /// applied by [`process_queued_edits`](Self::process_queued_edits).
    pub fn edit_queue(&self) -> Arc<EditQueue<EditContext>> {
        Arc::clone(&self.queue)
    }

    // --- History ---

    pub fn apply_edit(&mut self, edit: Box<dyn Edit<EditContext>>, flags: ApplyFlags) {
        self.stack.apply(edit, &mut self.context, flags);
    }

    pub fn can_undo(&self) -> bool {
        !self.stack.applied_is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.stack.reverted_is_empty()
    }

    pub fn undo(&mut self) {
        self.stack.revert(1, &mut self.context);
        self.targets.prune(&self.context.world);
    }

    pub fn redo(&mut self) {
        self.stack.reapply(1, &mut self.context);
        self.targets.prune(&self.context.world);
    }

    pub fn undo_all(&mut self) {
        self.stack.revert_all(&mut self.context);
        self.targets.prune(&self.context.world);
    }

    pub fn redo_all(&mut self) {
        self.stack.reapply_all(&mut self.context);
        self.targets.prune(&self.context.world);
    }

    /// Ends the current interaction: the next edit starts a new undo step
    /// even if it would coalesce with the last one.
    pub fn close_last(&mut self) {
        self.stack.close_last();
    }

    pub fn mark_saved(&mut self) {
        self.stack.mark_saved();
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.stack.has_unsaved_changes()
    }

    /// Applies every edit queued from other threads, in submission order.
    /// Returns the number applied.
    pub fn process_queued_edits(&mut self) -> usize {
        let edits = self.queue.drain();
        let count = edits.len();
        for edit in edits {
            self.stack.apply(edit, &mut self.context, ApplyFlags::default());
        }
        if count > 0 {
            log::debug!("applied {count} queued edits");
        }
        count
    }

    // --- World edits ---

    /// Inserts a new entity under a freshly acquired id and returns the id.
    ///
    /// The entity's name is made unique within its kind.
    pub fn insert_entity<E: WorldEntity>(&mut self, mut entity: E) -> EditorResult<Id<E>> {
        let world = &mut self.context.world;
        if world.is_full::<E>() {
            return Err(EditorError::CapacityExceeded {
                kind: E::KIND,
                max: world.limits().max_entities,
            });
        }

        let id = world.acquire_id::<E>();
        entity.set_id(id);
        if let Some(name) = entity.name_mut() {
            let unique = unique_name(world.entities::<E>(), name);
            *name = unique;
        }

        if let Some(edit) = make_insert_entity(entity.into_creation(), &self.library) {
            self.apply_edit(edit, ApplyFlags::closed());
        }
        log::debug!("inserted {} {id}", E::KIND);
        Ok(id)
    }

    /// Sets a field of a committed entity. Consecutive calls for the same
    /// entity and field coalesce into one undo step until
    /// [`close_last`](Self::close_last).
    pub fn set_value<E, T>(&mut self, id: Id<E>, field: Field<E, T>, value: T) -> EditorResult
    where
        E: WorldEntity,
        T: Clone + std::fmt::Debug + Send + 'static,
    {
        let Some(entity) = find_entity(&self.context.world, id) else {
            return Err(EditorError::EntityNotFound {
                kind: E::KIND,
                id: id.raw(),
            });
        };
        let original = field.get(entity).clone();

        self.apply_edit(
            Box::new(SetValue::new(id, field, value, original)),
            ApplyFlags::default(),
        );
        Ok(())
    }

    /// Deletes every selected target as one undo step and clears the
    /// selection. Returns the number of deletes applied.
    pub fn delete_selected(&mut self) -> usize {
        let targets: Vec<_> = self.targets.selection.iter().cloned().collect();
        let mut deleted = 0;

        for target in &targets {
            let Some(edit) = make_delete_entity(target, &self.context.world, &self.library) else {
                continue;
            };
            let flags = ApplyFlags {
                closed: true,
                transparent: deleted > 0,
            };
            self.apply_edit(edit, flags);
            deleted += 1;
        }

        self.targets.selection.clear();
        self.targets.prune(&self.context.world);
        log::debug!("deleted {deleted} of {} selected targets", targets.len());
        deleted
    }

    // --- Creation ---

    /// Stages an entity for placement, replacing anything already staged.
    pub fn start_creation(&mut self, entity: impl Into<CreationEntity>) {
        let edit = SetCreationEntity::new(entity.into(), Arc::clone(&self.library));
        self.apply_edit(Box::new(edit), ApplyFlags::closed());
    }

    /// Sets a field of the staged entity. Coalesces like
    /// [`set_value`](Self::set_value).
    pub fn set_creation_value<E, T>(&mut self, field: Field<E, T>, value: T) -> EditorResult
    where
        E: WorldEntity,
        T: Clone + std::fmt::Debug + Send + 'static,
    {
        let Some(staged) = self.context.creation_entity.try_get::<E>() else {
            return Err(EditorError::NothingStaged);
        };
        let original = field.get(staged).clone();

        self.apply_edit(
            Box::new(SetCreationValue::new(field, value, original)),
            ApplyFlags::default(),
        );
        Ok(())
    }

    /// Inserts a copy of the staged entity into the world.
    ///
    /// The staged entity stays in place for the next placement and is
    /// renamed so its name stays unique. Both edits form one undo step.
    pub fn commit_creation(&mut self) -> EditorResult<CreationEntity> {
        let Some(kind) = self.context.creation_entity.kind() else {
            return Err(EditorError::NothingStaged);
        };

        match kind {
            EntityKind::Object => self.commit::<Object>(),
            EntityKind::Light => self.commit::<Light>(),
            EntityKind::Path => {
                if self.context.creation_entity.get::<Path>().nodes.is_empty() {
                    return Err(EditorError::EmptyCreationPath);
                }
                self.commit::<Path>()
            }
            EntityKind::Region => self.commit::<Region>(),
            EntityKind::Sector => self.commit::<Sector>(),
            EntityKind::Portal => self.commit::<Portal>(),
            EntityKind::Hintnode => self.commit::<Hintnode>(),
            EntityKind::Barrier => self.commit::<Barrier>(),
            EntityKind::PlanningHub => self.commit::<PlanningHub>(),
            EntityKind::PlanningConnection => self.commit::<PlanningConnection>(),
            EntityKind::Boundary => self.commit::<Boundary>(),
            EntityKind::Measurement => self.commit::<Measurement>(),
            EntityKind::Block => self.commit::<Block>(),
        }
    }

    fn commit<E: WorldEntity>(&mut self) -> EditorResult<CreationEntity> {
        let staged = self.context.creation_entity.get::<E>().clone();
        let id = self.insert_entity(staged)?;

        let Some(committed) = find_entity(&self.context.world, id).cloned() else {
            return Err(EditorError::EntityNotFound {
                kind: E::KIND,
                id: id.raw(),
            });
        };

        if let (Some(field), Some(name)) = (E::name_field(), committed.name()) {
            let next_name = unique_name(self.context.world.entities::<E>(), name);
            let current = self.context.creation_entity.get::<E>();
            let original = field.get(current).clone();
            self.apply_edit(
                Box::new(SetCreationValue::new(field, next_name, original)),
                ApplyFlags {
                    closed: true,
                    transparent: true,
                },
            );
        }

        Ok(committed.into_creation())
    }

    /// Discards the staged entity.
    pub fn cancel_creation(&mut self) -> EditorResult {
        if !self.context.creation_entity.holds_entity() {
            return Err(EditorError::NothingStaged);
        }
        let edit = SetCreationEntity::new(CreationEntity::None, Arc::clone(&self.library));
        self.apply_edit(Box::new(edit), ApplyFlags::closed());
        Ok(())
    }

    // --- Lifecycle ---

    /// Replaces the world, dropping all history and targets.
    ///
    /// Class references held by the old world and the creation slot are
    /// released and the new world's objects acquire theirs.
    pub fn reset_world(&mut self, mut world: World) {
        for object in self.context.world.objects.iter() {
            self.library.free(object.class_handle);
        }
        if let Some(staged) = self.context.creation_entity.try_get::<Object>() {
            self.library.free(staged.class_handle);
        }

        for object in world.objects.iter_mut() {
            object.class_handle = self.library.acquire(&object.class_name);
        }

        log::info!(
            "Loaded world '{}' ({} entities)",
            world.name,
            world.entity_count()
        );
        self.context = Box::new(EditContext::new(world));
        self.stack.clear();
        self.targets = InteractionTargets::default();
    }
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("world", &self.context.world.name)
            .field("entities", &self.context.world.entity_count())
            .field("stack", &self.stack)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use worldedit_core::math::Vec3;
    use worldedit_world::field;

    use super::*;

    fn settings() -> EditorSettings {
        EditorSettings::from_toml("[world]\nmax_entities = 4\n[history]\nreserve = 16\n").unwrap()
    }

    fn session() -> EditorSession {
        EditorSession::new(&settings())
    }

    #[test]
    fn insert_undo_redo() {
        let mut session = session();
        let id = session
            .insert_entity(Light {
                name: "sun".into(),
                ..Default::default()
            })
            .unwrap();

        assert!(find_entity(session.world(), id).is_some());
        session.undo();
        assert!(find_entity(session.world(), id).is_none());
        assert!(session.can_redo());
        session.redo();
        assert!(find_entity(session.world(), id).is_some());
    }

    #[test]
    fn insert_makes_names_unique() {
        let mut session = session();
        for _ in 0..3 {
            session
                .insert_entity(Region {
                    name: "spawn".into(),
                    ..Default::default()
                })
                .unwrap();
        }
        let names: Vec<_> = session.world().regions.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["spawn", "spawn1", "spawn2"]);
    }

    #[test]
    fn insert_past_capacity_fails() {
        let mut session = session();
        for _ in 0..4 {
            session.insert_entity(Block::default()).unwrap();
        }
        assert_eq!(
            session.insert_entity(Block::default()),
            Err(EditorError::CapacityExceeded {
                kind: EntityKind::Block,
                max: 4
            })
        );
    }

    #[test]
    fn set_value_on_missing_entity_fails() {
        let mut session = session();
        let result = session.set_value(ObjectId::from_raw(2), field!(Object, team: i32), 1);
        assert_eq!(
            result,
            Err(EditorError::EntityNotFound {
                kind: EntityKind::Object,
                id: 2
            })
        );
        assert!(!session.can_undo());
    }

    #[test]
    fn set_value_coalesces_until_closed() {
        let mut session = session();
        let id = session.insert_entity(Object::default()).unwrap();
        let position = field!(Object, position: Vec3);

        session.set_value(id, position, Vec3::new(1.0, 0.0, 0.0)).unwrap();
        session.set_value(id, position, Vec3::new(2.0, 0.0, 0.0)).unwrap();
        session.close_last();
        session.set_value(id, position, Vec3::new(3.0, 0.0, 0.0)).unwrap();
        assert_eq!(session.stack().applied_len(), 3);

        session.undo();
        assert_eq!(find_entity(session.world(), id).unwrap().position, Vec3::new(2.0, 0.0, 0.0));
        session.undo();
        assert_eq!(find_entity(session.world(), id).unwrap().position, Vec3::zeros());
    }

    #[test]
    fn undo_prunes_selection() {
        let mut session = session();
        let id = session.insert_entity(Hintnode::default()).unwrap();
        session.selection_mut().add(id.into());
        session.targets_mut().hovered = Some(id.into());

        session.undo();
        assert!(session.selection().is_empty());
        assert_eq!(session.targets().hovered, None);
    }

    #[test]
    fn oversized_history_reserve_still_starts() {
        let settings = EditorSettings::from_toml(
            "[history]\nreserve = 1000000000000000000\n[world]\nmax_entities = 4\n",
        )
        .unwrap();
        let mut session = EditorSession::new(&settings);
        session.insert_entity(Light::default()).unwrap();
        assert!(session.can_undo());
    }

    #[test]
    fn nothing_to_cancel() {
        let mut session = session();
        assert_eq!(session.cancel_creation(), Err(EditorError::NothingStaged));
        assert_eq!(session.commit_creation(), Err(EditorError::NothingStaged));
    }

    #[test]
    fn empty_path_cannot_be_committed() {
        let mut session = session();
        session.start_creation(Path::default());
        assert_eq!(session.commit_creation(), Err(EditorError::EmptyCreationPath));
    }

    #[test]
    fn set_creation_value_needs_matching_kind() {
        let mut session = session();
        session.start_creation(Light::default());
        assert_eq!(
            session.set_creation_value(field!(Object, team: i32), 3),
            Err(EditorError::NothingStaged)
        );
        session.set_creation_value(field!(Light, range: f32), 8.0).unwrap();
        assert_eq!(session.creation_entity().get::<Light>().range, 8.0);
    }

    #[test]
    fn queued_edits_are_applied_in_order() {
        let mut session = session();
        let id = session.insert_entity(Object::default()).unwrap();
        session.close_last();

        let queue = session.edit_queue();
        let team = field!(Object, team: i32);
        queue.push(Box::new(SetValue::new(id, team, 1, 0)));
        queue.push(Box::new(SetValue::new(id, team, 2, 1)));

        assert_eq!(session.process_queued_edits(), 2);
        assert!(queue.is_empty());
        assert_eq!(find_entity(session.world(), id).unwrap().team, 2);
        assert_eq!(session.process_queued_edits(), 0);
    }

    #[test]
    fn reset_world_drops_history_and_rebinds_classes() {
        let library = Arc::new(RefCountedClassLibrary::new());
        let mut session = EditorSession::with_library(&settings(), library.clone());
        session
            .insert_entity(Object {
                class_name: "old".into(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(library.ref_count("old"), 1);

        let mut world = World::new(session.world().limits());
        world.name = "fresh".into();
        let id = world.acquire_id::<Object>();
        world.objects.push(Object {
            class_name: "new".into(),
            id,
            ..Default::default()
        });

        session.reset_world(world);
        assert_eq!(library.ref_count("old"), 0);
        assert_eq!(library.ref_count("new"), 1);
        assert!(!session.can_undo());
        assert_eq!(session.world().name, "fresh");
        assert!(!session.world().objects[0].class_handle.is_null());
    }
}
