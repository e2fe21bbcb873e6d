//! The staging slot for an entity being placed.
//!
//! Placement tools stage a not-yet-committed entity in a [`CreationEntity`]
//! living inside the long-lived [`EditContext`](crate::EditContext). The
//! slot holds at most one entity of any kind. Moving out of it with
//! [`take`](CreationEntity::take) leaves it empty.

use crate::entities::*;
use crate::world::WorldEntity;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum CreationEntity {
    #[default]
    None,
    Object(Object),
    Light(Light),
    Path(Path),
    Region(Region),
    Sector(Sector),
    Portal(Portal),
    Hintnode(Hintnode),
    Barrier(Barrier),
    PlanningHub(PlanningHub),
    PlanningConnection(PlanningConnection),
    Boundary(Boundary),
    Measurement(Measurement),
    Block(Block),
}

impl CreationEntity {
    /// Whether an entity is staged.
    pub fn holds_entity(&self) -> bool {
        !matches!(self, CreationEntity::None)
    }

    /// Whether the staged entity is of kind `E`.
    pub fn is<E: WorldEntity>(&self) -> bool {
        E::from_creation(self).is_some()
    }

    pub fn kind(&self) -> Option<EntityKind> {
        Some(match self {
            CreationEntity::None => return None,
            CreationEntity::Object(_) => EntityKind::Object,
            CreationEntity::Light(_) => EntityKind::Light,
            CreationEntity::Path(_) => EntityKind::Path,
            CreationEntity::Region(_) => EntityKind::Region,
            CreationEntity::Sector(_) => EntityKind::Sector,
            CreationEntity::Portal(_) => EntityKind::Portal,
            CreationEntity::Hintnode(_) => EntityKind::Hintnode,
            CreationEntity::Barrier(_) => EntityKind::Barrier,
            CreationEntity::PlanningHub(_) => EntityKind::PlanningHub,
            CreationEntity::PlanningConnection(_) => EntityKind::PlanningConnection,
            CreationEntity::Boundary(_) => EntityKind::Boundary,
            CreationEntity::Measurement(_) => EntityKind::Measurement,
            CreationEntity::Block(_) => EntityKind::Block,
        })
    }

    /// The staged entity as `E`.
    ///
    /// # Panics
    ///
    /// Panics if the slot is empty or holds another kind.
    pub fn get<E: WorldEntity>(&self) -> &E {
        match E::from_creation(self) {
            Some(entity) => entity,
            None => panic!(
                "creation entity holds {:?}, expected {}",
                self.kind(),
                E::KIND
            ),
        }
    }

    /// The staged entity as `E`, mutably.
    ///
    /// # Panics
    ///
    /// Panics if the slot is empty or holds another kind.
    pub fn get_mut<E: WorldEntity>(&mut self) -> &mut E {
        let held = self.kind();
        match E::from_creation_mut(self) {
            Some(entity) => entity,
            None => panic!("creation entity holds {held:?}, expected {}", E::KIND),
        }
    }

    pub fn try_get<E: WorldEntity>(&self) -> Option<&E> {
        E::from_creation(self)
    }

    pub fn try_get_mut<E: WorldEntity>(&mut self) -> Option<&mut E> {
        E::from_creation_mut(self)
    }

    /// Moves the staged entity out, leaving the slot empty.
    pub fn take(&mut self) -> CreationEntity {
        std::mem::take(self)
    }

    /// Drops the staged entity, whichever kind it is.
    pub fn clear(&mut self) {
        *self = CreationEntity::None;
    }

    /// Name of the staged entity, if it has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            CreationEntity::None => None,
            CreationEntity::Object(entity) => entity.name(),
            CreationEntity::Light(entity) => entity.name(),
            CreationEntity::Path(entity) => entity.name(),
            CreationEntity::Region(entity) => entity.name(),
            CreationEntity::Sector(entity) => entity.name(),
            CreationEntity::Portal(entity) => entity.name(),
            CreationEntity::Hintnode(entity) => entity.name(),
            CreationEntity::Barrier(entity) => entity.name(),
            CreationEntity::PlanningHub(entity) => entity.name(),
            CreationEntity::PlanningConnection(entity) => entity.name(),
            CreationEntity::Boundary(entity) => entity.name(),
            CreationEntity::Measurement(entity) => entity.name(),
            CreationEntity::Block(entity) => entity.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn starts_empty() {
        let slot = CreationEntity::default();
        assert!(!slot.holds_entity());
        assert_eq!(slot.kind(), None);
        assert!(!slot.is::<Object>());
    }

    #[rstest]
    #[case::object(CreationEntity::from(Object::default()), EntityKind::Object)]
    #[case::light(CreationEntity::from(Light::default()), EntityKind::Light)]
    #[case::path(CreationEntity::from(Path::default()), EntityKind::Path)]
    #[case::sector(CreationEntity::from(Sector::default()), EntityKind::Sector)]
    #[case::planning_connection(
        CreationEntity::from(PlanningConnection::default()),
        EntityKind::PlanningConnection
    )]
    #[case::block(CreationEntity::from(Block::default()), EntityKind::Block)]
    fn from_any_kind(#[case] slot: CreationEntity, #[case] kind: EntityKind) {
        assert!(slot.holds_entity());
        assert_eq!(slot.kind(), Some(kind));
    }

    #[test]
    fn typed_access() {
        let mut slot = CreationEntity::from(Light {
            name: "sun".into(),
            ..Default::default()
        });

        assert!(slot.is::<Light>());
        assert!(!slot.is::<Object>());
        assert_eq!(slot.get::<Light>().name, "sun");
        assert!(slot.try_get::<Object>().is_none());

        slot.get_mut::<Light>().range = 42.0;
        assert_eq!(slot.try_get::<Light>().map(|light| light.range), Some(42.0));
    }

    #[test]
    #[should_panic(expected = "expected object")]
    fn get_wrong_kind_panics() {
        let slot = CreationEntity::from(Light::default());
        slot.get::<Object>();
    }

    #[test]
    #[should_panic(expected = "expected path")]
    fn get_mut_on_empty_panics() {
        let mut slot = CreationEntity::None;
        slot.get_mut::<Path>();
    }

    #[test]
    fn take_leaves_source_empty() {
        let mut slot = CreationEntity::from(Region {
            name: "spawn".into(),
            ..Default::default()
        });

        let moved = slot.take();
        assert!(!slot.holds_entity());
        assert_eq!(moved.name(), Some("spawn"));
        assert!(moved.is::<Region>());
    }

    #[test]
    fn clear_destroys_any_kind() {
        let mut slot = CreationEntity::from(Path {
            nodes: vec![PathNode::default(); 3],
            ..Default::default()
        });
        slot.clear();
        assert_eq!(slot, CreationEntity::None);
    }

    #[test]
    fn blocks_have_no_name() {
        assert_eq!(CreationEntity::from(Block::default()).name(), None);
        assert_eq!(CreationEntity::None.name(), None);
    }
}
